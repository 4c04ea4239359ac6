//! Native domain lookup via the SNS SDK proxy

use crate::{Error, NetworkConfig, Result};
use async_trait::async_trait;
use sendto_core::PublicKey;
use sendto_name_resolution::NativeDomainLookup;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct ProxyResponse {
    s: String,
    #[serde(default)]
    result: serde_json::Value,
}

/// Parse a proxy `/resolve` body
///
/// `{"s":"ok","result":"<owner>"}` resolves; `{"s":"error",...}` is an
/// unregistered name.
pub(crate) fn parse_resolve_response(body: &str) -> Result<Option<PublicKey>> {
    let response: ProxyResponse = serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("malformed proxy body: {}", e)))?;

    match response.s.as_str() {
        "ok" => {
            let owner = response
                .result
                .as_str()
                .ok_or_else(|| Error::InvalidResponse("owner is not a string".to_string()))?;
            Ok(Some(owner.parse()?))
        }
        "error" => {
            debug!("SNS proxy: {}", response.result);
            Ok(None)
        }
        other => Err(Error::InvalidResponse(format!("unknown status {:?}", other))),
    }
}

/// [`NativeDomainLookup`] over the SNS SDK proxy HTTP API
#[derive(Clone)]
pub struct SnsProxyClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl SnsProxyClient {
    /// Create client from configuration
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        let base_url = reqwest::Url::parse(&config.sns_proxy_url)
            .map_err(|e| Error::Config(format!("sns_proxy_url: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Lookup URL for a name
    pub fn resolve_url(&self, name: &str) -> Result<reqwest::Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("cannot append path to {}", self.base_url)))?
            .pop_if_empty()
            .push("resolve")
            .push(name);
        Ok(url)
    }

    /// Resolve a name (without suffix) to its owner
    pub async fn resolve(&self, name: &str) -> Result<Option<PublicKey>> {
        let url = self.resolve_url(name)?;
        debug!("Resolving {}.sol via {}", name, url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::InvalidResponse(format!("SNS proxy returned HTTP {}", status)));
        }

        parse_resolve_response(&body)
    }
}

#[async_trait]
impl NativeDomainLookup for SnsProxyClient {
    async fn resolve_native_domain(
        &self,
        name: &str,
    ) -> sendto_name_resolution::Result<Option<PublicKey>> {
        Ok(self.resolve(name).await?)
    }
}
