//! Minimal JSON-RPC client for account reads

use crate::{Commitment, Error, NetworkConfig, Result};
use base64::Engine as _;
use sendto_core::PublicKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

/// Account as returned by `getAccountInfo` with base64 encoding
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Balance in lamports
    pub lamports: u64,
    /// Owning program (base58)
    pub owner: String,
    /// `[data, encoding]`
    pub data: (String, String),
    /// Executable flag
    pub executable: bool,
}

impl AccountInfo {
    /// Decode the account data
    pub fn decode_data(&self) -> Result<Vec<u8>> {
        let (data, encoding) = &self.data;
        if encoding != "base64" {
            return Err(Error::InvalidResponse(format!(
                "unexpected data encoding {}",
                encoding
            )));
        }
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| Error::InvalidResponse(format!("account data: {}", e)))
    }
}

/// Parse a JSON-RPC response body
pub(crate) fn parse_rpc_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: RpcResponse<T> = serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("malformed JSON-RPC body: {}", e)))?;

    if let Some(error) = response.error {
        return Err(Error::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    response
        .result
        .ok_or_else(|| Error::InvalidResponse("missing result".to_string()))
}

/// JSON-RPC client
///
/// Cheap to share behind an `Arc`; concurrent calls do not contend.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    commitment: Commitment,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create client from configuration
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.rpc_url().to_string(),
            commitment: config.commitment,
            next_id: AtomicU64::new(1),
        })
    }

    /// RPC endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<P: Serialize, T: DeserializeOwned>(&self, method: &str, params: P) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("RPC {} #{} -> {}", method, id, self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::InvalidResponse(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        parse_rpc_response(&body)
    }

    /// Fetch an account, `None` when it does not exist
    pub async fn get_account_info(&self, key: &PublicKey) -> Result<Option<AccountInfo>> {
        let params = json!([
            key.to_string(),
            { "encoding": "base64", "commitment": self.commitment.as_str() }
        ]);
        let result: WithContext<Option<AccountInfo>> = self.call("getAccountInfo", params).await?;
        Ok(result.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_info() {
        let body = r#"{
            "jsonrpc": "2.0",
            "result": {
                "context": { "apiVersion": "2.0.15", "slot": 341197053 },
                "value": {
                    "data": ["AQID", "base64"],
                    "executable": false,
                    "lamports": 2039280,
                    "owner": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                    "rentEpoch": 18446744073709551615,
                    "space": 165
                }
            },
            "id": 1
        }"#;

        let result: WithContext<Option<AccountInfo>> = parse_rpc_response(body).unwrap();
        let info = result.value.unwrap();
        assert_eq!(info.lamports, 2_039_280);
        assert_eq!(info.decode_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_missing_account() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":null},"id":1}"#;
        let result: WithContext<Option<AccountInfo>> = parse_rpc_response(body).unwrap();
        assert!(result.value.is_none());
    }

    #[test]
    fn test_parse_rpc_error() {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "error": { "code": -32602, "message": "Invalid param: WrongSize" },
            "id": 1,
        })
        .to_string();
        let result: Result<WithContext<Option<AccountInfo>>> = parse_rpc_response(&body);
        assert!(matches!(result, Err(Error::Rpc { code: -32602, .. })));

        let result: Result<WithContext<Option<AccountInfo>>> = parse_rpc_response("<html>");
        assert!(matches!(result, Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn test_unexpected_encoding() {
        let info = AccountInfo {
            lamports: 0,
            owner: "11111111111111111111111111111111".to_string(),
            data: ("".to_string(), "jsonParsed".to_string()),
            executable: false,
        };
        assert!(info.decode_data().is_err());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = NetworkConfig {
            rpc_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(RpcClient::new(&config), Err(Error::Config(_))));
    }
}
