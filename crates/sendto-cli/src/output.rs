//! JSON reports printed to stdout

use sendto_core::{RecordedEvent, ResolutionEvent, ResolutionResult, Strategy, StrategyKind};
use sendto_resolver::DestinationUpdate;
use serde::Serialize;

/// Foreign-TLD domains resolve only from `tld_overrides`
pub const FOREIGN_TLD_NOTE: &str =
    "foreign-TLD domains resolve only from tld_overrides in the config file";

/// One-shot resolution outcome
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub input: String,
    pub strategy: StrategyKind,
    #[serde(flatten)]
    pub result: ResolutionResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl ResolveReport {
    pub fn new(
        input: &str,
        strategy: StrategyKind,
        result: ResolutionResult,
        failures: Vec<FailureReport>,
    ) -> Self {
        let note = (strategy == StrategyKind::ForeignTld && result.public_key.is_none())
            .then_some(FOREIGN_TLD_NOTE);

        Self {
            input: input.to_string(),
            strategy,
            result,
            failures,
            note,
        }
    }
}

/// Lookup that failed and was reported as absent
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub at: String,
    pub stage: String,
    pub error: String,
}

impl FailureReport {
    pub fn from_recorded(events: &[RecordedEvent]) -> Vec<Self> {
        events
            .iter()
            .filter_map(|recorded| match &recorded.event {
                ResolutionEvent::LookupFailed { stage, error, .. } => Some(Self {
                    at: recorded.at.to_rfc3339(),
                    stage: stage.to_string(),
                    error: error.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// Result published while watching
#[derive(Debug, Serialize)]
pub struct WatchReport {
    pub input: String,
    #[serde(flatten)]
    pub result: ResolutionResult,
}

impl From<DestinationUpdate> for WatchReport {
    fn from(update: DestinationUpdate) -> Self {
        Self {
            input: update.input,
            result: update.result,
        }
    }
}

/// Strategy chosen for an input
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub input: String,
    pub strategy: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,
}

impl ClassifyReport {
    pub fn new(input: &str, strategy: &Strategy) -> Self {
        let (domain, tld) = match strategy {
            Strategy::RawKey => (None, None),
            Strategy::NativeDomain { domain } => (Some(domain.clone()), None),
            Strategy::ForeignTld { domain, tld } => (Some(domain.clone()), Some(tld.clone())),
        };

        Self {
            input: input.to_string(),
            strategy: strategy.kind(),
            domain,
            tld,
        }
    }
}
