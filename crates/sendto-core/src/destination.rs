//! Resolution results

use crate::{PublicKey, TokenAccountRecord};
use serde::{Deserialize, Serialize};

/// Published outcome of resolving one destination input
///
/// Both fields absent means "unresolved".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Resolved destination key
    pub public_key: Option<PublicKey>,
    /// Token account stored at the destination key, if any
    pub token_account: Option<TokenAccountRecord>,
}

impl ResolutionResult {
    /// Unresolved result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result for a key with an optional token account
    pub fn new(public_key: Option<PublicKey>, token_account: Option<TokenAccountRecord>) -> Self {
        Self {
            public_key,
            token_account,
        }
    }

    /// A destination key was found
    pub fn is_resolved(&self) -> bool {
        self.public_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ResolutionResult::empty();
        assert!(!result.is_resolved());
        assert!(result.token_account.is_none());
        assert_eq!(result, ResolutionResult::default());
    }

    #[test]
    fn test_result_json_shape() {
        let key = PublicKey::new([3u8; 32]);
        let json = serde_json::to_value(ResolutionResult::new(Some(key), None)).unwrap();
        assert_eq!(json["public_key"], serde_json::Value::String(key.to_string()));
        assert!(json["token_account"].is_null());
    }
}
