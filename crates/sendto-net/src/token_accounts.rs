//! Token account lookup over JSON-RPC

use crate::{AccountInfo, RpcClient};
use async_trait::async_trait;
use sendto_core::{
    PublicKey, TokenAccountFetcher, TokenAccountRecord, TokenProgram, TOKEN_ACCOUNT_LEN,
};
use std::sync::Arc;
use tracing::debug;

/// Interpret a fetched account as a token account
///
/// Missing accounts, accounts not owned by a token program and token program
/// accounts too short to be token accounts (mints) are absent, not errors.
pub fn token_account_from_info(
    key: PublicKey,
    info: Option<AccountInfo>,
) -> sendto_core::Result<Option<TokenAccountRecord>> {
    let Some(info) = info else {
        debug!("No account at {}", key);
        return Ok(None);
    };

    let Some(program) = TokenProgram::from_program_id(&info.owner) else {
        debug!("{} is owned by {}, not a token account", key, info.owner);
        return Ok(None);
    };

    let data = info.decode_data()?;
    if data.len() < TOKEN_ACCOUNT_LEN {
        debug!("{} holds {} bytes, not a token account", key, data.len());
        return Ok(None);
    }

    TokenAccountRecord::unpack(key, program, &data)
}

/// [`TokenAccountFetcher`] backed by `getAccountInfo`
#[derive(Clone)]
pub struct RpcTokenAccountFetcher {
    rpc: Arc<RpcClient>,
}

impl RpcTokenAccountFetcher {
    /// Create fetcher over a shared client
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl TokenAccountFetcher for RpcTokenAccountFetcher {
    async fn fetch_token_account(
        &self,
        key: &PublicKey,
    ) -> sendto_core::Result<Option<TokenAccountRecord>> {
        let info = self.rpc.get_account_info(key).await?;
        token_account_from_info(*key, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use sendto_core::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};

    fn token_account_info(owner_program: &str, mint: [u8; 32], amount: u64) -> AccountInfo {
        let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
        data[..32].copy_from_slice(&mint);
        data[32..64].copy_from_slice(&[4u8; 32]);
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1;

        AccountInfo {
            lamports: 2_039_280,
            owner: owner_program.to_string(),
            data: (
                base64::engine::general_purpose::STANDARD.encode(&data),
                "base64".to_string(),
            ),
            executable: false,
        }
    }

    #[test]
    fn test_token_account_decoded() {
        let key = PublicKey::new([1u8; 32]);
        let info = token_account_info(TOKEN_PROGRAM_ID, [7u8; 32], 250);
        let record = token_account_from_info(key, Some(info)).unwrap().unwrap();

        assert_eq!(record.address, key);
        assert_eq!(record.mint, PublicKey::new([7u8; 32]));
        assert_eq!(record.owner, PublicKey::new([4u8; 32]));
        assert_eq!(record.amount, 250);
        assert_eq!(record.program, TokenProgram::Legacy);
    }

    #[test]
    fn test_token_2022_account() {
        let key = PublicKey::new([1u8; 32]);
        let info = token_account_info(TOKEN_2022_PROGRAM_ID, [7u8; 32], 1);
        let record = token_account_from_info(key, Some(info)).unwrap().unwrap();
        assert_eq!(record.program, TokenProgram::Token2022);
    }

    #[test]
    fn test_plain_wallet_is_absent() {
        let key = PublicKey::new([1u8; 32]);
        assert!(token_account_from_info(key, None).unwrap().is_none());

        let system_owned = AccountInfo {
            lamports: 1_000_000_000,
            owner: "11111111111111111111111111111111".to_string(),
            data: (String::new(), "base64".to_string()),
            executable: false,
        };
        assert!(token_account_from_info(key, Some(system_owned)).unwrap().is_none());
    }

    #[test]
    fn test_short_token_data_is_absent() {
        let key = PublicKey::new([1u8; 32]);
        let info = AccountInfo {
            lamports: 1,
            owner: TOKEN_PROGRAM_ID.to_string(),
            data: ("AQID".to_string(), "base64".to_string()),
            executable: false,
        };
        assert!(token_account_from_info(key, Some(info)).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_token_data_is_error() {
        let key = PublicKey::new([1u8; 32]);
        let mut info = token_account_info(TOKEN_PROGRAM_ID, [7u8; 32], 1);
        let mut data = info.decode_data().unwrap();
        data[108] = 9;
        info.data.0 = base64::engine::general_purpose::STANDARD.encode(&data);

        assert!(token_account_from_info(key, Some(info)).is_err());
    }
}
