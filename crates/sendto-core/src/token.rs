//! Token account snapshots and the fetch collaborator

use crate::{Error, PublicKey, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// SPL token program
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Token-2022 program
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

/// Size of the base token account layout
pub const TOKEN_ACCOUNT_LEN: usize = 165;

const MINT_OFFSET: usize = 0;
const OWNER_OFFSET: usize = 32;
const AMOUNT_OFFSET: usize = 64;
const STATE_OFFSET: usize = 108;

/// Token-2022 writes an account-type byte right after the base layout
const ACCOUNT_TYPE_OFFSET: usize = TOKEN_ACCOUNT_LEN;
const ACCOUNT_TYPE_ACCOUNT: u8 = 2;

/// Program owning a token account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenProgram {
    /// Original SPL token program
    Legacy,
    /// Token-2022 (token extensions)
    Token2022,
}

impl TokenProgram {
    /// Match an account owner against the known token programs
    pub fn from_program_id(program_id: &str) -> Option<Self> {
        match program_id {
            TOKEN_PROGRAM_ID => Some(TokenProgram::Legacy),
            TOKEN_2022_PROGRAM_ID => Some(TokenProgram::Token2022),
            _ => None,
        }
    }

    /// Base58 program id
    pub const fn program_id(&self) -> &'static str {
        match self {
            TokenProgram::Legacy => TOKEN_PROGRAM_ID,
            TokenProgram::Token2022 => TOKEN_2022_PROGRAM_ID,
        }
    }
}

/// Token account state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    /// Usable
    Initialized,
    /// Frozen by the mint's freeze authority
    Frozen,
}

/// Snapshot of an on-chain token account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountRecord {
    /// Account address
    pub address: PublicKey,
    /// Wallet that owns the tokens
    pub owner: PublicKey,
    /// Token mint
    pub mint: PublicKey,
    /// Raw balance in base units
    pub amount: u64,
    /// Account state
    pub state: AccountState,
    /// Owning token program
    pub program: TokenProgram,
}

impl TokenAccountRecord {
    /// Decode token account data
    ///
    /// Returns `Ok(None)` for data that belongs to the token program but is
    /// not an initialized token account (uninitialized accounts, Token-2022
    /// mints with extensions).
    pub fn unpack(address: PublicKey, program: TokenProgram, data: &[u8]) -> Result<Option<Self>> {
        if data.len() < TOKEN_ACCOUNT_LEN {
            return Err(Error::InvalidAccountData(format!(
                "{} bytes, token accounts are at least {}",
                data.len(),
                TOKEN_ACCOUNT_LEN
            )));
        }

        if data.len() > TOKEN_ACCOUNT_LEN {
            if program == TokenProgram::Legacy {
                return Err(Error::InvalidAccountData(format!(
                    "{} bytes for a legacy token account",
                    data.len()
                )));
            }
            if data[ACCOUNT_TYPE_OFFSET] != ACCOUNT_TYPE_ACCOUNT {
                return Ok(None);
            }
        }

        let state = match data[STATE_OFFSET] {
            0 => return Ok(None),
            1 => AccountState::Initialized,
            2 => AccountState::Frozen,
            other => {
                return Err(Error::InvalidAccountData(format!(
                    "unknown account state {}",
                    other
                )))
            }
        };

        let mint = PublicKey::try_from_slice(&data[MINT_OFFSET..OWNER_OFFSET])?;
        let owner = PublicKey::try_from_slice(&data[OWNER_OFFSET..AMOUNT_OFFSET])?;
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8]);

        Ok(Some(Self {
            address,
            owner,
            mint,
            amount: u64::from_le_bytes(amount),
            state,
            program,
        }))
    }

    /// Frozen accounts cannot receive transfers
    pub fn is_frozen(&self) -> bool {
        self.state == AccountState::Frozen
    }
}

/// Token account fetch collaborator
#[async_trait]
pub trait TokenAccountFetcher: Send + Sync {
    /// Fetch the token account stored at `key`
    ///
    /// `Ok(None)` means the key is not a token account (a plain wallet).
    async fn fetch_token_account(&self, key: &PublicKey) -> Result<Option<TokenAccountRecord>>;
}
