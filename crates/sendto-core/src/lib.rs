//! sendto core types
//!
//! This crate holds the destination data model (public keys, token account
//! snapshots, resolution results), the input classifier that picks a resolver
//! strategy, cluster parameters, and the structured resolution event log.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod cluster;
pub mod destination;
pub mod error;
pub mod events;
pub mod pubkey;
pub mod token;

pub use classify::{
    classify, split_domain_tld, Strategy, StrategyKind, MIN_DOMAIN_INPUT_LEN, NATIVE_SUFFIX,
};
pub use cluster::Cluster;
pub use destination::ResolutionResult;
pub use error::{Error, Result};
pub use events::{
    LookupStage, RecordedEvent, ResolutionEvent, ResolutionLog, DEFAULT_EVENT_LOG_CAPACITY,
};
pub use pubkey::{PublicKey, PUBLIC_KEY_LEN};
pub use token::{
    AccountState, TokenAccountFetcher, TokenAccountRecord, TokenProgram, TOKEN_2022_PROGRAM_ID,
    TOKEN_ACCOUNT_LEN, TOKEN_PROGRAM_ID,
};
