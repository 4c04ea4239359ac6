//! Name resolution for destination inputs
//!
//! Supports raw base58 keys, native `.sol` domains and foreign-TLD domains.
//! Every strategy fails closed: malformed input and failed lookups resolve to
//! `None` instead of an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod foreign;
pub mod lookup;
pub mod native;
pub mod raw;
pub mod registry;

pub use dispatch::NameResolver;
pub use foreign::ForeignTldResolver;
pub use lookup::{NativeDomainLookup, ResolverStrategy, TldRegistry};
pub use native::{native_label, NativeDomainResolver};
pub use raw::RawKeyResolver;
pub use registry::StaticTldRegistry;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resolution error
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Invalid name
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] sendto_core::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
