//! Destination resolution controller
//!
//! Turns a destination string that changes as the user types into a settled
//! `{ public_key, token_account }` pair: debounces input changes, runs the
//! classify / resolve / token-lookup pipeline, and drops results that belong
//! to superseded input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cancel;
pub mod config;
pub mod controller;
pub mod error;
pub mod pipeline;

pub use cancel::CancelToken;
pub use config::{ResolverConfig, DEFAULT_QUIET_PERIOD_MS, ENV_QUIET_PERIOD_MS, ENV_RPC_URL};
pub use controller::{ControllerPhase, DestinationController, DestinationUpdate};
pub use error::{Error, Result};
pub use pipeline::DestinationPipeline;
