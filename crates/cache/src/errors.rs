//! Error handling for the cache system
//!
//! Every error carries a [`RecoveryHint`] so callers can decide whether to
//! retry, fall back to a default, or surface the failure.

mod conversions;
mod recovery;
mod types;

pub use types::*;
