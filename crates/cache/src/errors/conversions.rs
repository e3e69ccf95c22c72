//! Error conversion utilities

use super::types::{CacheError, RecoveryHint, SerializationOp};

/// Stored bincode values that are not valid base64 are corrupt entries
impl From<base64::DecodeError> for CacheError {
    fn from(error: base64::DecodeError) -> Self {
        Self::Serialization {
            key: String::new(),
            operation: SerializationOp::Decode,
            source: Box::new(error),
            recovery_hint: RecoveryHint::ClearAndRetry,
        }
    }
}
