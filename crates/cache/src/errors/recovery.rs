//! Recovery utilities for cache errors

use super::types::{CacheError, RecoveryHint};

impl CacheError {
    /// Get the recovery hint for this error
    #[must_use]
    pub const fn recovery_hint(&self) -> &RecoveryHint {
        match self {
            Self::Serialization { recovery_hint, .. }
            | Self::ExpireCallback { recovery_hint, .. }
            | Self::Configuration { recovery_hint, .. }
            | Self::Io { recovery_hint, .. } => recovery_hint,
        }
    }

    /// Check if this error came from a caller-supplied on-expire callback
    #[must_use]
    pub const fn is_callback_failure(&self) -> bool {
        matches!(self, Self::ExpireCallback { .. })
    }

    /// Check if this error indicates a stored value could not be decoded
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::Serialization {
                recovery_hint: RecoveryHint::ClearAndRetry,
                ..
            }
        )
    }
}
