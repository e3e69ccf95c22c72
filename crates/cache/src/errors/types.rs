//! Core error types for the cache system

use std::fmt;
use std::path::PathBuf;

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Re-export CacheError as Error for convenience
pub use CacheError as Error;

/// Error type returned by caller-supplied on-expire callbacks
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Encoding or decoding a stored value failed
    #[error("failed to {operation} cache entry '{key}': {source}")]
    Serialization {
        key: String,
        operation: SerializationOp,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        recovery_hint: RecoveryHint,
    },

    /// An on-expire callback returned an error while its entry was evicted
    #[error("on-expire callback for evicted entry '{key}' failed: {source}")]
    ExpireCallback {
        key: String,
        #[source]
        source: CallbackError,
        recovery_hint: RecoveryHint,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// I/O errors while loading configuration
    #[error("I/O error during {operation} on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
        recovery_hint: RecoveryHint,
    },
}

impl CacheError {
    /// Build a configuration error that suggests falling back to `default`
    pub fn invalid_setting(message: impl Into<String>, default: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            recovery_hint: RecoveryHint::UseDefault {
                value: default.into(),
            },
        }
    }

    /// Build a serialization error for a value that has no key yet
    pub fn serialization(
        operation: SerializationOp,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Serialization {
            key: String::new(),
            operation,
            source: source.into(),
            recovery_hint: RecoveryHint::ClearAndRetry,
        }
    }

    /// Attach the offending key to a serialization error
    #[must_use]
    pub fn with_key(self, key: impl Into<String>) -> Self {
        match self {
            Self::Serialization {
                operation,
                source,
                recovery_hint,
                ..
            } => Self::Serialization {
                key: key.into(),
                operation,
                source,
                recovery_hint,
            },
            other => other,
        }
    }
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryHint {
    /// Use a default value
    UseDefault { value: String },

    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Drop the affected entries and store them again
    ClearAndRetry,

    /// Fix the caller-supplied callback
    FixCallback,

    /// No automated recovery possible
    Manual { instructions: String },

    /// Operation can be safely ignored
    Ignore,
}

/// Serialization operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationOp {
    Serialize,
    Deserialize,
    Encode,
    Decode,
}

impl fmt::Display for SerializationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize => f.write_str("serialize"),
            Self::Deserialize => f.write_str("deserialize"),
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}
