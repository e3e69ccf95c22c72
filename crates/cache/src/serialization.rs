//! Value serializers and serde helpers
//!
//! Cached values are stored in an encoded string form so that eviction
//! callbacks can decode them uniformly, whatever the value type.

use crate::errors::{CacheError, Result, SerializationOp};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pure, stateless encode/decode pair for cached values.
///
/// Implementations must satisfy the round-trip law:
/// `deserialize(serialize(x))` is observably equal to `x` for every value
/// type the cache accepts.
pub trait ValueSerializer {
    /// Encode a value into its stored string form
    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<String>;

    /// Decode a stored string back into its original value
    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T>;
}

/// JSON encoding via `serde_json`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl ValueSerializer for JsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        serde_json::to_string(data)
            .map_err(|e| CacheError::serialization(SerializationOp::Serialize, e))
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        serde_json::from_str(data)
            .map_err(|e| CacheError::serialization(SerializationOp::Deserialize, e))
    }
}

/// Compact binary encoding via `bincode`, carried as base64 text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BincodeSerializer;

impl ValueSerializer for BincodeSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let bytes = bincode::serialize(data)
            .map_err(|e| CacheError::serialization(SerializationOp::Encode, e))?;
        Ok(STANDARD.encode(bytes))
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        let bytes = STANDARD.decode(data)?;
        bincode::deserialize(&bytes)
            .map_err(|e| CacheError::serialization(SerializationOp::Decode, e))
    }
}

/// Serializer selected at runtime from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    #[default]
    Json,
    Bincode,
}

impl ValueSerializer for SerializationFormat {
    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        match self {
            Self::Json => JsonSerializer.serialize(data),
            Self::Bincode => BincodeSerializer.serialize(data),
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        match self {
            Self::Json => JsonSerializer.deserialize(data),
            Self::Bincode => BincodeSerializer.deserialize(data),
        }
    }
}

impl FromStr for SerializationFormat {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "bincode" => Ok(Self::Bincode),
            _ => Err(CacheError::invalid_setting(
                format!("Unknown serialization format: {s}"),
                "json",
            )),
        }
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Bincode => f.write_str("bincode"),
        }
    }
}

/// Serialize an `Option<Duration>` as whole milliseconds
pub mod option_duration_as_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => (d.as_millis() as u64).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
