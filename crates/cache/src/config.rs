//! Cache configuration management with precedence and validation
use crate::errors::{CacheError, RecoveryHint, Result};
use crate::eviction::EvictionStrategy;
use crate::serialization::SerializationFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a JSON configuration file
pub const CONFIG_FILE_ENV: &str = "QIKS_CONFIG_FILE";
pub const MAX_ENTRIES_ENV: &str = "QIKS_MAX_ENTRIES";
pub const EVICTION_POLICY_ENV: &str = "QIKS_EVICTION_POLICY";
pub const DEFAULT_TTL_ENV: &str = "QIKS_DEFAULT_TTL_MS";
pub const SERIALIZATION_ENV: &str = "QIKS_SERIALIZATION";

/// Configuration for a single cache instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction kicks in; `None` is unbounded
    pub max_entries: Option<usize>,
    /// Eviction algorithm
    pub eviction_policy: EvictionStrategy,
    /// TTL applied when a write does not specify one
    #[serde(
        rename = "default_ttl_ms",
        with = "crate::serialization::option_duration_as_millis"
    )]
    pub default_ttl: Option<Duration>,
    /// Encoding used for stored values
    pub serialization: SerializationFormat,
    /// Where this configuration came from
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            eviction_policy: EvictionStrategy::default(),
            default_ttl: None,
            serialization: SerializationFormat::default(),
            source: ConfigSource::Default,
        }
    }
}

impl CacheConfig {
    /// Reject settings no cache can operate with
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == Some(0) {
            return Err(CacheError::invalid_setting(
                "max_entries must be greater than zero",
                "unset",
            ));
        }
        Ok(())
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Default configuration
    #[default]
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Built in code
    Builder,
}

/// Builder for creating cache configurations
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CacheConfig {
                source: ConfigSource::Builder,
                ..CacheConfig::default()
            },
        }
    }

    /// Set maximum entry count
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = Some(max_entries);
        self
    }

    /// Set eviction policy
    pub fn with_eviction_policy(mut self, strategy: EvictionStrategy) -> Self {
        self.config.eviction_policy = strategy;
        self
    }

    /// Set TTL applied to writes without their own
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.config.default_ttl = Some(ttl);
        self
    }

    /// Set stored value encoding
    pub fn with_serialization(mut self, format: SerializationFormat) -> Self {
        self.config.serialization = format;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<CacheConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for CacheConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration loader that handles precedence
pub struct CacheConfigLoader;

impl CacheConfigLoader {
    /// Load configuration: defaults, then config file, then environment
    pub fn load() -> Result<CacheConfig> {
        let mut config = CacheConfig::default();

        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                config = Self::load_from_file(&path)?;
            } else {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
            }
        }

        config = Self::apply_env(config)?;
        config.validate()?;

        tracing::info!(
            max_entries = ?config.max_entries,
            eviction_policy = %config.eviction_policy,
            serialization = %config.serialization,
            source = ?config.source,
            "cache configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<CacheConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            operation: "read config file",
            source: e,
            recovery_hint: RecoveryHint::CheckPermissions {
                path: path.to_path_buf(),
            },
        })?;

        let mut config: CacheConfig =
            serde_json::from_str(&content).map_err(|e| CacheError::Configuration {
                message: format!("Failed to parse config file {}: {e}", path.display()),
                recovery_hint: RecoveryHint::Manual {
                    instructions: "Check config file syntax".to_string(),
                },
            })?;
        config.source = ConfigSource::ConfigFile(path.to_path_buf());
        Ok(config)
    }

    /// Override values with environment variables
    fn apply_env(mut config: CacheConfig) -> Result<CacheConfig> {
        let mut has_env_config = false;

        if let Ok(max_entries) = std::env::var(MAX_ENTRIES_ENV) {
            let parsed = max_entries.trim().parse().map_err(|_| {
                CacheError::invalid_setting(
                    format!("{MAX_ENTRIES_ENV} is not a valid entry count: {max_entries}"),
                    "unset",
                )
            })?;
            config.max_entries = Some(parsed);
            has_env_config = true;
        }

        if let Ok(policy) = std::env::var(EVICTION_POLICY_ENV) {
            config.eviction_policy = policy.parse()?;
            has_env_config = true;
        }

        if let Ok(ttl) = std::env::var(DEFAULT_TTL_ENV) {
            let millis: u64 = ttl.trim().parse().map_err(|_| {
                CacheError::invalid_setting(
                    format!("{DEFAULT_TTL_ENV} is not a valid millisecond count: {ttl}"),
                    "unset",
                )
            })?;
            config.default_ttl = Some(Duration::from_millis(millis));
            has_env_config = true;
        }

        if let Ok(format) = std::env::var(SERIALIZATION_ENV) {
            config.serialization = format.parse()?;
            has_env_config = true;
        }

        if has_env_config {
            config.source = ConfigSource::EnvironmentVariable("QIKS_*".to_string());
        }
        Ok(config)
    }
}
