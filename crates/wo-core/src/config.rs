//! Configuration types and loading

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traits::SYSTEM_ACTOR;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Lifecycle manager behaviour
    pub lifecycle: LifecycleConfig,

    /// Backing store behaviour
    pub store: StoreConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LifecycleConfig {
    /// What `remove_sub_item` does when the item id is absent
    pub missing_item_policy: MissingItemPolicy,
    /// Actor written to audit fields when the caller has no login
    pub default_actor: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            missing_item_policy: MissingItemPolicy::Ignore,
            default_actor: SYSTEM_ACTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StoreConfig {
    /// Compare `lock_version` on every write; off means last write wins
    pub optimistic_locking: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            optimistic_locking: true,
        }
    }
}

/// Behaviour of sub-item removal when the id is not in the collection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    /// Silent no-op; the stored aggregate is returned untouched
    #[default]
    Ignore,
    /// Fail with `NotFound`
    Reject,
}

impl FromStr for MissingItemPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::InvalidValue {
                key: "WO_MISSING_ITEM_POLICY".to_string(),
                message: format!("expected 'ignore' or 'reject', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for MissingItemPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,wo_services=debug,wo_store=debug".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for crate::error::WoError {
    fn from(err: ConfigError) -> Self {
        crate::error::WoError::Config(err.to_string())
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let parse_bool = |key: &str, v: String| match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a boolean, got '{}'", other),
            }),
        };

        // Lifecycle
        if let Some(policy) = lookup("WO_MISSING_ITEM_POLICY") {
            config.lifecycle.missing_item_policy = policy.parse()?;
        }
        if let Some(actor) = lookup("WO_DEFAULT_ACTOR") {
            if !actor.trim().is_empty() {
                config.lifecycle.default_actor = actor;
            }
        }

        // Store
        if let Some(v) = lookup("WO_OPTIMISTIC_LOCKING") {
            config.store.optimistic_locking = parse_bool("WO_OPTIMISTIC_LOCKING", v)?;
        }

        // Logging
        if let Some(filter) = lookup("WO_LOG_FILTER") {
            config.logging.filter = filter;
        }
        if let Some(format) = lookup("WO_LOG_FORMAT") {
            config.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "WO_LOG_FORMAT".to_string(),
                        message: format!("expected 'text' or 'json', got '{}'", other),
                    })
                }
            };
        }

        Ok(config)
    }
}
