//! Configuration management for the vaultkms key backend

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Host property holding the active master key list
pub const KEY_LIST_PROPERTY_NAME: &str = "parquet.encryption.key.list";

/// Host property holding the master key list staged by a rotation
pub const NEW_KEY_LIST_PROPERTY_NAME: &str = "parquet.encryption.new.key.list";

/// Prefix of environment overrides, e.g. `PARQUET_ENCRYPTION_KEY_LIST`
pub const ENV_PREFIX: &str = "PARQUET_ENCRYPTION";

/// Errors raised while reading host-supplied properties
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Unknown property: {0}")]
    Unknown(String),
}

/// A key list as written in a config file or an environment variable
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeyListValue {
    Entries(Vec<String>),
    Joined(String),
}

impl KeyListValue {
    fn into_entries(self) -> Vec<String> {
        match self {
            KeyListValue::Entries(entries) => entries
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            KeyListValue::Joined(joined) => split_key_list(&joined),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    key_list: Option<KeyListValue>,
    new_key_list: Option<KeyListValue>,
    log_level: Option<String>,
}

/// KMS configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KmsConfig {
    /// `name:base64-secret` entries used at initialization
    pub key_list: Vec<String>,
    /// Entries staged by a key rotation, empty when none is configured
    pub new_key_list: Vec<String>,
    pub log_level: Option<String>,
}

impl KmsConfig {
    /// Load configuration from the environment (and `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load configuration from an optional file, overridden by the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let raw: RawConfig = builder.build()?.try_deserialize()?;
        Ok(raw.into())
    }

    /// Build configuration from flat host properties such as
    /// `parquet.encryption.key.list`. Values are comma-separated lists.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self, PropertyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in properties {
            match name.as_ref() {
                KEY_LIST_PROPERTY_NAME => config.key_list = split_key_list(value.as_ref()),
                NEW_KEY_LIST_PROPERTY_NAME => config.new_key_list = split_key_list(value.as_ref()),
                other => return Err(PropertyError::Unknown(other.to_string())),
            }
        }
        Ok(config)
    }

    pub fn has_new_key_list(&self) -> bool {
        !self.new_key_list.is_empty()
    }

    /// Get log level, defaulting to "info"
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

impl From<RawConfig> for KmsConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            key_list: raw.key_list.map(KeyListValue::into_entries).unwrap_or_default(),
            new_key_list: raw.new_key_list.map(KeyListValue::into_entries).unwrap_or_default(),
            log_level: raw.log_level,
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_key_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect()
}
