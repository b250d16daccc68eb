//! Payload store configuration.

use crate::layout::HEADER_LEN;
use artmint_common::DEFAULT_CONTRACT_SIZE_LIMIT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env::{self, VarError};
use thiserror::Error;

/// Env var overriding [`StoreConfig::max_object_size`].
pub const MAX_OBJECT_SIZE_ENV: &str = "ARTMINT_MAX_OBJECT_SIZE";

/// Errors raised while loading a [`StoreConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The settings blob has no `payloadStore` section.
    #[error("missing payloadStore config")]
    Missing,
    /// The section or variable could not be parsed.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// The environment variable is set but blank.
    #[error("environment variable {var} is empty")]
    EmptyEnv {
        /// Name of the environment variable.
        var: String,
    },
    /// The size limit leaves no room for the header.
    #[error("max object size {size} leaves no room after the {header} byte header", header = HEADER_LEN)]
    SizeBelowHeader {
        /// Rejected limit.
        size: usize,
    },
}

/// Limits applied by a [`crate::PayloadStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Largest stored object in bytes, header included.
    #[serde(default = "default_max_object_size")]
    pub max_object_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_object_size: default_max_object_size() }
    }
}

impl StoreConfig {
    /// Creates a config with the given object size limit.
    pub const fn new(max_object_size: usize) -> Self {
        Self { max_object_size }
    }

    /// Largest payload that fits in a single object.
    pub const fn max_payload_size(&self) -> usize {
        self.max_object_size.saturating_sub(HEADER_LEN)
    }

    /// Checks that the limit leaves room for at least one payload byte.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_object_size <= HEADER_LEN {
            return Err(ConfigError::SizeBelowHeader { size: self.max_object_size });
        }
        Ok(self)
    }

    /// Reads the `payloadStore` section of a JSON settings blob.
    ///
    /// Expected shape:
    /// {
    ///   "payloadStore": { "maxObjectSize": 24576 }
    /// }
    pub fn from_json(settings: &Value) -> Result<Self, ConfigError> {
        let section = settings.get("payloadStore").ok_or(ConfigError::Missing)?;
        let config: Self = serde_json::from_value(section.clone())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()
    }

    /// Defaults overridden by `ARTMINT_MAX_OBJECT_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = match env::var(MAX_OBJECT_SIZE_ENV) {
            Ok(raw) => raw,
            Err(VarError::NotPresent) => return Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::Invalid(format!("{MAX_OBJECT_SIZE_ENV} is not unicode")))
            }
        };
        if raw.trim().is_empty() {
            return Err(ConfigError::EmptyEnv { var: MAX_OBJECT_SIZE_ENV.into() });
        }
        let size = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::Invalid(format!("{MAX_OBJECT_SIZE_ENV}: {e}")))?;
        Self::new(size).validate()
    }
}

const fn default_max_object_size() -> usize {
    DEFAULT_CONTRACT_SIZE_LIMIT
}
