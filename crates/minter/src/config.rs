use alloy_primitives::Address;
use artmint_common::{NATIVE_CURRENCY_ADDRESS, NATIVE_CURRENCY_SYMBOL};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env::{self, VarError};
use thiserror::Error;

/// Env var overriding [`MinterConfig::minter_type`].
pub const MINTER_TYPE_ENV: &str = "ARTMINT_MINTER_TYPE";
/// Env var overriding [`MinterConfig::currency_symbol`].
pub const CURRENCY_SYMBOL_ENV: &str = "ARTMINT_CURRENCY_SYMBOL";

/// Errors raised while loading a [`MinterConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The settings blob has no `allowlistMinter` section.
    #[error("missing allowlistMinter config")]
    Missing,
    /// The section or an environment variable could not be parsed.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// An environment variable is set but blank.
    #[error("environment variable {var} is empty")]
    EmptyEnv {
        /// Name of the environment variable.
        var: String,
    },
}

/// Static configuration of an allowlist minter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinterConfig {
    /// Name reported by [`crate::AllowlistMinter::minter_type`].
    #[serde(default = "default_minter_type")]
    pub minter_type: String,
    /// Symbol reported in price info.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Currency handle reported in price info.
    #[serde(default)]
    pub currency_address: Address,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            minter_type: default_minter_type(),
            currency_symbol: default_currency_symbol(),
            currency_address: NATIVE_CURRENCY_ADDRESS,
        }
    }
}

impl MinterConfig {
    /// Reads the `allowlistMinter` section of a JSON settings blob.
    ///
    /// Expected shape:
    /// {
    ///   "allowlistMinter": { "minterType": "MinterMerkleV0", "currencySymbol": "ETH" }
    /// }
    pub fn from_json(settings: &Value) -> Result<Self, ConfigError> {
        let section = settings.get("allowlistMinter").ok_or(ConfigError::Missing)?;
        serde_json::from_value(section.clone()).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Defaults overridden by `ARTMINT_MINTER_TYPE` and `ARTMINT_CURRENCY_SYMBOL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(minter_type) = env_override(MINTER_TYPE_ENV)? {
            config.minter_type = minter_type;
        }
        if let Some(symbol) = env_override(CURRENCY_SYMBOL_ENV)? {
            config.currency_symbol = symbol;
        }
        Ok(config)
    }
}

fn env_override(var: &str) -> Result<Option<String>, ConfigError> {
    match env::var(var) {
        Ok(raw) if raw.trim().is_empty() => Err(ConfigError::EmptyEnv { var: var.into() }),
        Ok(raw) => Ok(Some(raw.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::Invalid(format!("{var} is not unicode"))),
    }
}

fn default_minter_type() -> String {
    "MinterMerkleV0".to_string()
}

fn default_currency_symbol() -> String {
    NATIVE_CURRENCY_SYMBOL.to_string()
}
