//! Exchange configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use wrap_types::{ExchangeParams, Principal};

use crate::error::ExchangeError;
use crate::exchange::ensure_not_escrow;

/// Configuration for an exchange instance.
///
/// Can be loaded from a TOML file via [`ExchangeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Identity that holds deposited reserve asset.
    pub escrow: Principal,

    /// Bootstrap custodian.
    pub custodian: Principal,

    /// Log format: "human" or "json", in any case.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Exit-tax policy and token metadata.
    #[serde(default)]
    pub params: ExchangeParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ExchangeConfig {
    pub fn new(escrow: Principal, custodian: Principal) -> Self {
        Self {
            escrow,
            custodian,
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ExchangeParams::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ExchangeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ExchangeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ExchangeError> {
        let config: Self = toml::from_str(s).map_err(|e| ExchangeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ExchangeError> {
        toml::to_string_pretty(self).map_err(|e| ExchangeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        self.params.validate()?;
        ensure_not_escrow(&self.escrow, &self.custodian)?;
        if !matches!(self.log_format.to_ascii_lowercase().as_str(), "human" | "json") {
            return Err(ExchangeError::Config(format!(
                "unknown log format {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}
