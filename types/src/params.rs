//! Exchange parameters: the exit-tax policy constants and the claim token's metadata.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Descriptive metadata of the claim token (the fungible-token getters).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "USA Bitcoin".to_string(),
            symbol: "USABTC".to_string(),
            decimals: 8,
            token_uri: None,
        }
    }
}

/// Parameters fixed at exchange creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeParams {
    /// Exit tax (whole percent, 0–100) that `enable` schedules.
    #[serde(default = "default_exit_tax_pct")]
    pub exit_tax_pct: u8,

    /// Blocks between an `enable`/`disable` call and the new rate taking effect.
    /// Default: 21000 blocks (~146 days at 10-minute blocks).
    #[serde(default = "default_activation_delay")]
    pub activation_delay_blocks: u64,

    /// Claim token metadata.
    #[serde(default)]
    pub metadata: TokenMetadata,
}

fn default_exit_tax_pct() -> u8 {
    ExchangeParams::DEFAULT_EXIT_TAX_PCT
}

fn default_activation_delay() -> u64 {
    ExchangeParams::DEFAULT_ACTIVATION_DELAY
}

impl ExchangeParams {
    pub const DEFAULT_EXIT_TAX_PCT: u8 = 10;
    pub const DEFAULT_ACTIVATION_DELAY: u64 = 21_000;

    /// Development defaults: same rate, activation after 10 blocks.
    pub fn dev_defaults() -> Self {
        Self {
            activation_delay_blocks: 10,
            ..Self::default()
        }
    }

    /// Reject parameter sets the exchange cannot operate with.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.exit_tax_pct > 100 {
            return Err(TypesError::InvalidParams(format!(
                "exit_tax_pct must be at most 100, got {}",
                self.exit_tax_pct
            )));
        }
        if self.metadata.symbol.is_empty() {
            return Err(TypesError::InvalidParams("token symbol must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for ExchangeParams {
    fn default() -> Self {
        Self {
            exit_tax_pct: Self::DEFAULT_EXIT_TAX_PCT,
            activation_delay_blocks: Self::DEFAULT_ACTIVATION_DELAY,
            metadata: TokenMetadata::default(),
        }
    }
}
