//! Exchange snapshots: the persisted state in one record.
//!
//! A snapshot holds exactly what the exchange persists: the balance table,
//! the supply counter, the tax record and the custodian. Balances are sorted
//! by holder so equal states encode to equal bytes.

use serde::{Deserialize, Serialize};
use wrap_tax::TaxState;
use wrap_types::Principal;

use crate::error::ExchangeError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSnapshot {
    /// Snapshot version for compatibility.
    pub version: u32,
    /// Non-zero balances, sorted by holder.
    pub balances: Vec<(Principal, u128)>,
    pub total_supply: u128,
    pub tax: TaxState,
    pub custodian: Principal,
}

impl ExchangeSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(
        balances: Vec<(Principal, u128)>,
        total_supply: u128,
        tax: TaxState,
        custodian: Principal,
    ) -> Self {
        Self {
            version: Self::VERSION,
            balances,
            total_supply,
            tax,
            custodian,
        }
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExchangeError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExchangeError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn check_version(&self) -> Result<(), ExchangeError> {
        if self.version != Self::VERSION {
            return Err(ExchangeError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                self.version,
                Self::VERSION
            )));
        }
        Ok(())
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }
}
