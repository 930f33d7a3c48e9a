//! Balance table and supply counter.

use std::collections::HashMap;

use wrap_types::Principal;

use crate::error::LedgerError;

/// The claim-token ledger.
///
/// Holders with a zero balance have no entry; `balance_of` reports 0 for them.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    balances: HashMap<Principal, u128>,
    total_supply: u128,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted entries, verifying conservation.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Principal, u128)>,
        total_supply: u128,
    ) -> Result<Self, LedgerError> {
        let mut balances = HashMap::new();
        for (holder, amount) in entries {
            if amount == 0 {
                continue;
            }
            let slot = balances.entry(holder).or_insert(0u128);
            *slot = slot.checked_add(amount).ok_or(LedgerError::Overflow)?;
        }
        let ledger = Self {
            balances,
            total_supply,
        };
        ledger.check_conservation()?;
        Ok(ledger)
    }

    pub fn balance_of(&self, holder: &Principal) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Number of holders with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Iterate over every holder with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&Principal, u128)> {
        self.balances.iter().map(|(p, b)| (p, *b))
    }

    /// Check that `amount` can be minted without overflowing the supply.
    ///
    /// A balance can never exceed the supply, so the supply check covers both.
    pub fn ensure_mintable(&self, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.total_supply
            .checked_add(amount)
            .map(|_| ())
            .ok_or(LedgerError::Overflow)
    }

    /// Credit `holder` with `amount` new tokens.
    pub fn mint(&mut self, holder: &Principal, amount: u128) -> Result<(), LedgerError> {
        self.ensure_mintable(amount)?;
        self.total_supply += amount;
        *self.balances.entry(holder.clone()).or_insert(0) += amount;
        tracing::trace!(%holder, amount, supply = self.total_supply, "minted");
        Ok(())
    }

    /// Destroy `amount` of `holder`'s tokens.
    pub fn burn(&mut self, holder: &Principal, amount: u128) -> Result<(), LedgerError> {
        let available = self.ensure_spendable(holder, amount)?;
        self.set_balance(holder, available - amount);
        self.total_supply -= amount;
        tracing::trace!(%holder, amount, supply = self.total_supply, "burned");
        Ok(())
    }

    /// Move `amount` from `from` to `to`. Supply is unchanged.
    pub fn transfer(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.ensure_spendable(from, amount)?;
        if from == to {
            return Ok(());
        }
        // The recipient's balance plus `amount` is bounded by the supply.
        self.set_balance(from, available - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        tracing::trace!(%from, %to, amount, "moved");
        Ok(())
    }

    /// Recompute Σ balances and compare it to the supply counter.
    pub fn check_conservation(&self) -> Result<(), LedgerError> {
        let sum = self
            .balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
            .ok_or(LedgerError::Overflow)?;
        if sum != self.total_supply {
            return Err(LedgerError::InvariantViolation {
                supply: self.total_supply,
                sum,
            });
        }
        Ok(())
    }

    fn ensure_spendable(&self, holder: &Principal, amount: u128) -> Result<u128, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let available = self.balance_of(holder);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(available)
    }

    fn set_balance(&mut self, holder: &Principal, amount: u128) {
        if amount == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(holder.clone(), amount);
        }
    }
}
