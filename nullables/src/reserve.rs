//! Nullable reserve asset: an in-memory token with all-or-nothing settlement.

use std::collections::HashMap;

use wrap_exchange::{ReserveAsset, ReserveError, ReserveTransfer};
use wrap_types::Principal;

/// An in-memory reserve asset.
///
/// Settlements are applied to a scratch copy of the balance table and only
/// committed when every transfer in the batch succeeds.
#[derive(Debug, Default)]
pub struct NullReserve {
    balances: HashMap<Principal, u128>,
    history: Vec<ReserveTransfer>,
    fail_next: Option<ReserveError>,
}

impl NullReserve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder` with freshly issued reserve (outside any settlement).
    pub fn fund(&mut self, holder: &Principal, amount: u128) {
        let slot = self.balances.entry(holder.clone()).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    pub fn balance_of(&self, holder: &Principal) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Every transfer committed so far, in order.
    pub fn history(&self) -> &[ReserveTransfer] {
        &self.history
    }

    /// Make the next settlement fail with `err`, whatever it contains.
    pub fn fail_next(&mut self, err: ReserveError) {
        self.fail_next = Some(err);
    }
}

impl ReserveAsset for NullReserve {
    fn settle(&mut self, transfers: &[ReserveTransfer]) -> Result<(), ReserveError> {
        if let Some(err) = self.fail_next.take() {
            tracing::debug!(transfers = transfers.len(), "injected reserve failure: {err}");
            return Err(err);
        }

        let mut scratch = self.balances.clone();
        for t in transfers {
            if t.amount == 0 {
                return Err(ReserveError::ZeroAmount);
            }
            if t.sender == t.recipient {
                return Err(ReserveError::SelfTransfer);
            }
            let available = scratch.get(&t.sender).copied().unwrap_or(0);
            if available < t.amount {
                return Err(ReserveError::InsufficientFunds {
                    holder: t.sender.to_string(),
                    needed: t.amount,
                    available,
                });
            }
            scratch.insert(t.sender.clone(), available - t.amount);
            let to = scratch.entry(t.recipient.clone()).or_insert(0);
            *to = to
                .checked_add(t.amount)
                .ok_or_else(|| ReserveError::Rejected("recipient balance overflow".into()))?;
        }

        self.balances = scratch;
        self.history.extend_from_slice(transfers);
        Ok(())
    }
}
