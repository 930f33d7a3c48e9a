//! The reserve-asset collaborator.

use serde::{Deserialize, Serialize};
use wrap_types::Principal;

use crate::error::ReserveError;

/// One movement of the reserve asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveTransfer {
    pub amount: u128,
    pub sender: Principal,
    pub recipient: Principal,
}

impl ReserveTransfer {
    pub fn new(amount: u128, sender: &Principal, recipient: &Principal) -> Self {
        Self {
            amount,
            sender: sender.clone(),
            recipient: recipient.clone(),
        }
    }
}

/// Moves the underlying reserve asset on behalf of the exchange.
///
/// A settlement is all-or-nothing: implementations either apply every
/// transfer in the batch or return an error having applied none. The
/// exchange relies on this to keep withdrawals atomic when the net payout
/// and the tax share are paid out together.
pub trait ReserveAsset {
    fn settle(&mut self, transfers: &[ReserveTransfer]) -> Result<(), ReserveError>;

    /// Convenience for a settlement of one transfer.
    fn transfer(
        &mut self,
        amount: u128,
        sender: &Principal,
        recipient: &Principal,
    ) -> Result<(), ReserveError> {
        self.settle(&[ReserveTransfer::new(amount, sender, recipient)])
    }
}

impl<T: ReserveAsset + ?Sized> ReserveAsset for Box<T> {
    fn settle(&mut self, transfers: &[ReserveTransfer]) -> Result<(), ReserveError> {
        (**self).settle(transfers)
    }
}
