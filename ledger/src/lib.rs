//! Claim-token ledger.
//!
//! Holds one balance per holder and the total supply. Every mutation keeps
//! the conservation invariant `total_supply == Σ balances`:
//! - `mint` and `burn` move the supply together with one balance
//! - `transfer` moves value between two balances and leaves supply alone
//!
//! Authorization (who may move whose tokens) is the caller's concern.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::Ledger;
