//! Exchange error taxonomy.
//!
//! Every variant carries a distinct numeric code so hosts can report failures
//! the way a fungible-token contract does (`err u1`, `err u1001`, ...).

use thiserror::Error;
use wrap_governance::GovernanceError;
use wrap_ledger::LedgerError;
use wrap_tax::TaxError;
use wrap_types::TypesError;

/// Failure reported by the reserve-asset collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReserveError {
    #[error("insufficient reserve for {holder}: need {needed}, available {available}")]
    InsufficientFunds {
        holder: String,
        needed: u128,
        available: u128,
    },

    #[error("reserve transfer sender and recipient are the same")]
    SelfTransfer,

    #[error("reserve transfer amount must be non-zero")]
    ZeroAmount,

    #[error("reserve transfer rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("caller {caller} is not the token owner {owner}")]
    NotOwner { caller: String, owner: String },

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("caller {caller} is not the custodian")]
    NotCustodian { caller: String },

    #[error("new custodian is the same as the current custodian")]
    SameAsCurrentCustodian,

    #[error("memo is {len} bytes, at most {max} allowed")]
    InvalidMemo { len: usize, max: usize },

    #[error("escrow identity {escrow} cannot act as custodian")]
    EscrowAsCustodian { escrow: String },

    #[error("reserve transfer failed: {0}")]
    Reserve(#[from] ReserveError),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("exchange lock poisoned")]
    LockPoisoned,
}

impl ExchangeError {
    /// Stable numeric code for this failure.
    pub fn code(&self) -> u32 {
        match self {
            Self::InsufficientBalance { .. } => 1,
            Self::NotOwner { .. } => 1001,
            Self::InvalidAmount => 1002,
            Self::NotCustodian { .. } => 1003,
            Self::SameAsCurrentCustodian => 1004,
            Self::InvalidMemo { .. } => 1005,
            Self::EscrowAsCustodian { .. } => 1006,
            Self::Reserve(_) => 2001,
            Self::Overflow => 3001,
            Self::InvariantViolation(_) => 3002,
            Self::Config(_) => 3003,
            Self::Snapshot(_) => 3004,
            Self::LockPoisoned => 3005,
        }
    }
}

impl From<LedgerError> for ExchangeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            LedgerError::ZeroAmount => Self::InvalidAmount,
            LedgerError::Overflow => Self::Overflow,
            e @ LedgerError::InvariantViolation { .. } => Self::InvariantViolation(e.to_string()),
        }
    }
}

impl From<GovernanceError> for ExchangeError {
    fn from(err: GovernanceError) -> Self {
        match err {
            GovernanceError::NotCustodian { caller } => Self::NotCustodian { caller },
            GovernanceError::SameAsCurrentCustodian => Self::SameAsCurrentCustodian,
        }
    }
}

impl From<TaxError> for ExchangeError {
    fn from(err: TaxError) -> Self {
        match err {
            TaxError::HeightOverflow { .. } => Self::Overflow,
            e @ TaxError::InvalidRate(_) => Self::Config(e.to_string()),
        }
    }
}

impl From<TypesError> for ExchangeError {
    fn from(err: TypesError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<bincode::Error> for ExchangeError {
    fn from(err: bincode::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}
