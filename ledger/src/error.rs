use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("arithmetic overflow in ledger update")]
    Overflow,

    #[error("conservation violated: supply {supply}, sum of balances {sum}")]
    InvariantViolation { supply: u128, sum: u128 },
}
