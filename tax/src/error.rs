use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("tax rate must be a whole percentage between 0 and 100, got {0}")]
    InvalidRate(u32),

    #[error("activation height overflows: {now} + {delay} blocks")]
    HeightOverflow { now: u64, delay: u64 },
}
