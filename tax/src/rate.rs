//! Whole-percentage tax rate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TaxError;

/// A tax rate as a whole percentage in `0..=100`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct TaxRate(u8);

impl TaxRate {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(100);

    pub fn new(percent: u32) -> Result<Self, TaxError> {
        if percent > 100 {
            return Err(TaxError::InvalidRate(percent));
        }
        Ok(Self(percent as u8))
    }

    pub fn percent(&self) -> u32 {
        self.0 as u32
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `floor(amount × rate / 100)`, exact for every `u128` amount.
    ///
    /// `amount = 100q + r`, so `amount × rate / 100 = q × rate + r × rate / 100`
    /// where `q × rate` is an integer: flooring only touches the second term.
    /// Neither product can overflow because `rate <= 100`.
    pub fn apply(&self, amount: u128) -> u128 {
        let rate = self.0 as u128;
        let q = amount / 100;
        let r = amount % 100;
        q * rate + (r * rate) / 100
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u32> for TaxRate {
    type Error = TaxError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<TaxRate> for u32 {
    fn from(rate: TaxRate) -> Self {
        rate.percent()
    }
}
