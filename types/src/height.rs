//! Block height type used for all time-delayed behaviour.
//!
//! Heights are supplied by the execution environment as an opaque,
//! monotonically non-decreasing counter. Nothing in the exchange reads a
//! wall clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the host chain.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height zero. Also the activation height of a tax schedule that was never changed.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one, or `None` on overflow.
    pub fn checked_add(&self, blocks: u64) -> Option<Self> {
        self.0.checked_add(blocks).map(Self)
    }

    /// Blocks remaining from `self` until `target` (zero once reached).
    pub fn blocks_until(&self, target: BlockHeight) -> u64 {
        target.0.saturating_sub(self.0)
    }

    /// Whether `self` is at or past `target`.
    pub fn has_reached(&self, target: BlockHeight) -> bool {
        self.0 >= target.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
