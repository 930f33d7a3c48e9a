//! Nullable chain: deterministic block height for testing.

use std::cell::Cell;

use wrap_types::BlockHeight;

/// A deterministic chain tip.
///
/// Height only advances when you mine.
pub struct NullChain {
    current: Cell<u64>,
}

impl NullChain {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Get the current block height.
    pub fn height(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Mine `blocks` empty blocks.
    pub fn mine(&self, blocks: u64) {
        self.current.set(self.current.get().saturating_add(blocks));
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mining_advances_height() {
        let chain = NullChain::new(3);
        chain.mine(21_000);
        assert_eq!(chain.height(), BlockHeight::new(21_003));
        chain.set(7);
        assert_eq!(chain.height(), BlockHeight::new(7));
    }
}
