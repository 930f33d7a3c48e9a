//! Nullable infrastructure for deterministic testing and simulation.
//!
//! Everything the exchange needs from its host (block height, the reserve
//! asset, event delivery) has an in-memory implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically (mine blocks, fund accounts, inject failures)
//! - Never touches the filesystem or network
//!
//! Usage: wire these into an `Exchange` in tests and in the simulator.

pub mod chain;
pub mod events;
pub mod reserve;

pub use chain::NullChain;
pub use events::NullEventSink;
pub use reserve::NullReserve;
