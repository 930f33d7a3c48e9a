//! Fundamental types for the wrapped-asset exchange.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! principals (holder and custodian identities), block heights, and exchange parameters.

pub mod address;
pub mod error;
pub mod height;
pub mod params;

pub use address::Principal;
pub use error::TypesError;
pub use height::BlockHeight;
pub use params::{ExchangeParams, TokenMetadata};
