//! The wrapped-asset exchange.
//!
//! Holders deposit a reserve asset 1:1 into escrow and receive claim tokens;
//! redeeming claim tokens pays the reserve asset back minus the exit tax in
//! force at that block height, with the tax routed to the custodian.
//!
//! The exchange combines the claim-token ledger, the tax schedule and custodian
//! access control with two collaborators supplied by the host:
//! - [`ReserveAsset`]: moves the reserve asset, atomically per settlement
//! - [`EventSink`]: receives an [`ExchangeEvent`] for every committed change
//!
//! Every operation validates before it mutates, and either commits all of
//! its changes or none.

pub mod config;
pub mod error;
pub mod events;
pub mod exchange;
pub mod reserve;
pub mod shared;
pub mod snapshot;

pub use config::ExchangeConfig;
pub use error::{ExchangeError, ReserveError};
pub use events::{EventSink, ExchangeEvent, TracingEventSink};
pub use exchange::Exchange;
pub use reserve::{ReserveAsset, ReserveTransfer};
pub use shared::SharedExchange;
pub use snapshot::ExchangeSnapshot;

pub use wrap_tax::{TaxPhase, TaxRate, TaxState};
pub use wrap_types::{BlockHeight, ExchangeParams, Principal, TokenMetadata};
