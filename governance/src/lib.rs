//! Custodian access control.
//!
//! A single custodian identity governs the exchange. It alone may schedule
//! exit-tax changes and hand custody to another identity. Rotation takes
//! effect immediately; there is no voting and no transition period.
//!
//! Whoever deployed the exchange has no standing of its own: it is authorized
//! only while it happens to be the custodian.

pub mod custodian;
pub mod error;

pub use custodian::{AccessControl, CustodianRotation};
pub use error::GovernanceError;
