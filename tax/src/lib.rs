//! Exit-tax schedule for withdrawals.
//!
//! The tax rate never changes immediately. `enable`/`disable` record the new
//! rate together with an activation height, and keep the rate that was in
//! force at the moment of the change as `previous_rate`:
//!
//! `current_rate(h) = if h >= activation_height { active_rate } else { previous_rate }`
//!
//! The phase of the schedule (pending, enabled, ...) is always derived from
//! that single comparison and never stored.

pub mod error;
pub mod rate;
pub mod schedule;

pub use error::TaxError;
pub use rate::TaxRate;
pub use schedule::{TaxPhase, TaxSchedule, TaxState};
