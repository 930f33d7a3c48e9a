//! The delayed-activation tax schedule.

use serde::{Deserialize, Serialize};
use wrap_types::{BlockHeight, ExchangeParams};

use crate::error::TaxError;
use crate::rate::TaxRate;

/// The persisted tax record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxState {
    /// The rate that applies from `activation_height` on.
    pub active_rate: TaxRate,
    /// First height at which `active_rate` applies. Genesis before any change.
    pub activation_height: BlockHeight,
    /// The rate in force when the last change was scheduled; applies until activation.
    pub previous_rate: TaxRate,
}

impl TaxState {
    /// The rate in force at `now`.
    pub fn rate_at(&self, now: BlockHeight) -> TaxRate {
        if now.has_reached(self.activation_height) {
            self.active_rate
        } else {
            self.previous_rate
        }
    }
}

/// Where the schedule stands at a given height.
///
/// Always computed from a [`TaxState`] and a height; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxPhase {
    /// No tax now and none scheduled.
    Disabled,
    /// A different non-zero rate is scheduled; the previous rate still applies.
    PendingEnable,
    /// A non-zero rate is in force.
    Enabled,
    /// A zero rate is scheduled; the previous non-zero rate still applies.
    PendingDisable,
}

/// The tax schedule: the persisted [`TaxState`] plus the policy constants
/// `enable` uses (target rate and activation delay).
#[derive(Clone, Debug)]
pub struct TaxSchedule {
    state: TaxState,
    target_rate: TaxRate,
    activation_delay: u64,
}

impl TaxSchedule {
    /// A fresh schedule: rate zero, nothing pending.
    pub fn new(target_rate: TaxRate, activation_delay: u64) -> Self {
        Self {
            state: TaxState::default(),
            target_rate,
            activation_delay,
        }
    }

    pub fn from_params(params: &ExchangeParams) -> Result<Self, TaxError> {
        let target = TaxRate::new(params.exit_tax_pct as u32)?;
        Ok(Self::new(target, params.activation_delay_blocks))
    }

    /// Resume a schedule from a persisted state.
    pub fn with_state(mut self, state: TaxState) -> Self {
        self.state = state;
        self
    }

    /// Read-only projection of the full tax record.
    pub fn values(&self) -> TaxState {
        self.state
    }

    pub fn target_rate(&self) -> TaxRate {
        self.target_rate
    }

    pub fn activation_delay(&self) -> u64 {
        self.activation_delay
    }

    pub fn current_rate(&self, now: BlockHeight) -> TaxRate {
        self.state.rate_at(now)
    }

    /// Tax owed on withdrawing `amount` at height `now`.
    pub fn tax_for(&self, amount: u128, now: BlockHeight) -> u128 {
        self.current_rate(now).apply(amount)
    }

    /// Blocks until the scheduled rate takes effect (zero once in force).
    pub fn blocks_until_activation(&self, now: BlockHeight) -> u64 {
        now.blocks_until(self.state.activation_height)
    }

    pub fn phase(&self, now: BlockHeight) -> TaxPhase {
        let s = &self.state;
        // Re-scheduling the rate already in force leaves nothing pending.
        if now.has_reached(s.activation_height) || s.active_rate == s.previous_rate {
            if s.active_rate.is_zero() {
                TaxPhase::Disabled
            } else {
                TaxPhase::Enabled
            }
        } else if s.active_rate.is_zero() {
            TaxPhase::PendingDisable
        } else {
            TaxPhase::PendingEnable
        }
    }

    /// Schedule the target rate to take effect `activation_delay` blocks from `now`.
    pub fn enable(&mut self, now: BlockHeight) -> Result<TaxState, TaxError> {
        self.schedule(self.target_rate, now)
    }

    /// Schedule a zero rate to take effect `activation_delay` blocks from `now`.
    pub fn disable(&mut self, now: BlockHeight) -> Result<TaxState, TaxError> {
        self.schedule(TaxRate::ZERO, now)
    }

    fn schedule(&mut self, rate: TaxRate, now: BlockHeight) -> Result<TaxState, TaxError> {
        let activation_height = now
            .checked_add(self.activation_delay)
            .ok_or(TaxError::HeightOverflow {
                now: now.as_u64(),
                delay: self.activation_delay,
            })?;
        // Evaluated against the record as it stands, before it is replaced.
        let previous_rate = self.current_rate(now);
        self.state = TaxState {
            active_rate: rate,
            activation_height,
            previous_rate,
        };
        tracing::debug!(
            active_rate = %rate,
            %activation_height,
            %previous_rate,
            "tax rate change scheduled"
        );
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> BlockHeight {
        BlockHeight::new(n)
    }

    fn schedule() -> TaxSchedule {
        TaxSchedule::new(TaxRate::new(10).unwrap(), 21_000)
    }

    #[test]
    fn fresh_schedule_is_disabled() {
        let s = schedule();
        assert_eq!(s.values(), TaxState::default());
        assert_eq!(s.current_rate(h(0)), TaxRate::ZERO);
        assert_eq!(s.current_rate(h(1_000_000)), TaxRate::ZERO);
        assert_eq!(s.phase(h(5)), TaxPhase::Disabled);
        assert_eq!(s.tax_for(2_000_000, h(5)), 0);
    }

    #[test]
    fn enable_after_deployment() {
        let mut s = schedule();
        let state = s.enable(h(3)).unwrap();
        assert_eq!(state.active_rate.percent(), 10);
        assert_eq!(state.activation_height, h(21_003));
        assert_eq!(state.previous_rate, TaxRate::ZERO);

        assert_eq!(s.current_rate(h(3)).percent(), 0);
        assert_eq!(s.current_rate(h(21_002)).percent(), 0);
        assert_eq!(s.phase(h(21_002)), TaxPhase::PendingEnable);
        assert_eq!(s.blocks_until_activation(h(21_002)), 1);

        assert_eq!(s.current_rate(h(21_003)).percent(), 10);
        assert_eq!(s.phase(h(21_003)), TaxPhase::Enabled);
        assert_eq!(s.values().previous_rate, TaxRate::ZERO);
        assert_eq!(s.tax_for(2_000_000, h(21_003)), 200_000);
    }

    #[test]
    fn disable_keeps_old_rate_until_activation() {
        let mut s = schedule();
        s.enable(h(0)).unwrap();
        let state = s.disable(h(30_000)).unwrap();
        assert_eq!(state.active_rate, TaxRate::ZERO);
        assert_eq!(state.previous_rate.percent(), 10);
        assert_eq!(state.activation_height, h(51_000));

        assert_eq!(s.phase(h(50_999)), TaxPhase::PendingDisable);
        assert_eq!(s.current_rate(h(50_999)).percent(), 10);
        assert_eq!(s.phase(h(51_000)), TaxPhase::Disabled);
        assert_eq!(s.current_rate(h(51_000)).percent(), 0);
    }

    #[test]
    fn disable_while_enable_pending_captures_zero() {
        let mut s = schedule();
        s.enable(h(0)).unwrap();
        // The enable never took effect, so the rate in force is still zero.
        let state = s.disable(h(100)).unwrap();
        assert_eq!(state.previous_rate, TaxRate::ZERO);
        assert_eq!(s.phase(h(100)), TaxPhase::Disabled);
    }

    #[test]
    fn re_enable_restarts_the_timer() {
        let mut s = schedule();
        s.enable(h(0)).unwrap();
        s.enable(h(500)).unwrap();
        assert_eq!(s.values().activation_height, h(21_500));
        assert_eq!(s.current_rate(h(21_000)).percent(), 0);
    }

    #[test]
    fn re_enable_while_enabled_stays_enabled() {
        let mut s = schedule();
        s.enable(h(0)).unwrap();
        let state = s.enable(h(30_000)).unwrap();
        assert_eq!(state.previous_rate.percent(), 10);
        assert_eq!(state.active_rate.percent(), 10);

        assert_eq!(s.current_rate(h(30_000)).percent(), 10);
        assert_eq!(s.phase(h(30_000)), TaxPhase::Enabled);
        assert_eq!(s.phase(h(51_000)), TaxPhase::Enabled);
    }

    #[test]
    fn disable_while_disabled_stays_disabled() {
        let mut s = schedule();
        s.disable(h(7)).unwrap();
        assert_eq!(s.phase(h(7)), TaxPhase::Disabled);
    }

    #[test]
    fn activation_overflow_rejected_without_mutation() {
        let mut s = schedule();
        let err = s.enable(h(u64::MAX - 10)).unwrap_err();
        assert_eq!(
            err,
            TaxError::HeightOverflow {
                now: u64::MAX - 10,
                delay: 21_000
            }
        );
        assert_eq!(s.values(), TaxState::default());
    }

    #[test]
    fn from_params_uses_policy_constants() {
        let s = TaxSchedule::from_params(&ExchangeParams::dev_defaults()).unwrap();
        assert_eq!(s.target_rate().percent(), 10);
        assert_eq!(s.activation_delay(), 10);
    }

    #[test]
    fn with_state_resumes() {
        let state = TaxState {
            active_rate: TaxRate::new(10).unwrap(),
            activation_height: h(42),
            previous_rate: TaxRate::ZERO,
        };
        let s = schedule().with_state(state);
        assert_eq!(s.current_rate(h(41)), TaxRate::ZERO);
        assert_eq!(s.current_rate(h(42)).percent(), 10);
    }
}
