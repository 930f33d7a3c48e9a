//! The exchange facade.

use wrap_governance::AccessControl;
use wrap_ledger::Ledger;
use wrap_tax::{TaxPhase, TaxSchedule, TaxState};
use wrap_types::{BlockHeight, ExchangeParams, Principal, TokenMetadata};

use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::events::{EventSink, ExchangeEvent, TracingEventSink};
use crate::reserve::{ReserveAsset, ReserveTransfer};
use crate::snapshot::ExchangeSnapshot;

/// Maximum memo length on a transfer, in bytes.
pub const MAX_MEMO_LEN: usize = 34;

/// The wrapped-asset exchange.
///
/// `R` moves the reserve asset; `E` receives events. Callers and block
/// heights are supplied per call by the host.
pub struct Exchange<R, E = TracingEventSink> {
    ledger: Ledger,
    tax: TaxSchedule,
    access: AccessControl,
    escrow: Principal,
    metadata: TokenMetadata,
    reserve: R,
    events: E,
}

impl<R: ReserveAsset, E: EventSink> Exchange<R, E> {
    /// Create an empty exchange.
    ///
    /// `escrow` is the identity holding deposited reserve; `custodian` is the
    /// bootstrap custodian.
    pub fn new(
        params: &ExchangeParams,
        escrow: Principal,
        custodian: Principal,
        reserve: R,
        events: E,
    ) -> Result<Self, ExchangeError> {
        params.validate()?;
        ensure_not_escrow(&escrow, &custodian)?;
        Ok(Self {
            ledger: Ledger::new(),
            tax: TaxSchedule::from_params(params)?,
            access: AccessControl::new(custodian),
            escrow,
            metadata: params.metadata.clone(),
            reserve,
            events,
        })
    }

    pub fn from_config(
        config: &ExchangeConfig,
        reserve: R,
        events: E,
    ) -> Result<Self, ExchangeError> {
        Self::new(
            &config.params,
            config.escrow.clone(),
            config.custodian.clone(),
            reserve,
            events,
        )
    }

    /// Rebuild an exchange from a snapshot, checking supply conservation.
    pub fn restore(
        snapshot: ExchangeSnapshot,
        params: &ExchangeParams,
        escrow: Principal,
        reserve: R,
        events: E,
    ) -> Result<Self, ExchangeError> {
        snapshot.check_version()?;
        let mut exchange = Self::new(params, escrow, snapshot.custodian, reserve, events)?;
        exchange.ledger = Ledger::from_entries(snapshot.balances, snapshot.total_supply)?;
        exchange.tax = exchange.tax.with_state(snapshot.tax);
        tracing::info!(
            holders = exchange.ledger.holder_count(),
            supply = exchange.ledger.total_supply(),
            "exchange restored from snapshot"
        );
        Ok(exchange)
    }

    // ── Holder operations ─────────────────────────────────────────────────

    /// Lock `amount` of reserve asset from `caller` in escrow and mint the
    /// same amount of claim tokens to `caller`. Returns the amount minted.
    pub fn deposit(&mut self, amount: u128, caller: &Principal) -> Result<u128, ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        self.ledger.ensure_mintable(amount)?;

        self.reserve
            .transfer(amount, caller, &self.escrow)
            .inspect_err(|e| tracing::warn!(%caller, amount, "deposit pull failed: {e}"))?;
        self.ledger.mint(caller, amount)?;

        tracing::info!(%caller, amount, supply = self.ledger.total_supply(), "deposit");
        self.events.emit(ExchangeEvent::Deposit {
            holder: caller.clone(),
            amount,
        });
        Ok(amount)
    }

    /// Redeem `amount` claim tokens at height `now`.
    ///
    /// Burns `amount`, pays `amount - tax` to `caller` and `tax` to the
    /// custodian. Returns the net amount paid to `caller`.
    pub fn withdraw(
        &mut self,
        amount: u128,
        caller: &Principal,
        now: BlockHeight,
    ) -> Result<u128, ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        let available = self.ledger.balance_of(caller);
        if available < amount {
            return Err(ExchangeError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        let tax = self.tax.tax_for(amount, now);
        let net = amount - tax;
        let custodian = self.access.custodian().clone();

        let mut payouts = Vec::with_capacity(2);
        if net > 0 {
            payouts.push(ReserveTransfer::new(net, &self.escrow, caller));
        }
        if tax > 0 {
            payouts.push(ReserveTransfer::new(tax, &self.escrow, &custodian));
        }

        // Burn first so no claim stays outstanding once reserve has left escrow.
        self.ledger.burn(caller, amount)?;
        if let Err(e) = self.reserve.settle(&payouts) {
            tracing::warn!(%caller, amount, "withdraw payout failed, reverting burn: {e}");
            self.ledger.mint(caller, amount)?;
            return Err(e.into());
        }

        tracing::info!(
            %caller,
            amount,
            net,
            tax,
            rate = %self.tax.current_rate(now),
            %now,
            "withdraw"
        );
        self.events.emit(ExchangeEvent::Withdraw {
            holder: caller.clone(),
            amount,
            net,
            tax,
            custodian,
        });
        Ok(net)
    }

    /// Move `amount` claim tokens from `from` to `to`. Only `from` may call this.
    pub fn transfer(
        &mut self,
        amount: u128,
        from: &Principal,
        to: &Principal,
        caller: &Principal,
        memo: Option<&[u8]>,
    ) -> Result<bool, ExchangeError> {
        if caller != from {
            return Err(ExchangeError::NotOwner {
                caller: caller.to_string(),
                owner: from.to_string(),
            });
        }
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount);
        }
        if let Some(m) = memo {
            if m.len() > MAX_MEMO_LEN {
                return Err(ExchangeError::InvalidMemo {
                    len: m.len(),
                    max: MAX_MEMO_LEN,
                });
            }
        }

        self.ledger.transfer(from, to, amount)?;

        tracing::info!(%from, %to, amount, "transfer");
        self.events.emit(ExchangeEvent::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
            memo: memo.map(<[u8]>::to_vec),
        });
        Ok(true)
    }

    // ── Custodian operations ──────────────────────────────────────────────

    /// Schedule the exit tax to switch on `activation_delay` blocks after `now`.
    pub fn enable_tax(
        &mut self,
        caller: &Principal,
        now: BlockHeight,
    ) -> Result<bool, ExchangeError> {
        self.access.authorize(caller)?;
        let state = self.tax.enable(now)?;
        tracing::info!(
            %caller,
            active_rate = %state.active_rate,
            activation_height = %state.activation_height,
            "exit tax enable scheduled"
        );
        self.events.emit(ExchangeEvent::ExitTaxEnabled {
            caller: caller.clone(),
            state,
        });
        Ok(true)
    }

    /// Schedule the exit tax to switch off `activation_delay` blocks after `now`.
    pub fn disable_tax(
        &mut self,
        caller: &Principal,
        now: BlockHeight,
    ) -> Result<bool, ExchangeError> {
        self.access.authorize(caller)?;
        let state = self.tax.disable(now)?;
        tracing::info!(
            %caller,
            previous_rate = %state.previous_rate,
            activation_height = %state.activation_height,
            "exit tax disable scheduled"
        );
        self.events.emit(ExchangeEvent::ExitTaxDisabled {
            caller: caller.clone(),
            state,
        });
        Ok(true)
    }

    /// Hand custody to `new_custodian`, effective immediately.
    pub fn set_custodian(
        &mut self,
        new_custodian: Principal,
        caller: &Principal,
    ) -> Result<bool, ExchangeError> {
        self.access.authorize(caller)?;
        ensure_not_escrow(&self.escrow, &new_custodian)?;
        let rotation = self.access.set_custodian(new_custodian, caller)?;
        self.events.emit(ExchangeEvent::CustodianUpdated {
            previous: rotation.previous,
            current: rotation.current,
        });
        Ok(true)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn balance_of(&self, holder: &Principal) -> u128 {
        self.ledger.balance_of(holder)
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn tax_state(&self) -> TaxState {
        self.tax.values()
    }

    /// Exit tax in force at `now`, as a whole percentage.
    pub fn current_tax_rate(&self, now: BlockHeight) -> u32 {
        self.tax.current_rate(now).percent()
    }

    /// Tax that withdrawing `amount` at `now` would cost.
    pub fn tax_for_amount(&self, amount: u128, now: BlockHeight) -> u128 {
        self.tax.tax_for(amount, now)
    }

    pub fn tax_phase(&self, now: BlockHeight) -> TaxPhase {
        self.tax.phase(now)
    }

    pub fn blocks_until_tax_activation(&self, now: BlockHeight) -> u64 {
        self.tax.blocks_until_activation(now)
    }

    pub fn custodian(&self) -> &Principal {
        self.access.custodian()
    }

    pub fn escrow(&self) -> &Principal {
        &self.escrow
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn token_uri(&self) -> Option<&str> {
        self.metadata.token_uri.as_deref()
    }

    /// Recompute Σ balances against the supply counter.
    pub fn check_conservation(&self) -> Result<(), ExchangeError> {
        self.ledger.check_conservation().map_err(Into::into)
    }

    /// Capture the persisted state: balances, supply, tax record, custodian.
    pub fn snapshot(&self) -> ExchangeSnapshot {
        let mut balances: Vec<(Principal, u128)> = self
            .ledger
            .holders()
            .map(|(p, b)| (p.clone(), b))
            .collect();
        balances.sort_by(|a, b| a.0.cmp(&b.0));
        ExchangeSnapshot::new(
            balances,
            self.ledger.total_supply(),
            self.tax.values(),
            self.access.custodian().clone(),
        )
    }

    pub fn reserve(&self) -> &R {
        &self.reserve
    }

    pub fn reserve_mut(&mut self) -> &mut R {
        &mut self.reserve
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }
}

/// Tax is paid out of escrow, so the escrow identity can never receive it.
pub(crate) fn ensure_not_escrow(
    escrow: &Principal,
    custodian: &Principal,
) -> Result<(), ExchangeError> {
    if escrow == custodian {
        return Err(ExchangeError::EscrowAsCustodian {
            escrow: escrow.to_string(),
        });
    }
    Ok(())
}
