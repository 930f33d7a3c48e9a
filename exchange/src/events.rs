//! Notifications emitted after every committed state change.

use serde::{Deserialize, Serialize};
use wrap_tax::TaxState;
use wrap_types::Principal;

/// A committed change to exchange state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ExchangeEvent {
    Deposit {
        holder: Principal,
        amount: u128,
    },
    Withdraw {
        holder: Principal,
        /// Claim tokens burned.
        amount: u128,
        /// Reserve asset paid to the holder.
        net: u128,
        /// Reserve asset paid to the custodian.
        tax: u128,
        custodian: Principal,
    },
    Transfer {
        from: Principal,
        to: Principal,
        amount: u128,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<Vec<u8>>,
    },
    ExitTaxEnabled {
        caller: Principal,
        state: TaxState,
    },
    ExitTaxDisabled {
        caller: Principal,
        state: TaxState,
    },
    CustodianUpdated {
        previous: Principal,
        current: Principal,
    },
}

impl ExchangeEvent {
    /// Short name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Transfer { .. } => "transfer",
            Self::ExitTaxEnabled { .. } => "exit-tax-enabled",
            Self::ExitTaxDisabled { .. } => "exit-tax-disabled",
            Self::CustodianUpdated { .. } => "custodian-updated",
        }
    }
}

/// Receives exchange events. Emission happens after the change is committed
/// and cannot fail the operation.
pub trait EventSink {
    fn emit(&mut self, event: ExchangeEvent);
}

impl EventSink for Vec<ExchangeEvent> {
    fn emit(&mut self, event: ExchangeEvent) {
        self.push(event);
    }
}

/// Logs every event as a structured `tracing` record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&mut self, event: ExchangeEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::info!(target: "wrap_exchange::events", kind = event.kind(), %payload)
            }
            Err(e) => {
                tracing::warn!(
                    target: "wrap_exchange::events",
                    kind = event.kind(),
                    "unserializable event: {e}"
                )
            }
        }
    }
}
