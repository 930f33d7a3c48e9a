//! Scenario files and the replay engine.
//!
//! A scenario funds reserve accounts, then runs a list of steps against an
//! exchange wired to nullable collaborators. Every step yields one
//! [`StepRecord`] carrying either the operation's value or its error code.
//! Records serialize to JSON with amounts as exact integers.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wrap_exchange::{
    Exchange, ExchangeConfig, ExchangeError, ExchangeEvent, Principal, TaxPhase, TaxState,
};
use wrap_nullables::{NullChain, NullEventSink, NullReserve};
use wrap_utils::format_block_span;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Height of the chain tip before the first step.
    #[serde(default = "default_start_height")]
    pub start_height: u64,

    /// Reserve asset issued to holders before the first step.
    #[serde(default)]
    pub fund: Vec<Funding>,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_start_height() -> u64 {
    1
}

/// Amounts are TOML integers, or decimal strings for values TOML cannot hold.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(u128::from(v)),
        Raw::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount {s:?}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct Funding {
    pub holder: Principal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: u128,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Deposit {
        caller: Principal,
        #[serde(deserialize_with = "deserialize_amount")]
        amount: u128,
    },
    Withdraw {
        caller: Principal,
        #[serde(deserialize_with = "deserialize_amount")]
        amount: u128,
    },
    Transfer {
        caller: Principal,
        /// Defaults to the caller.
        from: Option<Principal>,
        to: Principal,
        #[serde(deserialize_with = "deserialize_amount")]
        amount: u128,
        memo: Option<String>,
    },
    EnableTax {
        caller: Principal,
    },
    DisableTax {
        caller: Principal,
    },
    SetCustodian {
        caller: Principal,
        new_custodian: Principal,
    },
    Mine {
        blocks: u64,
    },
    Balance {
        holder: Principal,
    },
    Status,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Transfer { .. } => "transfer",
            Self::EnableTax { .. } => "enable-tax",
            Self::DisableTax { .. } => "disable-tax",
            Self::SetCustodian { .. } => "set-custodian",
            Self::Mine { .. } => "mine",
            Self::Balance { .. } => "balance",
            Self::Status => "status",
        }
    }
}

impl Scenario {
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Outcome of one scenario step.
#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub op: &'static str,
    pub height: u64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<StepValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ExchangeEvent>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepValue {
    Amount(u128),
    Accepted(bool),
    Height(u64),
    Balance { claim: u128, reserve: u128 },
    Status(Box<Status>),
}

/// Supply, custodian and tax schedule as seen at one height.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Status {
    pub symbol: String,
    pub total_supply: u128,
    pub escrow_reserve: u128,
    pub custodian: Principal,
    pub tax_rate: u32,
    pub tax_phase: TaxPhase,
    pub tax_state: TaxState,
    pub blocks_until_activation: u64,
    pub activation_eta: String,
}

/// An exchange plus the simulated chain it runs on.
pub struct Simulator {
    exchange: Exchange<NullReserve, NullEventSink>,
    chain: NullChain,
}

impl Simulator {
    pub fn new(config: &ExchangeConfig, start_height: u64) -> Result<Self, ExchangeError> {
        Ok(Self {
            exchange: Exchange::from_config(config, NullReserve::new(), NullEventSink::new())?,
            chain: NullChain::new(start_height),
        })
    }

    pub fn exchange(&self) -> &Exchange<NullReserve, NullEventSink> {
        &self.exchange
    }

    pub fn height(&self) -> u64 {
        self.chain.height().as_u64()
    }

    /// Fund, then run every step. Returns one record per step.
    pub fn run(&mut self, scenario: &Scenario) -> Vec<StepRecord> {
        for f in &scenario.fund {
            self.exchange.reserve_mut().fund(&f.holder, f.amount);
        }
        scenario
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.record(i + 1, step))
            .collect()
    }

    /// Run one step and capture its outcome.
    pub fn record(&mut self, index: usize, step: &Step) -> StepRecord {
        let outcome = self.apply(step);
        let mut record = StepRecord {
            step: index,
            op: step.name(),
            height: self.height(),
            ok: outcome.is_ok(),
            value: None,
            code: None,
            error: None,
            events: self.exchange.events_mut().take(),
        };
        match outcome {
            Ok(value) => record.value = Some(value),
            Err(e) => {
                tracing::debug!(
                    step = index,
                    op = step.name(),
                    code = e.code(),
                    "step failed: {e}"
                );
                record.code = Some(e.code());
                record.error = Some(e.to_string());
            }
        }
        record
    }

    fn apply(&mut self, step: &Step) -> Result<StepValue, ExchangeError> {
        let now = self.chain.height();
        let ex = &mut self.exchange;
        Ok(match step {
            Step::Deposit { caller, amount } => StepValue::Amount(ex.deposit(*amount, caller)?),
            Step::Withdraw { caller, amount } => {
                StepValue::Amount(ex.withdraw(*amount, caller, now)?)
            }
            Step::Transfer {
                caller,
                from,
                to,
                amount,
                memo,
            } => {
                let from = from.as_ref().unwrap_or(caller);
                let memo = memo.as_deref().map(str::as_bytes);
                StepValue::Accepted(ex.transfer(*amount, from, to, caller, memo)?)
            }
            Step::EnableTax { caller } => StepValue::Accepted(ex.enable_tax(caller, now)?),
            Step::DisableTax { caller } => StepValue::Accepted(ex.disable_tax(caller, now)?),
            Step::SetCustodian {
                caller,
                new_custodian,
            } => StepValue::Accepted(ex.set_custodian(new_custodian.clone(), caller)?),
            Step::Mine { blocks } => {
                self.chain.mine(*blocks);
                StepValue::Height(self.chain.height().as_u64())
            }
            Step::Balance { holder } => StepValue::Balance {
                claim: ex.balance_of(holder),
                reserve: ex.reserve().balance_of(holder),
            },
            Step::Status => StepValue::Status(Box::new(self.status())),
        })
    }

    pub fn status(&self) -> Status {
        let now = self.chain.height();
        let ex = &self.exchange;
        let pending = ex.blocks_until_tax_activation(now);
        Status {
            symbol: ex.symbol().to_string(),
            total_supply: ex.total_supply(),
            escrow_reserve: ex.reserve().balance_of(ex.escrow()),
            custodian: ex.custodian().clone(),
            tax_rate: ex.current_tax_rate(now),
            tax_phase: ex.tax_phase(now),
            tax_state: ex.tax_state(),
            blocks_until_activation: pending,
            activation_eta: format_block_span(pending),
        }
    }

    /// Whether the reserve held in escrow still backs every claim token.
    pub fn escrow_backs_supply(&self) -> bool {
        let ex = &self.exchange;
        ex.reserve().balance_of(ex.escrow()) == ex.total_supply()
    }
}
