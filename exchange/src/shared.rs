//! A thread-safe handle for hosts that do not serialize calls themselves.
//!
//! The ledger, tax schedule and custodian record sit behind one mutex, so
//! every operation still runs to completion without interleaving.

use std::sync::{Arc, Mutex, MutexGuard};

use wrap_types::{BlockHeight, Principal};

use crate::error::ExchangeError;
use crate::events::EventSink;
use crate::exchange::Exchange;
use crate::reserve::ReserveAsset;

pub struct SharedExchange<R, E> {
    inner: Arc<Mutex<Exchange<R, E>>>,
}

impl<R, E> Clone for SharedExchange<R, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ReserveAsset, E: EventSink> SharedExchange<R, E> {
    pub fn new(exchange: Exchange<R, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(exchange)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Exchange<R, E>>, ExchangeError> {
        self.inner.lock().map_err(|_| ExchangeError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the exchange.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut Exchange<R, E>) -> Result<T, ExchangeError>,
    ) -> Result<T, ExchangeError> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    pub fn deposit(&self, amount: u128, caller: &Principal) -> Result<u128, ExchangeError> {
        self.with(|ex| ex.deposit(amount, caller))
    }

    pub fn withdraw(
        &self,
        amount: u128,
        caller: &Principal,
        now: BlockHeight,
    ) -> Result<u128, ExchangeError> {
        self.with(|ex| ex.withdraw(amount, caller, now))
    }

    pub fn transfer(
        &self,
        amount: u128,
        from: &Principal,
        to: &Principal,
        caller: &Principal,
    ) -> Result<bool, ExchangeError> {
        self.with(|ex| ex.transfer(amount, from, to, caller, None))
    }

    pub fn balance_of(&self, holder: &Principal) -> Result<u128, ExchangeError> {
        Ok(self.lock()?.balance_of(holder))
    }

    pub fn total_supply(&self) -> Result<u128, ExchangeError> {
        Ok(self.lock()?.total_supply())
    }

    /// Take the exchange back if this is the last handle.
    pub fn into_inner(self) -> Result<Exchange<R, E>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex
                .into_inner()
                .map_err(|poisoned| Self::new(poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}
