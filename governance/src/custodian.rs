//! The custodian record and its authorization checks.

use serde::{Deserialize, Serialize};
use wrap_types::Principal;

use crate::error::GovernanceError;

/// The outcome of a custodian rotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodianRotation {
    pub previous: Principal,
    pub current: Principal,
}

/// Holds the current custodian.
#[derive(Clone, Debug)]
pub struct AccessControl {
    custodian: Principal,
}

impl AccessControl {
    /// Start with `bootstrap` as custodian.
    pub fn new(bootstrap: Principal) -> Self {
        Self {
            custodian: bootstrap,
        }
    }

    pub fn custodian(&self) -> &Principal {
        &self.custodian
    }

    pub fn is_custodian(&self, caller: &Principal) -> bool {
        *caller == self.custodian
    }

    /// Fail with `NotCustodian` unless `caller` is the current custodian.
    pub fn authorize(&self, caller: &Principal) -> Result<(), GovernanceError> {
        if self.is_custodian(caller) {
            Ok(())
        } else {
            tracing::warn!(%caller, custodian = %self.custodian, "unauthorized custodian action");
            Err(GovernanceError::NotCustodian {
                caller: caller.to_string(),
            })
        }
    }

    /// Replace the custodian with `new_custodian`. Only the current custodian may do this.
    pub fn set_custodian(
        &mut self,
        new_custodian: Principal,
        caller: &Principal,
    ) -> Result<CustodianRotation, GovernanceError> {
        self.authorize(caller)?;
        if new_custodian == self.custodian {
            return Err(GovernanceError::SameAsCurrentCustodian);
        }
        let previous = std::mem::replace(&mut self.custodian, new_custodian);
        tracing::info!(%previous, current = %self.custodian, "custodian rotated");
        Ok(CustodianRotation {
            previous,
            current: self.custodian.clone(),
        })
    }
}
