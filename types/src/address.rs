//! Principal identities: token holders, the custodian, and the escrow account.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// An identity that can hold claim tokens or reserve asset.
///
/// Standard principals are a bare account address (`ST1PQHQ...`). Contract
/// principals append a contract name after a dot (`ST1PQHQ....wrapped-token`);
/// the exchange's escrow account is usually one of these.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Maximum length of the contract-name part of a contract principal.
    pub const MAX_CONTRACT_NAME_LEN: usize = 128;

    /// Parse and validate a principal from a raw string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidPrincipal(s))
        }
    }

    /// Build the contract principal `<deployer>.<name>`.
    pub fn contract(deployer: &Principal, name: &str) -> Result<Self, TypesError> {
        if deployer.is_contract() {
            return Err(TypesError::InvalidPrincipal(format!(
                "{deployer} is already a contract principal"
            )));
        }
        Self::parse(format!("{}.{}", deployer.0, name))
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a contract principal (`address.name`).
    pub fn is_contract(&self) -> bool {
        self.0.contains('.')
    }

    /// The account address part (everything before the contract name).
    pub fn address(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    fn is_well_formed(s: &str) -> bool {
        let mut parts = s.splitn(2, '.');
        let address = parts.next().unwrap_or_default();
        if address.is_empty() || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        match parts.next() {
            None => true,
            Some(name) => {
                !name.is_empty()
                    && name.len() <= Self::MAX_CONTRACT_NAME_LEN
                    && name.starts_with(|c: char| c.is_ascii_alphabetic())
                    && name
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            }
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Principal {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Principal {
    type Error = TypesError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}

impl std::str::FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
