//! Errors raised while building or validating the shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("invalid exchange parameters: {0}")]
    InvalidParams(String),
}
