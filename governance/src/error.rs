use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("caller {caller} is not the custodian")]
    NotCustodian { caller: String },

    #[error("new custodian is the same as the current custodian")]
    SameAsCurrentCustodian,
}
