use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid contract id: {0:?}")]
    InvalidContractId(String),
    #[error("invalid coverage type id: {0:?}")]
    InvalidCoverageTypeId(String),
    #[error("invalid coverage amount: {0:?}")]
    InvalidAmount(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
