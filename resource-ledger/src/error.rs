use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Insufficient RAM: {account} holds {available} bytes, requested {requested}")]
    InsufficientRam {
        account: String,
        available: u64,
        requested: u64,
    },

    #[error("RAM capacity exceeded: {free} bytes free, requested {requested}")]
    CapacityExceeded { free: u64, requested: u64 },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid allocation: {reason}")]
    InvalidAllocation { reason: String },

    #[error("No {denom} funds sent")]
    NoFunds { denom: String },
}
