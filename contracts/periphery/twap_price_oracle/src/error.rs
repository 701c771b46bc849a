use cosmwasm_std::StdError;
use pool_oracle::error::OracleError;
use thiserror::Error;

/// This enum describes TWAP oracle contract errors
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Oracle(#[from] OracleError),

    #[error("At least one pair must be tracked")]
    NoPairs {},

    #[error("Pair {pair} is listed more than once")]
    DuplicatePair { pair: String },
}
