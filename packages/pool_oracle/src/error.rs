use cosmwasm_std::{
    CheckedMultiplyRatioError, ConversionOverflowError, DivideByZeroError, OverflowError, StdError,
    Uint128,
};
use thiserror::Error;

/// This enum describes the failures shared by both price oracles.
#[derive(Error, Debug, PartialEq)]
pub enum OracleError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("No pool found for pair {pair}")]
    PoolNotFound { pair: String },

    #[error("Pool has no liquidity on one side. Reserve0 = {reserve0}, Reserve1 = {reserve1}")]
    InsufficientLiquidity { reserve0: Uint128, reserve1: Uint128 },

    #[error("Division by zero")]
    DivisionByZero {},

    #[error("No time-weighted window has elapsed yet. Sync prices and wait before querying")]
    StaleWindow {},

    #[error("Value exceeds the fixed-point encoding capacity")]
    ArithmeticOverflow {},

    #[error("Doubling assets in asset infos")]
    DoublingAssets {},

    #[error("The asset {0} does not belong to any tracked pair")]
    InvalidAsset(String),

    #[error("The asset {0} belongs to several tracked pairs, quote_asset must be set")]
    AmbiguousAsset(String),
}

impl From<OverflowError> for OracleError {
    fn from(_: OverflowError) -> Self {
        OracleError::ArithmeticOverflow {}
    }
}

impl From<ConversionOverflowError> for OracleError {
    fn from(_: ConversionOverflowError) -> Self {
        OracleError::ArithmeticOverflow {}
    }
}

impl From<DivideByZeroError> for OracleError {
    fn from(_: DivideByZeroError) -> Self {
        OracleError::DivisionByZero {}
    }
}

impl From<CheckedMultiplyRatioError> for OracleError {
    fn from(e: CheckedMultiplyRatioError) -> Self {
        match e {
            CheckedMultiplyRatioError::DivideByZero => OracleError::DivisionByZero {},
            CheckedMultiplyRatioError::Overflow => OracleError::ArithmeticOverflow {},
        }
    }
}
