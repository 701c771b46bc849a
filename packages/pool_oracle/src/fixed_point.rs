//! Binary fixed-point numbers used by the cumulative price accumulators.
//!
//! Prices are kept as `UQ112x112` values: 112 integer bits and 112 fractional bits in the
//! low 224 bits of a [`Uint256`]. Multiplying by an integer yields a `UQ144x112`, which
//! [`Uq144x112::decode144`] turns back into an integer by flooring the fractional part.
//! Every division floors. The downward bias is part of the accumulator semantics.

use cosmwasm_std::{Uint128, Uint256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Number of fractional bits.
pub const RESOLUTION: u32 = 112;

/// Largest integer that can be encoded: 2^112 - 1.
pub const MAX_UINT112: Uint128 = Uint128::new((1u128 << 112) - 1);

fn max_uint224() -> Uint256 {
    (Uint256::one() << 224u32) - Uint256::one()
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct Uq112x112(Uint256);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct Uq144x112(Uint256);

impl Uq112x112 {
    pub const fn zero() -> Self {
        Self(Uint256::zero())
    }

    /// Encodes an integer as a `UQ112x112`. The integer must fit in 112 bits.
    pub fn encode(y: Uint128) -> Result<Self, OracleError> {
        if y > MAX_UINT112 {
            return Err(OracleError::ArithmeticOverflow {});
        }

        Ok(Self(Uint256::from(y) << RESOLUTION))
    }

    /// Wraps an already scaled value, e.g. a cumulative price delta divided by elapsed time.
    pub fn from_raw(raw: Uint256) -> Result<Self, OracleError> {
        if raw > max_uint224() {
            return Err(OracleError::ArithmeticOverflow {});
        }

        Ok(Self(raw))
    }

    /// Returns `numerator / denominator` as a `UQ112x112`.
    pub fn fraction(numerator: Uint128, denominator: Uint128) -> Result<Self, OracleError> {
        Self::encode(numerator)?.divide(denominator)
    }

    /// Divides by an integer, flooring the result.
    pub fn divide(self, x: Uint128) -> Result<Self, OracleError> {
        if x.is_zero() {
            return Err(OracleError::DivisionByZero {});
        }
        if x > MAX_UINT112 {
            return Err(OracleError::ArithmeticOverflow {});
        }

        Ok(Self(self.0 / Uint256::from(x)))
    }

    /// Multiplies by an integer. Fails instead of wrapping when the product exceeds 256 bits.
    pub fn mul(self, y: impl Into<Uint256>) -> Result<Uq144x112, OracleError> {
        Ok(Uq144x112(self.0.checked_mul(y.into())?))
    }

    pub fn raw(&self) -> Uint256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Uq144x112 {
    /// Drops the fractional bits.
    pub fn decode144(self) -> Uint256 {
        self.0 >> RESOLUTION
    }

    pub fn raw(&self) -> Uint256 {
        self.0
    }
}
