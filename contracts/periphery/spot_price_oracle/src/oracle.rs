//! Spot pricing from current pool reserves.
//!
//! Prices are expressed in smallest units of the quote asset per one whole unit of the base
//! asset. The reserve ratio is first taken at [`SCALE`] and then moved to the base asset's
//! native decimals, so a price never depends on the magnitude of the reserves, only on their
//! ratio.

use cosmwasm_std::Uint256;
use pool_oracle::asset::AssetInfo;
use pool_oracle::error::OracleError;
use pool_oracle::reader::{get_reserves, PoolSource};
use pool_oracle::spot_oracle::{SCALE, SCALE_DECIMALS};

/// Returns `10^exp`, failing once it no longer fits in 256 bits.
pub fn pow10(exp: u8) -> Result<Uint256, OracleError> {
    Ok(Uint256::from(10u128).checked_pow(exp.into())?)
}

/// Moves a value with `from` decimals to `to` decimals, flooring when precision is dropped.
fn rescale(value: Uint256, from: u8, to: u8) -> Result<Uint256, OracleError> {
    if to >= from {
        Ok(value.checked_mul(pow10(to - from)?)?)
    } else {
        Ok(value.checked_div(pow10(from - to)?)?)
    }
}

/// Instantaneous price of one whole `base_asset` in `quote_asset` smallest units, read from
/// the pool holding both assets.
pub fn get_price(
    source: &impl PoolSource,
    base_asset: &AssetInfo,
    quote_asset: &AssetInfo,
) -> Result<Uint256, OracleError> {
    if base_asset == quote_asset {
        return Err(OracleError::DoublingAssets {});
    }

    let (reserve_base, reserve_quote, _) = get_reserves(source, base_asset, quote_asset)?;
    if reserve_base.is_zero() || reserve_quote.is_zero() {
        return Err(OracleError::InsufficientLiquidity {
            reserve0: reserve_base,
            reserve1: reserve_quote,
        });
    }

    let scaled = Uint256::from(reserve_quote)
        .checked_mul(SCALE)?
        .checked_div(Uint256::from(reserve_base))?;

    rescale(scaled, SCALE_DECIMALS, source.decimals(base_asset)?)
}

/// Same as [`get_price`], but when the pair has no pool of its own and `route_through` is set,
/// composes the price from the `base/via` and `via/quote` pools.
pub fn get_routed_price(
    source: &impl PoolSource,
    base_asset: &AssetInfo,
    quote_asset: &AssetInfo,
    route_through: Option<&AssetInfo>,
) -> Result<Uint256, OracleError> {
    match (get_price(source, base_asset, quote_asset), route_through) {
        (Err(OracleError::PoolNotFound { .. }), Some(via))
            if via != base_asset && via != quote_asset =>
        {
            let base_in_via = get_price(source, base_asset, via)?;
            let via_in_quote = get_price(source, via, quote_asset)?;

            Ok(base_in_via
                .checked_mul(via_in_quote)?
                .checked_div(pow10(source.decimals(via)?)?)?)
        }
        (direct, _) => direct,
    }
}

/// Returns `(quote - delta, quote + delta)` where `delta = quote * threshold / SCALE`.
/// A threshold above `SCALE` would push the lower bound below zero.
pub fn get_price_discrepancy_range(
    quote: Uint256,
    threshold: Uint256,
) -> Result<(Uint256, Uint256), OracleError> {
    if threshold > SCALE {
        return Err(OracleError::ArithmeticOverflow {});
    }

    let delta = quote.multiply_ratio(threshold, SCALE);

    Ok((quote.checked_sub(delta)?, quote.checked_add(delta)?))
}
