//! Cumulative price accumulator.
//!
//! A pool integrates its price over time into two wrapping counters. A [`Snapshot`] remembers
//! the counters at the last sync, and the next sync divides the counter delta by the elapsed
//! time to get the average price over the window. Deltas are taken with wrapping subtraction
//! so a counter crossing 2^256 or a timestamp crossing 2^32 still yields the right average.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};
use pool_oracle::asset::AssetInfo;
use pool_oracle::error::OracleError;
use pool_oracle::fixed_point::Uq112x112;
use pool_oracle::pool::PoolInfo;
use pool_oracle::reader::PoolSource;
use pool_oracle::twap_oracle::SnapshotResponse;

/// Cumulative prices as of `now`, extrapolated from the pool's last update at the reserves
/// in effect since then. Returns `(price0_cumulative, price1_cumulative, now)`.
pub fn current_cumulative_prices(
    source: &impl PoolSource,
    pool: &PoolInfo,
    now: u32,
) -> Result<(Uint256, Uint256, u32), OracleError> {
    let reserves = source.reserves(pool)?;
    let cumulative = source.cumulative_prices(pool)?.accumulate(
        reserves.reserve0,
        reserves.reserve1,
        now.wrapping_sub(reserves.block_timestamp_last),
    )?;

    Ok((
        cumulative.price0_cumulative_last,
        cumulative.price1_cumulative_last,
        now,
    ))
}

/// Accumulator state of one tracked pool.
#[cw_serde]
pub struct Snapshot {
    pub pool: PoolInfo,
    /// Decimals of `pool.asset_infos`, cached at instantiation
    pub decimals: [u8; 2],
    pub price0_cumulative_last: Uint256,
    pub price1_cumulative_last: Uint256,
    pub block_timestamp_last: u32,
    /// token1 per token0 over the last window
    pub price0_average: Uq112x112,
    /// token0 per token1 over the last window
    pub price1_average: Uq112x112,
}

impl Snapshot {
    /// Opens the first window at `now`. Averages stay zero until the first sync.
    pub fn new(
        source: &impl PoolSource,
        asset_infos: &[AssetInfo; 2],
        now: u32,
    ) -> Result<Self, OracleError> {
        let pool = source.resolve_pool(asset_infos)?;

        let reserves = source.reserves(&pool)?;
        if reserves.reserve0.is_zero() || reserves.reserve1.is_zero() {
            return Err(OracleError::InsufficientLiquidity {
                reserve0: reserves.reserve0,
                reserve1: reserves.reserve1,
            });
        }

        let decimals = [
            source.decimals(&pool.asset_infos[0])?,
            source.decimals(&pool.asset_infos[1])?,
        ];
        let (price0_cumulative_last, price1_cumulative_last, block_timestamp_last) =
            current_cumulative_prices(source, &pool, now)?;

        Ok(Self {
            pool,
            decimals,
            price0_cumulative_last,
            price1_cumulative_last,
            block_timestamp_last,
            price0_average: Uq112x112::zero(),
            price1_average: Uq112x112::zero(),
        })
    }

    /// Closes the current window at `now` and opens the next one.
    /// Returns false without touching the state when no time has passed. On error the
    /// snapshot is left as it was.
    pub fn sync(&mut self, source: &impl PoolSource, now: u32) -> Result<bool, OracleError> {
        let elapsed = now.wrapping_sub(self.block_timestamp_last);
        if elapsed == 0 {
            return Ok(false);
        }

        let (price0_cumulative, price1_cumulative, block_timestamp) =
            current_cumulative_prices(source, &self.pool, now)?;
        let elapsed = Uint256::from(u128::from(elapsed));

        let price0_average = Uq112x112::from_raw(
            price0_cumulative.wrapping_sub(self.price0_cumulative_last) / elapsed,
        )?;
        let price1_average = Uq112x112::from_raw(
            price1_cumulative.wrapping_sub(self.price1_cumulative_last) / elapsed,
        )?;

        self.price0_average = price0_average;
        self.price1_average = price1_average;
        self.price0_cumulative_last = price0_cumulative;
        self.price1_cumulative_last = price1_cumulative;
        self.block_timestamp_last = block_timestamp;

        Ok(true)
    }

    /// Average price of `asset_info` in the other pool asset with the decimals of
    /// `asset_info`.
    fn average_of(&self, asset_info: &AssetInfo) -> Result<(Uq112x112, u8), OracleError> {
        let (average, decimals) = match self.pool.position(asset_info) {
            Some(0) => (self.price0_average, self.decimals[0]),
            Some(_) => (self.price1_average, self.decimals[1]),
            None => return Err(OracleError::InvalidAsset(asset_info.to_string())),
        };

        if average.is_zero() {
            return Err(OracleError::StaleWindow {});
        }

        Ok((average, decimals))
    }

    /// Average price of one whole `asset_info` in smallest units of the other asset.
    pub fn price(&self, asset_info: &AssetInfo) -> Result<Uint256, OracleError> {
        let (average, decimals) = self.average_of(asset_info)?;
        let one = Uint256::from(10u128).checked_pow(decimals.into())?;

        Ok(average.mul(one)?.decode144())
    }

    /// Amount of the other asset that `amount` of `asset_info` is worth at the average price.
    pub fn consult(&self, asset_info: &AssetInfo, amount: Uint128) -> Result<Uint256, OracleError> {
        let (average, _) = self.average_of(asset_info)?;

        Ok(average.mul(amount)?.decode144())
    }
}

impl From<Snapshot> for SnapshotResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            asset_infos: snapshot.pool.asset_infos,
            pool: snapshot.pool.contract_addr,
            price0_cumulative_last: snapshot.price0_cumulative_last,
            price1_cumulative_last: snapshot.price1_cumulative_last,
            block_timestamp_last: snapshot.block_timestamp_last,
            price0_average: snapshot.price0_average,
            price1_average: snapshot.price1_average,
        }
    }
}
