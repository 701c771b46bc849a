//! In-memory [`PoolSource`] for unit tests.
//!
//! Pools behave like constant-product pools as far as the oracles can observe: every reserve
//! update first accrues the cumulative counters at the previous reserves.

use std::collections::HashMap;

use cosmwasm_std::{Addr, StdError, Uint128, Uint256};

use crate::asset::{format_pair, pair_key, sort_asset_infos, AssetInfo};
use crate::error::OracleError;
use crate::pool::{CumulativePricesResponse, PoolInfo, ReservesResponse};
use crate::reader::PoolSource;

#[derive(Clone, Debug)]
struct PoolState {
    info: PoolInfo,
    reserves: ReservesResponse,
    cumulative: CumulativePricesResponse,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryPoolSource {
    pools: HashMap<Vec<u8>, PoolState>,
    decimals: HashMap<AssetInfo, u8>,
}

impl MemoryPoolSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty pool for the pair. Assets are stored in canonical order.
    pub fn with_pool(mut self, asset_infos: [AssetInfo; 2], contract_addr: &str) -> Self {
        let info = PoolInfo {
            asset_infos: sort_asset_infos(&asset_infos),
            contract_addr: Addr::unchecked(contract_addr),
        };
        self.pools.insert(
            pair_key(&asset_infos),
            PoolState {
                info,
                reserves: ReservesResponse {
                    reserve0: Uint128::zero(),
                    reserve1: Uint128::zero(),
                    block_timestamp_last: 0,
                },
                cumulative: CumulativePricesResponse {
                    price0_cumulative_last: Uint256::zero(),
                    price1_cumulative_last: Uint256::zero(),
                },
            },
        );
        self
    }

    pub fn with_decimals(mut self, asset_info: AssetInfo, decimals: u8) -> Self {
        self.decimals.insert(asset_info, decimals);
        self
    }

    pub fn remove_pool(&mut self, asset_infos: &[AssetInfo; 2]) {
        self.pools.remove(&pair_key(asset_infos));
    }

    /// Sets reserves given in the order of `asset_infos` at time `now`, accruing the
    /// cumulative counters for the time passed since the previous update.
    pub fn set_reserves(
        &mut self,
        asset_infos: &[AssetInfo; 2],
        amount_a: u128,
        amount_b: u128,
        now: u32,
    ) -> &mut Self {
        let state = self.state_mut(asset_infos);
        let elapsed = now.wrapping_sub(state.reserves.block_timestamp_last);
        state.cumulative = state
            .cumulative
            .accumulate(state.reserves.reserve0, state.reserves.reserve1, elapsed)
            .expect("reserves must fit in 112 bits");

        let (reserve0, reserve1) = if state.info.asset_infos[0] == asset_infos[0] {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        state.reserves = ReservesResponse {
            reserve0: Uint128::new(reserve0),
            reserve1: Uint128::new(reserve1),
            block_timestamp_last: now,
        };
        self
    }

    /// Overwrites the cumulative counters, e.g. to place them right below the wrap boundary.
    pub fn set_cumulative(
        &mut self,
        asset_infos: &[AssetInfo; 2],
        price0_cumulative_last: Uint256,
        price1_cumulative_last: Uint256,
    ) -> &mut Self {
        self.state_mut(asset_infos).cumulative = CumulativePricesResponse {
            price0_cumulative_last,
            price1_cumulative_last,
        };
        self
    }

    fn state_mut(&mut self, asset_infos: &[AssetInfo; 2]) -> &mut PoolState {
        self.pools
            .get_mut(&pair_key(asset_infos))
            .unwrap_or_else(|| panic!("no pool registered for {}", format_pair(asset_infos)))
    }

    fn state(&self, pool: &PoolInfo) -> Result<&PoolState, OracleError> {
        self.pools
            .get(&pair_key(&pool.asset_infos))
            .ok_or_else(|| StdError::not_found(format!("pool {}", pool.contract_addr)).into())
    }
}

impl PoolSource for MemoryPoolSource {
    fn resolve_pool(&self, asset_infos: &[AssetInfo; 2]) -> Result<PoolInfo, OracleError> {
        self.pools
            .get(&pair_key(asset_infos))
            .map(|state| state.info.clone())
            .ok_or_else(|| OracleError::PoolNotFound {
                pair: format_pair(asset_infos),
            })
    }

    fn reserves(&self, pool: &PoolInfo) -> Result<ReservesResponse, OracleError> {
        self.state(pool).map(|state| state.reserves.clone())
    }

    fn cumulative_prices(&self, pool: &PoolInfo) -> Result<CumulativePricesResponse, OracleError> {
        self.state(pool).map(|state| state.cumulative.clone())
    }

    fn decimals(&self, asset_info: &AssetInfo) -> Result<u8, OracleError> {
        self.decimals.get(asset_info).copied().ok_or_else(|| {
            StdError::generic_err(format!("unknown decimals for {}", asset_info)).into()
        })
    }
}
