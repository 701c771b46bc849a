//! Query interfaces of the collaborators both oracles read from: the pool registry and the
//! constant-product pools it resolves.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

use crate::asset::AssetInfo;
use crate::error::OracleError;
use crate::fixed_point::Uq112x112;

/// This structure stores the main parameters of a pool.
#[cw_serde]
pub struct PoolInfo {
    /// The pool assets in canonical order: `[token0, token1]`
    pub asset_infos: [AssetInfo; 2],
    /// Pool contract address
    pub contract_addr: Addr,
}

impl PoolInfo {
    /// Returns the index (0 or 1) of the asset inside the pool.
    pub fn position(&self, asset_info: &AssetInfo) -> Option<usize> {
        self.asset_infos.iter().position(|info| info == asset_info)
    }
}

/// This structure describes the query messages a pool registry must answer.
#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    /// Resolves an unordered pair of assets to its pool, if one exists
    #[returns(Option<PoolInfo>)]
    Pool { asset_infos: [AssetInfo; 2] },
    /// Returns the decimal precision of a native denom
    #[returns(u8)]
    NativeTokenDecimals { denom: String },
}

/// This structure describes the query messages a pool must answer.
#[cw_serde]
#[derive(QueryResponses)]
pub enum PoolQueryMsg {
    /// Returns the pool parameters
    #[returns(PoolInfo)]
    Pool {},
    /// Returns the reserves as of the pool's last update
    #[returns(ReservesResponse)]
    Reserves {},
    /// Returns the pool's cumulative price counters
    #[returns(CumulativePricesResponse)]
    CumulativePrices {},
}

#[cw_serde]
pub struct ReservesResponse {
    /// Reserve of token0
    pub reserve0: Uint128,
    /// Reserve of token1
    pub reserve1: Uint128,
    /// Block time of the pool's last update, seconds modulo 2^32
    pub block_timestamp_last: u32,
}

#[cw_serde]
pub struct CumulativePricesResponse {
    /// Time integral of token1 per token0 as UQ112x112, wrapping at 2^256
    pub price0_cumulative_last: Uint256,
    /// Time integral of token0 per token1 as UQ112x112, wrapping at 2^256
    pub price1_cumulative_last: Uint256,
}

impl CumulativePricesResponse {
    /// Advances both counters by `elapsed` seconds at the given reserves.
    /// Counters wrap at 2^256. Nothing accrues while one side of the pool is empty.
    pub fn accumulate(
        &self,
        reserve0: Uint128,
        reserve1: Uint128,
        elapsed: u32,
    ) -> Result<Self, OracleError> {
        if elapsed == 0 || reserve0.is_zero() || reserve1.is_zero() {
            return Ok(self.clone());
        }

        let elapsed = Uint256::from(u128::from(elapsed));
        let price0 = Uq112x112::fraction(reserve1, reserve0)?.raw();
        let price1 = Uq112x112::fraction(reserve0, reserve1)?.raw();

        Ok(Self {
            price0_cumulative_last: self
                .price0_cumulative_last
                .wrapping_add(price0.wrapping_mul(elapsed)),
            price1_cumulative_last: self
                .price1_cumulative_last
                .wrapping_add(price1.wrapping_mul(elapsed)),
        })
    }
}
