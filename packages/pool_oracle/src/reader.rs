use cosmwasm_std::{Addr, QuerierWrapper, Uint128};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use crate::asset::{format_pair, AssetInfo};
use crate::error::OracleError;
use crate::pool::{
    CumulativePricesResponse, PoolInfo, PoolQueryMsg, RegistryQueryMsg, ReservesResponse,
};

/// Read-only access to the pool registry and pool state.
///
/// The oracles only ever read through this trait, so the same pricing code runs against the
/// chain ([`QuerierPoolSource`]) and against an in-memory fixture in tests.
pub trait PoolSource {
    /// Resolves an unordered asset pair to its pool. Fails with
    /// [`OracleError::PoolNotFound`] when the registry knows no such pool.
    fn resolve_pool(&self, asset_infos: &[AssetInfo; 2]) -> Result<PoolInfo, OracleError>;

    /// Reserves in the pool's canonical order together with the pool's last update time.
    fn reserves(&self, pool: &PoolInfo) -> Result<ReservesResponse, OracleError>;

    fn cumulative_prices(&self, pool: &PoolInfo) -> Result<CumulativePricesResponse, OracleError>;

    /// Native decimal precision of an asset.
    fn decimals(&self, asset_info: &AssetInfo) -> Result<u8, OracleError>;
}

/// [`PoolSource`] backed by smart queries against live registry, pool and CW20 contracts.
pub struct QuerierPoolSource<'a> {
    querier: QuerierWrapper<'a>,
    registry: Addr,
}

impl<'a> QuerierPoolSource<'a> {
    pub fn new(querier: QuerierWrapper<'a>, registry: Addr) -> Self {
        Self { querier, registry }
    }
}

impl PoolSource for QuerierPoolSource<'_> {
    fn resolve_pool(&self, asset_infos: &[AssetInfo; 2]) -> Result<PoolInfo, OracleError> {
        let pool: Option<PoolInfo> = self.querier.query_wasm_smart(
            &self.registry,
            &RegistryQueryMsg::Pool {
                asset_infos: asset_infos.clone(),
            },
        )?;

        pool.ok_or_else(|| OracleError::PoolNotFound {
            pair: format_pair(asset_infos),
        })
    }

    fn reserves(&self, pool: &PoolInfo) -> Result<ReservesResponse, OracleError> {
        Ok(self
            .querier
            .query_wasm_smart(&pool.contract_addr, &PoolQueryMsg::Reserves {})?)
    }

    fn cumulative_prices(&self, pool: &PoolInfo) -> Result<CumulativePricesResponse, OracleError> {
        Ok(self
            .querier
            .query_wasm_smart(&pool.contract_addr, &PoolQueryMsg::CumulativePrices {})?)
    }

    fn decimals(&self, asset_info: &AssetInfo) -> Result<u8, OracleError> {
        let decimals = match asset_info {
            AssetInfo::NativeToken { denom } => self.querier.query_wasm_smart(
                &self.registry,
                &RegistryQueryMsg::NativeTokenDecimals {
                    denom: denom.clone(),
                },
            )?,
            AssetInfo::Token { contract_addr } => {
                let res: TokenInfoResponse = self
                    .querier
                    .query_wasm_smart(contract_addr, &Cw20QueryMsg::TokenInfo {})?;

                res.decimals
            }
        };

        Ok(decimals)
    }
}

/// Reorders pool reserves to `(reserve of asset, reserve of the other asset)`.
pub fn reserves_for(
    pool: &PoolInfo,
    reserves: &ReservesResponse,
    asset_info: &AssetInfo,
) -> Result<(Uint128, Uint128), OracleError> {
    match pool.position(asset_info) {
        Some(0) => Ok((reserves.reserve0, reserves.reserve1)),
        Some(_) => Ok((reserves.reserve1, reserves.reserve0)),
        None => Err(OracleError::InvalidAsset(asset_info.to_string())),
    }
}

/// Returns `(reserve_a, reserve_b, block_timestamp_last)` for the pool holding `asset_a` and
/// `asset_b`, in the caller's order regardless of the pool's canonical order.
pub fn get_reserves(
    source: &impl PoolSource,
    asset_a: &AssetInfo,
    asset_b: &AssetInfo,
) -> Result<(Uint128, Uint128, u32), OracleError> {
    let pool = source.resolve_pool(&[asset_a.clone(), asset_b.clone()])?;
    let reserves = source.reserves(&pool)?;
    let (reserve_a, reserve_b) = reserves_for(&pool, &reserves, asset_a)?;

    Ok((reserve_a, reserve_b, reserves.block_timestamp_last))
}
