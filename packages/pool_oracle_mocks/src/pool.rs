use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Uint128, Uint256,
};
use cw_multi_test::{AppResponse, ContractWrapper, Executor};
use cw_storage_plus::Item;
use pool_oracle::asset::{sort_asset_infos, AssetInfo};
use pool_oracle::block_timestamp;
use pool_oracle::pool::{CumulativePricesResponse, PoolInfo, PoolQueryMsg, ReservesResponse};

use crate::{owner_address, MockApp};

const POOL_INFO: Item<PoolInfo> = Item::new("pool_info");
const RESERVES: Item<ReservesResponse> = Item::new("reserves");
const CUMULATIVE: Item<CumulativePricesResponse> = Item::new("cumulative");
const OFFLINE: Item<bool> = Item::new("offline");

#[cw_serde]
pub struct InstantiateMsg {
    pub asset_infos: [AssetInfo; 2],
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Replaces the reserves. Counters accrue at the old reserves first.
    SetReserves { amounts: [(AssetInfo, Uint128); 2] },
    /// Overwrites the cumulative counters
    SetCumulativePrices {
        price0_cumulative_last: Uint256,
        price1_cumulative_last: Uint256,
    },
    /// While offline every pool query fails
    SetOffline { offline: bool },
}

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    POOL_INFO.save(
        deps.storage,
        &PoolInfo {
            asset_infos: sort_asset_infos(&msg.asset_infos),
            contract_addr: env.contract.address,
        },
    )?;
    RESERVES.save(
        deps.storage,
        &ReservesResponse {
            reserve0: Uint128::zero(),
            reserve1: Uint128::zero(),
            block_timestamp_last: block_timestamp(&env.block),
        },
    )?;
    CUMULATIVE.save(
        deps.storage,
        &CumulativePricesResponse {
            price0_cumulative_last: Uint256::zero(),
            price1_cumulative_last: Uint256::zero(),
        },
    )?;

    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetReserves { amounts } => {
            let pool = POOL_INFO.load(deps.storage)?;
            let reserves = RESERVES.load(deps.storage)?;
            let now = block_timestamp(&env.block);

            let cumulative = CUMULATIVE
                .load(deps.storage)?
                .accumulate(
                    reserves.reserve0,
                    reserves.reserve1,
                    now.wrapping_sub(reserves.block_timestamp_last),
                )
                .map_err(|err| StdError::generic_err(err.to_string()))?;
            CUMULATIVE.save(deps.storage, &cumulative)?;

            let amount_of = |asset_info: &AssetInfo| {
                amounts
                    .iter()
                    .find(|(info, _)| info == asset_info)
                    .map(|(_, amount)| *amount)
                    .ok_or_else(|| StdError::generic_err(format!("missing amount for {asset_info}")))
            };
            RESERVES.save(
                deps.storage,
                &ReservesResponse {
                    reserve0: amount_of(&pool.asset_infos[0])?,
                    reserve1: amount_of(&pool.asset_infos[1])?,
                    block_timestamp_last: now,
                },
            )?;

            Ok(Response::new().add_attribute("action", "set_reserves"))
        }
        ExecuteMsg::SetCumulativePrices {
            price0_cumulative_last,
            price1_cumulative_last,
        } => {
            CUMULATIVE.save(
                deps.storage,
                &CumulativePricesResponse {
                    price0_cumulative_last,
                    price1_cumulative_last,
                },
            )?;

            Ok(Response::new().add_attribute("action", "set_cumulative_prices"))
        }
        ExecuteMsg::SetOffline { offline } => {
            OFFLINE.save(deps.storage, &offline)?;

            Ok(Response::new().add_attribute("action", "set_offline"))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: PoolQueryMsg) -> StdResult<Binary> {
    if OFFLINE.may_load(deps.storage)?.unwrap_or_default() {
        return Err(StdError::generic_err("Pool is offline"));
    }

    match msg {
        PoolQueryMsg::Pool {} => to_json_binary(&POOL_INFO.load(deps.storage)?),
        PoolQueryMsg::Reserves {} => to_json_binary(&RESERVES.load(deps.storage)?),
        PoolQueryMsg::CumulativePrices {} => to_json_binary(&CUMULATIVE.load(deps.storage)?),
    }
}

pub fn store_code(app: &MockApp) -> u64 {
    let contract = Box::new(ContractWrapper::new_with_empty(execute, instantiate, query));

    app.borrow_mut().store_code(contract)
}

/// A constant-product pool that keeps reserves and cumulative counters the way a real pool
/// does, without swaps or liquidity accounting.
pub struct MockPool {
    pub app: MockApp,
    pub address: Addr,
    pub asset_infos: [AssetInfo; 2],
}

impl MockPool {
    pub fn set_reserves(&self, amounts: [(&AssetInfo, u128); 2]) -> AppResponse {
        let amounts = amounts.map(|(info, amount)| (info.clone(), Uint128::new(amount)));

        self.app
            .borrow_mut()
            .execute_contract(
                owner_address(),
                self.address.clone(),
                &ExecuteMsg::SetReserves { amounts },
                &[],
            )
            .unwrap()
    }

    pub fn set_cumulative_prices(&self, price0: Uint256, price1: Uint256) -> AppResponse {
        self.app
            .borrow_mut()
            .execute_contract(
                owner_address(),
                self.address.clone(),
                &ExecuteMsg::SetCumulativePrices {
                    price0_cumulative_last: price0,
                    price1_cumulative_last: price1,
                },
                &[],
            )
            .unwrap()
    }

    pub fn set_offline(&self, offline: bool) -> AppResponse {
        self.app
            .borrow_mut()
            .execute_contract(
                owner_address(),
                self.address.clone(),
                &ExecuteMsg::SetOffline { offline },
                &[],
            )
            .unwrap()
    }

    pub fn reserves(&self) -> ReservesResponse {
        self.app
            .borrow()
            .wrap()
            .query_wasm_smart(&self.address, &PoolQueryMsg::Reserves {})
            .unwrap()
    }

    pub fn cumulative_prices(&self) -> CumulativePricesResponse {
        self.app
            .borrow()
            .wrap()
            .query_wasm_smart(&self.address, &PoolQueryMsg::CumulativePrices {})
            .unwrap()
    }
}
