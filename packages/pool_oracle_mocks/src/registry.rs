use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw_multi_test::{ContractWrapper, Executor};
use cw_storage_plus::Map;
use pool_oracle::asset::{format_pair, pair_key, sort_asset_infos, AssetInfo};
use pool_oracle::pool::{PoolInfo, RegistryQueryMsg};

use crate::pool::{self, MockPool};
use crate::{owner_address, MockApp, OWNER};

const POOLS: Map<&[u8], PoolInfo> = Map::new("pools");
const NATIVE_DECIMALS: Map<&str, u8> = Map::new("native_decimals");

#[cw_serde]
pub enum ExecuteMsg {
    Register {
        asset_infos: [AssetInfo; 2],
        pool: String,
    },
    SetNativeDecimals {
        denom: String,
        decimals: u8,
    },
}

pub fn instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::Register { asset_infos, pool } => {
            let key = pair_key(&asset_infos);
            if POOLS.has(deps.storage, &key) {
                return Err(StdError::generic_err(format!(
                    "Pool {} already registered",
                    format_pair(&asset_infos)
                )));
            }

            POOLS.save(
                deps.storage,
                &key,
                &PoolInfo {
                    asset_infos: sort_asset_infos(&asset_infos),
                    contract_addr: deps.api.addr_validate(&pool)?,
                },
            )?;

            Ok(Response::new().add_attribute("action", "register"))
        }
        ExecuteMsg::SetNativeDecimals { denom, decimals } => {
            NATIVE_DECIMALS.save(deps.storage, &denom, &decimals)?;

            Ok(Response::new().add_attribute("action", "set_native_decimals"))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::Pool { asset_infos } => {
            to_json_binary(&POOLS.may_load(deps.storage, &pair_key(&asset_infos))?)
        }
        RegistryQueryMsg::NativeTokenDecimals { denom } => {
            let decimals = NATIVE_DECIMALS
                .may_load(deps.storage, &denom)?
                .ok_or_else(|| StdError::generic_err(format!("Unknown native denom {denom}")))?;
            to_json_binary(&decimals)
        }
    }
}

pub fn store_code(app: &MockApp) -> u64 {
    let contract = Box::new(ContractWrapper::new_with_empty(execute, instantiate, query));

    app.borrow_mut().store_code(contract)
}

pub struct MockRegistryBuilder {
    pub app: MockApp,
    pub native_decimals: Vec<(String, u8)>,
}

impl MockRegistryBuilder {
    pub fn new(app: &MockApp) -> Self {
        Self {
            app: app.clone(),
            native_decimals: vec![],
        }
    }

    pub fn with_native_decimals(mut self, denom: &str, decimals: u8) -> Self {
        self.native_decimals.push((denom.to_owned(), decimals));
        self
    }

    pub fn instantiate(self) -> MockRegistry {
        let code_id = store_code(&self.app);

        let address = self
            .app
            .borrow_mut()
            .instantiate_contract(
                code_id,
                owner_address(),
                &Empty {},
                &[],
                "Pool Registry",
                Some(OWNER.to_owned()),
            )
            .unwrap();

        let registry = MockRegistry {
            app: self.app,
            address,
        };
        for (denom, decimals) in self.native_decimals {
            registry.set_native_decimals(&denom, decimals);
        }

        registry
    }
}

pub struct MockRegistry {
    pub app: MockApp,
    pub address: Addr,
}

impl MockRegistry {
    /// Instantiates an empty pool for the pair and registers it.
    pub fn create_pool(&self, asset_infos: [AssetInfo; 2]) -> MockPool {
        let code_id = pool::store_code(&self.app);

        let address = self
            .app
            .borrow_mut()
            .instantiate_contract(
                code_id,
                owner_address(),
                &pool::InstantiateMsg {
                    asset_infos: asset_infos.clone(),
                },
                &[],
                format!("Pool {}", format_pair(&asset_infos)),
                Some(OWNER.to_owned()),
            )
            .unwrap();

        self.app
            .borrow_mut()
            .execute_contract(
                owner_address(),
                self.address.clone(),
                &ExecuteMsg::Register {
                    asset_infos: asset_infos.clone(),
                    pool: address.to_string(),
                },
                &[],
            )
            .unwrap();

        MockPool {
            app: self.app.clone(),
            address,
            asset_infos,
        }
    }

    pub fn set_native_decimals(&self, denom: &str, decimals: u8) {
        self.app
            .borrow_mut()
            .execute_contract(
                owner_address(),
                self.address.clone(),
                &ExecuteMsg::SetNativeDecimals {
                    denom: denom.to_owned(),
                    decimals,
                },
                &[],
            )
            .unwrap();
    }

    pub fn pool(&self, asset_infos: [AssetInfo; 2]) -> Option<PoolInfo> {
        self.app
            .borrow()
            .wrap()
            .query_wasm_smart(&self.address, &RegistryQueryMsg::Pool { asset_infos })
            .unwrap()
    }
}
