use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw20::{Cw20QueryMsg, TokenInfoResponse};
use cw_multi_test::{ContractWrapper, Executor};
use cw_storage_plus::Item;
use pool_oracle::asset::AssetInfo;

use crate::{owner_address, MockApp, OWNER};

const TOKEN_INFO: Item<TokenInfoResponse> = Item::new("token_info");

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A CW20 stand-in that only answers `TokenInfo`.
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfoResponse {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
        },
    )?;

    Ok(Response::new())
}

pub fn execute(_deps: DepsMut, _env: Env, _info: MessageInfo, _msg: Empty) -> StdResult<Response> {
    Err(StdError::generic_err("mock token accepts no messages"))
}

pub fn query(deps: Deps, _env: Env, msg: Cw20QueryMsg) -> StdResult<Binary> {
    match msg {
        Cw20QueryMsg::TokenInfo {} => to_json_binary(&TOKEN_INFO.load(deps.storage)?),
        _ => Err(StdError::generic_err("unsupported query")),
    }
}

pub fn store_code(app: &MockApp) -> u64 {
    let contract = Box::new(ContractWrapper::new_with_empty(execute, instantiate, query));

    app.borrow_mut().store_code(contract)
}

pub struct MockTokenBuilder {
    pub app: MockApp,
    pub symbol: String,
    pub decimals: u8,
}

impl MockTokenBuilder {
    pub fn new(app: &MockApp, symbol: &str) -> Self {
        Self {
            app: app.clone(),
            symbol: symbol.to_owned(),
            decimals: 6,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn instantiate(self) -> MockToken {
        let code_id = store_code(&self.app);

        let address = self
            .app
            .borrow_mut()
            .instantiate_contract(
                code_id,
                owner_address(),
                &InstantiateMsg {
                    name: self.symbol.clone(),
                    symbol: self.symbol.clone(),
                    decimals: self.decimals,
                },
                &[],
                self.symbol,
                Some(OWNER.to_owned()),
            )
            .unwrap();

        MockToken {
            app: self.app,
            address,
        }
    }
}

pub struct MockToken {
    pub app: MockApp,
    pub address: Addr,
}

impl MockToken {
    pub fn asset_info(&self) -> AssetInfo {
        AssetInfo::cw20(self.address.clone())
    }
}
