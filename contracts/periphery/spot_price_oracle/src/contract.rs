use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use pool_oracle::asset::{addr_validate_to_lower, AssetInfo};
use pool_oracle::reader::QuerierPoolSource;
use pool_oracle::spot_oracle::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, PriceDiscrepancyRangeResponse,
    QueryMsg,
};

use crate::error::ContractError;
use crate::oracle::{get_price_discrepancy_range, get_routed_price};
use crate::state::{Config, CONFIG};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new contract with the specified parameters in the [`InstantiateMsg`].
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if let Some(route_through) = &msg.route_through {
        route_through.check(deps.api)?;
    }

    let config = Config {
        owner: info.sender,
        registry: addr_validate_to_lower(deps.api, msg.registry)?,
        route_through: msg.route_through,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("registry", config.registry)
        .add_attribute("route_through", format_route(&config.route_through)))
}

/// Exposes all the execute functions available in the contract.
///
/// ## Variants
/// * **ExecuteMsg::UpdateConfig { route_through }** Changes the routing asset.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateConfig { route_through } => update_config(deps, info, route_through),
    }
}

/// Updates the routing asset. Only the owner can execute this.
fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    route_through: Option<AssetInfo>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    if let Some(route_through) = &route_through {
        route_through.check(deps.api)?;
    }

    config.route_through = route_through;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("route_through", format_route(&config.route_through)))
}

fn format_route(route_through: &Option<AssetInfo>) -> String {
    route_through
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// Exposes all the queries available in the contract.
///
/// ## Queries
/// * **QueryMsg::GetPrice { base_asset, quote_asset }** Returns the spot price of one whole
/// base asset in quote asset units.
///
/// * **QueryMsg::GetPriceDiscrepancyRange { quote, threshold }** Returns the band around a quote.
///
/// * **QueryMsg::Config {}** Returns the contract configuration.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetPrice {
            base_asset,
            quote_asset,
        } => {
            let config = CONFIG.load(deps.storage)?;
            let source = QuerierPoolSource::new(deps.querier, config.registry);
            let price = get_routed_price(
                &source,
                &base_asset,
                &quote_asset,
                config.route_through.as_ref(),
            )?;

            Ok(to_json_binary(&price)?)
        }
        QueryMsg::GetPriceDiscrepancyRange { quote, threshold } => {
            let (lower_bound, upper_bound) = get_price_discrepancy_range(quote, threshold)?;

            Ok(to_json_binary(&PriceDiscrepancyRangeResponse {
                lower_bound,
                upper_bound,
            })?)
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;

            Ok(to_json_binary(&ConfigResponse {
                owner: config.owner,
                registry: config.registry,
                route_through: config.route_through,
            })?)
        }
    }
}

/// Manages the contract migration.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> StdResult<Response> {
    let contract_version = get_contract_version(deps.storage)?;

    if contract_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err(
            "Cannot migrate. Unsupported contract name",
        ));
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("previous_contract_name", &contract_version.contract)
        .add_attribute("previous_contract_version", &contract_version.version)
        .add_attribute("new_contract_name", CONTRACT_NAME)
        .add_attribute("new_contract_version", CONTRACT_VERSION))
}
