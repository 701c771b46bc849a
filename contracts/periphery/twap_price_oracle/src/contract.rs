use cosmwasm_std::{
    attr, entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Storage,
};
use cw2::{get_contract_version, set_contract_version};
use itertools::Itertools;
use pool_oracle::asset::{
    addr_validate_to_lower, check_asset_pair, format_pair, pair_key, AssetInfo,
};
use pool_oracle::block_timestamp;
use pool_oracle::error::OracleError;
use pool_oracle::reader::QuerierPoolSource;
use pool_oracle::twap_oracle::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SnapshotResponse,
};

use crate::accumulator::Snapshot;
use crate::error::ContractError;
use crate::state::{Config, CONFIG, SNAPSHOTS};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new contract with the specified parameters in the [`InstantiateMsg`].
/// Every pair gets a snapshot of its pool's cumulative prices as of the current block.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.pairs.is_empty() {
        return Err(ContractError::NoPairs {});
    }
    for pair in &msg.pairs {
        check_asset_pair(deps.api, pair)?;
    }
    if let Some(pair) = msg.pairs.iter().duplicates_by(|pair| pair_key(pair)).next() {
        return Err(ContractError::DuplicatePair {
            pair: format_pair(pair),
        });
    }

    let config = Config {
        owner: info.sender,
        registry: addr_validate_to_lower(deps.api, msg.registry)?,
        pairs: msg.pairs,
    };

    let source = QuerierPoolSource::new(deps.querier, config.registry.clone());
    let now = block_timestamp(&env.block);
    for pair in &config.pairs {
        let snapshot = Snapshot::new(&source, pair, now)?;
        SNAPSHOTS.save(deps.storage, &pair_key(pair), &snapshot)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("registry", config.registry)
        .add_attribute("pairs", config.pairs.len().to_string())
        .add_attribute("block_timestamp", now.to_string()))
}

/// Exposes all the execute functions available in the contract.
///
/// ## Variants
/// * **ExecuteMsg::SyncPrices {}** Closes the current averaging window of every tracked pair.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SyncPrices {} => sync_prices(deps, env),
    }
}

/// Syncs every snapshot. A pair whose window has zero length is reported as skipped.
/// Any failing pool read aborts the whole message, so snapshots move together or not at all.
pub fn sync_prices(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let source = QuerierPoolSource::new(deps.querier, config.registry);
    let now = block_timestamp(&env.block);

    let mut attrs = vec![attr("action", "sync_prices")];
    for pair in &config.pairs {
        let key = pair_key(pair);
        let mut snapshot = SNAPSHOTS.load(deps.storage, &key)?;

        let outcome = if snapshot.sync(&source, now)? {
            SNAPSHOTS.save(deps.storage, &key, &snapshot)?;
            "synced"
        } else {
            "skipped"
        };
        attrs.push(attr(format_pair(pair), outcome));
    }
    attrs.push(attr("block_timestamp", now.to_string()));

    Ok(Response::new().add_attributes(attrs))
}

/// Exposes all the queries available in the contract.
///
/// ## Queries
/// * **QueryMsg::GetPrice { asset, quote_asset }** Returns the time-weighted price of one whole
/// `asset`.
///
/// * **QueryMsg::Consult { asset, amount, quote_asset }** Converts an amount at the
/// time-weighted price.
///
/// * **QueryMsg::BlockTimestampLast {}** Returns the time of the oldest sync.
///
/// * **QueryMsg::Config {}** Returns the contract configuration.
///
/// * **QueryMsg::Snapshots {}** Returns the raw accumulator state of every tracked pair.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetPrice { asset, quote_asset } => {
            let snapshot = find_snapshot(deps.storage, &asset, quote_asset)?;
            Ok(to_json_binary(&snapshot.price(&asset)?)?)
        }
        QueryMsg::Consult {
            asset,
            amount,
            quote_asset,
        } => {
            let snapshot = find_snapshot(deps.storage, &asset, quote_asset)?;
            Ok(to_json_binary(&snapshot.consult(&asset, amount)?)?)
        }
        QueryMsg::BlockTimestampLast {} => {
            // snapshots only advance together in sync_prices, so they never straddle a clock wrap
            let oldest = load_snapshots(deps.storage)?
                .into_iter()
                .map(|snapshot| snapshot.block_timestamp_last)
                .min()
                .ok_or(ContractError::NoPairs {})?;
            Ok(to_json_binary(&oldest)?)
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            Ok(to_json_binary(&ConfigResponse {
                owner: config.owner,
                registry: config.registry,
                pairs: config.pairs,
            })?)
        }
        QueryMsg::Snapshots {} => {
            let snapshots = load_snapshots(deps.storage)?
                .into_iter()
                .map(SnapshotResponse::from)
                .collect_vec();
            Ok(to_json_binary(&snapshots)?)
        }
    }
}

fn load_snapshots(storage: &dyn Storage) -> StdResult<Vec<Snapshot>> {
    CONFIG
        .load(storage)?
        .pairs
        .iter()
        .map(|pair| SNAPSHOTS.load(storage, &pair_key(pair)))
        .collect()
}

/// Picks the snapshot to price `asset` from. Without a quote asset the asset must belong to
/// exactly one tracked pair.
fn find_snapshot(
    storage: &dyn Storage,
    asset: &AssetInfo,
    quote_asset: Option<AssetInfo>,
) -> Result<Snapshot, ContractError> {
    let pair = match quote_asset {
        Some(quote_asset) => [asset.clone(), quote_asset],
        None => CONFIG
            .load(storage)?
            .pairs
            .into_iter()
            .filter(|pair| pair.contains(asset))
            .at_most_one()
            .map_err(|_| OracleError::AmbiguousAsset(asset.to_string()))?
            .ok_or_else(|| OracleError::InvalidAsset(asset.to_string()))?,
    };

    SNAPSHOTS
        .may_load(storage, &pair_key(&pair))?
        .ok_or_else(|| OracleError::InvalidAsset(format_pair(&pair)).into())
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
