use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

use crate::asset::AssetInfo;
use crate::fixed_point::Uq112x112;

/// This structure describes the basic settings for creating a contract.
#[cw_serde]
pub struct InstantiateMsg {
    /// The pool registry address
    pub registry: String,
    /// Pairs to track. Each pair gets its own accumulator snapshot.
    pub pairs: Vec<[AssetInfo; 2]>,
}

/// This structure describes the execute messages of the contract.
#[cw_serde]
pub enum ExecuteMsg {
    /// Closes the current window of every tracked pair and opens a new one
    SyncPrices {},
}

/// This structure describes the query messages of the contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Time-weighted price of one whole `asset` in smallest units of the other pair asset.
    /// `quote_asset` selects the pair when `asset` is tracked in several.
    #[returns(Uint256)]
    GetPrice {
        asset: AssetInfo,
        quote_asset: Option<AssetInfo>,
    },
    /// Converts `amount` of `asset` to the other pair asset at the time-weighted price
    #[returns(Uint256)]
    Consult {
        asset: AssetInfo,
        amount: Uint128,
        quote_asset: Option<AssetInfo>,
    },
    /// Time of the oldest snapshot sync, seconds modulo 2^32
    #[returns(u32)]
    BlockTimestampLast {},
    #[returns(ConfigResponse)]
    Config {},
    #[returns(Vec<SnapshotResponse>)]
    Snapshots {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub registry: Addr,
    pub pairs: Vec<[AssetInfo; 2]>,
}

/// Raw accumulator state of one tracked pair.
#[cw_serde]
pub struct SnapshotResponse {
    pub asset_infos: [AssetInfo; 2],
    pub pool: Addr,
    pub price0_cumulative_last: Uint256,
    pub price1_cumulative_last: Uint256,
    pub block_timestamp_last: u32,
    pub price0_average: Uq112x112,
    pub price1_average: Uq112x112,
}

/// This structure describes a migration message.
/// We currently take no arguments for migrations.
#[cw_serde]
pub struct MigrateMsg {}
