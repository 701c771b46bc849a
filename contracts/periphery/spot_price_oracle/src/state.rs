use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use pool_oracle::asset::AssetInfo;

/// Global configuration for the contract
#[cw_serde]
pub struct Config {
    /// The address that's allowed to change the routing asset
    pub owner: Addr,
    /// The pool registry address
    pub registry: Addr,
    /// Intermediate asset for pairs without a direct pool
    pub route_through: Option<AssetInfo>,
}

/// Stores the contract config at the given key
pub const CONFIG: Item<Config> = Item::new("config");
