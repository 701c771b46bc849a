use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use pool_oracle::asset::AssetInfo;

use crate::accumulator::Snapshot;

/// Global configuration for the contract
#[cw_serde]
pub struct Config {
    /// The address that instantiated the contract
    pub owner: Addr,
    /// The pool registry address
    pub registry: Addr,
    /// Tracked pairs in instantiation order
    pub pairs: Vec<[AssetInfo; 2]>,
}

/// Stores the contract config at the given key
pub const CONFIG: Item<Config> = Item::new("config");

/// Accumulator snapshots keyed by the canonical pair key
pub const SNAPSHOTS: Map<&[u8], Snapshot> = Map::new("snapshots");
