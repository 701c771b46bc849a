use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint256};

use crate::asset::AssetInfo;

/// Decimal scale of the spot ratio and of discrepancy thresholds. 1% is `SCALE / 100`.
pub const SCALE: Uint256 = Uint256::from_u128(1_000_000_000_000_000_000);

/// Decimal exponent of [`SCALE`].
pub const SCALE_DECIMALS: u8 = 18;

/// This structure describes the basic settings for creating a contract.
#[cw_serde]
pub struct InstantiateMsg {
    /// The pool registry address
    pub registry: String,
    /// Intermediate asset used when a pair has no direct pool
    pub route_through: Option<AssetInfo>,
}

/// This structure describes the execute messages of the contract.
#[cw_serde]
pub enum ExecuteMsg {
    /// Changes the routing asset. Only the owner can execute this.
    UpdateConfig { route_through: Option<AssetInfo> },
}

/// This structure describes the query messages of the contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the amount of `quote_asset` smallest units one whole `base_asset` is worth
    #[returns(Uint256)]
    GetPrice {
        base_asset: AssetInfo,
        quote_asset: AssetInfo,
    },
    /// Returns the band `quote ± quote * threshold / SCALE`
    #[returns(PriceDiscrepancyRangeResponse)]
    GetPriceDiscrepancyRange { quote: Uint256, threshold: Uint256 },
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct PriceDiscrepancyRangeResponse {
    pub lower_bound: Uint256,
    pub upper_bound: Uint256,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub registry: Addr,
    pub route_through: Option<AssetInfo>,
}

/// This structure describes a migration message.
/// We currently take no arguments for migrations.
#[cw_serde]
pub struct MigrateMsg {}
