use std::cmp::Ordering;
use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdError, StdResult};

use crate::error::OracleError;

/// This enum describes an asset identifier (native denom or CW20 contract).
/// ## Examples
/// ```
/// # use cosmwasm_std::Addr;
/// # use pool_oracle::asset::AssetInfo::{NativeToken, Token};
/// Token { contract_addr: Addr::unchecked("weth...") };
/// NativeToken { denom: String::from("uusdc") };
/// ```
#[cw_serde]
#[derive(Hash, Eq)]
pub enum AssetInfo {
    /// Non-native Token
    Token { contract_addr: Addr },
    /// Native token
    NativeToken { denom: String },
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssetInfo::NativeToken { denom } => write!(f, "{}", denom),
            AssetInfo::Token { contract_addr } => write!(f, "{}", contract_addr),
        }
    }
}

/// Canonical ordering: identifier bytes first, native denoms before tokens on a tie.
/// This is the order used to assign the token0/token1 roles in a pool.
impl Ord for AssetInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes()
            .cmp(other.as_bytes())
            .then_with(|| other.is_native_token().cmp(&self.is_native_token()))
    }
}

impl PartialOrd for AssetInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::NativeToken {
            denom: denom.into(),
        }
    }

    pub fn cw20(contract_addr: Addr) -> Self {
        AssetInfo::Token { contract_addr }
    }

    /// Returns true if the caller is a native token. Otherwise returns false.
    pub fn is_native_token(&self) -> bool {
        match self {
            AssetInfo::NativeToken { .. } => true,
            AssetInfo::Token { .. } => false,
        }
    }

    /// Returns the raw identifier: the `denom` of a native token or the `contract_addr` of a CW20.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AssetInfo::NativeToken { denom } => denom.as_bytes(),
            AssetInfo::Token { contract_addr } => contract_addr.as_bytes(),
        }
    }

    /// Checks that the tokens' denom or contract addr is lowercased and valid.
    pub fn check(&self, api: &dyn Api) -> StdResult<()> {
        match self {
            AssetInfo::Token { contract_addr } => {
                addr_validate_to_lower(api, contract_addr)?;
            }
            AssetInfo::NativeToken { denom } => {
                if !denom.starts_with("ibc/") && denom != &denom.to_lowercase() {
                    return Err(StdError::generic_err(format!(
                        "Non-IBC token denom {} should be lowercase",
                        denom
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Returns the two assets in canonical order: `(token0, token1)`.
pub fn sort_asset_infos(asset_infos: &[AssetInfo; 2]) -> [AssetInfo; 2] {
    if asset_infos[0] <= asset_infos[1] {
        [asset_infos[0].clone(), asset_infos[1].clone()]
    } else {
        [asset_infos[1].clone(), asset_infos[0].clone()]
    }
}

/// Calculates the storage key of an unordered asset pair.
/// Both orderings of the same two assets produce the same key.
pub fn pair_key(asset_infos: &[AssetInfo; 2]) -> Vec<u8> {
    let [token0, token1] = sort_asset_infos(asset_infos);
    // the separator keeps ("ab", "c") and ("a", "bc") apart
    [token0.as_bytes(), b"|", token1.as_bytes()].concat()
}

/// Rejects a pair made of the same asset twice and validates both identifiers.
pub fn check_asset_pair(api: &dyn Api, asset_infos: &[AssetInfo; 2]) -> Result<(), OracleError> {
    if asset_infos[0] == asset_infos[1] {
        return Err(OracleError::DoublingAssets {});
    }

    asset_infos
        .iter()
        .try_for_each(|asset_info| asset_info.check(api))
        .map_err(Into::into)
}

/// Returns a lowercased, validated address upon success.
pub fn addr_validate_to_lower(api: &dyn Api, addr: impl Into<String>) -> StdResult<Addr> {
    let addr = addr.into();
    if addr.to_lowercase() != addr {
        return Err(StdError::generic_err(format!(
            "Address {} should be lowercase",
            addr
        )));
    }
    api.addr_validate(&addr)
}

/// Formats a pair as `"{asset0}-{asset1}"` in the order given, for attributes and errors.
pub fn format_pair(asset_infos: &[AssetInfo; 2]) -> String {
    format!("{}-{}", asset_infos[0], asset_infos[1])
}
