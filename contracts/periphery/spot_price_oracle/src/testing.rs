use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
use cosmwasm_std::{from_json, Addr, Uint256};
use pool_oracle::asset::AssetInfo;
use pool_oracle::error::OracleError;
use pool_oracle::fixture::MemoryPoolSource;
use pool_oracle::spot_oracle::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, PriceDiscrepancyRangeResponse, QueryMsg, SCALE,
};
use proptest::prelude::*;

use crate::contract::{execute, instantiate, query};
use crate::error::ContractError;
use crate::oracle::{get_price, get_price_discrepancy_range, get_routed_price, pow10};

fn weth() -> AssetInfo {
    AssetInfo::cw20(Addr::unchecked("weth"))
}

fn usdc() -> AssetInfo {
    AssetInfo::native("uusdc")
}

fn atom() -> AssetInfo {
    AssetInfo::native("uatom")
}

const E18: u128 = 1_000_000_000_000_000_000;
const E6: u128 = 1_000_000;

fn weth_usdc_source() -> MemoryPoolSource {
    let mut source = MemoryPoolSource::new()
        .with_pool([weth(), usdc()], "weth_usdc")
        .with_decimals(weth(), 18)
        .with_decimals(usdc(), 6);
    source.set_reserves(&[weth(), usdc()], 1_000 * E18, 2_000_000 * E6, 1_000);
    source
}

#[test]
fn weth_usdc_price() {
    let source = weth_usdc_source();

    // 2000 USDC per WETH
    let price = get_price(&source, &weth(), &usdc()).unwrap();
    assert_eq!(price, Uint256::from(2_000 * E6));

    // 0.0005 WETH per USDC
    let price = get_price(&source, &usdc(), &weth()).unwrap();
    assert_eq!(price, Uint256::from(500_000_000_000_000u128));
}

#[test]
fn weth_usdc_discrepancy_range() {
    let quote = Uint256::from(2_000 * E6);
    let one_percent = SCALE / Uint256::from(100u128);

    let (lower, upper) = get_price_discrepancy_range(quote, one_percent).unwrap();
    assert_eq!(lower, Uint256::from(1_980 * E6));
    assert_eq!(upper, Uint256::from(2_020 * E6));

    let (lower, upper) = get_price_discrepancy_range(quote, Uint256::zero()).unwrap();
    assert_eq!((lower, upper), (quote, quote));

    let (lower, upper) = get_price_discrepancy_range(quote, SCALE).unwrap();
    assert_eq!((lower, upper), (Uint256::zero(), quote + quote));

    assert_eq!(
        get_price_discrepancy_range(quote, SCALE + Uint256::one()).unwrap_err(),
        OracleError::ArithmeticOverflow {}
    );
}

#[test]
fn rejects_empty_pools() {
    let mut source = weth_usdc_source();
    source.set_reserves(&[weth(), usdc()], 0, 2_000_000 * E6, 2_000);

    assert_eq!(
        get_price(&source, &weth(), &usdc()).unwrap_err(),
        OracleError::InsufficientLiquidity {
            reserve0: 0u128.into(),
            reserve1: (2_000_000 * E6).into(),
        }
    );
    assert!(matches!(
        get_price(&source, &usdc(), &weth()).unwrap_err(),
        OracleError::InsufficientLiquidity { .. }
    ));
}

#[test]
fn rejects_unknown_and_doubled_pairs() {
    let source = weth_usdc_source();

    assert_eq!(
        get_price(&source, &weth(), &atom()).unwrap_err(),
        OracleError::PoolNotFound {
            pair: "weth-uatom".to_string()
        }
    );
    assert_eq!(
        get_price(&source, &weth(), &weth()).unwrap_err(),
        OracleError::DoublingAssets {}
    );
}

#[test]
fn routes_through_intermediate_asset() {
    let mut source = weth_usdc_source()
        .with_pool([atom(), usdc()], "atom_usdc")
        .with_decimals(atom(), 6);
    // 10 USDC per ATOM
    source.set_reserves(&[atom(), usdc()], 100_000 * E6, 1_000_000 * E6, 1_000);

    assert!(matches!(
        get_routed_price(&source, &weth(), &atom(), None).unwrap_err(),
        OracleError::PoolNotFound { .. }
    ));

    // 2000 USDC per WETH / 10 USDC per ATOM = 200 ATOM per WETH
    let price = get_routed_price(&source, &weth(), &atom(), Some(&usdc())).unwrap();
    assert_eq!(price, Uint256::from(200 * E6));

    // 0.005 WETH per ATOM
    let price = get_routed_price(&source, &atom(), &weth(), Some(&usdc())).unwrap();
    assert_eq!(price, Uint256::from(5_000_000_000_000_000u128));

    // direct pools ignore the route
    let price = get_routed_price(&source, &weth(), &usdc(), Some(&atom())).unwrap();
    assert_eq!(price, Uint256::from(2_000 * E6));
}

#[test]
fn config_and_owner_checks() {
    let mut deps = mock_dependencies();

    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("owner", &[]),
        InstantiateMsg {
            registry: "registry".to_string(),
            route_through: None,
        },
    )
    .unwrap();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("stranger", &[]),
        ExecuteMsg::UpdateConfig {
            route_through: Some(usdc()),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("owner", &[]),
        ExecuteMsg::UpdateConfig {
            route_through: Some(usdc()),
        },
    )
    .unwrap();
    assert_eq!(res.attributes[1].value, "uusdc");

    let config: ConfigResponse =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(
        config,
        ConfigResponse {
            owner: Addr::unchecked("owner"),
            registry: Addr::unchecked("registry"),
            route_through: Some(usdc()),
        }
    );

    let range: PriceDiscrepancyRangeResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::GetPriceDiscrepancyRange {
                quote: Uint256::from(1_000u128),
                threshold: SCALE / Uint256::from(10u128),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(range.lower_bound, Uint256::from(900u128));
    assert_eq!(range.upper_bound, Uint256::from(1_100u128));
}

#[test]
fn rejects_uppercase_registry() {
    let mut deps = mock_dependencies();

    let err = instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("owner", &[]),
        InstantiateMsg {
            registry: "Registry".to_string(),
            route_through: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Generic error: Address Registry should be lowercase");
}

proptest! {
    #[test]
    fn price_depends_only_on_reserve_ratio(
        reserve_base in 1..1_000_000_000_000_000_000_000_000u128,
        reserve_quote in 1..1_000_000_000_000_000_000_000_000u128,
        factor in 1..1_000_000u128,
        base_decimals in 0..=18u8,
    ) {
        let base = AssetInfo::native("ubase");
        let quote = AssetInfo::native("uquote");
        let pair = [base.clone(), quote.clone()];

        let mut source = MemoryPoolSource::new()
            .with_pool(pair.clone(), "pool")
            .with_decimals(base.clone(), base_decimals)
            .with_decimals(quote.clone(), 6);

        source.set_reserves(&pair, reserve_base, reserve_quote, 1);
        let price = get_price(&source, &base, &quote).unwrap();

        source.set_reserves(&pair, reserve_base * factor, reserve_quote * factor, 2);
        let scaled_price = get_price(&source, &base, &quote).unwrap();

        prop_assert_eq!(price, scaled_price);
    }

    #[test]
    fn inverse_prices_multiply_to_one(
        reserve_a in 1..1_000_000_000_000_000_000_000_000u128,
        reserve_b in 1..1_000_000_000_000_000_000_000_000u128,
        decimals_a in 0..=18u8,
        decimals_b in 0..=18u8,
    ) {
        let a = AssetInfo::native("ua");
        let b = AssetInfo::native("ub");
        let pair = [a.clone(), b.clone()];

        let mut source = MemoryPoolSource::new()
            .with_pool(pair.clone(), "pool")
            .with_decimals(a.clone(), decimals_a)
            .with_decimals(b.clone(), decimals_b);
        source.set_reserves(&pair, reserve_a, reserve_b, 1);

        let a_in_b = get_price(&source, &a, &b).unwrap();
        let b_in_a = get_price(&source, &b, &a).unwrap();
        let one = pow10(decimals_a + decimals_b).unwrap();

        // both prices floor, so the product falls short of one by at most their sum
        let product = a_in_b * b_in_a;
        prop_assert!(product <= one, "{} > {}", product, one);
        prop_assert!(product >= one.saturating_sub(a_in_b + b_in_a), "{} too low", product);
    }

    #[test]
    fn discrepancy_range_is_symmetric(
        quote in 0..u128::MAX,
        threshold in 0..=1_000_000_000_000_000_000u128,
    ) {
        let quote = Uint256::from(quote);
        let (lower, upper) = get_price_discrepancy_range(quote, Uint256::from(threshold)).unwrap();

        prop_assert!(lower <= quote && quote <= upper);
        prop_assert_eq!(upper - quote, quote - lower);
    }
}
