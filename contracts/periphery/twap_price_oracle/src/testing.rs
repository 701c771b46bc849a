use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
use cosmwasm_std::{Addr, Uint128, Uint256};
use pool_oracle::asset::AssetInfo;
use pool_oracle::error::OracleError;
use pool_oracle::fixed_point::Uq112x112;
use pool_oracle::fixture::MemoryPoolSource;
use pool_oracle::reader::PoolSource;
use pool_oracle::twap_oracle::InstantiateMsg;
use proptest::prelude::*;

use crate::accumulator::{current_cumulative_prices, Snapshot};
use crate::contract::instantiate;
use crate::error::ContractError;

const E18: u128 = 1_000_000_000_000_000_000;
const E6: u128 = 1_000_000;

fn weth() -> AssetInfo {
    AssetInfo::cw20(Addr::unchecked("weth"))
}

fn usdc() -> AssetInfo {
    AssetInfo::native("uusdc")
}

fn pair() -> [AssetInfo; 2] {
    [weth(), usdc()]
}

fn weth_usdc_source(now: u32) -> MemoryPoolSource {
    let mut source = MemoryPoolSource::new()
        .with_pool(pair(), "weth_usdc")
        .with_decimals(weth(), 18)
        .with_decimals(usdc(), 6);
    source.set_reserves(&pair(), 1_000 * E18, 2_000_000 * E6, now);
    source
}

fn unit_source(reserve_a: u128, reserve_b: u128, now: u32) -> MemoryPoolSource {
    let a = AssetInfo::native("ua");
    let b = AssetInfo::native("ub");
    let mut source = MemoryPoolSource::new()
        .with_pool([a.clone(), b.clone()], "pool")
        .with_decimals(a.clone(), 0)
        .with_decimals(b.clone(), 0);
    source.set_reserves(&[a, b], reserve_a, reserve_b, now);
    source
}

fn unit_pair() -> [AssetInfo; 2] {
    [AssetInfo::native("ua"), AssetInfo::native("ub")]
}

#[test]
fn constant_price_window() {
    let source = weth_usdc_source(1_000);

    let mut snapshot = Snapshot::new(&source, &pair(), 1_000).unwrap();
    assert_eq!(snapshot.block_timestamp_last, 1_000);
    assert_eq!(snapshot.price(&weth()).unwrap_err(), OracleError::StaleWindow {});
    assert_eq!(
        snapshot.consult(&usdc(), Uint128::one()).unwrap_err(),
        OracleError::StaleWindow {}
    );

    assert!(snapshot.sync(&source, 1_060).unwrap());
    assert_eq!(snapshot.block_timestamp_last, 1_060);

    // the fixed-point averages floor, so a price may land one unit below spot
    let price = snapshot.price(&weth()).unwrap();
    assert!(Uint256::from(2_000 * E6) - price <= Uint256::one(), "{price}");
    let price = snapshot.price(&usdc()).unwrap();
    assert!(Uint256::from(500_000_000_000_000u128) - price <= Uint256::one(), "{price}");

    let value = snapshot.consult(&weth(), Uint128::new(3 * E18)).unwrap();
    assert!(Uint256::from(6_000 * E6) - value <= Uint256::one(), "{value}");
}

#[test]
fn sync_at_same_time_is_noop() {
    let source = weth_usdc_source(1_000);
    let mut snapshot = Snapshot::new(&source, &pair(), 1_000).unwrap();
    assert!(!snapshot.sync(&source, 1_000).unwrap());

    snapshot.sync(&source, 1_060).unwrap();
    let synced = snapshot.clone();

    assert!(!snapshot.sync(&source, 1_060).unwrap());
    assert_eq!(snapshot, synced);
}

#[test]
fn average_spans_reserve_changes() {
    let mut source = unit_source(1, 1, 0);
    let mut snapshot = Snapshot::new(&source, &unit_pair(), 0).unwrap();

    // price 1 for 30 seconds then 3 for 30 seconds
    source.set_reserves(&unit_pair(), 1, 3, 30);
    snapshot.sync(&source, 60).unwrap();

    assert_eq!(
        snapshot.price(&AssetInfo::native("ua")).unwrap(),
        Uint256::from(2u128)
    );
    assert_eq!(
        snapshot.price0_average,
        Uq112x112::encode(Uint128::new(2)).unwrap()
    );
    assert_eq!(
        snapshot.consult(&AssetInfo::native("ua"), Uint128::new(50)).unwrap(),
        Uint256::from(100u128)
    );
}

#[test]
fn extrapolates_since_last_pool_update() {
    let source = unit_source(2, 8, 100);
    let pool = source.resolve_pool(&unit_pair()).unwrap();

    let (price0, price1, now) = current_cumulative_prices(&source, &pool, 110).unwrap();
    assert_eq!(now, 110);
    assert_eq!(price0, (Uint256::from(4u128) << 112u32) * Uint256::from(10u128));
    assert_eq!(price1, (Uint256::one() << 110u32) * Uint256::from(10u128));

    // nothing to extrapolate at the pool's own timestamp
    let (price0, price1, _) = current_cumulative_prices(&source, &pool, 100).unwrap();
    assert_eq!((price0, price1), (Uint256::zero(), Uint256::zero()));
}

#[test]
fn counters_wrap_around() {
    let near_max = Uint256::MAX - Uint256::from(1_000u128);

    let mut wrapping = unit_source(5, 7, 0);
    wrapping.set_cumulative(&unit_pair(), near_max, near_max);
    let mut plain = unit_source(5, 7, 0);

    let mut wrapped_snapshot = Snapshot::new(&wrapping, &unit_pair(), 0).unwrap();
    let mut plain_snapshot = Snapshot::new(&plain, &unit_pair(), 0).unwrap();

    wrapping.set_reserves(&unit_pair(), 9, 4, 3_600);
    plain.set_reserves(&unit_pair(), 9, 4, 3_600);
    wrapped_snapshot.sync(&wrapping, 7_200).unwrap();
    plain_snapshot.sync(&plain, 7_200).unwrap();

    assert!(wrapped_snapshot.price0_cumulative_last < near_max);
    assert_eq!(wrapped_snapshot.price0_average, plain_snapshot.price0_average);
    assert_eq!(wrapped_snapshot.price1_average, plain_snapshot.price1_average);
}

#[test]
fn timestamps_wrap_around() {
    let start = u32::MAX - 10;
    let source = unit_source(1, 4, start);

    let mut snapshot = Snapshot::new(&source, &unit_pair(), start).unwrap();
    // 61 seconds later the clock reads 50
    assert!(snapshot.sync(&source, 50).unwrap());

    assert_eq!(snapshot.block_timestamp_last, 50);
    assert_eq!(
        snapshot.price0_average,
        Uq112x112::fraction(Uint128::new(4), Uint128::one()).unwrap()
    );
    assert_eq!(
        snapshot.price(&AssetInfo::native("ua")).unwrap(),
        Uint256::from(4u128)
    );
}

#[test]
fn failed_sync_keeps_snapshot() {
    let mut source = unit_source(5, 7, 0);
    source.set_cumulative(&unit_pair(), Uint256::zero(), Uint256::one() << 250u32);
    let mut snapshot = Snapshot::new(&source, &unit_pair(), 0).unwrap();
    let before = snapshot.clone();

    // price1 counter moved backwards, its average no longer fits in 224 bits
    source.set_cumulative(&unit_pair(), Uint256::zero(), Uint256::zero());
    assert_eq!(
        snapshot.sync(&source, 10).unwrap_err(),
        OracleError::ArithmeticOverflow {}
    );
    assert_eq!(snapshot, before);
}

#[test]
fn missing_pool_keeps_snapshot() {
    let mut source = unit_source(2, 8, 0);
    let mut snapshot = Snapshot::new(&source, &unit_pair(), 0).unwrap();
    snapshot.sync(&source, 60).unwrap();
    let before = snapshot.clone();

    source.remove_pool(&unit_pair());
    assert!(snapshot.sync(&source, 120).is_err());
    assert_eq!(snapshot, before);
    assert!(matches!(
        Snapshot::new(&source, &unit_pair(), 120).unwrap_err(),
        OracleError::PoolNotFound { .. }
    ));
}

#[test]
fn snapshot_requires_liquidity() {
    let source = unit_source(0, 4, 0);
    assert_eq!(
        Snapshot::new(&source, &unit_pair(), 10).unwrap_err(),
        OracleError::InsufficientLiquidity {
            reserve0: Uint128::zero(),
            reserve1: Uint128::new(4),
        }
    );

    let source = unit_source(1, 4, 0);
    let err = Snapshot::new(&source, &[AssetInfo::native("ua"), usdc()], 10).unwrap_err();
    assert!(matches!(err, OracleError::PoolNotFound { .. }));
}

#[test]
fn rejects_foreign_asset() {
    let source = unit_source(1, 4, 0);
    let mut snapshot = Snapshot::new(&source, &unit_pair(), 0).unwrap();
    snapshot.sync(&source, 10).unwrap();

    assert_eq!(
        snapshot.price(&usdc()).unwrap_err(),
        OracleError::InvalidAsset("uusdc".to_string())
    );
}

#[test]
fn instantiate_validates_pairs() {
    let mut deps = mock_dependencies();
    let mut instantiate_with = |pairs: Vec<[AssetInfo; 2]>| {
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("owner", &[]),
            InstantiateMsg {
                registry: "registry".to_string(),
                pairs,
            },
        )
        .unwrap_err()
    };

    assert_eq!(instantiate_with(vec![]), ContractError::NoPairs {});
    assert_eq!(
        instantiate_with(vec![[usdc(), usdc()]]),
        ContractError::Oracle(OracleError::DoublingAssets {})
    );
    assert_eq!(
        instantiate_with(vec![pair(), unit_pair(), [usdc(), weth()]]),
        ContractError::DuplicatePair {
            pair: "uusdc-weth".to_string()
        }
    );
}

proptest! {
    #[test]
    fn constant_reserves_average_to_spot(
        reserve0 in 1..1_000_000_000_000_000_000_000_000u128,
        reserve1 in 1..1_000_000_000_000_000_000_000_000u128,
        start in 0..u32::MAX,
        window in 1..1_000_000u32,
    ) {
        let source = unit_source(reserve0, reserve1, start);
        let mut snapshot = Snapshot::new(&source, &unit_pair(), start).unwrap();
        snapshot.sync(&source, start.wrapping_add(window)).unwrap();

        let reserve0 = Uint128::new(reserve0);
        let reserve1 = Uint128::new(reserve1);
        prop_assert_eq!(snapshot.price0_average, Uq112x112::fraction(reserve1, reserve0).unwrap());
        prop_assert_eq!(snapshot.price1_average, Uq112x112::fraction(reserve0, reserve1).unwrap());
    }
}
