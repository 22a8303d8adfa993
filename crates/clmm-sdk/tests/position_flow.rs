//! End-to-end position valuation against a mocked ledger

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clmm_core::math::{amounts_for_liquidity, tick_to_sqrt_price_x64, Rounding};
use clmm_core::{ClmmError, PoolSnapshot, PositionStatus, Tick, Q64};
use clmm_sdk::raw::{object_fields, PoolRawData, PositionRawData};
use clmm_sdk::{
    DynamicFieldName, LedgerReader, NoTickStore, OnchainTickStore, Position, PositionArgs, SdkConfig,
    SdkError, SdkResult, TickListStore, TickStore,
};
use serde_json::{json, Value};

const TICK_MANAGER: &str = "0xticks";

// ============================================================================
// Mock Ledger
// ============================================================================

#[derive(Default)]
struct MockLedger {
    fields: HashMap<(String, String), Value>,
    offline: bool,
}

impl MockLedger {
    fn with_tick(mut self, index: i32, raw: Value) -> Self {
        let bits = (index as u32).to_string();
        let object = json!({ "content": { "fields": { "value": { "fields": raw } } } });
        self.fields.insert((TICK_MANAGER.to_string(), bits), object);
        self
    }
}

#[async_trait]
impl LedgerReader for MockLedger {
    async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        name: &DynamicFieldName,
    ) -> SdkResult<Option<Value>> {
        if self.offline {
            return Err(SdkError::Decode("connection reset".to_string()));
        }
        let bits = name.value["bits"].as_str().unwrap_or_default().to_string();
        Ok(self.fields.get(&(parent_id.to_string(), bits)).cloned())
    }
}

fn raw_tick(liquidity_net_bits: &str, fee_outside_x: u128, reward_outside: u128) -> Value {
    json!({
        "fee_growth_outside_x": fee_outside_x.to_string(),
        "fee_growth_outside_y": "0",
        "liquidity_gross": "1000",
        "liquidity_net": { "type": "0xpkg::i128::I128", "fields": { "bits": liquidity_net_bits } },
        "reward_growths_outside": [reward_outside.to_string()],
    })
}

fn ledger() -> MockLedger {
    MockLedger::default()
        .with_tick(-60, raw_tick("1000", Q64, 0))
        // -1000 as 128-bit two's complement
        .with_tick(60, raw_tick("340282366920938463463374607431768210456", 0, 0))
}

fn pool() -> Result<Arc<PoolSnapshot>> {
    Ok(Arc::new(
        PoolSnapshot::at_tick(0, 60, 1_000)?
            .with_id("0xpool")
            .with_fee_growth_global(3 * Q64, 0)
            .with_tick_manager_id(TICK_MANAGER),
    ))
}

// ============================================================================
// Tick Stores
// ============================================================================

#[tokio::test]
async fn test_onchain_store_decodes_ticks() -> Result<()> {
    let store = OnchainTickStore::new(Arc::new(ledger()), TICK_MANAGER);

    let lower = store.get_tick(-60).await?;
    assert_eq!(lower.liquidity_net, 1_000);
    assert_eq!(lower.fee_growth_outside_x, Q64);

    let upper = store.get_tick(60).await?;
    assert_eq!(upper.liquidity_net, -1_000);
    Ok(())
}

#[tokio::test]
async fn test_onchain_store_missing_and_failing() {
    let store = OnchainTickStore::new(Arc::new(ledger()), TICK_MANAGER);
    assert!(matches!(store.get_tick(120).await, Err(SdkError::TickNotFound(120))));

    let offline = MockLedger {
        offline: true,
        ..Default::default()
    };
    let store = OnchainTickStore::new(Arc::new(offline), TICK_MANAGER);
    assert!(matches!(store.get_tick(60).await, Err(SdkError::DataUnavailable(_))));
}

#[test]
fn test_tick_list_net_must_balance() -> Result<()> {
    let balanced = vec![
        Tick::with_liquidity(-60, 100, 100)?,
        Tick::with_liquidity(60, 100, -100)?,
    ];
    assert_eq!(TickListStore::new(balanced, 60)?.len(), 2);

    let unbalanced = vec![
        Tick::with_liquidity(-60, 100, 100)?,
        Tick::with_liquidity(60, 50, -50)?,
    ];
    assert!(matches!(
        TickListStore::new(unbalanced, 60),
        Err(SdkError::Core(ClmmError::InvalidTickList(_)))
    ));
    Ok(())
}

// ============================================================================
// Fees and Rewards
// ============================================================================

#[tokio::test]
async fn test_fees_from_onchain_ticks() -> Result<()> {
    let store: Arc<dyn TickStore> = Arc::new(OnchainTickStore::new(Arc::new(ledger()), TICK_MANAGER));
    let position = Position::new(
        pool()?,
        store,
        PositionArgs {
            tick_lower: -60,
            tick_upper: 60,
            liquidity: 1_000,
            coins_owed_x: 5,
            coins_owed_y: 7,
            ..Default::default()
        },
    )?;

    // inside = 3 - 1 - 0 per unit of liquidity
    let fees = position.get_fees().await?;
    assert_eq!(fees.amount_x, 2_005);
    assert_eq!(fees.amount_y, 7);
    Ok(())
}

#[tokio::test]
async fn test_fee_checkpoint_wraps() -> Result<()> {
    let store: Arc<dyn TickStore> = Arc::new(OnchainTickStore::new(Arc::new(ledger()), TICK_MANAGER));
    let position = Position::new(
        pool()?,
        store,
        PositionArgs {
            tick_lower: -60,
            tick_upper: 60,
            liquidity: 1_000,
            // checkpoint taken one unit before the counter wrapped
            fee_growth_inside_x_last: u128::MAX,
            ..Default::default()
        },
    )?;

    let fees = position.get_fees().await?;
    assert_eq!(fees.amount_x, 2_000);
    Ok(())
}

#[tokio::test]
async fn test_fees_fail_when_a_tick_is_missing() -> Result<()> {
    let store: Arc<dyn TickStore> = Arc::new(OnchainTickStore::new(Arc::new(ledger()), TICK_MANAGER));
    let position = Position::new(
        pool()?,
        store,
        PositionArgs {
            tick_lower: -60,
            tick_upper: 120,
            liquidity: 1_000,
            ..Default::default()
        },
    )?;

    assert!(matches!(position.get_fees().await, Err(SdkError::TickNotFound(120))));
    Ok(())
}

// ============================================================================
// Amounts
// ============================================================================

#[test]
fn test_current_amounts_match_liquidity_math_in_every_regime() -> Result<()> {
    let cases = [
        (0, 60, 120, PositionStatus::BelowRange),
        (0, -60, 60, PositionStatus::InRange),
        (0, -120, -60, PositionStatus::AboveRange),
        // price sitting exactly on the upper bound holds only Y
        (60, -60, 60, PositionStatus::AboveRange),
        // price sitting exactly on the lower bound is in range and holds only X
        (-60, -60, 60, PositionStatus::InRange),
    ];
    let liquidity = 333_850_249_709u128;

    for (tick_current, tick_lower, tick_upper, status) in cases {
        let pool = Arc::new(PoolSnapshot::at_tick(tick_current, 60, liquidity)?);
        let store: Arc<dyn TickStore> = Arc::new(NoTickStore);
        let position = Position::new(
            pool.clone(),
            store,
            PositionArgs {
                tick_lower,
                tick_upper,
                liquidity,
                ..Default::default()
            },
        )?;

        let expected = amounts_for_liquidity(
            pool.sqrt_price_x64,
            tick_to_sqrt_price_x64(tick_lower)?,
            tick_to_sqrt_price_x64(tick_upper)?,
            liquidity,
            Rounding::Down,
        )?;
        assert_eq!(position.status(), status);
        assert_eq!(position.current_amounts()?, expected);

        match status {
            PositionStatus::BelowRange => assert_eq!(expected.amount_y, 0),
            PositionStatus::AboveRange => assert_eq!(expected.amount_x, 0),
            PositionStatus::InRange => assert!(expected.amount_x > 0),
        }
    }
    Ok(())
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_position_from_ledger_objects() -> Result<()> {
    let pool_object = json!({
        "content": { "fields": {
            "id": { "id": "0xpool" },
            "coin_type_x": { "type": "0x1::type_name::TypeName", "fields": { "name": "0x2::sui::SUI" } },
            "coin_type_y": { "type": "0x1::type_name::TypeName", "fields": { "name": "0xa::usdc::USDC" } },
            "liquidity": "333850249709",
            "reserve_x": "1000000000",
            "reserve_y": "1000000000",
            "sqrt_price": "18446744073709551616",
            "swap_fee_rate": "3000",
            "tick_index": { "type": "0xpkg::i32::I32", "fields": { "bits": 0 } },
            "tick_spacing": 60,
            "fee_growth_global_x": "0",
            "fee_growth_global_y": "0",
            "reward_infos": [],
            "ticks": { "type": "0x2::table::Table", "fields": { "id": { "id": TICK_MANAGER }, "size": "2" } }
        } }
    });
    let position_object = json!({
        "content": { "fields": {
            "id": { "id": "0xposition" },
            "liquidity": "333850249709",
            "pool_id": "0xpool",
            "tick_lower_index": { "type": "0xpkg::i32::I32", "fields": { "bits": 4294967236u64 } },
            "tick_upper_index": { "type": "0xpkg::i32::I32", "fields": { "bits": 60 } },
            "coins_owed_x": "0",
            "coins_owed_y": "0",
            "fee_growth_inside_x_last": "0",
            "fee_growth_inside_y_last": "0",
            "reward_infos": []
        } }
    });

    let pool_raw: PoolRawData = serde_json::from_value(object_fields(&pool_object)?.clone())?;
    let position_raw: PositionRawData =
        serde_json::from_value(object_fields(&position_object)?.clone())?;

    let pool = Arc::new(PoolSnapshot::try_from(&pool_raw)?);
    let store: Arc<dyn TickStore> =
        Arc::new(OnchainTickStore::new(Arc::new(ledger()), pool.tick_manager_id.clone()));
    let position = Position::new(pool, store, PositionArgs::try_from(&position_raw)?)?;

    let amounts = position.current_amounts()?;
    assert_eq!(amounts.amount_x, 999_999_999);
    assert_eq!(amounts.amount_y, 999_999_999);
    assert_eq!(position.position_id(), Some("0xposition"));
    Ok(())
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("clmm.toml");

    let mut config = SdkConfig::default();
    config.default_slippage_bps = 100;
    config.save(&path)?;

    let loaded = SdkConfig::load(&path)?;
    assert_eq!(loaded, config);
    assert_eq!(loaded.default_slippage()?.to_string(), "1.00%");
    Ok(())
}
