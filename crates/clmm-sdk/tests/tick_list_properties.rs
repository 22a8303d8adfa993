//! Property tests for in-memory tick lists built from positions

use std::collections::BTreeMap;

use clmm_core::{ClmmError, Tick};
use clmm_sdk::{SdkError, TickListStore, TickStore};
use proptest::prelude::*;

const SPACING: u32 = 60;

/// Ranges as (lower / spacing, width in spacings, liquidity)
fn ranges() -> impl Strategy<Value = Vec<(i32, i32, u64)>> {
    prop::collection::vec((-1_000i32..1_000, 1i32..200, 1u64..u64::MAX), 1..20)
}

/// Tick list a pool would hold after minting every range
fn ticks_for(ranges: &[(i32, i32, u64)]) -> Vec<Tick> {
    let mut levels: BTreeMap<i32, (u128, i128)> = BTreeMap::new();
    for (lower, width, liquidity) in ranges {
        let lower = lower * SPACING as i32;
        let upper = lower + width * SPACING as i32;
        let liquidity = *liquidity as u128;

        let entry = levels.entry(lower).or_default();
        entry.0 += liquidity;
        entry.1 += liquidity as i128;
        let entry = levels.entry(upper).or_default();
        entry.0 += liquidity;
        entry.1 -= liquidity as i128;
    }
    levels
        .into_iter()
        .map(|(index, (gross, net))| Tick::with_liquidity(index, gross, net).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn prop_minted_ranges_form_a_valid_list(ranges in ranges()) {
        let ticks = ticks_for(&ranges);
        let store = TickListStore::new(ticks.clone(), SPACING).unwrap();

        for tick in &ticks {
            let fetched = tokio_test::block_on(store.get_tick(tick.index)).unwrap();
            prop_assert_eq!(&fetched, tick);
        }
    }

    #[test]
    fn prop_dropping_a_boundary_unbalances(ranges in ranges(), pick in any::<prop::sample::Index>()) {
        let mut ticks = ticks_for(&ranges);
        let removed = ticks.remove(pick.index(ticks.len()));
        prop_assume!(removed.liquidity_net != 0);

        let result = TickListStore::new(ticks, SPACING);
        prop_assert!(matches!(result, Err(SdkError::Core(ClmmError::InvalidTickList(_)))));
    }
}
