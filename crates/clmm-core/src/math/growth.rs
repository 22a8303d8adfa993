//! # Growth Accounting
//!
//! Splits the pool's global fee and reward growth into the part earned
//! inside a tick range, and turns growth deltas into token amounts.
//!
//! All counters are u128 and wrap; every difference uses wrapping subtraction.

use crate::constants::Q64;
use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::{mul_div_floor, wrapping_sub_128};
use crate::types::{RewardSchedule, Tick};

/// Growth accumulated inside [tick_lower, tick_upper) for one counter
pub fn growth_inside(
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
    outside_lower: u128,
    outside_upper: u128,
    global: u128,
) -> u128 {
    let below = if tick_current >= tick_lower {
        outside_lower
    } else {
        wrapping_sub_128(global, outside_lower)
    };

    let above = if tick_current < tick_upper {
        outside_upper
    } else {
        wrapping_sub_128(global, outside_upper)
    };

    wrapping_sub_128(wrapping_sub_128(global, below), above)
}

/// Fee growth inside a range for both tokens
///
/// `outside_*` and `global` are `(token_x, token_y)` pairs.
pub fn fee_growth_inside(
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
    outside_lower: (u128, u128),
    outside_upper: (u128, u128),
    global: (u128, u128),
) -> (u128, u128) {
    (
        growth_inside(
            tick_lower,
            tick_upper,
            tick_current,
            outside_lower.0,
            outside_upper.0,
            global.0,
        ),
        growth_inside(
            tick_lower,
            tick_upper,
            tick_current,
            outside_lower.1,
            outside_upper.1,
            global.1,
        ),
    )
}

/// Fee growth inside the range bounded by two tick snapshots
pub fn fee_growth_inside_ticks(
    lower: &Tick,
    upper: &Tick,
    tick_current: i32,
    fee_growth_global_x: u128,
    fee_growth_global_y: u128,
) -> (u128, u128) {
    fee_growth_inside(
        lower.index,
        upper.index,
        tick_current,
        (lower.fee_growth_outside_x, lower.fee_growth_outside_y),
        (upper.fee_growth_outside_x, upper.fee_growth_outside_y),
        (fee_growth_global_x, fee_growth_global_y),
    )
}

/// Reward growth inside a range, one entry per global reward counter.
/// A tick that has no entry for a schedule counts as zero outside growth.
pub fn reward_growths_inside(
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
    outside_lower: &[u128],
    outside_upper: &[u128],
    reward_growths_global: &[u128],
) -> Vec<u128> {
    reward_growths_global
        .iter()
        .enumerate()
        .map(|(i, global)| {
            growth_inside(
                tick_lower,
                tick_upper,
                tick_current,
                outside_lower.get(i).copied().unwrap_or_default(),
                outside_upper.get(i).copied().unwrap_or_default(),
                *global,
            )
        })
        .collect()
}

// ============================================================================
// Pending Amounts
// ============================================================================

/// Owed amount plus what `liquidity` earned since the last snapshot
///
/// `coins_owed + floor((inside - inside_last) * liquidity / 2^64)`
pub fn pending_fee(
    coins_owed: u128,
    growth_inside: u128,
    growth_inside_last: u128,
    liquidity: u128,
) -> CoreResult<u128> {
    let delta = wrapping_sub_128(growth_inside, growth_inside_last);
    let accrued = mul_div_floor(delta, liquidity, Q64)?;
    coins_owed.checked_add(accrued).ok_or(ClmmError::Overflow)
}

/// Reward counterpart of [`pending_fee`]
pub fn pending_reward(
    coins_owed_reward: u128,
    reward_growth_inside: u128,
    reward_growth_inside_last: u128,
    liquidity: u128,
) -> CoreResult<u128> {
    pending_fee(
        coins_owed_reward,
        reward_growth_inside,
        reward_growth_inside_last,
        liquidity,
    )
}

// ============================================================================
// Reward Projection
// ============================================================================

/// Advance a schedule's global growth from its last ledger update to `now`.
///
/// Emission stops at `ended_at_seconds`. With no active liquidity nothing
/// accrues, matching the ledger which skips the update in that case.
pub fn project_reward_growth_global(
    schedule: &RewardSchedule,
    pool_liquidity: u128,
    now_seconds: u64,
) -> CoreResult<u128> {
    if pool_liquidity == 0 {
        return Ok(schedule.reward_growth_global);
    }

    let elapsed = now_seconds
        .min(schedule.ended_at_seconds)
        .saturating_sub(schedule.last_update_time);
    let pending = mul_div_floor(schedule.reward_per_second, elapsed as u128, pool_liquidity)?;

    Ok(schedule.reward_growth_global.wrapping_add(pending))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_inside_in_range() {
        // Current tick inside: global minus both outsides
        let inside = growth_inside(-60, 60, 0, 100, 50, 1_000);
        assert_eq!(inside, 850);
    }

    #[test]
    fn test_growth_inside_below_range() {
        // Current tick below: outside_lower counts from the other side
        let inside = growth_inside(-60, 60, -120, 300, 100, 1_000);
        // below = 1000 - 300, above = 100, inside = 1000 - 700 - 100
        assert_eq!(inside, 200);
    }

    #[test]
    fn test_growth_inside_above_range() {
        let inside = growth_inside(-60, 60, 60, 100, 700, 1_000);
        // below = 100, above = 1000 - 700, inside = 1000 - 100 - 300
        assert_eq!(inside, 600);
    }

    #[test]
    fn test_growth_inside_wraps() {
        // Global counter wrapped past 2^128 after the outside snapshot
        let inside = growth_inside(-60, 60, 0, u128::MAX - 9, 0, 10);
        assert_eq!(inside, 20);
    }

    #[test]
    fn test_fee_growth_inside_pairs() {
        let (x, y) = fee_growth_inside(-60, 60, 0, (10, 20), (30, 40), (100, 200));
        assert_eq!(x, 60);
        assert_eq!(y, 140);
    }

    #[test]
    fn test_reward_growths_missing_entries() {
        let inside = reward_growths_inside(-60, 60, 0, &[10], &[], &[100, 50]);
        assert_eq!(inside, vec![90, 50]);
    }

    #[test]
    fn test_pending_fee() {
        // One Q64 unit of growth per liquidity unit over 1000 liquidity
        assert_eq!(pending_fee(5, Q64, 0, 1_000).unwrap(), 1_005);

        // Growth counter wrapped since the last snapshot
        assert_eq!(pending_fee(0, Q64 - 1, u128::MAX, 1).unwrap(), 1);

        // No liquidity earns nothing
        assert_eq!(pending_fee(7, Q64, 0, 0).unwrap(), 7);

        assert_eq!(pending_fee(u128::MAX, Q64, 0, 1), Err(ClmmError::Overflow));
    }

    #[test]
    fn test_reward_projection() {
        let schedule = RewardSchedule {
            reward_per_second: 1_000,
            ended_at_seconds: 200,
            last_update_time: 100,
            reward_growth_global: 5,
            ..Default::default()
        };

        // 50 seconds of emission over 10 liquidity
        assert_eq!(project_reward_growth_global(&schedule, 10, 150).unwrap(), 5_005);
        // Emission stops at ended_at
        assert_eq!(project_reward_growth_global(&schedule, 10, 500).unwrap(), 10_005);
        // A clock behind the last update accrues nothing
        assert_eq!(project_reward_growth_global(&schedule, 10, 50).unwrap(), 5);
        // No active liquidity accrues nothing
        assert_eq!(project_reward_growth_global(&schedule, 0, 150).unwrap(), 5);
    }
}
