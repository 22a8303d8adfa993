//! # Tick Snapshot
//!
//! Per-tick state as stored by the pool: liquidity references and the
//! "outside" growth counters used to split global growth by range.

use crate::errors::{ClmmError, CoreResult};
use crate::math::tick_math::is_valid_tick;

/// Snapshot of an initialized tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    /// Tick index
    pub index: i32,
    /// Total liquidity referencing this tick
    pub liquidity_gross: u128,
    /// Liquidity delta applied when the price crosses this tick upward
    pub liquidity_net: i128,
    /// Token X fee growth on the other side of this tick
    pub fee_growth_outside_x: u128,
    /// Token Y fee growth on the other side of this tick
    pub fee_growth_outside_y: u128,
    /// Reward growth on the other side of this tick, one entry per reward schedule
    pub reward_growths_outside: Vec<u128>,
}

impl Tick {
    /// Create a tick, rejecting an index outside [MIN_TICK, MAX_TICK]
    pub fn new(
        index: i32,
        liquidity_gross: u128,
        liquidity_net: i128,
        fee_growth_outside_x: u128,
        fee_growth_outside_y: u128,
        reward_growths_outside: Vec<u128>,
    ) -> CoreResult<Self> {
        let tick = Self {
            index,
            liquidity_gross,
            liquidity_net,
            fee_growth_outside_x,
            fee_growth_outside_y,
            reward_growths_outside,
        };
        tick.validate()?;
        Ok(tick)
    }

    /// Tick carrying only liquidity references, no accumulated growth
    pub fn with_liquidity(index: i32, liquidity_gross: u128, liquidity_net: i128) -> CoreResult<Self> {
        Self::new(index, liquidity_gross, liquidity_net, 0, 0, Vec::new())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_tick(self.index) {
            return Err(ClmmError::tick_out_of_domain(self.index));
        }
        Ok(())
    }

    /// Outside reward growth for a schedule; a missing entry counts as zero
    pub fn reward_growth_outside(&self, schedule: usize) -> u128 {
        self.reward_growths_outside
            .get(schedule)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_TICK, MIN_TICK};

    #[test]
    fn test_tick_bounds() {
        assert!(Tick::with_liquidity(MIN_TICK, 0, 0).is_ok());
        assert!(Tick::with_liquidity(MAX_TICK, 0, 0).is_ok());
        assert_eq!(
            Tick::with_liquidity(MAX_TICK + 1, 0, 0),
            Err(ClmmError::tick_out_of_domain(MAX_TICK + 1))
        );
    }

    #[test]
    fn test_missing_reward_growth_is_zero() {
        let tick = Tick::new(60, 10, -10, 0, 0, vec![7]).unwrap();
        assert_eq!(tick.reward_growth_outside(0), 7);
        assert_eq!(tick.reward_growth_outside(1), 0);
    }
}
