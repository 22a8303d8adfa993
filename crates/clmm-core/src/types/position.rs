//! # Position Value Types

use std::fmt;

/// A pair of token amounts, the result of every amount computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAmounts {
    pub amount_x: u128,
    pub amount_y: u128,
}

impl TokenAmounts {
    pub const fn new(amount_x: u128, amount_y: u128) -> Self {
        Self { amount_x, amount_y }
    }

    pub fn is_zero(&self) -> bool {
        self.amount_x == 0 && self.amount_y == 0
    }
}

/// Per-schedule reward state of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRewardInfo {
    /// Rewards settled but not yet collected
    pub coins_owed_reward: u128,
    /// Reward growth inside the range at the last settlement
    pub reward_growth_inside_last: u128,
}

/// Where the pool price sits relative to a position's range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionStatus {
    /// Price below the range; the position holds only token X
    BelowRange,
    /// Price inside the range; the position earns fees
    InRange,
    /// Price at or above the range; the position holds only token Y
    AboveRange,
}

impl PositionStatus {
    /// Classify `tick_current` against [tick_lower, tick_upper)
    pub fn from_ticks(tick_current: i32, tick_lower: i32, tick_upper: i32) -> Self {
        if tick_current < tick_lower {
            PositionStatus::BelowRange
        } else if tick_current < tick_upper {
            PositionStatus::InRange
        } else {
            PositionStatus::AboveRange
        }
    }
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStatus::BelowRange => write!(f, "below range"),
            PositionStatus::InRange => write!(f, "in range"),
            PositionStatus::AboveRange => write!(f, "above range"),
        }
    }
}
