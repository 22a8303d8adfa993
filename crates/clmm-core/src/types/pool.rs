//! # Pool Snapshot
//!
//! Read-only view of a pool's pricing and growth state at one point in time.
//! Snapshots are supplied by the caller and never mutated by position math.

use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::Rounding;
use crate::math::liquidity_math::{liquidity_for_amounts, position_amounts};
use crate::math::tick_math::{is_valid_sqrt_price, is_valid_tick, tick_to_sqrt_price_x64};
use crate::types::TokenAmounts;

/// Coin identity and precision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinInfo {
    /// Fully qualified coin type
    pub coin_type: String,
    /// Decimal places of one whole unit
    pub decimals: u8,
}

impl CoinInfo {
    pub fn new(coin_type: impl Into<String>, decimals: u8) -> Self {
        Self {
            coin_type: coin_type.into(),
            decimals,
        }
    }

    /// Raw amount of one whole unit (10^decimals)
    pub fn one(&self) -> CoreResult<u128> {
        10u128
            .checked_pow(self.decimals as u32)
            .ok_or(ClmmError::Overflow)
    }
}

/// Emission schedule of one pool reward
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSchedule {
    /// Coin paid out by this schedule
    pub reward_coin_type: String,
    /// Emission rate per second (Q64 growth units)
    pub reward_per_second: u128,
    /// Unix time the emission stops
    pub ended_at_seconds: u64,
    /// Unix time `reward_growth_global` was last advanced on the ledger
    pub last_update_time: u64,
    /// Global reward growth per unit of liquidity
    pub reward_growth_global: u128,
    /// Total reward funded for this schedule
    pub total_reward: u128,
}

/// Read-only pool state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    pub pool_id: String,
    pub coin_x: CoinInfo,
    pub coin_y: CoinInfo,
    /// Current sqrt price in Q64.64
    pub sqrt_price_x64: u128,
    /// Current tick
    pub tick_current: i32,
    pub tick_spacing: u32,
    /// Liquidity active at the current price
    pub liquidity: u128,
    /// Swap fee in hundredths of a bip
    pub fee_rate: u32,
    pub reserve_x: u128,
    pub reserve_y: u128,
    pub fee_growth_global_x: u128,
    pub fee_growth_global_y: u128,
    pub reward_schedules: Vec<RewardSchedule>,
    /// Object holding the pool's tick table on the ledger
    pub tick_manager_id: String,
}

impl PoolSnapshot {
    /// Create a snapshot from its pricing state; everything else starts empty
    pub fn new(
        sqrt_price_x64: u128,
        tick_current: i32,
        tick_spacing: u32,
        liquidity: u128,
    ) -> CoreResult<Self> {
        let pool = Self {
            pool_id: String::new(),
            coin_x: CoinInfo::default(),
            coin_y: CoinInfo::default(),
            sqrt_price_x64,
            tick_current,
            tick_spacing,
            liquidity,
            fee_rate: 0,
            reserve_x: 0,
            reserve_y: 0,
            fee_growth_global_x: 0,
            fee_growth_global_y: 0,
            reward_schedules: Vec::new(),
            tick_manager_id: String::new(),
        };
        pool.validate()?;
        Ok(pool)
    }

    /// Snapshot priced exactly at `tick`
    pub fn at_tick(tick: i32, tick_spacing: u32, liquidity: u128) -> CoreResult<Self> {
        Self::new(tick_to_sqrt_price_x64(tick)?, tick, tick_spacing, liquidity)
    }

    pub fn with_id(mut self, pool_id: impl Into<String>) -> Self {
        self.pool_id = pool_id.into();
        self
    }

    pub fn with_coins(mut self, coin_x: CoinInfo, coin_y: CoinInfo) -> Self {
        self.coin_x = coin_x;
        self.coin_y = coin_y;
        self
    }

    pub fn with_fee_rate(mut self, fee_rate: u32) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    pub fn with_reserves(mut self, reserve_x: u128, reserve_y: u128) -> Self {
        self.reserve_x = reserve_x;
        self.reserve_y = reserve_y;
        self
    }

    pub fn with_fee_growth_global(mut self, fee_growth_global_x: u128, fee_growth_global_y: u128) -> Self {
        self.fee_growth_global_x = fee_growth_global_x;
        self.fee_growth_global_y = fee_growth_global_y;
        self
    }

    pub fn with_reward_schedules(mut self, reward_schedules: Vec<RewardSchedule>) -> Self {
        self.reward_schedules = reward_schedules;
        self
    }

    pub fn with_tick_manager_id(mut self, tick_manager_id: impl Into<String>) -> Self {
        self.tick_manager_id = tick_manager_id.into();
        self
    }

    /// Check the pricing state is inside the domain
    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_sqrt_price(self.sqrt_price_x64) {
            return Err(ClmmError::OutOfRange(self.sqrt_price_x64));
        }
        if !is_valid_tick(self.tick_current) {
            return Err(ClmmError::tick_out_of_domain(self.tick_current));
        }
        if self.tick_spacing == 0 {
            return Err(ClmmError::InvalidParameter("tick spacing must be positive"));
        }
        Ok(())
    }

    /// Mint amounts for one whole unit of each coin over the range.
    ///
    /// `amount_y / amount_x` is the Y:X deposit ratio the range requires at
    /// the current price.
    pub fn ratio(&self, tick_lower: i32, tick_upper: i32) -> CoreResult<TokenAmounts> {
        let liquidity = liquidity_for_amounts(
            self.sqrt_price_x64,
            tick_to_sqrt_price_x64(tick_lower)?,
            tick_to_sqrt_price_x64(tick_upper)?,
            self.coin_x.one()?,
            self.coin_y.one()?,
            Rounding::Down,
        )?;

        position_amounts(
            self.sqrt_price_x64,
            self.tick_current,
            tick_lower,
            tick_upper,
            liquidity,
            Rounding::Up,
        )
    }

    /// Narrowest spacing-aligned range, `multiplier` spacings wide, that
    /// contains the current price
    pub fn closest_active_range(&self, multiplier: u32) -> CoreResult<(i32, i32)> {
        if multiplier == 0 {
            return Err(ClmmError::InvalidParameter("range multiplier must be positive"));
        }
        let spacing = i64::from(self.tick_spacing);
        let width = i64::from(multiplier) * spacing;

        // round((tick_current - width / 2) / spacing), halves rounding up
        let numerator = 2 * i64::from(self.tick_current) - width + spacing;
        let mut lower = numerator.div_euclid(2 * spacing) * spacing;

        if self.sqrt_price_x64 < tick_to_sqrt_price_x64(self.tick_current)?
            && lower == i64::from(self.tick_current)
        {
            lower -= spacing;
        }

        let upper = lower + width;
        let to_tick = |tick: i64| i32::try_from(tick).map_err(|_| ClmmError::Overflow);
        Ok((to_tick(lower)?, to_tick(upper)?))
    }
}
