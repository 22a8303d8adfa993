//! Liquidity position valuation
//!
//! A [`Position`] pairs a range and its liquidity with the pool snapshot it
//! lives in and a [`TickStore`] for its boundary ticks. Amounts and slippage
//! guards are computed from the snapshot alone; fees and rewards need the two
//! boundary ticks and are fetched concurrently.

use std::sync::Arc;

use chrono::Utc;
use clmm_core::math::{
    burn_amounts_with_slippage, check_tick_range, fee_growth_inside_ticks, liquidity_for_amounts,
    mint_amounts_with_slippage, pending_fee, pending_reward, position_amounts,
    project_reward_growth_global, reward_growths_inside, tick_to_sqrt_price_x64, Rounding,
};
use clmm_core::{Percent, PoolSnapshot, PositionRewardInfo, PositionStatus, Tick, TokenAmounts};
use tracing::debug;

use crate::error::SdkResult;
use crate::tick_store::TickStore;

// ============================================================================
// Construction Arguments
// ============================================================================

/// Stored state of a position, as decoded from the ledger or built by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionArgs {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub coins_owed_x: u128,
    pub coins_owed_y: u128,
    pub fee_growth_inside_x_last: u128,
    pub fee_growth_inside_y_last: u128,
    pub reward_infos: Vec<PositionRewardInfo>,
    pub position_id: Option<String>,
    pub owner: Option<String>,
}

// ============================================================================
// Position
// ============================================================================

pub struct Position {
    pool: Arc<PoolSnapshot>,
    tick_store: Arc<dyn TickStore>,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    coins_owed_x: u128,
    coins_owed_y: u128,
    fee_growth_inside_x_last: u128,
    fee_growth_inside_y_last: u128,
    reward_infos: Vec<PositionRewardInfo>,
    position_id: Option<String>,
    owner: Option<String>,
    project_rewards: bool,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Position")
            .field("pool_id", &self.pool.pool_id)
            .field("tick_lower", &self.tick_lower)
            .field("tick_upper", &self.tick_upper)
            .field("liquidity", &self.liquidity)
            .field("position_id", &self.position_id)
            .finish_non_exhaustive()
    }
}

impl Position {
    /// Create a position, validating the range against the pool's spacing
    pub fn new(
        pool: Arc<PoolSnapshot>,
        tick_store: Arc<dyn TickStore>,
        args: PositionArgs,
    ) -> SdkResult<Self> {
        check_tick_range(args.tick_lower, args.tick_upper, pool.tick_spacing)?;

        Ok(Self {
            pool,
            tick_store,
            tick_lower: args.tick_lower,
            tick_upper: args.tick_upper,
            liquidity: args.liquidity,
            coins_owed_x: args.coins_owed_x,
            coins_owed_y: args.coins_owed_y,
            fee_growth_inside_x_last: args.fee_growth_inside_x_last,
            fee_growth_inside_y_last: args.fee_growth_inside_y_last,
            reward_infos: args.reward_infos,
            position_id: args.position_id,
            owner: args.owner,
            project_rewards: true,
        })
    }

    /// Fresh position holding the most liquidity the amounts can fund
    pub fn from_amounts(
        pool: Arc<PoolSnapshot>,
        tick_store: Arc<dyn TickStore>,
        tick_lower: i32,
        tick_upper: i32,
        amount_x: u128,
        amount_y: u128,
    ) -> SdkResult<Self> {
        check_tick_range(tick_lower, tick_upper, pool.tick_spacing)?;

        let liquidity = liquidity_for_amounts(
            pool.sqrt_price_x64,
            tick_to_sqrt_price_x64(tick_lower)?,
            tick_to_sqrt_price_x64(tick_upper)?,
            amount_x,
            amount_y,
            Rounding::Down,
        )?;

        Self::new(
            pool,
            tick_store,
            PositionArgs {
                tick_lower,
                tick_upper,
                liquidity,
                ..Default::default()
            },
        )
    }

    /// Toggle projection of reward growth up to the query time. When off,
    /// rewards are valued at the pool's last recorded growth.
    pub fn with_reward_projection(mut self, enabled: bool) -> Self {
        self.project_rewards = enabled;
        self
    }

    pub fn pool(&self) -> &Arc<PoolSnapshot> {
        &self.pool
    }

    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    pub fn coins_owed(&self) -> TokenAmounts {
        TokenAmounts::new(self.coins_owed_x, self.coins_owed_y)
    }

    pub fn reward_infos(&self) -> &[PositionRewardInfo] {
        &self.reward_infos
    }

    pub fn position_id(&self) -> Option<&str> {
        self.position_id.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn status(&self) -> PositionStatus {
        PositionStatus::from_ticks(self.pool.tick_current, self.tick_lower, self.tick_upper)
    }

    /// Sqrt price (Q64.64) at the lower bound
    pub fn price_lower(&self) -> SdkResult<u128> {
        Ok(tick_to_sqrt_price_x64(self.tick_lower)?)
    }

    /// Sqrt price (Q64.64) at the upper bound
    pub fn price_upper(&self) -> SdkResult<u128> {
        Ok(tick_to_sqrt_price_x64(self.tick_upper)?)
    }

    // ------------------------------------------------------------------------
    // Amounts
    // ------------------------------------------------------------------------

    /// Tokens the position would return if fully withdrawn now
    pub fn current_amounts(&self) -> SdkResult<TokenAmounts> {
        self.amounts(Rounding::Down)
    }

    /// Tokens required to mint this liquidity at the current price
    pub fn mint_amounts(&self) -> SdkResult<TokenAmounts> {
        self.amounts(Rounding::Up)
    }

    fn amounts(&self, rounding: Rounding) -> SdkResult<TokenAmounts> {
        Ok(position_amounts(
            self.pool.sqrt_price_x64,
            self.pool.tick_current,
            self.tick_lower,
            self.tick_upper,
            self.liquidity,
            rounding,
        )?)
    }

    /// Maximum amounts to authorize for minting under `tolerance`
    pub fn mint_amounts_with_slippage(&self, tolerance: &Percent) -> SdkResult<TokenAmounts> {
        Ok(mint_amounts_with_slippage(
            self.pool.sqrt_price_x64,
            self.pool.tick_current,
            self.tick_lower,
            self.tick_upper,
            self.liquidity,
            tolerance,
        )?)
    }

    /// Minimum amounts to accept for burning under `tolerance`
    pub fn burn_amounts_with_slippage(&self, tolerance: &Percent) -> SdkResult<TokenAmounts> {
        Ok(burn_amounts_with_slippage(
            self.pool.sqrt_price_x64,
            self.tick_lower,
            self.tick_upper,
            self.liquidity,
            tolerance,
        )?)
    }

    // ------------------------------------------------------------------------
    // Fees and Rewards
    // ------------------------------------------------------------------------

    async fn boundary_ticks(&self) -> SdkResult<(Tick, Tick)> {
        let (lower, upper) = futures::try_join!(
            self.tick_store.get_tick(self.tick_lower),
            self.tick_store.get_tick(self.tick_upper),
        )?;
        Ok((lower, upper))
    }

    /// Fees owed to the position: recorded debt plus growth since the last update
    pub async fn get_fees(&self) -> SdkResult<TokenAmounts> {
        let (lower, upper) = self.boundary_ticks().await?;

        let (inside_x, inside_y) = fee_growth_inside_ticks(
            &lower,
            &upper,
            self.pool.tick_current,
            self.pool.fee_growth_global_x,
            self.pool.fee_growth_global_y,
        );

        let fees = TokenAmounts::new(
            pending_fee(
                self.coins_owed_x,
                inside_x,
                self.fee_growth_inside_x_last,
                self.liquidity,
            )?,
            pending_fee(
                self.coins_owed_y,
                inside_y,
                self.fee_growth_inside_y_last,
                self.liquidity,
            )?,
        );

        debug!(
            pool = %self.pool.pool_id,
            tick_lower = self.tick_lower,
            tick_upper = self.tick_upper,
            fee_x = fees.amount_x,
            fee_y = fees.amount_y,
            "fees refreshed"
        );
        Ok(fees)
    }

    /// Rewards owed per pool reward schedule, valued at `now_seconds`
    pub async fn get_rewards_at(&self, now_seconds: u64) -> SdkResult<Vec<u128>> {
        let (lower, upper) = self.boundary_ticks().await?;

        let globals = self
            .pool
            .reward_schedules
            .iter()
            .map(|schedule| {
                if self.project_rewards {
                    project_reward_growth_global(schedule, self.pool.liquidity, now_seconds)
                } else {
                    Ok(schedule.reward_growth_global)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inside = reward_growths_inside(
            self.tick_lower,
            self.tick_upper,
            self.pool.tick_current,
            &lower.reward_growths_outside,
            &upper.reward_growths_outside,
            &globals,
        );

        let rewards = inside
            .iter()
            .enumerate()
            .map(|(i, growth)| {
                let info = self.reward_infos.get(i).copied().unwrap_or_default();
                pending_reward(
                    info.coins_owed_reward,
                    *growth,
                    info.reward_growth_inside_last,
                    self.liquidity,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            pool = %self.pool.pool_id,
            schedules = rewards.len(),
            now_seconds,
            "rewards refreshed"
        );
        Ok(rewards)
    }

    /// Rewards owed per schedule at the current wall-clock time
    pub async fn get_rewards(&self) -> SdkResult<Vec<u128>> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        self.get_rewards_at(now).await
    }
}
