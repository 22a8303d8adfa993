//! # Slippage Guards
//!
//! Worst-case token amounts for minting and burning when the pool price may
//! move by up to a tolerance before the transaction lands.
//!
//! For an in-range position amount X shrinks as the price rises and amount Y
//! shrinks as it falls, so the guard takes X at the upper bound and Y at the
//! lower bound.

use ethnum::U256;

use crate::constants::{MAX_SQRT_RATIO, MIN_SQRT_RATIO};
use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::{mul_div_u256, sqrt_u256, u256_to_u128, Rounding};
use crate::math::liquidity_math::{liquidity_for_amounts, position_amounts};
use crate::math::price::sqrt_price_x64_to_price_x128;
use crate::math::tick_math::{sqrt_price_x64_to_tick, tick_to_sqrt_price_x64};
use crate::types::{Percent, TokenAmounts};

/// Sqrt prices at `price * (1 - tolerance)` and `price * (1 + tolerance)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlippageBounds {
    pub sqrt_price_lower: u128,
    pub sqrt_price_upper: u128,
}

impl SlippageBounds {
    /// Tick containing the lower bound
    pub fn tick_lower(&self) -> CoreResult<i32> {
        sqrt_price_x64_to_tick(self.sqrt_price_lower)
    }

    /// Tick containing the upper bound
    pub fn tick_upper(&self) -> CoreResult<i32> {
        sqrt_price_x64_to_tick(self.sqrt_price_upper)
    }
}

/// Shift the price by the tolerance both ways and re-encode as sqrt prices.
///
/// Bounds that reach the edge of the domain are pulled one unit inside it.
pub fn sqrt_price_bounds(sqrt_price_x64: u128, tolerance: &Percent) -> CoreResult<SlippageBounds> {
    let price_x128 = sqrt_price_x64_to_price_x128(sqrt_price_x64);
    let denominator = U256::from(tolerance.denominator());
    let numerator = U256::from(tolerance.numerator());

    let price_lower_x128 = mul_div_u256(price_x128, denominator - numerator, denominator, Rounding::Down)?;
    let price_upper_x128 = mul_div_u256(price_x128, denominator + numerator, denominator, Rounding::Down)?;

    let mut sqrt_price_lower = u256_to_u128(sqrt_u256(price_lower_x128))?;
    if sqrt_price_lower <= MIN_SQRT_RATIO {
        sqrt_price_lower = MIN_SQRT_RATIO + 1;
    }

    let mut sqrt_price_upper = u256_to_u128(sqrt_u256(price_upper_x128))?;
    if sqrt_price_upper >= MAX_SQRT_RATIO {
        sqrt_price_upper = MAX_SQRT_RATIO - 1;
    }

    Ok(SlippageBounds {
        sqrt_price_lower,
        sqrt_price_upper,
    })
}

/// Maximum amounts to authorize when minting `liquidity` under slippage.
///
/// The amounts needed at the current price are rounded up, converted back to
/// the liquidity they would actually mint, and that liquidity is valued at
/// the bounds.
pub fn mint_amounts_with_slippage(
    sqrt_price_x64: u128,
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    tolerance: &Percent,
) -> CoreResult<TokenAmounts> {
    let bounds = sqrt_price_bounds(sqrt_price_x64, tolerance)?;

    let mint_amounts = position_amounts(
        sqrt_price_x64,
        tick_current,
        tick_lower,
        tick_upper,
        liquidity,
        Rounding::Up,
    )?;

    let minted_liquidity = liquidity_for_amounts(
        sqrt_price_x64,
        tick_to_sqrt_price_x64(tick_lower)?,
        tick_to_sqrt_price_x64(tick_upper)?,
        mint_amounts.amount_x,
        mint_amounts.amount_y,
        Rounding::Down,
    )?;

    let at_upper = position_amounts(
        bounds.sqrt_price_upper,
        bounds.tick_upper()?,
        tick_lower,
        tick_upper,
        minted_liquidity,
        Rounding::Up,
    )?;
    let at_lower = position_amounts(
        bounds.sqrt_price_lower,
        bounds.tick_lower()?,
        tick_lower,
        tick_upper,
        minted_liquidity,
        Rounding::Up,
    )?;

    Ok(TokenAmounts::new(at_upper.amount_x, at_lower.amount_y))
}

/// Minimum amounts to accept when burning `liquidity` under slippage
pub fn burn_amounts_with_slippage(
    sqrt_price_x64: u128,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    tolerance: &Percent,
) -> CoreResult<TokenAmounts> {
    if tick_lower >= tick_upper {
        return Err(ClmmError::TickOrderViolation {
            lower: tick_lower,
            upper: tick_upper,
        });
    }
    let bounds = sqrt_price_bounds(sqrt_price_x64, tolerance)?;

    let at_upper = position_amounts(
        bounds.sqrt_price_upper,
        bounds.tick_upper()?,
        tick_lower,
        tick_upper,
        liquidity,
        Rounding::Down,
    )?;
    let at_lower = position_amounts(
        bounds.sqrt_price_lower,
        bounds.tick_lower()?,
        tick_lower,
        tick_upper,
        liquidity,
        Rounding::Down,
    )?;

    Ok(TokenAmounts::new(at_upper.amount_x, at_lower.amount_y))
}
