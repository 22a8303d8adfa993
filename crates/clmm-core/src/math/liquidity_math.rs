//! # Liquidity Math
//!
//! Liquidity sizing from token budgets over a price range, and the token
//! amounts a liquidity value represents at a given price.
//!
//! Three regimes, depending on where the current price sits:
//! - at or below the range: the position is all token X
//! - inside the range: both tokens, the scarcer one bounds liquidity
//! - at or above the range: the position is all token Y

use ethnum::U256;

use crate::constants::Q64;
use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::{mul_div, u256_to_u128, Rounding};
use crate::math::sqrt_price_math::{get_amount_x_delta, get_amount_y_delta, sort_sqrt_prices};
use crate::math::tick_math::tick_to_sqrt_price_x64;
use crate::types::TokenAmounts;

// ============================================================================
// Liquidity From Amounts
// ============================================================================

/// Liquidity provided by `amount_x` of token X over [sqrt_a, sqrt_b]
///
/// `L = amount_x * sqrt_a * sqrt_b / (Q64 * (sqrt_b - sqrt_a))`
///
/// `amount_x * sqrt_a * sqrt_b` can exceed 256 bits, so the product is
/// split as `amount_x * sqrt_a = q * diff + r` and the two parts are divided
/// separately. The result is exact; only a liquidity above u128 overflows.
pub fn liquidity_for_amount_x(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    amount_x: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);
    if sqrt_lower == sqrt_upper {
        return Err(ClmmError::DivisionByZero);
    }

    let diff = U256::from(sqrt_upper - sqrt_lower);
    let upper = U256::from(sqrt_upper);
    let scaled = U256::from(amount_x) * U256::from(sqrt_lower);
    let (quotient, remainder) = (scaled / diff, scaled % diff);

    // remainder < diff < 2^128, so this product always fits
    let tail = remainder * upper;
    let numerator = quotient
        .checked_mul(upper)
        .and_then(|head| head.checked_add(tail / diff))
        .ok_or(ClmmError::Overflow)?;

    let mut liquidity = numerator >> 64;
    if rounding == Rounding::Up
        && (numerator & U256::from(Q64 - 1) != U256::ZERO || tail % diff != U256::ZERO)
    {
        liquidity += U256::ONE;
    }
    u256_to_u128(liquidity)
}

/// Liquidity provided by `amount_y` of token Y over [sqrt_a, sqrt_b]
///
/// `L = amount_y * Q64 / (sqrt_b - sqrt_a)`
pub fn liquidity_for_amount_y(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    amount_y: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);
    mul_div(amount_y, Q64, sqrt_upper - sqrt_lower, rounding)
}

/// Maximum liquidity the given token budgets can fund at the current price
pub fn liquidity_for_amounts(
    sqrt_price_current: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    amount_x: u128,
    amount_y: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);

    if sqrt_price_current <= sqrt_lower {
        liquidity_for_amount_x(sqrt_lower, sqrt_upper, amount_x, rounding)
    } else if sqrt_price_current < sqrt_upper {
        let liquidity_x = liquidity_for_amount_x(sqrt_price_current, sqrt_upper, amount_x, rounding);
        let liquidity_y = liquidity_for_amount_y(sqrt_lower, sqrt_price_current, amount_y, rounding);
        // A side whose liquidity exceeds u128 cannot be the binding one
        match (liquidity_x, liquidity_y) {
            (Ok(x), Ok(y)) => Ok(x.min(y)),
            (Err(ClmmError::Overflow), Ok(y)) => Ok(y),
            (Ok(x), Err(ClmmError::Overflow)) => Ok(x),
            (Err(err), _) | (_, Err(err)) => Err(err),
        }
    } else {
        liquidity_for_amount_y(sqrt_lower, sqrt_upper, amount_y, rounding)
    }
}

// ============================================================================
// Amounts From Liquidity
// ============================================================================

/// Token amounts represented by `liquidity` over [sqrt_a, sqrt_b] at the current price
pub fn amounts_for_liquidity(
    sqrt_price_current: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<TokenAmounts> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);

    if sqrt_price_current <= sqrt_lower {
        Ok(TokenAmounts::new(
            get_amount_x_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
            0,
        ))
    } else if sqrt_price_current < sqrt_upper {
        Ok(TokenAmounts::new(
            get_amount_x_delta(sqrt_price_current, sqrt_upper, liquidity, rounding)?,
            get_amount_y_delta(sqrt_lower, sqrt_price_current, liquidity, rounding)?,
        ))
    } else {
        Ok(TokenAmounts::new(
            0,
            get_amount_y_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
        ))
    }
}

/// Token amounts of a position, with the regime chosen by tick the way the
/// pool contract does it rather than by comparing sqrt prices
pub fn position_amounts(
    sqrt_price_x64: u128,
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<TokenAmounts> {
    if tick_lower >= tick_upper {
        return Err(ClmmError::TickOrderViolation {
            lower: tick_lower,
            upper: tick_upper,
        });
    }

    let sqrt_lower = tick_to_sqrt_price_x64(tick_lower)?;
    let sqrt_upper = tick_to_sqrt_price_x64(tick_upper)?;

    if tick_current < tick_lower {
        Ok(TokenAmounts::new(
            get_amount_x_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
            0,
        ))
    } else if tick_current < tick_upper {
        Ok(TokenAmounts::new(
            get_amount_x_delta(sqrt_price_x64, sqrt_upper, liquidity, rounding)?,
            get_amount_y_delta(sqrt_lower, sqrt_price_x64, liquidity, rounding)?,
        ))
    } else {
        Ok(TokenAmounts::new(
            0,
            get_amount_y_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
        ))
    }
}
