//! # Sqrt Price Math
//!
//! Token deltas between two sqrt prices for a given liquidity.
//!
//! - `amount_x = L * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)` (with Q64 scaling)
//! - `amount_y = L * (sqrt_b - sqrt_a) / Q64`

use ethnum::U256;

use crate::constants::Q64;
use crate::errors::CoreResult;
use crate::math::full_math::{div_rounding_up, mul_div, mul_div_u256, u256_to_u128, Rounding};

/// Order two sqrt prices ascending
#[inline]
pub(crate) fn sort_sqrt_prices(sqrt_a: u128, sqrt_b: u128) -> (u128, u128) {
    if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    }
}

/// Amount of token X between two sqrt prices for `liquidity`
pub fn get_amount_x_delta(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);

    let numerator_1 = U256::from(liquidity) << 64;
    let numerator_2 = U256::from(sqrt_upper - sqrt_lower);
    let lower = U256::from(sqrt_lower);
    let upper = U256::from(sqrt_upper);

    let amount = match rounding {
        Rounding::Up => div_rounding_up(
            mul_div_u256(numerator_1, numerator_2, upper, Rounding::Up)?,
            lower,
        )?,
        Rounding::Down => {
            let scaled = mul_div_u256(numerator_1, numerator_2, upper, Rounding::Down)?;
            div_floor(scaled, lower)?
        }
    };

    u256_to_u128(amount)
}

/// Amount of token Y between two sqrt prices for `liquidity`
pub fn get_amount_y_delta(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    let (sqrt_lower, sqrt_upper) = sort_sqrt_prices(sqrt_price_a, sqrt_price_b);
    mul_div(liquidity, sqrt_upper - sqrt_lower, Q64, rounding)
}

fn div_floor(numerator: U256, denominator: U256) -> CoreResult<U256> {
    mul_div_u256(numerator, U256::ONE, denominator, Rounding::Down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClmmError;

    #[test]
    fn test_amount_y_delta() {
        // Price 1.0 -> 4.0 (sqrt 1 -> 2) with L = 1000 yields 1000 * (2 - 1)
        let amount = get_amount_y_delta(Q64, 2 * Q64, 1_000, Rounding::Down).unwrap();
        assert_eq!(amount, 1_000);

        // Order of bounds does not matter
        let swapped = get_amount_y_delta(2 * Q64, Q64, 1_000, Rounding::Down).unwrap();
        assert_eq!(amount, swapped);
    }

    #[test]
    fn test_amount_x_delta() {
        // L * (1/sqrt_a - 1/sqrt_b) = 1000 * (1 - 1/2)
        let amount = get_amount_x_delta(Q64, 2 * Q64, 1_000, Rounding::Down).unwrap();
        assert_eq!(amount, 500);
    }

    #[test]
    fn test_rounding_direction() {
        // 1000 * (1 - 1/3) = 666.67
        let down = get_amount_x_delta(Q64, 3 * Q64, 1_000, Rounding::Down).unwrap();
        let up = get_amount_x_delta(Q64, 3 * Q64, 1_000, Rounding::Up).unwrap();
        assert_eq!(down, 666);
        assert_eq!(up, 667);

        // Half a unit of Y
        let down = get_amount_y_delta(Q64, Q64 + Q64 / 2, 1, Rounding::Down).unwrap();
        let up = get_amount_y_delta(Q64, Q64 + Q64 / 2, 1, Rounding::Up).unwrap();
        assert_eq!(down, 0);
        assert_eq!(up, 1);
    }

    #[test]
    fn test_equal_prices_yield_zero() {
        assert_eq!(get_amount_x_delta(Q64, Q64, 1_000, Rounding::Up).unwrap(), 0);
        assert_eq!(get_amount_y_delta(Q64, Q64, 1_000, Rounding::Up).unwrap(), 0);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        assert_eq!(
            get_amount_x_delta(0, Q64, 1_000, Rounding::Down),
            Err(ClmmError::DivisionByZero)
        );
    }
}
