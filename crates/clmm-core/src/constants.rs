//! # Protocol Constants
//!
//! Fixed-point scales, tick domain bounds and the tick-math magic numbers.
//! The tick and sqrt-price bounds match the pool contract exactly.

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << 64;

/// Q96 scale used by the positive-tick constant table
pub const Q96: u128 = 1u128 << 96;

/// Fee rates are expressed in hundredths of a bip (1_000_000 = 100%)
pub const FEE_RATE_DENOMINATOR: u128 = 1_000_000;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================================
// Tick Domain
// ============================================================================

/// The minimum tick that can be used on any pool
pub const MIN_TICK: i32 = -443_636;

/// The maximum tick that can be used on any pool
pub const MAX_TICK: i32 = 443_636;

/// Sqrt price at MIN_TICK in Q64.64
pub const MIN_SQRT_RATIO: u128 = 4_295_048_016;

/// Sqrt price at MAX_TICK in Q64.64
pub const MAX_SQRT_RATIO: u128 = 79_226_673_515_401_279_992_447_579_055;

// ============================================================================
// sqrt_price -> tick estimation
// ============================================================================

/// Fractional bits extracted by the iterative log2
pub const BIT_PRECISION: u32 = 14;

/// log_sqrt(1.0001)(2) in Q32.32
pub const LOG_B_2_X32: i128 = 59_543_866_431_248;

/// Lower error margin of the log estimate (0.01 in Q64)
pub const LOG_B_P_ERR_MARGIN_LOWER_X64: i128 = 184_467_440_737_095_516;

/// Upper error margin: 2^-precision / log_2(b) + 0.01 in Q64
pub const LOG_B_P_ERR_MARGIN_UPPER_X64: i128 = 15_793_534_762_490_258_745;
