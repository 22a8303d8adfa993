//! # Fee Tiers
//!
//! Enabled swap fee rates (hundredths of a bip) and their default tick spacing.

use crate::constants::FEE_RATE_DENOMINATOR;
use crate::errors::{ClmmError, CoreResult};

/// Pool fee tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum FeeTier {
    Zero = 0,
    VeryLowest = 10,
    Lowest = 100,
    Low = 500,
    Medium = 3_000,
    High = 10_000,
}

impl FeeTier {
    pub const ALL: [FeeTier; 6] = [
        FeeTier::Zero,
        FeeTier::VeryLowest,
        FeeTier::Lowest,
        FeeTier::Low,
        FeeTier::Medium,
        FeeTier::High,
    ];

    /// Fee rate in hundredths of a bip
    pub const fn fee_rate(self) -> u32 {
        self as u32
    }

    /// Default tick spacing for pools in this tier
    pub const fn tick_spacing(self) -> u32 {
        match self {
            FeeTier::Zero | FeeTier::VeryLowest => 1,
            FeeTier::Lowest => 2,
            FeeTier::Low => 10,
            FeeTier::Medium => 60,
            FeeTier::High => 200,
        }
    }

    /// Fee rate as a fraction of one
    pub fn as_fraction(self) -> f64 {
        self.fee_rate() as f64 / FEE_RATE_DENOMINATOR as f64
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = ClmmError;

    fn try_from(fee_rate: u32) -> CoreResult<Self> {
        FeeTier::ALL
            .into_iter()
            .find(|tier| tier.fee_rate() == fee_rate)
            .ok_or(ClmmError::InvalidParameter("unknown fee tier"))
    }
}
