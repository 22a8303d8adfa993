//! # Percent
//!
//! Exact fraction used for slippage tolerances.

use std::fmt;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::{ClmmError, CoreResult};

/// A fraction `numerator / denominator` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percent {
    numerator: u64,
    denominator: u64,
}

impl Percent {
    pub const ZERO: Percent = Percent {
        numerator: 0,
        denominator: 1,
    };

    /// Create a percent, rejecting a zero denominator or a value above 100%
    pub fn new(numerator: u64, denominator: u64) -> CoreResult<Self> {
        if denominator == 0 {
            return Err(ClmmError::InvalidParameter("percent denominator is zero"));
        }
        if numerator > denominator {
            return Err(ClmmError::InvalidParameter("percent exceeds 100%"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Create from basis points (10,000 = 100%)
    pub fn from_bps(bps: u64) -> CoreResult<Self> {
        Self::new(bps, BPS_DENOMINATOR as u64)
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Value as a float, for display and estimates only
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_f64() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_validation() {
        assert!(Percent::new(1, 0).is_err());
        assert!(Percent::new(101, 100).is_err());
        assert!(Percent::new(100, 100).is_ok());
        assert!(Percent::from_bps(10_001).is_err());
    }

    #[test]
    fn test_from_bps() {
        let half_percent = Percent::from_bps(50).unwrap();
        assert_eq!(half_percent.numerator(), 50);
        assert_eq!(half_percent.denominator(), 10_000);
        assert_eq!(format!("{}", half_percent), "0.50%");
        assert!(Percent::default().is_zero());
    }
}
