//! In-memory tick store

use async_trait::async_trait;
use clmm_core::{ClmmError, Tick};

use super::TickStore;
use crate::error::{SdkError, SdkResult};

/// Tick store backed by a validated, sorted list
#[derive(Debug, Clone)]
pub struct TickListStore {
    ticks: Vec<Tick>,
    tick_spacing: u32,
}

impl TickListStore {
    /// Build a store, rejecting lists that are not spacing-aligned, not
    /// strictly increasing or whose liquidity_net does not sum to zero
    pub fn new(ticks: Vec<Tick>, tick_spacing: u32) -> SdkResult<Self> {
        Self::validate(&ticks, tick_spacing)?;
        Ok(Self {
            ticks,
            tick_spacing,
        })
    }

    fn validate(ticks: &[Tick], tick_spacing: u32) -> SdkResult<()> {
        if tick_spacing == 0 {
            return Err(ClmmError::InvalidTickList("tick spacing must be non-zero").into());
        }
        let spacing = i64::from(tick_spacing);

        for tick in ticks {
            tick.validate()?;
            if i64::from(tick.index) % spacing != 0 {
                return Err(ClmmError::InvalidTickList("tick not aligned to spacing").into());
            }
        }

        if ticks.windows(2).any(|pair| pair[0].index >= pair[1].index) {
            return Err(ClmmError::InvalidTickList("ticks not strictly sorted").into());
        }

        let net = ticks
            .iter()
            .try_fold(0i128, |sum, tick| sum.checked_add(tick.liquidity_net))
            .ok_or(ClmmError::InvalidTickList("liquidity_net sum overflows"))?;
        if net != 0 {
            return Err(ClmmError::InvalidTickList("liquidity_net does not sum to zero").into());
        }

        Ok(())
    }

    pub fn tick_spacing(&self) -> u32 {
        self.tick_spacing
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Synchronous lookup
    pub fn tick(&self, index: i32) -> Option<&Tick> {
        self.ticks
            .binary_search_by_key(&index, |tick| tick.index)
            .ok()
            .map(|position| &self.ticks[position])
    }
}

#[async_trait]
impl TickStore for TickListStore {
    async fn get_tick(&self, index: i32) -> SdkResult<Tick> {
        self.tick(index).cloned().ok_or(SdkError::TickNotFound(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(index: i32, liquidity_net: i128) -> Tick {
        Tick::with_liquidity(index, liquidity_net.unsigned_abs(), liquidity_net).unwrap()
    }

    fn invalid_list(result: SdkResult<TickListStore>) -> bool {
        matches!(result, Err(SdkError::Core(ClmmError::InvalidTickList(_))))
    }

    #[test]
    fn test_balanced_list_validates() {
        let store = TickListStore::new(vec![tick(-60, 100), tick(60, -100)], 60).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.tick(60).unwrap().liquidity_net, -100);
        assert!(store.tick(0).is_none());
    }

    #[test]
    fn test_unbalanced_list_rejected() {
        assert!(invalid_list(TickListStore::new(
            vec![tick(-60, 100), tick(60, -50)],
            60
        )));
    }

    #[test]
    fn test_misaligned_and_unsorted_rejected() {
        assert!(invalid_list(TickListStore::new(
            vec![tick(-61, 100), tick(60, -100)],
            60
        )));
        assert!(invalid_list(TickListStore::new(
            vec![tick(60, -100), tick(-60, 100)],
            60
        )));
        assert!(invalid_list(TickListStore::new(
            vec![tick(60, 100), tick(60, -100)],
            60
        )));
        assert!(invalid_list(TickListStore::new(vec![], 0)));
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(TickListStore::new(vec![], 60).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_tick() {
        let store = TickListStore::new(vec![tick(-60, 100), tick(60, -100)], 60).unwrap();
        assert_eq!(store.get_tick(-60).await.unwrap().liquidity_net, 100);
        assert!(matches!(store.get_tick(120).await, Err(SdkError::TickNotFound(120))));
    }
}
