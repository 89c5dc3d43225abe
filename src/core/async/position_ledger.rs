//! Thread-safe position ledger for async batch aggregation
//!
//! This module provides the `AsyncPositionLedger` struct, which nets pairwise
//! balance records per counterpart using `DashMap`, so records for different
//! counterparts can be folded from concurrent tasks.
//!
//! # Thread Safety
//!
//! All operations take `&self`. Folds for the same counterpart are serialized by
//! the entry lock; folds for different counterparts proceed in parallel.

use crate::core::traits::NetPositions;
use crate::types::{CounterpartBalance, PairwiseBalanceRecord, UserId};
use dashmap::DashMap;

/// Concurrent ledger of net positions keyed by counterpart id
///
/// Netting is a sum, so the final positions do not depend on the order in which
/// tasks fold their records. Only the display name depends on order (the first
/// non-empty one wins), which is why the batch processor keeps each
/// counterpart's records on a single task.
#[derive(Debug, Default)]
pub struct AsyncPositionLedger {
    /// Net positions by counterpart id
    positions: DashMap<UserId, CounterpartBalance>,
}

impl AsyncPositionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            positions: DashMap::new(),
        }
    }

    /// Fold a record into the position against its counterpart
    ///
    /// Creates the position on first sight. Safe to call concurrently.
    pub fn record(&self, record: &PairwiseBalanceRecord) {
        self.positions
            .entry(record.other_user_id.clone())
            .or_insert_with(|| CounterpartBalance::new(record.other_user_id.clone()))
            .absorb(record);
    }

    /// Snapshot of a single position
    pub fn get(&self, other_user_id: &str) -> Option<CounterpartBalance> {
        self.positions
            .get(other_user_id)
            .map(|position| position.value().clone())
    }

    /// Number of distinct counterparts seen
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl NetPositions for AsyncPositionLedger {
    fn positions(&self) -> Vec<CounterpartBalance> {
        let mut positions: Vec<CounterpartBalance> = self
            .positions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        positions.sort_by(|a, b| a.other_user_id.cmp(&b.other_user_id));
        positions
    }
}
