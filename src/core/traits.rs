//! Core traits for pairwise position ledgers
//!
//! This module defines the read-side abstraction shared by the synchronous
//! (HashMap) and asynchronous (DashMap) ledgers, so output and summary code
//! does not care which strategy filled the ledger.

use crate::core::pairwise::summarize_positions;
use crate::types::{BalanceSummary, CounterpartBalance};

/// Net positions accumulated from pairwise balance records
pub trait NetPositions {
    /// All net positions, sorted by counterpart id
    fn positions(&self) -> Vec<CounterpartBalance>;

    /// Settle/get-back summary of the current positions
    fn summary(&self) -> BalanceSummary {
        summarize_positions(&self.positions())
    }
}
