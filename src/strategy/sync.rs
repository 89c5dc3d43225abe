//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It streams rows from the SyncReader straight into a
//! `PositionLedger`.
//!
//! # Memory Efficiency
//!
//! Rows are read one at a time, so memory use is O(counterparts), not O(rows).

use crate::core::pairwise::PositionLedger;
use crate::core::traits::NetPositions;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{BalanceError, CounterpartBalance};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn aggregate(&self, input_path: &Path) -> Result<Vec<CounterpartBalance>, BalanceError> {
        let mut ledger = PositionLedger::new();
        let mut reader = SyncReader::new(input_path)?;

        while let Some(result) = reader.next() {
            match result {
                Ok(record) => ledger.record(&record),
                Err(e) => debug!(row = reader.rows_read(), error = %e, "Skipping balance record"),
            }
        }

        Ok(ledger.positions())
    }
}
