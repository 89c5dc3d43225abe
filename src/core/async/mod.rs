//! Asynchronous implementations of core components
//!
//! This module provides the concurrent counterpart of the pairwise aggregation
//! ledger, backed by DashMap, plus the batch processor that feeds it from tokio
//! tasks.
//!
//! # Architecture
//!
//! - **AsyncPositionLedger**: Thread-safe net positions keyed by counterpart
//! - **BatchProcessor**: Partitions batches by counterpart and folds them concurrently
//!
//! Both ledgers implement [`NetPositions`](crate::core::traits::NetPositions), so
//! summaries and output do not depend on the strategy that filled them.

pub mod batch_processor;
pub mod position_ledger;

pub use batch_processor::BatchProcessor;
pub use position_ledger::AsyncPositionLedger;
