//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. It reads records in batches and folds each batch
//! with counterpart-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (counterpart partitioning + tokio tasks)
//!     └── AsyncPositionLedger (thread-safe net positions)
//! ```
//!
//! Batches are processed one after another; within a batch, each counterpart's
//! records are folded on their own task. Since netting is a sum, the result is
//! the same as the sync strategy's.

use crate::core::r#async::{AsyncPositionLedger, BatchProcessor};
use crate::core::traits::NetPositions;
use crate::io::async_reader::AsyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{BalanceError, CounterpartBalance};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for async batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Records read per batch
    pub batch_size: usize,

    /// Worker threads of the tokio runtime
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a configuration, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn aggregate(&self, input_path: &Path) -> Result<Vec<CounterpartBalance>, BalanceError> {
        if !input_path.exists() {
            return Err(BalanceError::file_not_found(input_path));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()?;

        runtime.block_on(async {
            let ledger = Arc::new(AsyncPositionLedger::new());
            let processor = BatchProcessor::new(Arc::clone(&ledger));

            let file = tokio::fs::File::open(input_path).await?;

            // csv-async reads futures::io, tokio files implement tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let folded = processor.process_batch(batch).await;
                debug!(folded, rows_read = reader.rows_read(), "Batch folded");
            }

            debug!(
                rows_read = reader.rows_read(),
                rows_skipped = reader.rows_skipped(),
                "Input exhausted"
            );

            Ok::<_, BalanceError>(ledger.positions())
        })
    }
}
