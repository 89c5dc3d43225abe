//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of pairwise balance records from any
//! `futures::io::AsyncRead` source (a tokio file through tokio-util's compat
//! layer in the CLI, an in-memory cursor in tests).
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PairwiseBalanceRecords
//!                  ↓
//!           csv_format module
//!           (CsvBalanceRecord, convert_csv_record)
//! ```
//!
//! Rows that cannot be parsed or converted are logged at debug level and left
//! out of the batch.

use crate::io::csv_format::{convert_csv_record, CsvBalanceRecord};
use crate::types::{BalanceError, PairwiseBalanceRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::debug;

pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    rows_read: u64,
    rows_skipped: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data with a header row
    ///
    /// # Returns
    ///
    /// A new AsyncReader instance with zeroed row counters
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            rows_read: 0,
            rows_skipped: 0,
        }
    }

    /// Read up to `batch_size` usable records
    ///
    /// Rows that fail to parse or convert are counted as skipped, logged at
    /// debug level and do not count towards the batch size.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Maximum number of records to return
    ///
    /// # Returns
    ///
    /// A vector of converted pairwise records. Returns an empty vector when the
    /// end of the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PairwiseBalanceRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvBalanceRecord>();

        while batch.len() < batch_size {
            let Some(result) = records.next().await else {
                break;
            };
            self.rows_read += 1;

            match result.map_err(BalanceError::from).and_then(convert_csv_record) {
                Ok(record) => batch.push(record),
                Err(e) => {
                    self.rows_skipped += 1;
                    debug!(row = self.rows_read, error = %e, "Skipping balance record");
                }
            }
        }

        batch
    }

    /// Data rows consumed so far (header excluded)
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Rows dropped because they could not be parsed or converted
    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped
    }
}
