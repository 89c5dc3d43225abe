//! Batch processing with counterpart-based partitioning for async aggregation
//!
//! This module provides the `BatchProcessor` struct, which folds batches of
//! pairwise balance records into a shared [`AsyncPositionLedger`] concurrently.
//!
//! # Design
//!
//! A batch is partitioned by counterpart id. Each partition is folded on its own
//! tokio task, so records naming the same counterpart are absorbed sequentially
//! in input order (keeping the first-name-wins rule deterministic) while
//! different counterparts are folded in parallel.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncPositionLedger>  (shared net positions)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncPositionLedger;
use crate::types::{PairwiseBalanceRecord, UserId};
use tracing::error;

/// Batch processor with counterpart-based partitioning
///
/// Cloning is cheap and every clone folds into the same ledger.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared ledger the batches are folded into
    ledger: Arc<AsyncPositionLedger>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor folding into `ledger`
    pub fn new(ledger: Arc<AsyncPositionLedger>) -> Self {
        Self { ledger }
    }

    /// The ledger this processor folds into
    pub fn ledger(&self) -> &Arc<AsyncPositionLedger> {
        &self.ledger
    }

    /// Partition a batch of records by counterpart id
    ///
    /// # Guarantees
    ///
    /// - Each record appears in exactly one partition
    /// - Records in a partition keep their original relative order
    /// - A partition only holds records for a single counterpart
    pub fn partition_by_counterpart(
        &self,
        batch: Vec<PairwiseBalanceRecord>,
    ) -> HashMap<UserId, Vec<PairwiseBalanceRecord>> {
        let mut partitions: HashMap<UserId, Vec<PairwiseBalanceRecord>> = HashMap::new();

        for record in batch {
            partitions
                .entry(record.other_user_id.clone())
                .or_default()
                .push(record);
        }

        partitions
    }

    /// Fold all records for a single counterpart, in order
    ///
    /// Returns the number of records folded.
    pub async fn fold_counterpart_records(&self, records: Vec<PairwiseBalanceRecord>) -> usize {
        for record in &records {
            self.ledger.record(record);
        }

        records.len()
    }

    /// Fold a batch of records with counterpart-based partitioning
    ///
    /// Spawns one tokio task per counterpart and waits for all of them. Returns
    /// the number of records folded; a task that panics is logged and its
    /// records are not counted.
    pub async fn process_batch(&self, batch: Vec<PairwiseBalanceRecord>) -> usize {
        let partitions = self.partition_by_counterpart(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (other_user_id, records) in partitions {
            let processor = self.clone();
            let task = tokio::spawn(async move {
                processor.fold_counterpart_records(records).await
            });
            tasks.push((other_user_id, task));
        }

        let mut folded = 0;
        for (other_user_id, task) in tasks {
            match task.await {
                Ok(count) => folded += count,
                Err(e) => {
                    error!(other_user_id = %other_user_id, error = ?e, "Aggregation task panicked");
                }
            }
        }

        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::NetPositions;
    use rust_decimal::Decimal;

    fn record(other: &str, name: &str, amount: i64) -> PairwiseBalanceRecord {
        PairwiseBalanceRecord::new("me", other, name, Decimal::from(amount))
    }

    fn processor() -> BatchProcessor {
        BatchProcessor::new(Arc::new(AsyncPositionLedger::new()))
    }

    #[test]
    fn test_partition_by_counterpart_empty_batch() {
        let partitions = processor().partition_by_counterpart(vec![]);
        assert!(partitions.is_empty());
    }

    #[test]
    fn test_partition_by_counterpart_preserves_order() {
        let batch = vec![
            record("u2", "", 1),
            record("u3", "Meera", 2),
            record("u2", "Ravi", 3),
            record("u2", "Ravi K", 4),
        ];

        let partitions = processor().partition_by_counterpart(batch);

        assert_eq!(partitions.len(), 2);

        let u2 = &partitions["u2"];
        assert_eq!(u2.len(), 3);
        let amounts: Vec<Decimal> = u2.iter().map(|r| r.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::from(1), Decimal::from(3), Decimal::from(4)]
        );

        assert_eq!(partitions["u3"].len(), 1);
    }

    #[tokio::test]
    async fn test_fold_counterpart_records_empty() {
        let processor = processor();

        let folded = processor.fold_counterpart_records(vec![]).await;

        assert_eq!(folded, 0);
        assert!(processor.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_fold_keeps_first_non_empty_name() {
        let processor = processor();

        processor
            .fold_counterpart_records(vec![
                record("u2", "", 10),
                record("u2", "Ravi", 5),
                record("u2", "Ravi K", -3),
            ])
            .await;

        let position = processor.ledger().get("u2").unwrap();
        assert_eq!(position.amount, Decimal::from(12));
        assert_eq!(position.other_user_name, "Ravi");
    }

    #[tokio::test]
    async fn test_process_batch_nets_all_counterparts() {
        let processor = processor();
        let batch = vec![
            record("u2", "Ravi", 50),
            record("u3", "Meera", -35),
            record("u2", "Ravi", -20),
            record("u4", "Dev", 0),
            record("u3", "Meera", -5),
        ];

        let folded = processor.process_batch(batch).await;

        assert_eq!(folded, 5);
        let ledger = processor.ledger();
        assert_eq!(ledger.len(), 3);

        let summary = ledger.summary();
        assert_eq!(summary.total_owed, Decimal::from(30));
        assert_eq!(summary.total_owing, Decimal::from(40));
        assert_eq!(summary.net_balance, Decimal::from(-10));
    }

    #[tokio::test]
    async fn test_process_multiple_batches_accumulate() {
        let processor = processor();

        processor
            .process_batch(vec![record("u2", "Ravi", 10), record("u3", "", 5)])
            .await;
        processor
            .process_batch(vec![record("u2", "", -25), record("u3", "Meera", 5)])
            .await;

        let positions = processor.ledger().positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].amount, Decimal::from(-15));
        assert_eq!(positions[1].amount, Decimal::from(10));
        assert_eq!(positions[1].other_user_name, "Meera");
    }

    #[tokio::test]
    async fn test_cloned_processors_share_ledger() {
        let processor = processor();
        let clone = processor.clone();

        processor.process_batch(vec![record("u2", "Ravi", 7)]).await;
        clone.process_batch(vec![record("u2", "Ravi", 3)]).await;

        assert_eq!(
            processor.ledger().get("u2").unwrap().amount,
            Decimal::from(10)
        );
    }
}
