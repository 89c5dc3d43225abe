//! Processing strategy module for pairwise balance aggregation
//!
//! This module defines the Strategy pattern for the complete summary pipeline,
//! covering both CSV parsing and netting. Different implementations (synchronous,
//! asynchronous batch) can be selected at runtime and produce identical output.

use crate::cli::{OutputFormat, StrategyType};
use crate::core::pairwise::summarize_positions;
use crate::io::{write_summary_csv, write_summary_json};
use crate::types::{BalanceError, CounterpartBalance};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Strategy for turning a pairwise record export into a balance summary
///
/// Implementors must be `Send + Sync` so a boxed strategy can be shared freely.
pub trait ProcessingStrategy: Send + Sync {
    /// Read every record from `input_path` and return the net positions,
    /// sorted by counterpart id
    ///
    /// # Errors
    ///
    /// Fatal errors only (missing or unreadable file). Rows that cannot be used
    /// are skipped.
    fn aggregate(&self, input_path: &Path) -> Result<Vec<CounterpartBalance>, BalanceError>;

    /// Aggregate `input_path` and write the summary to `output`
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the CSV export of pairwise balance records
    /// * `output` - Writer receiving the summary
    /// * `format` - CSV (one summary row) or JSON (summary plus positions)
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the summary was written, even when some rows were skipped
    /// * `Err(BalanceError)` if the input could not be read or the output failed
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
        format: OutputFormat,
    ) -> Result<(), BalanceError> {
        let positions = self.aggregate(input_path)?;
        let summary = summarize_positions(&positions);

        info!(
            counterparts = positions.len(),
            settle = %summary.settle_amount,
            get_back = %summary.get_back_amount,
            "Aggregated pairwise balances"
        );

        match format {
            OutputFormat::Csv => write_summary_csv(&summary, output),
            OutputFormat::Json => write_summary_json(&summary, &positions, output),
        }
    }
}

/// Create a processing strategy based on the strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional batch configuration for the async strategy (ignored for
///   sync); `None` uses [`BatchConfig::default`]
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    fn test_strategies_agree(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let file = create_temp_csv(
            "subject,other,other_name,amount\n\
             me,u2,Ravi,50\n\
             me,u3,Meera,-35\n\
             me,u2,Ravi,-20\n\
             me,u3,,-5\n\
             me,u4,Dev,oops\n",
        );

        let strategy = create_strategy(strategy, Some(BatchConfig::new(2, 2)));
        let mut output = Vec::new();
        strategy
            .process(file.path(), &mut output, OutputFormat::Csv)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "total_owing,total_owed,settle_amount,get_back_amount,net_balance\n\
             40.00,30.00,40.00,30.00,-10.00\n"
        );
    }

    #[rstest]
    fn test_missing_file_is_fatal(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let strategy = create_strategy(strategy, None);
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output, OutputFormat::Csv);

        assert_eq!(
            result,
            Err(BalanceError::FileNotFound {
                path: "nonexistent.csv".to_string()
            })
        );
        assert!(output.is_empty());
    }

    #[test]
    fn test_json_output_lists_positions() {
        let file = create_temp_csv("subject,other,other_name,amount\nme,u2,Ravi,12.5\n");

        let mut output = Vec::new();
        SyncProcessingStrategy
            .process(file.path(), &mut output, OutputFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["getBackAmount"], serde_json::json!(12.5));
        assert_eq!(value["positions"][0]["otherUserName"], "Ravi");
    }
}
