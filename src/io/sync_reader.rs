//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over pairwise balance records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records sequentially,
//! delegating conversion to the csv_format module. It processes one row at a time
//! and never loads the whole file into memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PairwiseBalanceRecord, BalanceError>` for each CSV row:
//!
//! ```no_run
//! use split_balance_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("balances.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{} vs {}: {}", record.subject_user_id, record.other_user_id, record.amount),
//!         Err(e) => eprintln!("Skipped: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - A missing file is returned from `new()` as `FileNotFound`
//! - Row-level problems are yielded as `Err` items and do not end the iteration

use crate::io::csv_format::{convert_csv_record, CsvBalanceRecord};
use crate::types::{BalanceError, PairwiseBalanceRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over a pairwise balance CSV export
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    rows_read: u64,
}

impl SyncReader {
    /// Open `path` for reading
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV export
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(BalanceError::FileNotFound)` when the path does not exist
    /// * `Err(BalanceError::IoError)` when it exists but cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use split_balance_engine::io::SyncReader;
    /// use std::path::Path;
    ///
    /// let reader = SyncReader::new(Path::new("balances.csv")).unwrap();
    /// for record in reader.flatten() {
    ///     println!("{} {}", record.other_user_id, record.amount);
    /// }
    /// ```
    pub fn new(path: &Path) -> Result<Self, BalanceError> {
        if !path.exists() {
            return Err(BalanceError::file_not_found(path));
        }

        let file = File::open(path)?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            rows_read: 0,
        })
    }

    /// Number of data rows consumed so far (header excluded)
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl Iterator for SyncReader {
    type Item = Result<PairwiseBalanceRecord, BalanceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvBalanceRecord>();

        let result = deserializer.next()?;
        self.rows_read += 1;

        Some(
            result
                .map_err(BalanceError::from)
                .and_then(convert_csv_record),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "subject,other,other_name,amount\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_all(content: &str) -> Vec<Result<PairwiseBalanceRecord, BalanceError>> {
        let file = create_temp_csv(content);
        SyncReader::new(file.path()).unwrap().collect()
    }

    #[test]
    fn test_sync_reader_new_opens_file() {
        let file = create_temp_csv(HEADER);
        assert!(SyncReader::new(file.path()).is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert_eq!(
            result.unwrap_err(),
            BalanceError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_records() {
        let records = read_all(&format!("{}me,u2,Ravi,50\nme,u3,Meera,-20.25\n", HEADER));

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.other_user_id, "u2");
        assert_eq!(first.other_user_name, "Ravi");
        assert_eq!(first.amount, Decimal::new(50, 0));

        let second = records[1].as_ref().unwrap();
        assert_eq!(second.amount, Decimal::new(-2025, 2));
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let records = read_all(&format!("{}  me  ,  u2 , Ravi ,  7.5  \n", HEADER));

        let record = records[0].as_ref().unwrap();
        assert_eq!(record.subject_user_id, "me");
        assert_eq!(record.other_user_id, "u2");
        assert_eq!(record.other_user_name, "Ravi");
        assert_eq!(record.amount, Decimal::new(75, 1));
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let records = read_all(&format!(
            "{}me,u2,Ravi,abc\nme,,Nobody,10\nme,u3\nme,u4,Dev,1\n",
            HEADER
        ));

        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            Err(BalanceError::invalid_amount("abc"))
        );
        assert_eq!(records[1], Err(BalanceError::unresolvable_user("other")));
        assert_eq!(
            records[2],
            Err(BalanceError::missing_amount("balance record"))
        );
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        assert!(read_all(HEADER).is_empty());
    }

    #[test]
    fn test_sync_reader_counts_rows() {
        let file = create_temp_csv(&format!("{}me,u2,,1\nme,u2,,x\n", HEADER));
        let mut reader = SyncReader::new(file.path()).unwrap();

        assert_eq!(reader.rows_read(), 0);
        let ok = reader.by_ref().filter_map(Result::ok).count();

        assert_eq!(ok, 1);
        assert_eq!(reader.rows_read(), 2);
    }
}
