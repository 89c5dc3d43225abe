//! I/O module
//!
//! Handles reading API exports and writing balance output.
//!
//! # Components
//!
//! - `csv_format` - Pairwise record conversion and CSV output
//! - `json_format` - Group snapshot reading and JSON output
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_balances_csv, write_summary_csv, CsvBalanceRecord};
pub use json_format::{
    parse_group_snapshot, read_group_snapshot, write_balances_json, write_summary_json,
    GroupSnapshot,
};
pub use sync_reader::SyncReader;
