//! Core business logic module
//!
//! This module contains the balance computation components:
//! - `engine` - Per-participant paid/share/balance computation
//! - `split_policy` - EQUAL, EXACT, PERCENTAGE and SHARES split rules
//! - `pairwise` - Netting of pairwise balance records into a summary
//! - `traits` - Read-side abstraction over position ledgers
//! - `rounding` - Monetary rounding
//! - `currency` - Indian Rupee formatting
//! - `async` - Concurrent ledger and batch processor

pub mod r#async;
pub mod currency;
pub mod engine;
pub mod pairwise;
pub mod rounding;
pub mod split_policy;
pub mod traits;

pub use currency::format_currency;
pub use engine::{compute_participant_balances, BalanceEngine};
pub use pairwise::{
    aggregate_pairwise_balances, net_counterpart_positions, summarize_positions,
    summary_from_totals, PositionLedger,
};
pub use r#async::{AsyncPositionLedger, BatchProcessor};
pub use rounding::round_money;
pub use traits::NetPositions;
