//! Split Balance Engine Library
//! # Overview
//!
//! This library computes the balances shown by a travel and expense-splitting
//! app: how much each member of a group paid, what their share was, and who
//! still owes whom.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (wire documents, expenses, balances, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Per-participant paid/share/balance computation
//!   - [`core::split_policy`] - Split rules applied per expense
//!   - [`core::pairwise`] - Netting of pairwise balance records
//!   - [`core::currency`] - Indian Rupee formatting
//! - [`io`] - CSV and JSON input/output
//! - [`strategy`] - Sync and async pipelines for large pairwise exports
//!
//! # Split Types
//!
//! - **EQUAL**: The amount is divided evenly among all participants
//! - **EXACT**: Each split entry names the exact amount owed
//! - **PERCENTAGE**: Each split entry names a percentage of the amount
//! - **SHARES**: The amount is divided pro rata by each entry's share count
//!
//! In every case the payer is credited with the full amount.
//!
//! # Balances
//!
//! Each participant's `balance` is `paid - share`:
//! - positive: others owe them (`getBack`)
//! - negative: they owe others (`owe`)
//! - zero: `settled`

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    aggregate_pairwise_balances, compute_participant_balances, format_currency,
    net_counterpart_positions, BalanceEngine,
};
pub use types::{
    BalanceError, BalanceStatus, BalanceSummary, CounterpartBalance, Expense, Participant,
    ParticipantBalance, ParticipantBalances, SplitDetail, SplitType, UserId, UserRef,
    WireExpense, WirePairwiseRecord, WireParticipant,
};
