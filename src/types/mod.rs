//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `user`: User id normalization across the API's id shapes
//! - `participant`: Participants and their computed balances
//! - `expense`: Expenses, split types and split details
//! - `pairwise`: Pairwise balance records and the summary built from them
//! - `wire`: Loose API document shapes and their conversion to domain types
//! - `error`: Error types for the balance engine

pub mod error;
pub mod expense;
mod lenient;
pub mod pairwise;
pub mod participant;
pub mod user;
pub mod wire;

pub use error::BalanceError;
pub use expense::{Expense, SplitDetail, SplitType};
pub use pairwise::{BalanceSummary, CounterpartBalance, PairwiseBalanceRecord};
pub use participant::{BalanceStatus, Participant, ParticipantBalance, ParticipantBalances};
pub use user::{resolve_user_id, UserId, UserObject, UserRef};
pub use wire::{WireExpense, WirePairwiseRecord, WireParticipant, WireSplitDetail};
