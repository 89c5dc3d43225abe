//! Pairwise balance records and the summary built from them

use super::user::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A signed balance between two users as delivered by the API
///
/// `amount` is from the subject's perspective: positive means the subject is
/// owed, negative means the subject owes.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseBalanceRecord {
    pub subject_user_id: UserId,
    pub other_user_id: UserId,
    pub other_user_name: String,
    pub amount: Decimal,
}

impl PairwiseBalanceRecord {
    pub fn new(
        subject_user_id: impl Into<UserId>,
        other_user_id: impl Into<UserId>,
        other_user_name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        PairwiseBalanceRecord {
            subject_user_id: subject_user_id.into(),
            other_user_id: other_user_id.into(),
            other_user_name: other_user_name.into(),
            amount,
        }
    }
}

/// Net position against a single counterpart
///
/// The sum of every record's amount naming this counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartBalance {
    pub other_user_id: UserId,

    /// First non-empty name seen for the counterpart
    pub other_user_name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl CounterpartBalance {
    /// A zero position against `other_user_id`
    pub fn new(other_user_id: impl Into<UserId>) -> Self {
        CounterpartBalance {
            other_user_id: other_user_id.into(),
            other_user_name: String::new(),
            amount: Decimal::ZERO,
        }
    }

    /// Fold one record into this position
    pub fn absorb(&mut self, record: &PairwiseBalanceRecord) {
        self.amount = self.amount.saturating_add(record.amount);
        if self.other_user_name.is_empty() && !record.other_user_name.is_empty() {
            self.other_user_name = record.other_user_name.clone();
        }
    }
}

/// Net settle/get-back summary across all counterparts
///
/// Built by `core::pairwise`, which rounds every field to two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    /// Total owed to counterparts
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owing: Decimal,

    /// Total owed by counterparts
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owed: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub settle_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub get_back_amount: Decimal,

    /// `get_back_amount - settle_amount`
    #[serde(with = "rust_decimal::serde::float")]
    pub net_balance: Decimal,
}
