//! Wire shapes of the remote API's participant, expense and balance documents
//!
//! Every field is optional so a single odd document never fails a whole
//! payload. Names, split values and split detail lists are read per field: a
//! value of the wrong JSON type reads as absent and leaves its siblings alone. The `TryFrom` impls turn a wire document into its validated
//! domain type, or into the [`BalanceError`] explaining why it was skipped.

use super::error::BalanceError;
use super::expense::{Expense, SplitDetail, SplitType};
use super::pairwise::PairwiseBalanceRecord;
use super::participant::Participant;
use super::user::{resolve_user_id, UserRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Group member as returned by the API: `{"user": {"_id": "u1", "fullName": "A"}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireParticipant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,

    /// Fallback when the member is not wrapped in a `user` document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserRef>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl WireParticipant {
    /// Member wrapping a `{"_id", "fullName"}` user document
    pub fn from_user(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        WireParticipant {
            user: Some(UserRef::document(id, full_name)),
            ..WireParticipant::default()
        }
    }
}

/// Split breakdown entry as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSplitDetail {
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<Decimal>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub shares: Option<Decimal>,
}

/// Expense as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// A bare id or a `{"user": id}` wrapper
    #[serde(default, alias = "paidById", skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<UserRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::items",
        skip_serializing_if = "Option::is_none"
    )]
    pub split_details: Option<Vec<WireSplitDetail>>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_id: Option<String>,
}

/// Pairwise balance record as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePairwiseRecord {
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub subject_user_id: Option<UserRef>,

    #[serde(default, alias = "otherUser", skip_serializing_if = "Option::is_none")]
    pub other_user_id: Option<UserRef>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub other_user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl TryFrom<&WireParticipant> for Participant {
    type Error = BalanceError;

    fn try_from(wire: &WireParticipant) -> Result<Self, Self::Error> {
        let user_id = [&wire.user, &wire.user_id]
            .into_iter()
            .flatten()
            .find_map(resolve_user_id)
            .ok_or_else(|| BalanceError::unresolvable_user("participant.user"))?;

        let display_name = wire
            .user
            .as_ref()
            .and_then(UserRef::display_name)
            .or(wire.full_name.as_deref())
            .or(wire.name.as_deref())
            .unwrap_or_default();

        Ok(Participant::new(user_id, display_name))
    }
}

impl From<&WireSplitDetail> for SplitDetail {
    fn from(wire: &WireSplitDetail) -> Self {
        SplitDetail {
            user_id: wire.user.as_ref().and_then(resolve_user_id),
            amount: wire.amount,
            percentage: wire.percentage,
            shares: wire.shares,
        }
    }
}

impl TryFrom<&WireExpense> for Expense {
    type Error = BalanceError;

    fn try_from(wire: &WireExpense) -> Result<Self, Self::Error> {
        let amount = wire
            .amount
            .ok_or_else(|| BalanceError::missing_amount("expense"))?;

        let paid_by = wire
            .paid_by
            .as_ref()
            .and_then(resolve_user_id)
            .ok_or(BalanceError::MissingPayer)?;

        let split_type: SplitType = wire
            .split_type
            .as_deref()
            .ok_or(BalanceError::MissingSplitType)?
            .parse()?;

        let split_details = wire
            .split_details
            .iter()
            .flatten()
            .map(SplitDetail::from)
            .collect();

        Ok(Expense {
            amount,
            paid_by,
            split_type,
            split_details,
            group_id: wire.group_id.clone(),
        })
    }
}

impl TryFrom<&WirePairwiseRecord> for PairwiseBalanceRecord {
    type Error = BalanceError;

    fn try_from(wire: &WirePairwiseRecord) -> Result<Self, Self::Error> {
        let subject_user_id = wire
            .subject_user_id
            .as_ref()
            .and_then(resolve_user_id)
            .ok_or_else(|| BalanceError::unresolvable_user("record.subjectUserId"))?;

        let other_user_id = wire
            .other_user_id
            .as_ref()
            .and_then(resolve_user_id)
            .ok_or_else(|| BalanceError::unresolvable_user("record.otherUserId"))?;

        let amount = wire
            .amount
            .ok_or_else(|| BalanceError::missing_amount("balance record"))?;

        let other_user_name = wire
            .other_user_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| wire.other_user_id.as_ref().and_then(UserRef::display_name))
            .unwrap_or_default();

        Ok(PairwiseBalanceRecord::new(
            subject_user_id,
            other_user_id,
            other_user_name,
            amount,
        ))
    }
}
