//! Expense and split-policy types
//!
//! These are the validated domain forms. Wire documents from the API are
//! converted into them by the `TryFrom` impls in [`super::wire`].

use super::error::BalanceError;
use super::user::UserId;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Rule for dividing an expense among participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitType {
    /// Every participant carries `amount / n`
    Equal,

    /// Each split detail names an absolute amount
    Exact,

    /// Each split detail names a percentage of the amount
    Percentage,

    /// Each split detail names a share count; the amount is divided pro rata
    Shares,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "EQUAL",
            SplitType::Exact => "EXACT",
            SplitType::Percentage => "PERCENTAGE",
            SplitType::Shares => "SHARES",
        }
    }
}

impl FromStr for SplitType {
    type Err = BalanceError;

    /// Parse a split type. Only the exact uppercase tokens match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQUAL" => Ok(SplitType::Equal),
            "EXACT" => Ok(SplitType::Exact),
            "PERCENTAGE" => Ok(SplitType::Percentage),
            "SHARES" => Ok(SplitType::Shares),
            _ => Err(BalanceError::unsupported_split_type(s)),
        }
    }
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's entry in an expense's split breakdown
///
/// Which of `amount`, `percentage` and `shares` is meaningful depends on the
/// expense's [`SplitType`]; the others are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitDetail {
    /// Resolved user id, or `None` when the entry's user could not be resolved.
    /// Such entries still count towards the SHARES total.
    pub user_id: Option<UserId>,

    pub amount: Option<Decimal>,

    pub percentage: Option<Decimal>,

    pub shares: Option<Decimal>,
}

impl SplitDetail {
    /// Detail for a user with no values set
    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        SplitDetail {
            user_id: Some(user_id.into()),
            ..SplitDetail::default()
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_shares(mut self, shares: Decimal) -> Self {
        self.shares = Some(shares);
        self
    }

    fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

/// A validated expense
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Total amount; expected positive but not enforced
    pub amount: Decimal,

    /// Who fronted the money
    pub paid_by: UserId,

    pub split_type: SplitType,

    /// Ordered split breakdown; ignored for EQUAL splits
    pub split_details: Vec<SplitDetail>,

    pub group_id: Option<String>,
}

impl Expense {
    /// An expense with no split details
    pub fn new(amount: Decimal, paid_by: impl Into<UserId>, split_type: SplitType) -> Self {
        Expense {
            amount,
            paid_by: paid_by.into(),
            split_type,
            split_details: Vec::new(),
            group_id: None,
        }
    }

    pub fn with_details(mut self, split_details: Vec<SplitDetail>) -> Self {
        self.split_details = split_details;
        self
    }

    /// First split detail belonging to `user_id`
    pub fn detail_for(&self, user_id: &str) -> Option<&SplitDetail> {
        self.split_details
            .iter()
            .find(|detail| detail.belongs_to(user_id))
    }

    /// Sum of all `shares` values, missing values counting as zero
    pub fn total_shares(&self) -> Decimal {
        self.split_details
            .iter()
            .filter_map(|detail| detail.shares)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
