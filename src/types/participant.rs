//! Participant and per-participant balance types
//!
//! A [`ParticipantBalance`] is created fresh for every computation, folded by
//! the engine, and handed to the caller. Nothing here is persisted.

use super::user::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A member of a group whose balance is being computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Resolved user id (never empty)
    pub user_id: UserId,

    /// Name shown in listings; empty when the API sent none
    pub display_name: String,
}

impl Participant {
    pub fn new(user_id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Participant {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Direction of a participant's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BalanceStatus {
    /// Paid more than their share; others owe them
    GetBack,

    /// Paid less than their share; they owe others
    Owe,

    /// Paid exactly their share
    Settled,
}

impl BalanceStatus {
    /// Classify a balance by its sign
    pub fn from_balance(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            BalanceStatus::GetBack
        } else if balance < Decimal::ZERO {
            BalanceStatus::Owe
        } else {
            BalanceStatus::Settled
        }
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::GetBack => "getBack",
            BalanceStatus::Owe => "owe",
            BalanceStatus::Settled => "settled",
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed balance of one participant
///
/// `balance` is always `paid - share` and `status` always agrees with the
/// sign of `balance` once [`ParticipantBalance::settle`] has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBalance {
    pub user_id: UserId,

    pub display_name: String,

    /// Total this participant fronted
    #[serde(with = "rust_decimal::serde::float")]
    pub paid: Decimal,

    /// Total this participant is responsible for
    #[serde(with = "rust_decimal::serde::float")]
    pub share: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    pub status: BalanceStatus,
}

impl ParticipantBalance {
    /// Create a zeroed, settled balance for a participant
    pub fn new(participant: &Participant) -> Self {
        ParticipantBalance {
            user_id: participant.user_id.clone(),
            display_name: participant.display_name.clone(),
            paid: Decimal::ZERO,
            share: Decimal::ZERO,
            balance: Decimal::ZERO,
            status: BalanceStatus::Settled,
        }
    }

    /// Recompute `balance` and `status` from `paid` and `share`
    pub fn settle(&mut self) {
        self.balance = self.paid.saturating_sub(self.share);
        self.status = BalanceStatus::from_balance(self.balance);
    }
}

/// Result of folding a group's expenses
///
/// The two totals are kept at full precision; only [`super::BalanceSummary`]
/// rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBalances {
    /// One entry per participant, in input order
    pub balances: Vec<ParticipantBalance>,

    /// Sum of the positive balances
    #[serde(with = "rust_decimal::serde::float")]
    pub total_get_back: Decimal,

    /// Sum of the absolute values of the negative balances
    #[serde(with = "rust_decimal::serde::float")]
    pub total_settle: Decimal,
}

impl ParticipantBalances {
    /// Build the result from settled balances, deriving both totals
    pub fn from_balances(balances: Vec<ParticipantBalance>) -> Self {
        let mut total_get_back = Decimal::ZERO;
        let mut total_settle = Decimal::ZERO;

        for balance in &balances {
            match balance.status {
                BalanceStatus::GetBack => {
                    total_get_back = total_get_back.saturating_add(balance.balance)
                }
                BalanceStatus::Owe => {
                    total_settle = total_settle.saturating_add(balance.balance.abs())
                }
                BalanceStatus::Settled => {}
            }
        }

        ParticipantBalances {
            balances,
            total_get_back,
            total_settle,
        }
    }

    /// Look up a participant's balance by id (first match)
    pub fn get(&self, user_id: &str) -> Option<&ParticipantBalance> {
        self.balances
            .iter()
            .find(|balance| balance.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::positive(Decimal::new(1, 2), BalanceStatus::GetBack)]
    #[case::negative(Decimal::new(-1, 2), BalanceStatus::Owe)]
    #[case::zero(Decimal::ZERO, BalanceStatus::Settled)]
    #[case::negative_zero(-Decimal::ZERO, BalanceStatus::Settled)]
    fn test_status_from_balance(#[case] balance: Decimal, #[case] expected: BalanceStatus) {
        assert_eq!(BalanceStatus::from_balance(balance), expected);
    }

    #[test]
    fn test_new_balance_is_zeroed() {
        let balance = ParticipantBalance::new(&Participant::new("u1", "Asha"));

        assert_eq!(balance.user_id, "u1");
        assert_eq!(balance.display_name, "Asha");
        assert_eq!(balance.paid, Decimal::ZERO);
        assert_eq!(balance.share, Decimal::ZERO);
        assert_eq!(balance.balance, Decimal::ZERO);
        assert_eq!(balance.status, BalanceStatus::Settled);
    }

    #[test]
    fn test_settle_derives_balance_and_status() {
        let mut balance = ParticipantBalance::new(&Participant::new("u1", "Asha"));
        balance.paid = Decimal::new(100, 0);
        balance.share = Decimal::new(40, 0);

        balance.settle();

        assert_eq!(balance.balance, Decimal::new(60, 0));
        assert_eq!(balance.status, BalanceStatus::GetBack);
    }

    #[test]
    fn test_totals_ignore_settled_entries() {
        let mut owes = ParticipantBalance::new(&Participant::new("u1", "A"));
        owes.share = Decimal::new(2550, 2);
        owes.settle();

        let mut gets_back = ParticipantBalance::new(&Participant::new("u2", "B"));
        gets_back.paid = Decimal::new(2550, 2);
        gets_back.settle();

        let settled = ParticipantBalance::new(&Participant::new("u3", "C"));

        let result = ParticipantBalances::from_balances(vec![owes, gets_back, settled]);

        assert_eq!(result.total_get_back, Decimal::new(2550, 2));
        assert_eq!(result.total_settle, Decimal::new(2550, 2));
        assert_eq!(result.get("u3").map(|b| b.status), Some(BalanceStatus::Settled));
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let mut balance = ParticipantBalance::new(&Participant::new("u1", "Asha"));
        balance.paid = Decimal::new(100, 0);
        balance.share = Decimal::new(50, 0);
        balance.settle();

        let json = serde_json::to_value(&balance).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["displayName"], "Asha");
        assert_eq!(json["paid"], 100.0);
        assert_eq!(json["balance"], 50.0);
        assert_eq!(json["status"], "getBack");
    }
}
