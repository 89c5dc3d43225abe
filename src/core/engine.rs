//! Participant balance engine
//!
//! This module provides the [`BalanceEngine`] that folds a group's expenses into
//! per-participant paid/share/balance figures.
//!
//! The engine enforces these rules:
//! - Only participants with a resolvable user id get a balance entry
//! - Expenses missing an amount, a payer or a supported split type are skipped
//! - One bad item never aborts the fold; results degrade to partial totals
//!
//! An engine is created per computation and consumed by [`BalanceEngine::finish`],
//! so no state outlives a call.

use crate::core::split_policy::apply_split;
use crate::types::{
    Expense, Participant, ParticipantBalance, ParticipantBalances, WireExpense, WireParticipant,
};
use tracing::debug;

/// Balance computation over one snapshot of participants and expenses
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    balances: Vec<ParticipantBalance>,
}

impl BalanceEngine {
    /// Create an engine with a zeroed balance per participant, in input order
    ///
    /// No de-duplication is performed: a participant listed twice gets two entries.
    pub fn new(participants: &[Participant]) -> Self {
        BalanceEngine {
            balances: participants.iter().map(ParticipantBalance::new).collect(),
        }
    }

    /// Fold one expense into the running balances
    pub fn apply(&mut self, expense: &Expense) {
        apply_split(&mut self.balances, expense);
    }

    /// Derive balances, statuses and totals
    pub fn finish(mut self) -> ParticipantBalances {
        for balance in &mut self.balances {
            balance.settle();
        }

        ParticipantBalances::from_balances(self.balances)
    }

    /// Compute balances for validated participants and expenses
    pub fn compute(participants: &[Participant], expenses: &[Expense]) -> ParticipantBalances {
        let mut engine = BalanceEngine::new(participants);
        for expense in expenses {
            engine.apply(expense);
        }
        engine.finish()
    }
}

/// Compute per-participant balances from API documents
///
/// Participants without a resolvable user and malformed expenses are skipped
/// (logged at debug level). `None` expenses behave like an empty list. Totals
/// are returned at full precision.
pub fn compute_participant_balances(
    participants: &[WireParticipant],
    expenses: Option<&[WireExpense]>,
) -> ParticipantBalances {
    let participants: Vec<Participant> = participants
        .iter()
        .enumerate()
        .filter_map(|(index, wire)| match Participant::try_from(wire) {
            Ok(participant) => Some(participant),
            Err(e) => {
                debug!(index, error = %e, "Skipping participant");
                None
            }
        })
        .collect();

    let mut engine = BalanceEngine::new(&participants);

    for (index, wire) in expenses.unwrap_or_default().iter().enumerate() {
        match Expense::try_from(wire) {
            Ok(expense) => engine.apply(&expense),
            Err(e) => debug!(index, error = %e, "Skipping expense"),
        }
    }

    engine.finish()
}
