//! Pairwise balance aggregation
//!
//! The API reports balances as signed records between two users, possibly
//! several per pair. This module nets them per counterpart and classifies the
//! net positions into what the user still owes (settle) and what they are
//! owed (get back).

use crate::core::rounding::round_money;
use crate::core::traits::NetPositions;
use crate::types::{
    BalanceSummary, CounterpartBalance, PairwiseBalanceRecord, UserId, WirePairwiseRecord,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Single-threaded ledger of net positions keyed by counterpart id
#[derive(Debug, Clone, Default)]
pub struct PositionLedger {
    positions: HashMap<UserId, CounterpartBalance>,
}

impl PositionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        PositionLedger {
            positions: HashMap::new(),
        }
    }

    /// Fold a record into the position against its counterpart
    pub fn record(&mut self, record: &PairwiseBalanceRecord) {
        self.positions
            .entry(record.other_user_id.clone())
            .or_insert_with(|| CounterpartBalance::new(record.other_user_id.clone()))
            .absorb(record);
    }

    /// Number of distinct counterparts seen
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl NetPositions for PositionLedger {
    fn positions(&self) -> Vec<CounterpartBalance> {
        let mut positions: Vec<CounterpartBalance> = self.positions.values().cloned().collect();
        positions.sort_by(|a, b| a.other_user_id.cmp(&b.other_user_id));
        positions
    }
}

impl<'a> FromIterator<&'a PairwiseBalanceRecord> for PositionLedger {
    fn from_iter<I: IntoIterator<Item = &'a PairwiseBalanceRecord>>(iter: I) -> Self {
        let mut ledger = PositionLedger::new();
        for record in iter {
            ledger.record(record);
        }
        ledger
    }
}

/// Classify net positions into a rounded summary
///
/// Negative positions add their magnitude to the owing total, positive ones
/// add to the owed total, and zero positions add to neither.
pub fn summarize_positions(positions: &[CounterpartBalance]) -> BalanceSummary {
    let mut total_owing = Decimal::ZERO;
    let mut total_owed = Decimal::ZERO;

    for position in positions {
        if position.amount < Decimal::ZERO {
            total_owing = total_owing.saturating_add(position.amount.abs());
        } else if position.amount > Decimal::ZERO {
            total_owed = total_owed.saturating_add(position.amount);
        }
    }

    summary_from_totals(total_owing, total_owed)
}

/// Build a summary from unrounded owing/owed totals
///
/// The net balance is taken from the rounded amounts, so
/// `net_balance == get_back_amount - settle_amount` holds exactly.
pub fn summary_from_totals(total_owing: Decimal, total_owed: Decimal) -> BalanceSummary {
    let total_owing = round_money(total_owing);
    let total_owed = round_money(total_owed);

    BalanceSummary {
        total_owing,
        total_owed,
        settle_amount: total_owing,
        get_back_amount: total_owed,
        net_balance: round_money(total_owed.saturating_sub(total_owing)),
    }
}

fn ledger_from_wire(records: Option<&[WirePairwiseRecord]>) -> PositionLedger {
    let mut ledger = PositionLedger::new();

    for (index, wire) in records.unwrap_or_default().iter().enumerate() {
        match PairwiseBalanceRecord::try_from(wire) {
            Ok(record) => ledger.record(&record),
            Err(e) => debug!(index, error = %e, "Skipping balance record"),
        }
    }

    ledger
}

/// Net pairwise balance records from the API into a settle/get-back summary
///
/// Records with an unresolvable subject or counterpart, or no amount, are
/// skipped. Empty or missing input yields an all-zero summary.
pub fn aggregate_pairwise_balances(records: Option<&[WirePairwiseRecord]>) -> BalanceSummary {
    ledger_from_wire(records).summary()
}

/// Net positions per counterpart, sorted by counterpart id
pub fn net_counterpart_positions(records: Option<&[WirePairwiseRecord]>) -> Vec<CounterpartBalance> {
    ledger_from_wire(records).positions()
}
