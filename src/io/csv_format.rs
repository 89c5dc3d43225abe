//! CSV format handling for balance records and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvBalanceRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Participant balance and summary output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::rounding::round_money;
use crate::types::{BalanceError, BalanceSummary, PairwiseBalanceRecord, ParticipantBalances};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the pairwise export format with columns: subject, other, other_name, amount.
/// Every column is optional so that a short row is reported as a skipped record
/// rather than a parse failure.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CsvBalanceRecord {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub other_name: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Convert a CsvBalanceRecord to a PairwiseBalanceRecord
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV row
///
/// # Returns
///
/// The validated record, or the reason the row is skipped.
///
/// # Errors
///
/// - `UnresolvableUser` when the subject or counterpart id is empty
/// - `MissingAmount` when the amount column is empty
/// - `InvalidAmount` when the amount is not a decimal number
pub fn convert_csv_record(
    csv_record: CsvBalanceRecord,
) -> Result<PairwiseBalanceRecord, BalanceError> {
    let subject = non_blank(csv_record.subject)
        .ok_or_else(|| BalanceError::unresolvable_user("subject"))?;
    let other =
        non_blank(csv_record.other).ok_or_else(|| BalanceError::unresolvable_user("other"))?;

    let amount = match non_blank(csv_record.amount) {
        Some(amount_str) => Decimal::from_str(amount_str.trim())
            .or_else(|_| Decimal::from_scientific(amount_str.trim()))
            .map_err(|_| BalanceError::invalid_amount(&amount_str))?,
        None => return Err(BalanceError::missing_amount("balance record")),
    };

    Ok(PairwiseBalanceRecord::new(
        subject,
        other,
        csv_record.other_name.unwrap_or_default(),
        amount,
    ))
}

/// Render an amount with two decimal places
fn money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Write per-participant balances as CSV
///
/// Rows keep the engine's participant order. Amounts are rounded for display.
///
/// # Arguments
///
/// * `balances` - Computed balances to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(BalanceError)` if a write error occurred
pub fn write_balances_csv(
    balances: &ParticipantBalances,
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["user_id", "display_name", "paid", "share", "balance", "status"])?;

    for balance in &balances.balances {
        writer.write_record([
            balance.user_id.clone(),
            balance.display_name.clone(),
            money(balance.paid),
            money(balance.share),
            money(balance.balance),
            balance.status.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Write a settle/get-back summary as a single CSV row
pub fn write_summary_csv(
    summary: &BalanceSummary,
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "total_owing",
        "total_owed",
        "settle_amount",
        "get_back_amount",
        "net_balance",
    ])?;
    writer.write_record([
        money(summary.total_owing),
        money(summary.total_owed),
        money(summary.settle_amount),
        money(summary.get_back_amount),
        money(summary.net_balance),
    ])?;

    writer.flush()?;

    Ok(())
}
