//! JSON format handling for group snapshots and balance output
//!
//! A group snapshot is the pair of API payloads the balance screen works from:
//!
//! ```json
//! { "participants": [ { "user": { "_id": "u1", "fullName": "Asha" } } ],
//!   "expenses": [ { "amount": 100, "paidBy": "u1", "splitType": "EQUAL" } ] }
//! ```
//!
//! Reading is lenient per item: the document itself must be a JSON object, but
//! an item that does not fit its wire shape is logged and dropped.

use crate::types::{
    BalanceError, BalanceSummary, CounterpartBalance, ParticipantBalances, WireExpense,
    WireParticipant,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Participants and expenses of one group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSnapshot {
    pub participants: Vec<WireParticipant>,

    /// `None` when the document has no expense list at all
    pub expenses: Option<Vec<WireExpense>>,
}

/// Deserialize each element of a JSON array, skipping the ones that do not fit
fn lenient_items<T: DeserializeOwned>(value: Option<Value>, kind: &str) -> Option<Vec<T>> {
    let items = match value? {
        Value::Array(items) => items,
        Value::Null => return None,
        other => {
            debug!(kind, found = %other, "Expected an array; ignoring");
            return None;
        }
    };

    let parsed = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                let error = BalanceError::malformed_item(kind, e);
                debug!(index, error = %error, "Skipping item");
                None
            }
        })
        .collect();

    Some(parsed)
}

/// Parse a group snapshot from JSON text
///
/// # Errors
///
/// `ParseError` when the text is not JSON or not a JSON object.
pub fn parse_group_snapshot(text: &str) -> Result<GroupSnapshot, BalanceError> {
    let document: Value = serde_json::from_str(text)?;

    let Value::Object(mut document) = document else {
        return Err(BalanceError::ParseError {
            line: None,
            message: "group snapshot must be a JSON object".to_string(),
        });
    };

    let participants =
        lenient_items(document.remove("participants"), "participant").unwrap_or_default();
    let expenses = lenient_items(document.remove("expenses"), "expense");

    Ok(GroupSnapshot {
        participants,
        expenses,
    })
}

/// Read a group snapshot from a file
///
/// # Errors
///
/// - `FileNotFound` if the path does not exist
/// - `IoError` if the file cannot be read
/// - `ParseError` if the file is not a JSON object
pub fn read_group_snapshot(path: &Path) -> Result<GroupSnapshot, BalanceError> {
    if !path.exists() {
        return Err(BalanceError::file_not_found(path));
    }

    let text = std::fs::read_to_string(path)?;
    parse_group_snapshot(&text)
}

fn write_pretty<T: Serialize>(value: &T, output: &mut dyn Write) -> Result<(), BalanceError> {
    serde_json::to_writer_pretty(&mut *output, value)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

/// Write per-participant balances and totals as pretty JSON
pub fn write_balances_json(
    balances: &ParticipantBalances,
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    write_pretty(balances, output)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDocument<'a> {
    #[serde(flatten)]
    summary: &'a BalanceSummary,
    positions: &'a [CounterpartBalance],
}

/// Write a summary, followed by the per-counterpart positions, as pretty JSON
pub fn write_summary_json(
    summary: &BalanceSummary,
    positions: &[CounterpartBalance],
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    write_pretty(&SummaryDocument { summary, positions }, output)
}
