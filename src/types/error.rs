//! Error types for the balance engine
//!
//! This module defines every error condition the engine and its I/O layer can
//! describe. Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Document Errors**: File not found, unreadable files, malformed CSV/JSON documents.
//!   These are fatal for the CLI.
//! - **Item Errors**: A single participant, expense or balance record that cannot be
//!   used (missing amount, unresolvable user, unsupported split type). These are
//!   never fatal: the item is skipped and the fold continues.

use thiserror::Error;

/// Main error type for the balance engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A CSV or JSON document could not be parsed
    ///
    /// For CSV input this is recoverable per row; a JSON snapshot that is not a
    /// document at all is fatal.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// An item could not be deserialized into its wire shape at all
    #[error("Malformed {kind}: {message}")]
    MalformedItem {
        /// Kind of item ("participant", "expense", "balance record")
        kind: String,
        /// Deserializer message
        message: String,
    },

    /// An expense or balance record has no amount
    #[error("{kind} has no amount")]
    MissingAmount {
        /// Kind of item missing the amount
        kind: String,
    },

    /// An amount value could not be parsed as a decimal number
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
    },

    /// An expense has no resolvable payer
    #[error("Expense has no resolvable payer")]
    MissingPayer,

    /// A user reference could not be resolved to an id
    #[error("Unresolvable user id in {field}")]
    UnresolvableUser {
        /// Field that held the reference ("participant.user", "record.otherUserId", ...)
        field: String,
    },

    /// An expense carries no split type
    #[error("Expense has no split type")]
    MissingSplitType,

    /// An expense uses a split type the engine does not implement
    #[error("Unsupported split type '{split_type}'")]
    UnsupportedSplitType {
        /// The split type string as received
        split_type: String,
    },
}

impl From<std::io::Error> for BalanceError {
    fn from(error: std::io::Error) -> Self {
        BalanceError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BalanceError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BalanceError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for BalanceError {
    fn from(error: csv_async::Error) -> Self {
        BalanceError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for BalanceError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return BalanceError::IoError {
                message: error.to_string(),
            };
        }

        let line = match error.line() {
            0 => None,
            line => Some(line as u64),
        };

        BalanceError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BalanceError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        BalanceError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a MalformedItem error
    pub fn malformed_item(kind: &str, message: impl std::fmt::Display) -> Self {
        BalanceError::MalformedItem {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MissingAmount error
    pub fn missing_amount(kind: &str) -> Self {
        BalanceError::MissingAmount {
            kind: kind.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        BalanceError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an UnresolvableUser error
    pub fn unresolvable_user(field: &str) -> Self {
        BalanceError::UnresolvableUser {
            field: field.to_string(),
        }
    }

    /// Create an UnsupportedSplitType error
    pub fn unsupported_split_type(split_type: &str) -> Self {
        BalanceError::UnsupportedSplitType {
            split_type: split_type.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        BalanceError::FileNotFound { path: "group.json".to_string() },
        "File not found: group.json"
    )]
    #[case::io_error(
        BalanceError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        BalanceError::ParseError { line: Some(7), message: "Invalid field".to_string() },
        "Parse error at line 7: Invalid field"
    )]
    #[case::parse_error_without_line(
        BalanceError::ParseError { line: None, message: "Invalid field".to_string() },
        "Parse error: Invalid field"
    )]
    #[case::malformed_item(
        BalanceError::MalformedItem { kind: "expense".to_string(), message: "expected a map".to_string() },
        "Malformed expense: expected a map"
    )]
    #[case::missing_amount(
        BalanceError::MissingAmount { kind: "expense".to_string() },
        "expense has no amount"
    )]
    #[case::invalid_amount(
        BalanceError::InvalidAmount { amount: "ten".to_string() },
        "Invalid amount 'ten'"
    )]
    #[case::missing_payer(BalanceError::MissingPayer, "Expense has no resolvable payer")]
    #[case::unresolvable_user(
        BalanceError::UnresolvableUser { field: "participant.user".to_string() },
        "Unresolvable user id in participant.user"
    )]
    #[case::missing_split_type(BalanceError::MissingSplitType, "Expense has no split type")]
    #[case::unsupported_split_type(
        BalanceError::UnsupportedSplitType { split_type: "ITEMIZED".to_string() },
        "Unsupported split type 'ITEMIZED'"
    )]
    fn test_error_display(#[case] error: BalanceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::missing_amount(
        BalanceError::missing_amount("balance record"),
        BalanceError::MissingAmount { kind: "balance record".to_string() }
    )]
    #[case::invalid_amount(
        BalanceError::invalid_amount("1.2.3"),
        BalanceError::InvalidAmount { amount: "1.2.3".to_string() }
    )]
    #[case::unresolvable_user(
        BalanceError::unresolvable_user("expense.paidBy"),
        BalanceError::UnresolvableUser { field: "expense.paidBy".to_string() }
    )]
    #[case::unsupported_split_type(
        BalanceError::unsupported_split_type("ITEMIZED"),
        BalanceError::UnsupportedSplitType { split_type: "ITEMIZED".to_string() }
    )]
    #[case::file_not_found(
        BalanceError::file_not_found(std::path::Path::new("missing.csv")),
        BalanceError::FileNotFound { path: "missing.csv".to_string() }
    )]
    fn test_helper_functions(#[case] result: BalanceError, #[case] expected: BalanceError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BalanceError = io_error.into();
        assert!(matches!(error, BalanceError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion_keeps_line() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\n\"a\": }").unwrap_err();
        let error: BalanceError = json_error.into();
        assert!(matches!(error, BalanceError::ParseError { line: Some(2), .. }));
    }
}
