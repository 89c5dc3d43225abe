//! Indian Rupee formatting
//!
//! Renders amounts the way the app displays them: rupee sign, two fraction
//! digits, and Indian digit grouping (thousands first, then lakhs and crores
//! in groups of two: `1,23,45,678.90`).

use super::rounding::round_money;
use rust_decimal::Decimal;

/// Indian Rupee sign
pub const RUPEE_SYMBOL: &str = "₹";

/// Format an amount as Indian Rupees
///
/// Negative amounts carry a leading minus before the symbol (`-₹1,234.50`).
/// Amounts that round to zero are always rendered unsigned.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use split_balance_engine::core::currency::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(12345, 1)), "₹1,234.50");
/// assert_eq!(format_currency(Decimal::new(100000, 0)), "₹1,00,000.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}{}{}.{}", sign, RUPEE_SYMBOL, group_indian(integer), fraction)
}

/// Insert separators into a run of integer digits using Indian grouping
fn group_indian(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }

    let (mut head, tail) = integer.split_at(integer.len() - 3);
    let mut groups = vec![tail];
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::zero("0", "₹0.00")]
    #[case::small("7.5", "₹7.50")]
    #[case::hundreds("999.999", "₹1,000.00")]
    #[case::thousands("1234.5", "₹1,234.50")]
    #[case::ten_thousands("12345", "₹12,345.00")]
    #[case::lakh("100000", "₹1,00,000.00")]
    #[case::ten_lakh("1000000", "₹10,00,000.00")]
    #[case::crore("12345678.9", "₹1,23,45,678.90")]
    #[case::ten_crore("123456789.01", "₹12,34,56,789.01")]
    #[case::tie_rounds_away("2.345", "₹2.35")]
    #[case::negative("-1234.5", "-₹1,234.50")]
    #[case::negative_rounding_to_zero("-0.004", "₹0.00")]
    fn test_format_currency(#[case] amount: &str, #[case] expected: &str) {
        let amount = Decimal::from_str(amount).unwrap();
        assert_eq!(format_currency(amount), expected);
    }

    #[rstest]
    #[case("1", "1")]
    #[case("123", "123")]
    #[case("1234", "1,234")]
    #[case("123456", "1,23,456")]
    #[case("1234567", "12,34,567")]
    fn test_group_indian(#[case] digits: &str, #[case] expected: &str) {
        assert_eq!(group_indian(digits), expected);
    }
}
