//! Split policies
//!
//! Each policy folds one validated expense into the participant balance list.
//! Every policy credits the full amount to the payer's `paid` (first matching
//! entry) and adds to `share` according to its own rule. A payer who is not in
//! the balance list gets no `paid` credit.

use crate::types::{Expense, ParticipantBalance, SplitType};
use rust_decimal::Decimal;
use tracing::warn;

/// Apply the expense's split policy to `balances`
pub fn apply_split(balances: &mut [ParticipantBalance], expense: &Expense) {
    match expense.split_type {
        SplitType::Equal => split_equal(balances, expense),
        SplitType::Exact => split_exact(balances, expense),
        SplitType::Percentage => split_percentage(balances, expense),
        SplitType::Shares => split_shares(balances, expense),
    }
}

fn credit_payer(balances: &mut [ParticipantBalance], expense: &Expense) {
    if let Some(payer) = balances
        .iter_mut()
        .find(|balance| balance.user_id == expense.paid_by)
    {
        payer.paid = payer.paid.saturating_add(expense.amount);
    }
}

/// `amount * numerator / denominator`, or `None` on overflow or a zero denominator
fn portion(amount: Decimal, numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    amount.checked_mul(numerator)?.checked_div(denominator)
}

/// Add to a participant's share, for each participant the `share_of` closure prices
fn distribute<F>(balances: &mut [ParticipantBalance], mut share_of: F)
where
    F: FnMut(&ParticipantBalance) -> Option<Decimal>,
{
    for balance in balances.iter_mut() {
        if let Some(share) = share_of(balance) {
            balance.share = balance.share.saturating_add(share);
        }
    }
}

fn split_equal(balances: &mut [ParticipantBalance], expense: &Expense) {
    credit_payer(balances, expense);

    if balances.is_empty() {
        warn!(
            amount = %expense.amount,
            paid_by = %expense.paid_by,
            "EQUAL split over an empty participant list; share distribution skipped"
        );
        return;
    }

    let count = Decimal::from(balances.len());
    match expense.amount.checked_div(count) {
        Some(per_person) => distribute(balances, |_| Some(per_person)),
        None => warn!(amount = %expense.amount, "EQUAL split overflowed; share distribution skipped"),
    }
}

fn split_exact(balances: &mut [ParticipantBalance], expense: &Expense) {
    credit_payer(balances, expense);

    distribute(balances, |balance| {
        expense
            .detail_for(&balance.user_id)
            .and_then(|detail| detail.amount)
    });
}

fn split_percentage(balances: &mut [ParticipantBalance], expense: &Expense) {
    credit_payer(balances, expense);

    let hundred = Decimal::ONE_HUNDRED;
    distribute(balances, |balance| {
        expense
            .detail_for(&balance.user_id)
            .and_then(|detail| detail.percentage)
            .and_then(|percentage| portion(expense.amount, percentage, hundred))
    });
}

fn split_shares(balances: &mut [ParticipantBalance], expense: &Expense) {
    credit_payer(balances, expense);

    let total_shares = expense.total_shares();
    if total_shares <= Decimal::ZERO {
        return;
    }

    distribute(balances, |balance| {
        expense
            .detail_for(&balance.user_id)
            .and_then(|detail| detail.shares)
            .filter(|shares| *shares > Decimal::ZERO)
            .and_then(|shares| portion(expense.amount, shares, total_shares))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Participant, SplitDetail};

    fn balances(ids: &[&str]) -> Vec<ParticipantBalance> {
        ids.iter()
            .map(|id| ParticipantBalance::new(&Participant::new(*id, id.to_uppercase())))
            .collect()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_equal_split_includes_payer() {
        let mut list = balances(&["u1", "u2", "u3", "u4"]);
        let expense = Expense::new(dec(100), "u2", SplitType::Equal);

        apply_split(&mut list, &expense);

        assert!(list.iter().all(|b| b.share == dec(25)));
        assert_eq!(list[1].paid, dec(100));
        assert_eq!(list[0].paid, Decimal::ZERO);
    }

    #[test]
    fn test_equal_split_ignores_split_details() {
        let mut list = balances(&["u1", "u2"]);
        let expense = Expense::new(dec(10), "u1", SplitType::Equal)
            .with_details(vec![SplitDetail::for_user("u1").with_amount(dec(10))]);

        apply_split(&mut list, &expense);

        assert_eq!(list[0].share, dec(5));
        assert_eq!(list[1].share, dec(5));
    }

    #[test]
    fn test_equal_split_on_empty_list_is_a_no_op() {
        let mut list: Vec<ParticipantBalance> = Vec::new();
        let expense = Expense::new(dec(100), "u1", SplitType::Equal);

        apply_split(&mut list, &expense);

        assert!(list.is_empty());
    }

    #[test]
    fn test_payer_outside_group_gets_no_credit() {
        let mut list = balances(&["u1", "u2"]);
        let expense = Expense::new(dec(50), "stranger", SplitType::Equal);

        apply_split(&mut list, &expense);

        assert!(list.iter().all(|b| b.paid == Decimal::ZERO));
        assert!(list.iter().all(|b| b.share == dec(25)));
    }

    #[test]
    fn test_exact_split_uses_detail_amounts() {
        let mut list = balances(&["u1", "u2", "u3"]);
        let expense = Expense::new(dec(100), "u1", SplitType::Exact).with_details(vec![
            SplitDetail::for_user("u2").with_amount(dec(70)),
            SplitDetail::for_user("u1").with_amount(dec(30)),
        ]);

        apply_split(&mut list, &expense);

        assert_eq!(list[0].paid, dec(100));
        assert_eq!(list[0].share, dec(30));
        assert_eq!(list[1].share, dec(70));
        assert_eq!(list[2].share, Decimal::ZERO);
    }

    #[test]
    fn test_exact_split_detail_without_amount_contributes_nothing() {
        let mut list = balances(&["u1", "u2"]);
        let expense = Expense::new(dec(100), "u1", SplitType::Exact)
            .with_details(vec![SplitDetail::for_user("u2")]);

        apply_split(&mut list, &expense);

        assert_eq!(list[1].share, Decimal::ZERO);
        assert_eq!(list[0].paid, dec(100));
    }

    #[test]
    fn test_percentage_split() {
        let mut list = balances(&["u1", "u2"]);
        let expense = Expense::new(dec(200), "u1", SplitType::Percentage).with_details(vec![
            SplitDetail::for_user("u1").with_percentage(Decimal::new(125, 1)),
            SplitDetail::for_user("u2").with_percentage(Decimal::new(875, 1)),
        ]);

        apply_split(&mut list, &expense);

        assert_eq!(list[0].share, dec(25));
        assert_eq!(list[1].share, dec(175));
    }

    #[test]
    fn test_shares_split_is_pro_rata() {
        let mut list = balances(&["u1", "u2", "u3"]);
        let expense = Expense::new(dec(90), "u3", SplitType::Shares).with_details(vec![
            SplitDetail::for_user("u1").with_shares(dec(2)),
            SplitDetail::for_user("u2").with_shares(dec(1)),
        ]);

        apply_split(&mut list, &expense);

        assert_eq!(list[0].share, dec(60));
        assert_eq!(list[1].share, dec(30));
        assert_eq!(list[2].share, Decimal::ZERO);
        assert_eq!(list[2].paid, dec(90));
    }

    #[test]
    fn test_shares_split_counts_unmatched_entries_in_total() {
        let mut list = balances(&["u1"]);
        let expense = Expense::new(dec(100), "u1", SplitType::Shares).with_details(vec![
            SplitDetail::for_user("u1").with_shares(dec(1)),
            SplitDetail::default().with_shares(dec(3)),
        ]);

        apply_split(&mut list, &expense);

        assert_eq!(list[0].share, dec(25));
    }

    #[test]
    fn test_shares_split_with_zero_total_contributes_nothing() {
        let mut list = balances(&["u1", "u2"]);
        let expense = Expense::new(dec(100), "u1", SplitType::Shares).with_details(vec![
            SplitDetail::for_user("u1").with_shares(Decimal::ZERO),
            SplitDetail::for_user("u2"),
        ]);

        apply_split(&mut list, &expense);

        assert!(list.iter().all(|b| b.share == Decimal::ZERO));
        assert_eq!(list[0].paid, dec(100));
    }
}
