//! Pure functions that derive totals and budget projections from records.
//!
//! Nothing in here touches the database, callers pass in the full snapshot of
//! records they want summarised.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use time::Date;

use crate::{
    category::Category, database_id::TransactionId, income::Income, transaction::Transaction,
};

/// Total income, total expenses and the difference between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all transactions.
    pub total_expenses: f64,
    /// Income minus expenses, negative when more was spent than received.
    pub net_balance: f64,
}

/// Round `value` to two decimal places.
///
/// The exact binary value of `value` is rounded to the nearest cent, and only
/// an exact half cent goes to the even cent. So 0.375 becomes 0.38, while
/// 27.005 (stored as slightly less than 27.005) becomes 27.00 and 0.005
/// (stored as slightly more) becomes 0.01.
///
/// Values too large for [Decimal] are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };

    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    cents.mantissa() as f64 / 10_f64.powi(cents.scale() as i32)
}

/// Sum up `incomes` and `transactions`.
pub fn summarize(transactions: &[Transaction], incomes: &[Income]) -> Summary {
    let total_income: f64 = incomes.iter().map(|income| income.amount).sum();
    let total_expenses = total_spent(transactions);

    Summary {
        total_income: round_to_cents(total_income),
        total_expenses: round_to_cents(total_expenses),
        net_balance: round_to_cents(total_income - total_expenses),
    }
}

/// The sum of every transaction amount, not rounded.
pub(crate) fn total_spent(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum()
}

/// How much of `budget` is left after `transactions`, never less than zero.
pub fn remaining_budget(transactions: &[Transaction], budget: f64) -> f64 {
    round_to_cents((budget - total_spent(transactions)).max(0.0))
}

/// The number of days from `today` to `end_date`, counting both days.
///
/// Zero or negative when `end_date` is before `today`.
pub fn days_left(today: Date, end_date: Date) -> i64 {
    (end_date - today).whole_days() + 1
}

/// How much of `budget` may be spent per day from `today` until `end_date`
/// inclusive.
///
/// Returns zero once `end_date` has passed.
pub fn daily_budget(budget: f64, today: Date, end_date: Date) -> f64 {
    let days = days_left(today, end_date);

    if days <= 0 {
        return 0.0;
    }

    round_to_cents(budget / days as f64)
}

/// The transactions in `category`, in their original order.
pub fn filter_by_category(transactions: &[Transaction], category: Category) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.category == category)
        .collect()
}

/// Remove the transaction with `id` from `transactions`.
///
/// Returns `true` if a transaction was removed, otherwise `transactions` is
/// left untouched and `false` is returned.
pub fn remove_by_id(transactions: &mut Vec<Transaction>, id: TransactionId) -> bool {
    match transactions
        .iter()
        .position(|transaction| transaction.id == id)
    {
        Some(index) => {
            transactions.remove(index);
            true
        }
        None => false,
    }
}

/// The total spent in each category that has at least one transaction.
pub fn totals_by_category(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(category, total)| (category, round_to_cents(total)))
        .collect()
}

/// The total spent on each day that has at least one transaction.
pub fn totals_by_date(transactions: &[Transaction]) -> BTreeMap<Date, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.date).or_insert(0.0) += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(date, total)| (date, round_to_cents(total)))
        .collect()
}

#[cfg(test)]
mod rounding_tests {
    use super::round_to_cents;

    #[test]
    fn rounds_down_below_half_cent() {
        assert_eq!(round_to_cents(27.004999), 27.0);
    }

    #[test]
    fn rounds_half_cent_to_even() {
        assert_eq!(round_to_cents(27.005), 27.0);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
    }

    #[test]
    fn rounds_the_stored_value() {
        let cases = [
            (0.005, 0.01),
            (0.015, 0.01),
            (0.545, 0.55),
            (1.015, 1.01),
            (2.675, 2.67),
            (0.995, 0.99),
            (1234.565, 1234.57),
        ];

        for (value, want) in cases {
            assert_eq!(round_to_cents(value), want, "round_to_cents({value})");
        }
    }

    #[test]
    fn sub_cent_amounts_round_to_zero() {
        assert_eq!(round_to_cents(0.001), 0.0);
        assert_eq!(round_to_cents(0.004), 0.0);
        assert_eq!(round_to_cents(-0.001), 0.0);
    }

    #[test]
    fn large_amounts_are_unchanged() {
        assert_eq!(round_to_cents(1e12), 1e12);
        assert_eq!(round_to_cents(1e30), 1e30);
    }

    #[test]
    fn keeps_whole_cents() {
        assert_eq!(round_to_cents(274.5), 274.5);
        assert_eq!(round_to_cents(-1.25), -1.25);
    }
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::{
        category::Category,
        income::Income,
        summary::aggregation::{Summary, summarize},
        transaction::Transaction,
    };

    fn transaction(id: i64, amount: f64) -> Transaction {
        Transaction {
            id,
            name: format!("Transaction {id}"),
            amount,
            category: Category::Misc,
            date: date!(2025 - 07 - 08),
        }
    }

    fn income(id: i64, amount: f64) -> Income {
        Income {
            id,
            amount,
            date: date!(2025 - 07 - 01),
        }
    }

    #[test]
    fn empty_records_sum_to_zero() {
        assert_eq!(
            summarize(&[], &[]),
            Summary {
                total_income: 0.0,
                total_expenses: 0.0,
                net_balance: 0.0,
            }
        );
    }

    #[test]
    fn net_balance_is_income_minus_expenses() {
        let transactions = [
            transaction(1, 200.0),
            transaction(2, 50.25),
            transaction(3, 24.25),
        ];
        let incomes = [income(1, 600.0), income(2, 400.0)];

        let summary = summarize(&transactions, &incomes);

        assert_eq!(
            summary,
            Summary {
                total_income: 1000.0,
                total_expenses: 274.5,
                net_balance: 725.5,
            }
        );
    }

    #[test]
    fn net_balance_can_be_negative() {
        let summary = summarize(&[transaction(1, 150.0)], &[income(1, 100.0)]);

        assert_eq!(summary.net_balance, -50.0);
    }

    #[test]
    fn totals_are_rounded() {
        let transactions = [transaction(1, 0.1), transaction(2, 0.2)];

        let summary = summarize(&transactions, &[]);

        assert_eq!(summary.total_expenses, 0.3);
        assert_eq!(summary.net_balance, -0.3);
    }

    #[test]
    fn serializes_field_names() {
        let summary = summarize(&[transaction(1, 10.0)], &[income(1, 25.0)]);

        let json = serde_json::to_value(summary).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "total_income": 25.0,
                "total_expenses": 10.0,
                "net_balance": 15.0,
            })
        );
    }
}

#[cfg(test)]
mod budget_tests {
    use time::macros::date;

    use crate::{
        category::Category,
        summary::aggregation::{daily_budget, days_left, remaining_budget},
        transaction::Transaction,
    };

    fn transactions(amounts: &[f64]) -> Vec<Transaction> {
        amounts
            .iter()
            .enumerate()
            .map(|(index, &amount)| Transaction {
                id: index as i64 + 1,
                name: "Spend".to_owned(),
                amount,
                category: Category::Fun,
                date: date!(2025 - 07 - 08),
            })
            .collect()
    }

    #[test]
    fn remaining_budget_subtracts_spending() {
        assert_eq!(remaining_budget(&transactions(&[10.0, 20.0]), 90.0), 60.0);
    }

    #[test]
    fn remaining_budget_clamps_at_zero() {
        assert_eq!(remaining_budget(&transactions(&[100.0, 50.0]), 90.0), 0.0);
    }

    #[test]
    fn remaining_budget_without_spending_is_budget() {
        assert_eq!(remaining_budget(&[], 90.0), 90.0);
        assert_eq!(remaining_budget(&[], 0.0), 0.0);
    }

    #[test]
    fn days_left_counts_today_and_end_date() {
        assert_eq!(days_left(date!(2025 - 07 - 08), date!(2025 - 07 - 10)), 3);
        assert_eq!(days_left(date!(2025 - 07 - 08), date!(2025 - 07 - 08)), 1);
        assert_eq!(days_left(date!(2025 - 07 - 08), date!(2025 - 07 - 07)), 0);
        assert_eq!(days_left(date!(2025 - 07 - 08), date!(2025 - 07 - 01)), -6);
    }

    #[test]
    fn daily_budget_divides_evenly() {
        assert_eq!(
            daily_budget(90.0, date!(2025 - 07 - 08), date!(2025 - 07 - 10)),
            30.0
        );
    }

    #[test]
    fn daily_budget_on_last_day_is_whole_budget() {
        assert_eq!(
            daily_budget(42.5, date!(2025 - 07 - 08), date!(2025 - 07 - 08)),
            42.5
        );
    }

    #[test]
    fn daily_budget_is_zero_after_end_date() {
        assert_eq!(
            daily_budget(90.0, date!(2025 - 07 - 08), date!(2025 - 07 - 07)),
            0.0
        );
        assert_eq!(
            daily_budget(90.0, date!(2025 - 07 - 08), date!(2025 - 06 - 01)),
            0.0
        );
    }

    #[test]
    fn daily_budget_is_rounded() {
        assert_eq!(
            daily_budget(100.0, date!(2025 - 07 - 08), date!(2025 - 07 - 10)),
            33.33
        );
    }

    #[test]
    fn zero_budget_is_zero_per_day() {
        assert_eq!(
            daily_budget(0.0, date!(2025 - 07 - 08), date!(2025 - 07 - 10)),
            0.0
        );
    }
}
