// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregate views over a transaction slice. Everything here is a pure
//! function: no mutation, safe to call repeatedly over the same data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Category, Transaction, TransactionType};
use crate::utils::end_of_day;

/// Sum of all amounts.
pub fn total_balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount).sum()
}

/// Sum of non-negative amounts.
pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.amount >= Decimal::ZERO)
        .map(|t| t.amount)
        .sum()
}

/// Absolute value of the sum of negative amounts.
pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    let spent: Decimal = transactions
        .iter()
        .filter(|t| t.amount < Decimal::ZERO)
        .map(|t| t.amount)
        .sum();
    spent.abs()
}

/// Expense-only totals per category, sorted by descending total. The sort
/// is stable, so categories with equal totals keep first-seen order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut groups: Vec<(Category, Decimal)> = Vec::new();
    for t in transactions.iter().filter(|t| t.amount < Decimal::ZERO) {
        match groups.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, total)) => *total += t.amount.abs(),
            None => groups.push((t.category, t.amount.abs())),
        }
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

/// New sequence ordered by `date` descending; the input is untouched.
pub fn sort_by_date(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Inclusive on both bounds. A supplied `end` covers its entire calendar
/// day, so a same-day transaction at any time of day is included.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<Transaction> {
    let end = end.map(end_of_day);
    transactions
        .iter()
        .filter(|t| start.is_none_or(|s| t.date >= s))
        .filter(|t| end.is_none_or(|e| t.date <= e))
        .cloned()
        .collect()
}

/// Exact-match dimensions; `None` means no filtering on that dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub r#type: Option<TransactionType>,
}

pub fn filter_by(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.category.is_none_or(|c| t.category == c))
        .filter(|t| filter.r#type.is_none_or(|ty| t.r#type == ty))
        .cloned()
        .collect()
}
