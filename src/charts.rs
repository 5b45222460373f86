// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{MonthlyBucket, Period, add_amount, filter_period, monthly_series};
use crate::models::Transaction;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

pub const COMPARISON_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    pub current: Decimal,
    pub previous: Decimal,
    /// `None` when there is nothing to compare against.
    pub percentage_change: Option<Decimal>,
}

/// Expense totals per category inside the period window, largest first.
pub fn category_breakdown(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for tx in filter_period(transactions, period, today) {
        if !tx.is_expense() {
            continue;
        }
        match index.get(tx.category.as_str()) {
            Some(&i) => slices[i].value = add_amount(slices[i].value, tx.amount),
            None => {
                index.insert(tx.category.as_str(), slices.len());
                slices.push(CategorySlice {
                    name: tx.category.clone(),
                    value: tx.amount,
                });
            }
        }
    }
    // stable: ties keep first-seen order
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}

/// The most recent months of income/expense across all transactions,
/// oldest first. Months without data are not padded in.
pub fn monthly_comparison(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut buckets = monthly_series(transactions);
    let skip = buckets.len().saturating_sub(COMPARISON_MONTHS);
    buckets.drain(..skip);
    buckets
}

/// Expense total of the current window against the equally long window
/// right before it.
pub fn period_comparison(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> PeriodComparison {
    let start = period.window_start(today);
    let prev_end = start - Duration::days(1);
    let prev_start = period.window_start(prev_end);

    let mut current = Decimal::ZERO;
    let mut previous = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        if tx.date >= start && tx.date <= today {
            current = add_amount(current, tx.amount);
        } else if tx.date >= prev_start && tx.date <= prev_end {
            previous = add_amount(previous, tx.amount);
        }
    }
    let percentage_change = if previous.is_zero() {
        None
    } else {
        (current - previous)
            .checked_div(previous)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|p| p.round_dp(2))
    };
    PeriodComparison {
        current,
        previous,
        percentage_change,
    }
}
