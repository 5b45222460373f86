// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure roll-ups over a transaction snapshot. Everything here is recomputed
//! from scratch on each call; collections are small.

use crate::models::{Transaction, TransactionType};
use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    /// First day included in the window ending at `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => today - Duration::days(7),
            // chrono clamps to the end of shorter months
            Period::Month => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            Period::Year => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.window_start(today) && date <= today
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period '{}' (use week|month|year)", other)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(s)
    }
}

/// Adds two amounts, pinning the result at `Decimal::MAX` instead of
/// overflowing.
pub fn add_amount(acc: Decimal, amount: Decimal) -> Decimal {
    match acc.checked_add(amount) {
        Some(v) => v,
        None => {
            tracing::warn!(%acc, %amount, "amount total overflowed, capped at maximum");
            Decimal::MAX
        }
    }
}

pub fn sum_amounts<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, add_amount)
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut t = Totals::default();
    for tx in transactions {
        match tx.kind {
            TransactionType::Income => t.income = add_amount(t.income, tx.amount),
            TransactionType::Expense => t.expenses = add_amount(t.expenses, tx.amount),
        }
    }
    t.balance = t.income - t.expenses;
    t
}

/// Transactions dated inside the period window, in their original order.
pub fn filter_period<'a>(
    transactions: &'a [Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| period.contains(t.date, today))
        .collect()
}

pub fn daily_series(transactions: &[Transaction], period: Period, today: NaiveDate) -> Vec<DailyBucket> {
    let mut map: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for tx in filter_period(transactions, period, today) {
        let entry = map.entry(tx.date).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionType::Income => entry.0 = add_amount(entry.0, tx.amount),
            TransactionType::Expense => entry.1 = add_amount(entry.1, tx.amount),
        }
    }
    map.into_iter()
        .map(|(date, (income, expense))| DailyBucket {
            date,
            income,
            expense,
        })
        .collect()
}

pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let entry = map
            .entry(month_key(tx.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionType::Income => entry.0 = add_amount(entry.0, tx.amount),
            TransactionType::Expense => entry.1 = add_amount(entry.1, tx.amount),
        }
    }
    map.into_iter()
        .map(|(month, (income, expense))| MonthlyBucket {
            month,
            income,
            expense,
        })
        .collect()
}
