// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::aggregate::{Period, daily_series, filter_period, month_key, monthly_series, totals};
use smartspend::models::{Transaction, TransactionType};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, date: &str, amount: i64, category: &str, kind: TransactionType) -> Transaction {
    Transaction {
        id: id.into(),
        date: d(date),
        amount: Decimal::from(amount),
        category: category.into(),
        description: id.into(),
        kind,
        is_recurring: false,
    }
}

#[test]
fn totals_split_income_and_expenses() {
    let txs = vec![
        tx("a", "2025-01-01", 50, "Food", TransactionType::Expense),
        tx("b", "2025-01-02", 200, "Salary", TransactionType::Income),
    ];
    let t = totals(&txs);
    assert_eq!(t.income, Decimal::from(200));
    assert_eq!(t.expenses, Decimal::from(50));
    assert_eq!(t.balance, Decimal::from(150));
}

#[test]
fn totals_of_nothing_are_zero() {
    let t = totals(&[]);
    assert!(t.income.is_zero());
    assert!(t.expenses.is_zero());
    assert!(t.balance.is_zero());
}

#[test]
fn balance_can_go_negative() {
    let txs = vec![
        tx("a", "2025-01-01", 80, "Food", TransactionType::Expense),
        tx("b", "2025-01-01", 30, "Salary", TransactionType::Income),
    ];
    let t = totals(&txs);
    assert_eq!(t.balance, t.income - t.expenses);
    assert_eq!(t.balance, Decimal::from(-50));
}

#[test]
fn huge_amounts_cap_instead_of_overflowing() {
    let mut a = tx("a", "2025-01-01", 0, "Salary", TransactionType::Income);
    a.amount = Decimal::MAX;
    let mut b = a.clone();
    b.id = "b".into();
    let txs = vec![a, b];

    let t = totals(&txs);
    assert_eq!(t.income, Decimal::MAX);
    assert_eq!(t.balance, Decimal::MAX);
    let months = monthly_series(&txs);
    assert_eq!(months[0].income, Decimal::MAX);
}

#[test]
fn window_starts() {
    let today = d("2025-03-31");
    assert_eq!(Period::Week.window_start(today), d("2025-03-24"));
    // shorter month clamps
    assert_eq!(Period::Month.window_start(today), d("2025-02-28"));
    assert_eq!(Period::Year.window_start(today), d("2024-03-31"));
}

#[test]
fn filter_period_is_inclusive_and_keeps_order() {
    let today = d("2025-03-15");
    let txs = vec![
        tx("future", "2025-03-16", 1, "Food", TransactionType::Expense),
        tx("today", "2025-03-15", 1, "Food", TransactionType::Expense),
        tx("edge", "2025-03-08", 1, "Food", TransactionType::Expense),
        tx("old", "2025-03-07", 1, "Food", TransactionType::Expense),
    ];
    let ids: Vec<&str> = filter_period(&txs, Period::Week, today)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["today", "edge"]);
}

#[test]
fn daily_series_sums_per_day_ascending() {
    let today = d("2025-03-15");
    let txs = vec![
        tx("a", "2025-03-14", 10, "Food", TransactionType::Expense),
        tx("b", "2025-03-10", 5, "Food", TransactionType::Expense),
        tx("c", "2025-03-14", 100, "Salary", TransactionType::Income),
        tx("d", "2025-03-14", 2, "Transport", TransactionType::Expense),
        tx("e", "2025-01-01", 999, "Food", TransactionType::Expense),
    ];
    let series = daily_series(&txs, Period::Week, today);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, d("2025-03-10"));
    assert_eq!(series[0].expense, Decimal::from(5));
    assert_eq!(series[1].date, d("2025-03-14"));
    assert_eq!(series[1].income, Decimal::from(100));
    assert_eq!(series[1].expense, Decimal::from(12));
}

#[test]
fn monthly_series_groups_by_month_key() {
    let txs = vec![
        tx("a", "2025-02-28", 10, "Food", TransactionType::Expense),
        tx("b", "2024-12-01", 3, "Food", TransactionType::Expense),
        tx("c", "2025-02-01", 40, "Salary", TransactionType::Income),
    ];
    let series = monthly_series(&txs);
    let months: Vec<&str> = series.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2024-12", "2025-02"]);
    assert_eq!(series[1].income, Decimal::from(40));
    assert_eq!(series[1].expense, Decimal::from(10));
    assert_eq!(month_key(d("2025-07-04")), "2025-07");
}

#[test]
fn period_parses_from_cli_words() {
    assert_eq!("WEEK".parse::<Period>().unwrap(), Period::Week);
    assert_eq!(Period::default(), Period::Month);
    assert!("decade".parse::<Period>().is_err());
}
