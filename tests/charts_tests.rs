// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::aggregate::{Period, filter_period};
use smartspend::charts::{category_breakdown, monthly_comparison, period_comparison};
use smartspend::models::{Transaction, TransactionType};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn expense(date: &str, amount: i64, category: &str) -> Transaction {
    Transaction {
        id: format!("{}-{}", date, category),
        date: d(date),
        amount: Decimal::from(amount),
        category: category.into(),
        description: category.into(),
        kind: TransactionType::Expense,
        is_recurring: false,
    }
}

fn income(date: &str, amount: i64) -> Transaction {
    Transaction {
        kind: TransactionType::Income,
        ..expense(date, amount, "Salary")
    }
}

#[test]
fn breakdown_sorts_largest_first_and_ignores_income() {
    let today = d("2025-03-15");
    let txs = vec![
        expense("2025-03-01", 20, "Food"),
        expense("2025-03-02", 50, "Housing"),
        expense("2025-03-03", 15, "Food"),
        income("2025-03-04", 1000),
    ];
    let slices = category_breakdown(&txs, Period::Month, today);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Housing");
    assert_eq!(slices[0].value, Decimal::from(50));
    assert_eq!(slices[1].name, "Food");
    assert_eq!(slices[1].value, Decimal::from(35));
}

#[test]
fn breakdown_sums_to_period_expenses() {
    let today = d("2025-03-15");
    let txs = vec![
        expense("2025-03-10", 7, "Food"),
        expense("2025-03-12", 9, "Transport"),
        expense("2025-01-12", 500, "Transport"),
        expense("2025-03-14", 4, "Health"),
    ];
    let total: Decimal = category_breakdown(&txs, Period::Month, today)
        .iter()
        .map(|s| s.value)
        .sum();
    let expected: Decimal = filter_period(&txs, Period::Month, today)
        .iter()
        .map(|t| t.amount)
        .sum();
    assert_eq!(total, expected);
    assert_eq!(total, Decimal::from(20));
}

#[test]
fn breakdown_ties_keep_first_seen_order() {
    let today = d("2025-03-15");
    let txs = vec![
        expense("2025-03-10", 10, "Transport"),
        expense("2025-03-11", 10, "Food"),
        expense("2025-03-12", 10, "Health"),
    ];
    let names: Vec<String> = category_breakdown(&txs, Period::Week, today)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Transport", "Food", "Health"]);
}

#[test]
fn breakdown_of_empty_window_is_empty() {
    let txs = vec![expense("2020-01-01", 10, "Food")];
    assert!(category_breakdown(&txs, Period::Year, d("2025-03-15")).is_empty());
}

#[test]
fn monthly_comparison_keeps_last_six_months_ascending() {
    let txs: Vec<Transaction> = (1..=9)
        .map(|m| expense(&format!("2024-{:02}-15", m), m, "Food"))
        .chain(std::iter::once(income("2024-09-01", 300)))
        .collect();
    let months = monthly_comparison(&txs);
    assert_eq!(months.len(), 6);
    assert_eq!(months[0].month, "2024-04");
    assert_eq!(months[5].month, "2024-09");
    assert_eq!(months[5].income, Decimal::from(300));
    assert_eq!(months[5].expense, Decimal::from(9));
    assert!(months.windows(2).all(|w| w[0].month < w[1].month));
}

#[test]
fn monthly_comparison_with_few_months_returns_all() {
    let txs = vec![expense("2025-01-05", 3, "Food"), expense("2025-02-05", 4, "Food")];
    assert_eq!(monthly_comparison(&txs).len(), 2);
    assert!(monthly_comparison(&[]).is_empty());
}

#[test]
fn period_comparison_reports_percentage_change() {
    let today = d("2025-03-15");
    // current week is 03-08..=03-15, the one before 02-28..=03-07
    let txs = vec![
        expense("2025-03-10", 150, "Food"),
        expense("2025-03-03", 100, "Food"),
        income("2025-03-11", 1000),
    ];
    let cmp = period_comparison(&txs, Period::Week, today);
    assert_eq!(cmp.current, Decimal::from(150));
    assert_eq!(cmp.previous, Decimal::from(100));
    assert_eq!(cmp.percentage_change, Some(Decimal::from(50)));
}

#[test]
fn period_comparison_without_previous_spend_has_no_change() {
    let today = d("2025-03-15");
    let txs = vec![expense("2025-03-10", 150, "Food")];
    let cmp = period_comparison(&txs, Period::Week, today);
    assert_eq!(cmp.previous, Decimal::ZERO);
    assert_eq!(cmp.percentage_change, None);
}

#[test]
fn huge_expenses_do_not_panic() {
    let today = d("2025-03-15");
    let mut big = expense("2025-03-10", 0, "Food");
    big.amount = Decimal::MAX;
    let txs = vec![big.clone(), big, expense("2025-03-03", 1, "Food")];

    let slices = category_breakdown(&txs, Period::Month, today);
    assert_eq!(slices[0].value, Decimal::MAX);
    let cmp = period_comparison(&txs, Period::Week, today);
    assert_eq!(cmp.current, Decimal::MAX);
    assert_eq!(cmp.previous, Decimal::ONE);
    // the change in percent does not fit
    assert_eq!(cmp.percentage_change, None);
}
