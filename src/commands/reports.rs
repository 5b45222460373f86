// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, Period};
use crate::charts;
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trends", sub)) => trends(state, sub)?,
        Some(("categories", sub)) => categories(state, sub)?,
        Some(("monthly", sub)) => monthly(state, sub)?,
        Some(("compare", sub)) => compare(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn period_of(sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>().map_err(|e| anyhow!(e)),
        None => Ok(Period::default()),
    }
}

pub fn stats(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let totals = aggregate::totals(&state.transactions);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let symbol = &state.currency().symbol;
        let rows = vec![vec![
            fmt_money(&totals.income, symbol),
            fmt_money(&totals.expenses, symbol),
            fmt_money(&totals.balance, symbol),
        ]];
        println!("{}", pretty_table(&["Income", "Expenses", "Balance"], rows));
    }
    Ok(())
}

fn trends(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_of(sub)?;
    let data = aggregate::daily_series(&state.transactions, period, today());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let symbol = &state.currency().symbol;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.date.to_string(),
                    fmt_money(&b.income, symbol),
                    fmt_money(&b.expense, symbol),
                ]
            })
            .collect();
        println!("Cash flow, last {}", period);
        println!("{}", pretty_table(&["Date", "In", "Out"], rows));
    }
    Ok(())
}

fn categories(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_of(sub)?;
    let data = charts::category_breakdown(&state.transactions, period, today());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let total = aggregate::sum_amounts(data.iter().map(|s| s.value));
        let symbol = &state.currency().symbol;
        let rows = data
            .iter()
            .map(|s| {
                let share = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    (s.value / total)
                        .checked_mul(Decimal::ONE_HUNDRED)
                        .unwrap_or(Decimal::ONE_HUNDRED)
                };
                vec![
                    s.name.clone(),
                    fmt_money(&s.value, symbol),
                    format!("{:.0}%", share),
                ]
            })
            .collect();
        println!("Spending by category, last {}", period);
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn monthly(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let data = charts::monthly_comparison(&state.transactions);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let symbol = &state.currency().symbol;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    fmt_money(&b.income, symbol),
                    fmt_money(&b.expense, symbol),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    }
    Ok(())
}

fn compare(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_of(sub)?;
    let cmp = charts::period_comparison(&state.transactions, period, today());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cmp)? {
        let symbol = &state.currency().symbol;
        let change = match cmp.percentage_change {
            Some(p) if p.is_sign_positive() && !p.is_zero() => format!("+{:.2}%", p),
            Some(p) => format!("{:.2}%", p),
            None => "n/a".to_string(),
        };
        let rows = vec![vec![
            fmt_money(&cmp.current, symbol),
            fmt_money(&cmp.previous, symbol),
            change,
        ]];
        println!("Spending this {} vs the one before", period);
        println!("{}", pretty_table(&["Current", "Previous", "Change"], rows));
    }
    Ok(())
}
