// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::month_key;
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table, today};
use anyhow::Result;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("rm", sub)) => remove(state, sub)?,
        Some(("report", sub)) => report(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let budget = state.set_budget(cat, limit)?;
    println!("Budget set for {} = {} per month", budget.category, budget.limit);
    Ok(())
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.budgets)? {
        let symbol = &state.currency().symbol;
        let rows = state
            .budgets
            .iter()
            .map(|b| vec![b.category.clone(), fmt_money(&b.limit, symbol)])
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly limit"], rows));
    }
    Ok(())
}

fn remove(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let removed = state.remove_budget(cat)?;
    println!("Removed budget for {}", removed.category);
    Ok(())
}

fn report(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_key(today()),
    };
    let data = state.budget_status(&month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let symbol = &state.currency().symbol;
        let rows = data
            .iter()
            .map(|s| {
                let flag = if s.remaining.is_sign_negative() && !s.remaining.is_zero() {
                    "over"
                } else {
                    ""
                };
                vec![
                    s.category.clone(),
                    fmt_money(&s.limit, symbol),
                    fmt_money(&s.spent, symbol),
                    fmt_money(&s.remaining, symbol),
                    flag.to_string(),
                ]
            })
            .collect();
        println!("Budgets for {}", month);
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Remaining", ""], rows)
        );
    }
    Ok(())
}
