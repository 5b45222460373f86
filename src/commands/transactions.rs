// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Period;
use crate::models::{TransactionDraft, TransactionType};
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("edit", sub)) => edit(state, sub)?,
        Some(("rm", sub)) => remove(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow!(e))
}

/// Reads the shared `--date/--amount/--category/--description/--type` set.
pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").context("amount missing")?)?;
    let category = sub
        .get_one::<String>("category")
        .context("category missing")?
        .trim()
        .to_string();
    let description = sub
        .get_one::<String>("description")
        .context("description missing")?
        .trim()
        .to_string();
    let kind = parse_kind(sub.get_one::<String>("type").map(String::as_str).unwrap_or("expense"))?;
    Ok(TransactionDraft {
        date,
        amount,
        category,
        description,
        kind,
        is_recurring: sub.try_get_one::<bool>("recurring").ok().flatten().copied().unwrap_or(false),
    })
}

fn add(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub)?;
    let symbol = state.currency().symbol.clone();
    let tx = state.add_transaction(draft)?;
    println!(
        "Recorded {} {} on {} ({}: {}) [{}]",
        tx.kind,
        fmt_money(&tx.amount, &symbol),
        tx.date,
        tx.category,
        tx.description,
        tx.id
    );
    state.record_activity(today());
    Ok(())
}

fn edit(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = state
        .transactions
        .iter()
        .find(|t| t.id == id)
        .with_context(|| format!("Transaction '{}' not found", id))?;

    let mut draft = TransactionDraft {
        date: current.date,
        amount: current.amount,
        category: current.category.clone(),
        description: current.description.clone(),
        kind: current.kind,
        is_recurring: current.is_recurring,
    };
    if let Some(d) = sub.get_one::<String>("date") {
        draft.date = parse_date(d)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        draft.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        draft.category = c.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("description") {
        draft.description = d.trim().to_string();
    }
    if let Some(k) = sub.get_one::<String>("type") {
        draft.kind = parse_kind(k)?;
    }
    if let Some(r) = sub.get_one::<bool>("recurring") {
        draft.is_recurring = *r;
    }
    let tx = state.edit_transaction(id, draft)?;
    println!("Updated transaction {}", tx.id);
    Ok(())
}

fn remove(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let removed = state.delete_transaction(id)?;
    println!(
        "Removed {} of {} on {} ({})",
        removed.kind, removed.amount, removed.date, removed.description
    );
    Ok(())
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(state, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = &state.currency().symbol;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    format!("{}{}", symbol, r.amount),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Description", "Amount", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

/// Newest first, after the optional period/category filters and limit.
pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let period = match sub.get_one::<String>("period") {
        Some(p) => Some(p.parse::<Period>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|c| c.trim());
    let now = today();

    let mut selected: Vec<_> = state
        .transactions
        .iter()
        .filter(|t| period.is_none_or(|p| p.contains(t.date, now)))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        selected.truncate(*limit);
    }

    Ok(selected
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            description: t.description.clone(),
            amount: t.amount.to_string(),
        })
        .collect())
}
