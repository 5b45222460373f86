// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ai::{AiGateway, ChatReply, GenerativeModel, ReceiptImage};
use crate::error::AiError;
use crate::models::{InsightImpact, TransactionDraft};
use crate::state::{AppState, AppliedAction};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use std::path::Path;

/// Insights are only requested once there is enough history to talk about.
pub const MIN_INSIGHT_TRANSACTIONS: usize = 5;

pub const NOT_UNDERSTOOD: &str = "AI didn't catch that. Try rephrasing.";

pub fn handle<M: GenerativeModel>(
    state: &mut AppState,
    gateway: &AiGateway<M>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let text = sub.get_one::<String>("text").unwrap();
            let parsed = gateway.parse_transaction(text, &state.categories, today());
            record_draft(state, parsed)?;
        }
        Some(("receipt", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let receipt = ReceiptImage::from_path(Path::new(path))?;
            let parsed = gateway.parse_receipt(&receipt, &state.categories, today());
            record_draft(state, parsed)?;
        }
        Some(("ask", sub)) => {
            let question = sub.get_one::<String>("question").unwrap();
            match gateway.ask(question, &state.transactions, &state.categories, today()) {
                Ok(ChatReply::Text(answer)) => println!("{}", answer),
                Ok(ChatReply::Tool(call)) => {
                    tracing::info!(?call, "applying assistant tool call");
                    let symbol = state.currency().symbol.clone();
                    match state.apply_tool_call(call)? {
                        AppliedAction::TransactionAdded(tx) => println!(
                            "Added {} {} for {} ({})",
                            tx.kind,
                            fmt_money(&tx.amount, &symbol),
                            tx.description,
                            tx.category
                        ),
                        AppliedAction::BudgetSet(b) => println!(
                            "Budget for {} set to {} per month",
                            b.category,
                            fmt_money(&b.limit, &symbol)
                        ),
                    }
                }
                Err(AiError::ParseFailure(reason)) => {
                    tracing::warn!(%reason, "assistant reply not understood");
                    println!("{}", NOT_UNDERSTOOD);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(("insights", sub)) => {
            let n = state.transactions.len();
            if n < MIN_INSIGHT_TRANSACTIONS {
                println!(
                    "Record at least {} transactions for insights ({}/{} so far)",
                    MIN_INSIGHT_TRANSACTIONS, n, MIN_INSIGHT_TRANSACTIONS
                );
                return Ok(());
            }
            let insights = gateway.insights(&state.transactions);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &insights)? {
                let rows = insights
                    .iter()
                    .map(|i| {
                        let impact = match i.impact {
                            InsightImpact::High => "high",
                            InsightImpact::Medium => "medium",
                            InsightImpact::Low => "low",
                        };
                        vec![i.title.clone(), impact.to_string(), i.description.clone()]
                    })
                    .collect();
                println!("{}", pretty_table(&["Insight", "Impact", "Details"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Adds a parsed draft; a response the model got wrong is reported and
/// otherwise ignored.
fn record_draft(state: &mut AppState, parsed: Result<TransactionDraft, AiError>) -> Result<()> {
    match parsed {
        Ok(draft) => {
            let symbol = state.currency().symbol.clone();
            let tx = state.add_transaction(draft)?;
            println!(
                "Added {} {} on {} ({}: {})",
                tx.kind,
                fmt_money(&tx.amount, &symbol),
                tx.date,
                tx.category,
                tx.description
            );
            state.record_activity(today());
            Ok(())
        }
        Err(AiError::ParseFailure(reason)) => {
            tracing::warn!(%reason, "AI parse failed");
            println!("{}", NOT_UNDERSTOOD);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
