// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::draft_from_args;
use crate::models::{Frequency, RecurringTransactionRule};
use crate::state::{AppState, new_id};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

// Rules are bookkeeping only; no command expands them into transactions.
pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut template = draft_from_args(sub)?;
            template.is_recurring = true;
            let frequency = sub
                .get_one::<String>("frequency")
                .map(String::as_str)
                .unwrap_or("monthly")
                .parse::<Frequency>()
                .map_err(|e| anyhow!(e))?;
            let rule = state.add_recurring_rule(RecurringTransactionRule {
                id: new_id(),
                template,
                frequency,
                last_executed_date: None,
            })?;
            println!(
                "Added {} rule '{}' ({} {}) [{}]",
                rule.frequency,
                rule.template.description,
                rule.template.kind,
                rule.template.amount,
                rule.id
            );
        }
        Some(("list", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.recurring)? {
                let symbol = &state.currency().symbol;
                let rows = state
                    .recurring
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.clone(),
                            r.frequency.to_string(),
                            r.template.description.clone(),
                            format!("{}{}", symbol, r.template.amount),
                            r.template.category.clone(),
                            r.last_executed_date
                                .map(|d| d.to_string())
                                .unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Frequency", "Description", "Amount", "Category", "Last run"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let removed = state.remove_recurring_rule(id)?;
            println!("Removed recurring rule '{}'", removed.template.description);
        }
        _ => {}
    }
    Ok(())
}
