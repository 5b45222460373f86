// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec::import_csv;
use crate::state::AppState;
use crate::utils::today;
use anyhow::{Context, Result};
use std::fs::File;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => import_transactions(state, sub),
        _ => Ok(()),
    }
}

fn import_transactions(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;

    // Nothing is added unless every row parsed.
    let imported = import_csv(file, today()).context(
        "Failed to parse CSV. Expected columns: Date, Type, Category, Description, Amount",
    )?;
    let n = state.import_transactions(imported);
    tracing::info!(path, count = n, "csv import finished");
    println!("Imported {} transactions", n);
    Ok(())
}
