// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec::{export_csv, export_snapshot, restore_snapshot};
use crate::state::AppState;
use anyhow::{Context, Result};
use std::fs::{self, File};

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_transactions(state, sub),
        _ => Ok(()),
    }
}

fn export_transactions(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    let file = File::create(out).with_context(|| format!("Create {}", out))?;
    export_csv(&state.transactions, file)?;
    println!("Exported {} transactions to {}", state.transactions.len(), out);
    Ok(())
}

pub fn backup(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").unwrap().trim();
    let json = export_snapshot(&state.transactions)?;
    fs::write(out, json).with_context(|| format!("Write {}", out))?;
    println!("Backed up {} transactions to {}", state.transactions.len(), out);
    Ok(())
}

pub fn restore(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let text = fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let snapshot = restore_snapshot(&text).context("Invalid backup file")?;
    let n = snapshot.len();
    state.restore_transactions(snapshot);
    tracing::info!(path, count = n, "snapshot restored");
    println!("Restored {} transactions", n);
    Ok(())
}
