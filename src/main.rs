// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use smartspend::ai::{AiGateway, GeminiClient};
use smartspend::{cli, commands, db};

fn init_tracing() {
    // Diagnostics go to stderr so --json output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let mut state = db::load_state(&conn);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut state, sub)?,
        Some(("stats", sub)) => commands::reports::stats(&state, sub)?,
        Some(("chart", sub)) => commands::reports::handle(&state, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut state, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut state, sub)?,
        Some(("currency", sub)) => commands::currencies::handle(&mut state, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut state, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut state, sub)?,
        Some(("ai", sub)) => {
            let gateway = AiGateway::new(GeminiClient::from_env()?);
            commands::assistant::handle(&mut state, &gateway, sub)?
        }
        Some(("import", sub)) => commands::importer::handle(&mut state, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&state, sub)?,
        Some(("backup", sub)) => commands::exporter::backup(&state, sub)?,
        Some(("restore", sub)) => commands::exporter::restore(&mut state, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    db::save_state(&mut conn, &state)?;
    Ok(())
}
