// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Currency;
use crate::registry::all_currencies;
use crate::state::AppState;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list(state),
        Some(("set", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            let c = state.set_currency(code)?;
            println!("Currency set to {} ({})", c.code, c.symbol);
        }
        Some(("add", sub)) => {
            let currency = Currency {
                code: sub.get_one::<String>("code").unwrap().trim().to_string(),
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                symbol: sub.get_one::<String>("symbol").unwrap().trim().to_string(),
            };
            state.add_custom_currency(currency)?;
            println!("Added currency {}", sub.get_one::<String>("code").unwrap().to_uppercase());
        }
        _ => {}
    }
    Ok(())
}

fn list(state: &AppState) {
    let active = &state.currency().code;
    let rows = all_currencies(&state.custom_currencies)
        .into_iter()
        .map(|c| {
            let mark = if &c.code == active { "*" } else { "" };
            vec![mark.to_string(), c.code, c.name, c.symbol]
        })
        .collect();
    println!("{}", pretty_table(&["", "Code", "Name", "Symbol"], rows));
}
