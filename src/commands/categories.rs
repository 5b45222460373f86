// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::AppState;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if state.add_category(name) {
                println!("Added category '{}'", name.trim());
            } else {
                println!("Category '{}' already exists or is blank", name.trim());
            }
        }
        Some(("list", _)) => {
            let data = state.categories.iter().map(|c| vec![c.clone()]).collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if state.remove_category(name) {
                println!("Removed category '{}'", name);
            } else {
                println!("No category named '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}
