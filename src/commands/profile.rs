// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{LoginMethod, UserProfile};
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, today};
use anyhow::{Result, anyhow};
use serde::Serialize;

#[derive(Serialize)]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a UserProfile,
    level: u32,
}

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let Some(profile) = state.profile.as_ref() else {
                println!("Not logged in");
                return Ok(());
            };
            let view = ProfileView {
                profile,
                level: profile.level(),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
                let symbol = &state.currency().symbol;
                let goal = profile
                    .savings_goal
                    .map(|g| fmt_money(&g, symbol))
                    .unwrap_or_default();
                let rows = vec![vec![
                    profile.name.clone(),
                    profile.email.clone().unwrap_or_default(),
                    format!("{:?}", profile.login_method).to_lowercase(),
                    goal,
                    profile.streak.to_string(),
                    profile.level().to_string(),
                ]];
                println!(
                    "{}",
                    pretty_table(&["Name", "Email", "Login", "Savings goal", "Streak", "Level"], rows)
                );
            }
        }
        Some(("login", sub)) => {
            let method = sub
                .get_one::<String>("method")
                .map(String::as_str)
                .unwrap_or("guest")
                .parse::<LoginMethod>()
                .map_err(|e| anyhow!(e))?;
            let savings_goal = match sub.get_one::<String>("goal") {
                Some(g) => Some(parse_decimal(g)?),
                None => None,
            };
            let profile = UserProfile {
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                email: sub.get_one::<String>("email").map(|s| s.trim().to_string()),
                avatar: sub.get_one::<String>("avatar").map(|s| s.trim().to_string()),
                login_method: method,
                savings_goal,
                ..UserProfile::guest()
            };
            let name = profile.name.clone();
            state.login(profile);
            state.record_activity(today());
            println!("Logged in as {}", name);
        }
        Some(("logout", _)) => match state.logout() {
            Some(p) => println!("Logged out {}; local profile discarded", p.name),
            None => println!("Not logged in"),
        },
        _ => {}
    }
    Ok(())
}
