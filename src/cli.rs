// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(["week", "month", "year"])
        .default_value("month")
        .help("Time window ending today")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income"])
        .help("Transaction type")
}

fn draft_args(required: bool) -> Vec<Arg> {
    vec![
        Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"),
        Arg::new("amount").long("amount").required(required),
        Arg::new("category").long("category").required(required),
        Arg::new("description").long("description").required(required),
    ]
}

pub fn build_cli() -> Command {
    Command::new("smartspend")
        .version(crate_version!())
        .about("Track income and expenses, budgets, and AI-assisted insights")
        .subcommand(Command::new("init").about("Create the local data store"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .args(draft_args(true))
                        .arg(type_arg().default_value("expense"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["week", "month", "year"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .args(draft_args(false))
                        .arg(type_arg())
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("stats")
                .about("Income, expenses and balance")
                .args(json_flags()),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart series")
                .subcommand(Command::new("trends").arg(period_arg()).args(json_flags()))
                .subcommand(
                    Command::new("categories")
                        .arg(period_arg())
                        .args(json_flags()),
                )
                .subcommand(Command::new("monthly").args(json_flags()))
                .subcommand(Command::new("compare").arg(period_arg()).args(json_flags())),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(Command::new("list").args(json_flags()))
                .subcommand(
                    Command::new("rm").arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("report")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)"))
                        .args(json_flags()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("set").arg(Arg::new("code").required(true)))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transaction templates")
                .subcommand(
                    Command::new("add")
                        .args(draft_args(true))
                        .arg(type_arg().default_value("expense"))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .value_parser(["daily", "weekly", "monthly", "yearly"])
                                .default_value("monthly"),
                        ),
                )
                .subcommand(Command::new("list").args(json_flags()))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("profile")
                .about("Local user profile")
                .subcommand(Command::new("show").args(json_flags()))
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("avatar").long("avatar"))
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .value_parser(["google", "email", "guest"])
                                .default_value("guest"),
                        )
                        .arg(Arg::new("goal").long("goal").help("Savings goal")),
                )
                .subcommand(Command::new("logout")),
        )
        .subcommand(
            Command::new("ai")
                .about("AI-assisted entry and coaching")
                .subcommand(Command::new("add").arg(Arg::new("text").required(true)))
                .subcommand(Command::new("receipt").arg(Arg::new("path").long("path").required(true)))
                .subcommand(Command::new("ask").arg(Arg::new("question").required(true)))
                .subcommand(Command::new("insights").args(json_flags())),
        )
        .subcommand(
            Command::new("import")
                .about("Import from files")
                .subcommand(Command::new("csv").arg(Arg::new("path").long("path").required(true))),
        )
        .subcommand(
            Command::new("export")
                .about("Export to files")
                .subcommand(Command::new("csv").arg(Arg::new("out").long("out").required(true))),
        )
        .subcommand(
            Command::new("backup")
                .about("Write a JSON snapshot of all transactions")
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("restore")
                .about("Replace all transactions with a JSON snapshot")
                .arg(Arg::new("path").long("path").required(true)),
        )
}
