// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::analytics::SortKey;
use crate::currency::SUPPORTED_CURRENCIES;
use crate::models::DEFAULT_CATEGORIES;

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Reference date for the current month (default: today)")
}

fn chart_args() -> [Arg; 3] {
    [
        Arg::new("width")
            .long("width")
            .value_parser(value_parser!(f64))
            .default_value("400"),
        Arg::new("height")
            .long("height")
            .value_parser(value_parser!(f64))
            .default_value("250"),
        Arg::new("gap")
            .long("gap")
            .value_parser(value_parser!(f64))
            .default_value("10")
            .help("Space between bars in pixels"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendchart")
        .version(clap::crate_version!())
        .about("Track expenses, budgets and spending charts")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .value_parser(value_parser!(i64))
                .default_value("1")
                .help("User whose expenses to use"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("SPENDCHART_DB")
                .value_name("PATH")
                .help("SQLite database file (default: platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("expense")
                .about("Record and browse expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help(format!(
                                    "Any name; suggested: {}",
                                    DEFAULT_CATEGORIES.join(", ")
                                )),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("category").long("category").default_value("All"))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .default_value("date-desc")
                                .help(format!("One of: {}", SortKey::NAMES.join(", "))),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .num_args(1..)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete all expenses of the user")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm deletion"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(
                    Command::new("summary")
                        .arg(
                            Arg::new("recent")
                                .long("recent")
                                .value_parser(value_parser!(usize))
                                .default_value("5"),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("categories").args(json_args()))
                .subcommand(Command::new("monthly").args(json_args()))
                .subcommand(
                    Command::new("top")
                        .arg(
                            Arg::new("n")
                                .long("n")
                                .value_parser(value_parser!(i64))
                                .allow_negative_numbers(true)
                                .default_value("5"),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("budget").arg(as_of_arg()).args(json_args())),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart drawing commands")
                .subcommand(
                    Command::new("bar")
                        .about("Spending by category")
                        .args(chart_args())
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("line")
                        .about("Spending by month")
                        .args(chart_args())
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Per-user currency and monthly budget")
                .subcommand(Command::new("show").arg(as_of_arg()))
                .subcommand(
                    Command::new("currency").arg(
                        Arg::new("code")
                            .required(true)
                            .value_parser(SUPPORTED_CURRENCIES)
                            .ignore_case(true),
                    ),
                )
                .subcommand(
                    Command::new("budget").arg(
                        Arg::new("amount")
                            .required(true)
                            .help("Monthly limit; 0 clears it"),
                    ),
                ),
        )
}
