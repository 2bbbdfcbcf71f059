// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("Day in YYYY-MM-DD (defaults to today)")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month in YYYY-MM (defaults to the current month)")
}

fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_parser(value_parser!(usize))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn line_arg(help: &'static str) -> Arg {
    Arg::new("line")
        .long("line")
        .required(true)
        .action(ArgAction::Append)
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("shiftbook")
        .version(crate_version!())
        .about("Daily cash, ingredient purchases and shift revenue for a small food business")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Cash transactions")
                .subcommand(
                    Command::new("add")
                        .arg(date_arg())
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["expense", "income"]),
                        )
                        .arg(Arg::new("subcategory").long("subcategory").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["expense", "income"]),
                        )
                        .arg(limit_arg()),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("purchase")
                .about("Ingredient purchases")
                .subcommand(
                    Command::new("add").arg(date_arg()).arg(line_arg(
                        "item:quantity:unit:unit_price (repeatable; unit one of kg|g|l|ml|pcs|sac|carton)",
                    )),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(month_arg()).arg(limit_arg()),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("revenue")
                .about("Morning and evening shift revenue")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .value_parser(["morning", "evening"]),
                        )
                        .arg(date_arg())
                        .arg(line_arg("subcategory:amount[:description] (repeatable)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["morning", "evening"]),
                        )
                        .arg(month_arg())
                        .arg(limit_arg()),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Month totals, recent activity and expense split")
                .arg(month_arg())
                .arg(limit_arg()),
        ))
        .subcommand(
            Command::new("report")
                .about("Period reports")
                .subcommand(json_flags(
                    Command::new("week")
                        .about("Monday-to-Sunday daily figures")
                        .arg(date_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Daily figures for a calendar month")
                        .arg(month_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .about("Category split for a month")
                        .arg(month_arg())
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("expenses")
                                .value_parser(["expenses", "revenue"]),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("totals")
                        .about("Revenue, expenses and profit between two days")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )),
        )
        .subcommand(
            Command::new("suggest")
                .about("Autocomplete lists from previous entries")
                .subcommand(json_flags(
                    Command::new("subcategories")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["expense", "income", "morning", "evening"]),
                        )
                        .arg(Arg::new("query").default_value("")),
                ))
                .subcommand(json_flags(
                    Command::new("items").arg(Arg::new("query").default_value("")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export a collection")
                .arg(
                    Arg::new("collection")
                        .required(true)
                        .help("transactions|purchases|revenue"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check stored records for problems"))
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("get").arg(Arg::new("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
