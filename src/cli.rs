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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("title").long("title").required(required))
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(
            Arg::new("type")
                .long("type")
                .help("income|expense"),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
        .arg(Arg::new("description").long("description"))
        .arg(
            Arg::new("scope")
                .long("scope")
                .help("Budget allocation: all|monthly|weekly|none"),
        )
}

pub fn build_cli() -> Command {
    Command::new("smartspend")
        .version(crate_version!())
        .about("Track income and expenses against weekly and monthly budgets")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (overrides SMARTSPEND_DB)"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the database with the default categories and budgets")
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Also add sample transactions"),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    tx_fields(Command::new("add"), true)
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Mark as recurring monthly"),
                        )
                        .arg(
                            Arg::new("new-category")
                                .long("new-category")
                                .action(ArgAction::SetTrue)
                                .help("Create the category if it does not exist"),
                        ),
                )
                .subcommand(
                    tx_fields(Command::new("edit"), false)
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .help("true|false"),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("type").long("type").default_value("all"))
                        .arg(Arg::new("search").long("search").default_value(""))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("budget")
                .about("Weekly and monthly budgets")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .help("weekly|monthly"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("show"))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and spend analysis")
                .subcommand(json_flags(Command::new("summary")))
                .subcommand(json_flags(Command::new("spend-by-category"))),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring items")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("stop").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(Command::new("nudge").about("Show the current smart nudge, if any"))
        .subcommand(
            Command::new("sync")
                .about("Backup status and settings")
                .subcommand(Command::new("now"))
                .subcommand(Command::new("status"))
                .subcommand(
                    Command::new("interval").arg(
                        Arg::new("minutes")
                            .required(true)
                            .value_parser(value_parser!(u32))
                            .help("0 turns periodic sync off"),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("snapshot").arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check saved data for problems"))
}
