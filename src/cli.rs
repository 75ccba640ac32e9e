// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Start date, inclusive (MM/DD/YYYY or YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("End date, inclusive of the whole day"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneytrack")
        .about("Local-first personal finance tracker: CSV import/export and spending reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Report where the transaction store lives"))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Signed amount; negative for expenses"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("post-date").long("post-date")),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("income, expense, or all"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("update")
                        .about("Update fields on an existing transaction")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("post-date").long("post-date")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete every transaction (irreversible)")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm deletion of all transactions"),
                        ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import bank-statement CSV files")
                .subcommand(
                    Command::new("transactions")
                        .about("Import a bank-statement CSV export")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export stored data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions as CSV")
                        .arg(Arg::new("out").long("out")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Financial summaries")
                .subcommand(json_flags(range_args(
                    Command::new("summary").about("Balance, income, and expense totals"),
                )))
                .subcommand(json_flags(range_args(
                    Command::new("spend-by-category")
                        .about("Expense totals per category, largest first"),
                ))),
        )
}
