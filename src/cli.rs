// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local-first income/expense tracking for small businesses")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the store and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction for the active business")
                        .arg(Arg::new("type").long("type").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("time").long("time").help("HH:MM, default now"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(
                            Arg::new("pending")
                                .long("pending")
                                .action(ArgAction::SetTrue)
                                .help("Record as pending instead of completed"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions of the active business")
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("status").long("status").help("completed|pending"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(Arg::new("search").long("search").help("Substring of description or category")),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Update fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("time").long("time"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("status").long("status").help("completed|pending")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("export")
                        .about("Export transactions of the active business to a file")
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("business")
                .about("Manage businesses and the active business")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("owner").long("owner").default_value(""))
                        .arg(Arg::new("phone").long("phone").default_value(""))
                        .arg(Arg::new("email").long("email").default_value(""))
                        .arg(Arg::new("address").long("address").default_value("")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("use")
                        .about("Switch the active business")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a business (the last one cannot be deleted)")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views of the active business")
                .subcommand(json_flags(
                    Command::new("summary").about("Today/month/year totals, balance, pending count"),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Current-month totals per category")
                        .arg(Arg::new("type").long("type").default_value("expense").help("income|expense")),
                ))
                .subcommand(json_flags(
                    Command::new("trends").about("Income/expense per month, trailing six months"),
                )),
        )
        .subcommand(
            Command::new("backup")
                .about("Snapshot, export and restore all data")
                .subcommand(Command::new("create").about("Write a snapshot to the backup slot"))
                .subcommand(json_flags(Command::new("show").about("Show the stored backup slot")))
                .subcommand(
                    Command::new("export")
                        .about("Export a fresh backup as pretty JSON")
                        .arg(Arg::new("out").long("out").help("Write to file instead of stdout")),
                )
                .subcommand(
                    Command::new("import")
                        .about("Import a backup JSON file (partial restore)")
                        .arg(Arg::new("file").required(true)),
                )
                .subcommand(Command::new("restore").about("Restore from the stored backup slot")),
        )
        .subcommand(
            Command::new("settings")
                .about("Preferences and security")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true).help(
                            "language|theme|currency|currency-symbol|notifications|daily-reminder|reminder-time|auto-backup|backup-frequency",
                        ))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(
                    Command::new("pin")
                        .subcommand(
                            Command::new("set").arg(Arg::new("code").required(true)),
                        )
                        .subcommand(Command::new("clear")),
                )
                .subcommand(
                    Command::new("biometric").arg(Arg::new("state").required(true).help("on|off")),
                ),
        )
        .subcommand(Command::new("doctor").about("Report data integrity issues"))
}
