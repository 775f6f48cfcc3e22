// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

/// Monthly-view ids are only unique per kind: recurring rows carry the
/// template's id.
fn recurring_flag() -> Arg {
    Arg::new("recurring")
        .long("recurring")
        .action(ArgAction::SetTrue)
        .help("The id belongs to a recurring row")
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32)),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32).range(1..=12)),
    )
}

fn card_command(name: &'static str, about: &'static str, item: Command) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(json_flags(period_args(
            Command::new("list").about("List month cards, most recent first").arg(
                Arg::new("page")
                    .long("page")
                    .default_value("1")
                    .value_parser(value_parser!(u64).range(1..)),
            ),
        )))
        .subcommand(
            Command::new("new-month")
                .about("Open a card for a month")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .required(true)
                        .value_parser(value_parser!(u32).range(1..=12)),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .required(true)
                        .value_parser(value_parser!(i32)),
                ),
        )
        .subcommand(
            Command::new("rm-month")
                .about("Delete a card and all of its items")
                .arg(id_arg()),
        )
        .subcommand(item.clone().name("add").arg(
            Arg::new("card")
                .long("card")
                .required(true)
                .value_parser(value_parser!(i64)),
        ))
        .subcommand(item.name("edit").arg(id_arg()))
        .subcommand(Command::new("rm").about("Delete an item").arg(id_arg()))
}

fn dividend_item() -> Command {
    Command::new("item")
        .arg(Arg::new("asset").long("asset").required(true).help("Asset code"))
        .arg(Arg::new("value").long("value").required(true))
        .arg(
            Arg::new("date")
                .long("date")
                .required(true)
                .help("Received date, YYYY-MM-DD"),
        )
}

fn investment_item() -> Command {
    Command::new("item")
        .arg(Arg::new("asset").long("asset").required(true).help("Asset code"))
        .arg(
            Arg::new("side")
                .long("side")
                .required(true)
                .help("BUY or SELL"),
        )
        .arg(Arg::new("quantity").long("quantity").required(true))
        .arg(Arg::new("price").long("price").required(true))
        .arg(
            Arg::new("date")
                .long("date")
                .required(true)
                .help("Operation date, YYYY-MM-DD"),
        )
}

fn expense_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("due").long("due").required(true).help("YYYY-MM-DD"))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("paid").long("paid").action(ArgAction::SetTrue))
        .arg(Arg::new("payment_date").long("payment-date"))
}

fn recurring_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(
            Arg::new("due_day")
                .long("due-day")
                .required(true)
                .value_parser(value_parser!(u32).range(1..=31)),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("start").long("start").required(true))
        .arg(Arg::new("end").long("end"))
        .arg(
            Arg::new("inactive")
                .long("inactive")
                .action(ArgAction::SetTrue),
        )
}

pub fn build_cli() -> Command {
    Command::new("painel")
        .about("Personal finance client: assets, dividends, investments, expenses")
        .version(clap::crate_version!())
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Do not ask before deleting"),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and store the session tokens")
                .arg(Arg::new("username").long("username").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("PAINEL_PASSWORD")
                        .hide_env_values(true),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("asset")
                .about("Manage assets")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("ACAO, FII, BDR or ETF"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("type").long("type").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand_required(true)
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(card_command(
            "dividend",
            "Dividends received, grouped by month",
            dividend_item(),
        ))
        .subcommand(card_command(
            "invest",
            "Buy and sell orders, grouped by month",
            investment_item(),
        ))
        .subcommand(
            Command::new("expense")
                .about("Monthly expenses")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Show a month's projected expenses")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current month"))
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("status").long("status").default_value("all"))
                        .arg(Arg::new("kind").long("kind").default_value("all")),
                ))
                .subcommand(expense_fields(Command::new("add")))
                .subcommand(expense_fields(Command::new("edit").arg(id_arg())))
                .subcommand(
                    Command::new("rm")
                        .arg(id_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM of the row"))
                        .arg(recurring_flag()),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark a row of the monthly view as paid")
                        .arg(id_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM of the row"))
                        .arg(recurring_flag()),
                )
                .subcommand(
                    Command::new("export")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("status").long("status").default_value("all"))
                        .arg(Arg::new("kind").long("kind").default_value("all"))
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring expense templates")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(recurring_fields(Command::new("add")))
                .subcommand(recurring_fields(Command::new("edit").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("installment")
                .about("Installment plans")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("total").long("total").required(true))
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .required(true)
                                .value_parser(value_parser!(u32).range(1..)),
                        )
                        .arg(Arg::new("first_due").long("first-due").required(true))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
}
