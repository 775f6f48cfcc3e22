// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::{category_id, delete_confirmed};
use crate::app::App;
use crate::models::RecurringInput;
use crate::utils::{
    arg, fmt_date, fmt_money, id_arg, json_flags, maybe_print_json, opt_arg, parse_date,
    parse_decimal, pretty_table, typed_arg,
};

fn recurring_input(app: &App, m: &clap::ArgMatches) -> Result<RecurringInput> {
    let start_date = parse_date(arg(m, "start")?)?;
    let end_date = match opt_arg(m, "end") {
        Some(end) => Some(parse_date(&end)?),
        None => None,
    };
    if end_date.is_some_and(|end| end < start_date) {
        bail!("End date cannot be before the start date");
    }
    Ok(RecurringInput {
        name: arg(m, "name")?.trim().to_string(),
        amount: parse_decimal(arg(m, "amount")?)?,
        due_day: typed_arg::<u32>(m, "due_day")?,
        category_id: category_id(app, opt_arg(m, "category"))?,
        start_date,
        end_date,
        active: !m.get_flag("inactive"),
    })
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let mut store = app.recurring();
    match m.subcommand() {
        Some(("list", sub)) => {
            store.fetch()?;
            let (json, jsonl) = json_flags(sub);
            if maybe_print_json(json, jsonl, &store.items())? {
                return Ok(());
            }
            let rows = store
                .items()
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.name.clone(),
                        fmt_money(&r.amount),
                        r.due_day.to_string(),
                        r.category
                            .as_ref()
                            .map(|c| c.name.clone())
                            .unwrap_or_default(),
                        if r.active { "yes" } else { "no" }.to_string(),
                        r.start_date.to_string(),
                        fmt_date(r.end_date),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["ID", "Name", "Amount", "Due day", "Category", "Active", "Start", "End"],
                    rows
                )
            );
        }
        Some(("add", sub)) => {
            let created = store.create(&recurring_input(app, sub)?)?;
            println!(
                "Recurring '{}' due every day {} (#{})",
                created.name, created.due_day, created.id
            );
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            store.update(id, &recurring_input(app, sub)?)?;
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete recurring expense",
                format!(
                    "Recurring expense #{} will stop appearing in every month.",
                    id
                ),
                || store.delete(id),
            )?;
        }
        _ => {}
    }
    Ok(())
}
