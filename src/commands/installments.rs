// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{category_id, delete_confirmed};
use crate::app::App;
use crate::models::InstallmentInput;
use crate::utils::{
    arg, fmt_money, id_arg, json_flags, maybe_print_json, opt_arg, parse_date, parse_decimal,
    pretty_table, typed_arg,
};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let mut store = app.installments();
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
                .map(|i| {
                    vec![
                        i.id.to_string(),
                        i.name.clone(),
                        fmt_money(&i.total_amount),
                        i.installments_quantity.to_string(),
                        fmt_money(&i.installment_amount()),
                        i.first_due_date.to_string(),
                        i.category
                            .as_ref()
                            .map(|c| c.name.clone())
                            .unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["ID", "Name", "Total", "Count", "Each", "First due", "Category"],
                    rows
                )
            );
        }
        Some(("add", sub)) => {
            let input = InstallmentInput {
                name: arg(sub, "name")?.trim().to_string(),
                total_amount: parse_decimal(arg(sub, "total")?)?,
                installments_quantity: typed_arg::<u32>(sub, "count")?,
                first_due_date: parse_date(arg(sub, "first_due")?)?,
                category_id: category_id(app, opt_arg(sub, "category"))?,
            };
            let plan = store.create(&input)?;
            println!(
                "'{}' split into {} installments of {} (#{})",
                plan.name,
                plan.installments_quantity,
                fmt_money(&plan.installment_amount()),
                plan.id
            );
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete installment plan",
                format!(
                    "Installment plan #{} and all of its installments will be deleted.",
                    id
                ),
                || store.delete(id),
            )?;
        }
        _ => {}
    }
    Ok(())
}
