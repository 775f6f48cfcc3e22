// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::delete_confirmed;
use crate::app::App;
use crate::models::NewCategory;
use crate::utils::{arg, id_arg, json_flags, maybe_print_json, pretty_table};

fn new_category(m: &clap::ArgMatches) -> Result<NewCategory> {
    let name = arg(m, "name")?.trim().to_string();
    if name.is_empty() {
        bail!("Category name cannot be empty");
    }
    Ok(NewCategory { name })
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let mut store = app.categories();
    match m.subcommand() {
        Some(("add", sub)) => {
            let category = store.create(&new_category(sub)?)?;
            println!("Added category '{}' (#{})", category.name, category.id);
        }
        Some(("list", sub)) => {
            store.fetch()?;
            let (json, jsonl) = json_flags(sub);
            if maybe_print_json(json, jsonl, &store.items())? {
                return Ok(());
            }
            let rows = store
                .items()
                .iter()
                .map(|c| vec![c.id.to_string(), c.name.clone()])
                .collect();
            println!("{}", pretty_table(&["ID", "Name"], rows));
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            store.update(id, &new_category(sub)?)?;
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete category",
                format!(
                    "Category #{} will be deleted. Expenses using it keep no category.",
                    id
                ),
                || store.delete(id),
            )?;
        }
        _ => {}
    }
    Ok(())
}
