// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Error, Result};

use super::delete_confirmed;
use crate::app::App;
use crate::models::{AssetType, NewAsset};
use crate::utils::{arg, id_arg, json_flags, maybe_print_json, pretty_table};

fn new_asset(m: &clap::ArgMatches) -> Result<NewAsset> {
    let r#type = arg(m, "type")?.parse::<AssetType>().map_err(Error::msg)?;
    NewAsset::new(arg(m, "code")?, r#type).map_err(Error::msg)
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let mut store = app.assets();
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = new_asset(sub)?;
            let asset = store.create(&input)?;
            println!("Registered {} ({}) as #{}", asset.code, asset.r#type, asset.id);
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
                .map(|a| vec![a.id.to_string(), a.code.clone(), a.r#type.to_string()])
                .collect();
            println!("{}", pretty_table(&["ID", "Code", "Type"], rows));
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let input = new_asset(sub)?;
            store.update(id, &input)?;
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete asset",
                format!("Asset #{} will be deleted.", id),
                || store.delete(id),
            )?;
        }
        _ => {}
    }
    Ok(())
}
