// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod auth;
pub mod cards;
pub mod categories;
pub mod dividends;
pub mod expenses;
pub mod installments;
pub mod investments;
pub mod recurring;

use anyhow::{Result, bail};

use crate::app::App;
use crate::services::Confirmation;
use crate::workflows;

/// Resolves an asset code against the user's registered assets.
pub(crate) fn asset_id(app: &App, code: &str) -> Result<i64> {
    let mut assets = app.assets();
    assets.fetch()?;
    match assets.find_by_code(code) {
        Some(asset) => Ok(asset.id),
        None => bail!(
            "Unknown asset '{}'. Register it first with `painel asset add`",
            code.trim().to_uppercase()
        ),
    }
}

pub(crate) fn category_id(app: &App, name: Option<String>) -> Result<Option<i64>> {
    let Some(name) = name else {
        return Ok(None);
    };
    let mut categories = app.categories();
    categories.fetch()?;
    match categories.find_by_name(&name) {
        Some(category) => Ok(Some(category.id)),
        None => bail!(
            "Unknown category '{}'. Create it first with `painel category add`",
            name
        ),
    }
}

/// Asks before running a destructive request.
pub(crate) fn delete_confirmed(
    app: &App,
    title: &str,
    description: String,
    op: impl FnOnce() -> crate::error::Result<()>,
) -> Result<()> {
    let request = Confirmation::new(title, description);
    if workflows::confirmed(app.confirm.as_ref(), &request, op)?.is_none() {
        println!("Cancelled.");
    }
    Ok(())
}
