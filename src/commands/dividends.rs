// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use super::asset_id;
use super::cards::{self, CardCommand};
use crate::app::App;
use crate::models::{DividendInput, ItemDividend};
use crate::stores::cards::Dividends;
use crate::utils::{arg, fmt_money, parse_date, parse_decimal};

impl CardCommand for Dividends {
    const NOUN: &'static str = "dividend";
    const HEADERS: &'static [&'static str] = &["ID", "Asset", "Value", "Received"];

    fn input(app: &App, m: &clap::ArgMatches) -> Result<DividendInput> {
        Ok(DividendInput {
            asset_id: asset_id(app, arg(m, "asset")?)?,
            value: parse_decimal(arg(m, "value")?)?,
            received_date: parse_date(arg(m, "date")?)?,
        })
    }

    fn row(item: &ItemDividend) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.asset.code.clone(),
            fmt_money(&item.value),
            item.received_date.to_string(),
        ]
    }

    fn amount(item: &ItemDividend) -> Decimal {
        item.value
    }
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    cards::handle(app, app.dividends(), m)
}
