// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Error, Result};
use rust_decimal::Decimal;

use super::asset_id;
use super::cards::{self, CardCommand};
use crate::app::App;
use crate::models::{InvestmentInput, ItemInvestment, OrderType};
use crate::stores::cards::Investments;
use crate::utils::{arg, fmt_money, parse_date, parse_decimal};

impl CardCommand for Investments {
    const NOUN: &'static str = "investment";
    const HEADERS: &'static [&'static str] =
        &["ID", "Asset", "Side", "Quantity", "Unit price", "Total", "Date"];

    fn input(app: &App, m: &clap::ArgMatches) -> Result<InvestmentInput> {
        Ok(InvestmentInput {
            asset_id: asset_id(app, arg(m, "asset")?)?,
            order_type: arg(m, "side")?.parse::<OrderType>().map_err(Error::msg)?,
            quantity: parse_decimal(arg(m, "quantity")?)?,
            unit_price: parse_decimal(arg(m, "price")?)?,
            operation_date: parse_date(arg(m, "date")?)?,
        })
    }

    fn row(item: &ItemInvestment) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.asset.code.clone(),
            item.order_type.to_string(),
            item.quantity.normalize().to_string(),
            fmt_money(&item.unit_price),
            fmt_money(&item.total()),
            item.operation_date.to_string(),
        ]
    }

    /// Sells count against the month's net invested amount.
    fn amount(item: &ItemInvestment) -> Decimal {
        match item.order_type {
            OrderType::Buy => item.total(),
            OrderType::Sell => -item.total(),
        }
    }
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    cards::handle(app, app.investments(), m)
}
