// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use super::delete_confirmed;
use crate::app::App;
use crate::models::{MonthCard, MonthRef};
use crate::stores::cards::{CardKind, CardStore};
use crate::utils::{fmt_money, id_arg, json_flags, maybe_print_json, pretty_table, typed_arg};
use crate::views::{Pager, PeriodFilter};

/// How a month-card kind reads its item arguments and prints its items.
pub(crate) trait CardCommand: CardKind {
    const NOUN: &'static str;
    const HEADERS: &'static [&'static str];

    fn input(app: &App, m: &clap::ArgMatches) -> Result<Self::Input>;
    fn row(item: &Self::Item) -> Vec<String>;
    fn amount(item: &Self::Item) -> Decimal;
}

fn period_filter(m: &clap::ArgMatches) -> PeriodFilter {
    PeriodFilter {
        year: m.get_one::<i32>("year").copied(),
        month: m.get_one::<u32>("month").copied(),
    }
}

fn print_card<K: CardCommand>(card: &MonthCard<K::Item>) {
    let total: Decimal = card.items.iter().map(K::amount).sum();
    println!(
        "{} (card #{}): {} item(s), total {}",
        card.period(),
        card.id,
        card.items.len(),
        fmt_money(&total)
    );
    if card.items.is_empty() {
        return;
    }
    let rows = card.items.iter().map(K::row).collect();
    println!("{}", pretty_table(K::HEADERS, rows));
}

pub(crate) fn handle<K: CardCommand>(
    app: &App,
    mut store: CardStore<K>,
    m: &clap::ArgMatches,
) -> Result<()>
where
    K::Item: Serialize,
{
    match m.subcommand() {
        Some(("list", sub)) => {
            let page = sub.get_one::<u64>("page").copied().unwrap_or(1);
            store.fetch(period_filter(sub), page)?;
            let (json, jsonl) = json_flags(sub);
            if maybe_print_json(json, jsonl, &store.sorted_cards())? {
                return Ok(());
            }
            if store.cards().is_empty() {
                println!("No {} records.", K::NOUN);
            }
            for card in store.sorted_cards() {
                print_card::<K>(card);
            }
            let pager = Pager::new(store.page(), store.count());
            println!("{} ({} month(s))", pager.label(), store.count());
            if let Some(next) = pager.next() {
                println!("More: --page {}", next);
            }
        }
        Some(("new-month", sub)) => {
            let period = MonthRef {
                month: typed_arg::<u32>(sub, "month")?,
                year: typed_arg::<i32>(sub, "year")?,
            };
            // Loading the month first lets the local duplicate check see it.
            store.fetch(
                PeriodFilter {
                    year: Some(period.year),
                    month: Some(period.month),
                },
                1,
            )?;
            store.create_month(period)?;
        }
        Some(("rm-month", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete month",
                format!(
                    "Card #{} and every {} record in it will be deleted.",
                    id,
                    K::NOUN
                ),
                || store.delete_card(id),
            )?;
        }
        Some(("add", sub)) => {
            let card = typed_arg::<i64>(sub, "card")?;
            let input = K::input(app, sub)?;
            store.add_item(card, &input)?;
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let input = K::input(app, sub)?;
            store.update_item(id, &input)?;
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            delete_confirmed(
                app,
                "Delete record",
                format!("The {} record #{} will be deleted.", K::NOUN, id),
                || store.delete_item(id),
            )?;
        }
        _ => {}
    }
    Ok(())
}
