// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Error, Result, anyhow, bail};
use rust_decimal::Decimal;
use serde_json::json;

use super::category_id;
use crate::app::App;
use crate::models::{ExpenseInput, MonthRef, MonthlyExpense};
use crate::stores::monthly::MonthlyExpenseStore;
use crate::utils::{
    arg, fmt_date, fmt_money, id_arg, json_flags, maybe_print_json, opt_arg, parse_date,
    parse_decimal, parse_month, pretty_table, today,
};
use crate::views::{ExpenseView, KindFilter, MonthlyFilter, StatusFilter};
use crate::workflows::{self, Payment};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub),
        Some(("add", sub)) => {
            let input = expense_input(app, sub)?;
            let expense = app
                .expenses()
                .with_query(due_month(&input).to_query())
                .create(&input)?;
            println!(
                "Registered '{}' for {} due {}",
                expense.name,
                fmt_money(&expense.amount),
                expense.due_date
            );
            Ok(())
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub)?;
            let input = expense_input(app, sub)?;
            app.expenses()
                .with_query(due_month(&input).to_query())
                .update(id, &input)?;
            Ok(())
        }
        Some(("rm", sub)) => remove(app, sub),
        Some(("pay", sub)) => pay(app, sub),
        Some(("export", sub)) => export(app, sub),
        _ => Ok(()),
    }
}

fn monthly_filter(m: &clap::ArgMatches) -> Result<MonthlyFilter> {
    let filter = match opt_arg(m, "month") {
        Some(month) => MonthlyFilter::new(parse_month(&month)?),
        None => MonthlyFilter::current(today()),
    };
    let search = m
        .try_get_one::<String>("search")
        .ok()
        .flatten()
        .cloned();
    Ok(filter.with_search(search))
}

fn due_month(input: &ExpenseInput) -> MonthlyFilter {
    MonthlyFilter::new(MonthRef::of(input.due_date))
}

fn expense_view(m: &clap::ArgMatches, filter: &MonthlyFilter) -> Result<ExpenseView> {
    Ok(ExpenseView {
        search: filter.search.clone(),
        status: arg(m, "status")?.parse::<StatusFilter>().map_err(Error::msg)?,
        kind: arg(m, "kind")?.parse::<KindFilter>().map_err(Error::msg)?,
    })
}

fn expense_input(app: &App, m: &clap::ArgMatches) -> Result<ExpenseInput> {
    let paid = m.get_flag("paid");
    let payment_date = match opt_arg(m, "payment_date") {
        Some(d) => Some(parse_date(&d)?),
        None if paid => Some(today()),
        None => None,
    };
    Ok(ExpenseInput {
        name: arg(m, "name")?.trim().to_string(),
        amount: parse_decimal(arg(m, "amount")?)?,
        due_date: parse_date(arg(m, "due")?)?,
        paid,
        payment_date,
        category_id: category_id(app, opt_arg(m, "category"))?,
    })
}

fn row_cells(row: &MonthlyExpense) -> Vec<String> {
    let id = if row.is_recurring {
        format!("{} [recurring]", row.id)
    } else {
        row.id.to_string()
    };
    vec![
        id,
        row.name.clone(),
        row.category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        fmt_money(&row.amount),
        row.due_date.to_string(),
        if row.paid { "paid" } else { "pending" }.to_string(),
        fmt_date(row.payment_date),
        row.kind_label().to_string(),
    ]
}

fn list(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let filter = monthly_filter(m)?;
    let view = expense_view(m, &filter)?;
    let mut monthly = app.monthly();
    monthly.fetch(&filter)?;
    let rows = view.apply(monthly.expenses());

    let (json, jsonl) = json_flags(m);
    if maybe_print_json(json, jsonl, &rows)? {
        return Ok(());
    }
    let total: Decimal = rows.iter().map(|r| r.amount).sum();
    let paid: Decimal = rows.iter().filter(|r| r.paid).map(|r| r.amount).sum();
    let data = rows.iter().map(|r| row_cells(r)).collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Category", "Amount", "Due", "Status", "Paid on", "Kind"],
            data
        )
    );
    println!(
        "{}: total {}, paid {}, pending {}",
        filter.period,
        fmt_money(&total),
        fmt_money(&paid),
        fmt_money(&(total - paid))
    );
    Ok(())
}

/// Loads the month the row belongs to and returns a copy of it.
fn monthly_row(
    monthly: &mut MonthlyExpenseStore,
    filter: &MonthlyFilter,
    m: &clap::ArgMatches,
) -> Result<MonthlyExpense> {
    let id = id_arg(m)?;
    let recurring = m.get_flag("recurring");
    monthly.fetch(filter)?;
    if let Some(row) = monthly.find(id, recurring) {
        return Ok(row.clone());
    }
    match monthly.find(id, !recurring) {
        Some(other) if other.is_recurring => Err(anyhow!(
            "No expense #{} in {}; '{}' is recurring, pass --recurring",
            id,
            filter.period,
            other.name
        )),
        Some(other) => Err(anyhow!(
            "No recurring expense #{} in {}; '{}' is a {} expense, drop --recurring",
            id,
            filter.period,
            other.name,
            other.kind_label()
        )),
        None => Err(anyhow!("No expense #{} in {}", id, filter.period)),
    }
}

fn remove(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let filter = MonthlyFilter {
        search: None,
        ..monthly_filter(m)?
    };
    let mut monthly = app.monthly();
    let row = monthly_row(&mut monthly, &filter, m)?;
    let mut expenses = app.expenses().with_query(filter.to_query());
    if !workflows::delete_monthly_row(&row, &mut expenses, &mut monthly, app.confirm.as_ref())? {
        println!("Cancelled.");
    }
    Ok(())
}

fn pay(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let filter = MonthlyFilter {
        search: None,
        ..monthly_filter(m)?
    };
    let mut monthly = app.monthly();
    let row = monthly_row(&mut monthly, &filter, m)?;
    if row.paid {
        println!("'{}' is already paid.", row.name);
        return Ok(());
    }
    let mut expenses = app.expenses().with_query(filter.to_query());
    let recurring = app.recurring();
    match workflows::mark_as_paid(&row, &mut expenses, &recurring, &mut monthly, today())? {
        Payment::Flagged => println!("'{}' marked as paid.", row.name),
        Payment::Instance(paid) => println!(
            "Payment of '{}' for {:04}-{:02} recorded on {}.",
            row.name, paid.year, paid.month, paid.payment_date
        ),
    }
    Ok(())
}

fn export(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(m, "format")?.to_lowercase();
    let out = arg(m, "out")?;
    let filter = monthly_filter(m)?;
    let view = expense_view(m, &filter)?;
    let mut monthly = app.monthly();
    monthly.fetch(&filter)?;
    let rows = view.apply(monthly.expenses());

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "name",
                "category",
                "amount",
                "due_date",
                "paid",
                "payment_date",
                "kind",
            ])?;
            for row in &rows {
                wtr.write_record([
                    row.id.to_string(),
                    row.name.clone(),
                    row.category
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    row.amount.to_string(),
                    row.due_date.to_string(),
                    row.paid.to_string(),
                    fmt_date(row.payment_date),
                    row.kind_label().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|row| {
                    json!({
                        "id": row.id,
                        "name": row.name,
                        "category": row.category.as_ref().map(|c| c.name.clone()),
                        "amount": row.amount.to_string(),
                        "due_date": row.due_date,
                        "paid": row.paid,
                        "payment_date": row.payment_date,
                        "kind": row.kind_label(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} expense(s) of {} to {}", rows.len(), filter.period, out);
    Ok(())
}
