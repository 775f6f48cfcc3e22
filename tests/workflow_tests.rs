// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{FakeApi, context, monthly_row};
use painel::api::Method;
use painel::error::ErrorKind;
use painel::models::{MonthRef, MonthlyExpense};
use painel::services::FixedConfirm;
use painel::stores::expenses::ExpenseStore;
use painel::stores::monthly::MonthlyExpenseStore;
use painel::stores::recurring::{RecurringStore, paid_instance};
use painel::views::MonthlyFilter;
use painel::workflows::{self, Payment};
use serde_json::json;

fn march() -> MonthlyFilter {
    MonthlyFilter::new(MonthRef {
        month: 3,
        year: 2025,
    })
}

fn row(value: serde_json::Value) -> MonthlyExpense {
    serde_json::from_value(value).unwrap()
}

fn recurring_row() -> serde_json::Value {
    let mut value = monthly_row(42, "Gym", "2025-03-15", false);
    value["is_recurring"] = json!(true);
    value
}

#[test]
fn paid_instance_takes_the_period_from_the_due_date() {
    let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
    let paid = paid_instance(&row(recurring_row()), today);
    assert_eq!(paid.recurring_expense_id, 42);
    assert_eq!(paid.month, 3);
    assert_eq!(paid.year, 2025);
    assert_eq!(paid.payment_date, today);
}

#[test]
fn paying_a_recurring_row_records_an_instance_and_reloads_the_month() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/monthly-view/", 200, json!([recurring_row()]))
        .on(Method::Post, "/paid-recurring/", 201, json!({ "id": 1 }));
    let (ctx, _) = context(&fake);
    let mut monthly = MonthlyExpenseStore::new(ctx.clone());
    let mut expenses = ExpenseStore::new(ctx.clone()).with_query(march().to_query());
    let recurring = RecurringStore::new(ctx);
    monthly.fetch(&march()).unwrap();
    let target = monthly.find(42, true).cloned().unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

    let payment =
        workflows::mark_as_paid(&target, &mut expenses, &recurring, &mut monthly, today).unwrap();

    assert!(matches!(payment, Payment::Instance(ref p) if p.month == 3 && p.year == 2025));
    assert_eq!(
        fake.calls(Method::Post, "/paid-recurring/")[0].body,
        Some(json!({
            "recurring_expense_id": 42,
            "payment_date": "2025-03-20",
            "month": 3,
            "year": 2025
        }))
    );
    assert!(fake.calls(Method::Get, "/recurring/").is_empty());
    assert!(fake.calls(Method::Patch, "/expenses/42/").is_empty());
    let reload = fake.calls(Method::Get, "/monthly-view/");
    assert_eq!(reload.len(), 2);
    assert_eq!(reload[1].query_value("due_date__month"), Some("03"));
    assert_eq!(reload[1].query_value("due_date__year"), Some("2025"));
}

#[test]
fn paying_a_simple_row_only_sends_the_paid_flag() {
    let fake = FakeApi::new();
    fake.on(
        Method::Get,
        "/monthly-view/",
        200,
        json!([monthly_row(7, "Electricity", "2025-03-05", false)]),
    )
    .on(
        Method::Get,
        "/monthly-view/",
        200,
        json!([monthly_row(7, "Electricity", "2025-03-05", true)]),
    )
    .on(Method::Patch, "/expenses/7/", 200, json!({}));
    let (ctx, _) = context(&fake);
    let mut monthly = MonthlyExpenseStore::new(ctx.clone());
    let mut expenses = ExpenseStore::new(ctx.clone()).with_query(march().to_query());
    let recurring = RecurringStore::new(ctx);
    monthly.fetch(&march()).unwrap();
    let target = monthly.find(7, false).cloned().unwrap();

    let payment = workflows::mark_as_paid(
        &target,
        &mut expenses,
        &recurring,
        &mut monthly,
        NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
    )
    .unwrap();

    assert_eq!(payment, Payment::Flagged);
    assert_eq!(
        fake.calls(Method::Patch, "/expenses/7/")[0].body,
        Some(json!({ "paid": true }))
    );
    assert!(fake.calls(Method::Post, "/paid-recurring/").is_empty());
    assert!(monthly.find(7, false).unwrap().paid);
    assert_eq!(
        fake.trace(),
        vec!["GET /monthly-view/", "PATCH /expenses/7/", "GET /monthly-view/"]
    );
    assert!(
        fake.calls(Method::Get, "/monthly-view/")
            .iter()
            .all(|r| r.query_value("due_date__month") == Some("03"))
    );
}

#[test]
fn stores_refuse_the_wrong_payment_path() {
    let fake = FakeApi::new();
    let (ctx, _) = context(&fake);
    let mut expenses = ExpenseStore::new(ctx.clone());
    let recurring = RecurringStore::new(ctx);
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    let err = expenses.mark_as_paid(&row(recurring_row())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    let plain = row(monthly_row(1, "Rent", "2025-03-01", false));
    let err = recurring.create_paid_instance(&plain, today).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert!(fake.requests().is_empty());
}

#[test]
fn generated_rows_cannot_be_deleted_from_the_monthly_view() {
    let fake = FakeApi::new();
    let (ctx, _) = context(&fake);
    let mut monthly = MonthlyExpenseStore::new(ctx.clone());
    let mut expenses = ExpenseStore::new(ctx);
    let mut installment = monthly_row(8, "Laptop 3/12", "2025-03-10", false);
    installment["installment_origin"] = json!({
        "id": 4,
        "name": "Laptop",
        "total_amount": "3000.00",
        "installments_quantity": 12,
        "first_due_date": "2025-01-10",
        "category": null
    });

    for value in [recurring_row(), installment] {
        let err = workflows::delete_monthly_row(
            &row(value),
            &mut expenses,
            &mut monthly,
            &FixedConfirm(true),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
    }
    assert!(fake.requests().is_empty());
}

#[test]
fn declined_confirmation_sends_nothing() {
    let fake = FakeApi::new();
    let (ctx, _) = context(&fake);
    let mut monthly = MonthlyExpenseStore::new(ctx.clone());
    let mut expenses = ExpenseStore::new(ctx);
    let plain = row(monthly_row(3, "Groceries", "2025-03-02", false));

    let deleted =
        workflows::delete_monthly_row(&plain, &mut expenses, &mut monthly, &FixedConfirm(false))
            .unwrap();

    assert!(!deleted);
    assert!(fake.requests().is_empty());
}

#[test]
fn confirmed_delete_removes_the_expense_and_reloads() {
    let fake = FakeApi::new();
    fake.on(
        Method::Get,
        "/monthly-view/",
        200,
        json!([monthly_row(3, "Groceries", "2025-03-02", false)]),
    )
    .on(Method::Get, "/monthly-view/", 200, json!([]))
    .on(Method::Delete, "/expenses/3/", 204, json!(null));
    let (ctx, _) = context(&fake);
    let mut monthly = MonthlyExpenseStore::new(ctx.clone());
    let mut expenses = ExpenseStore::new(ctx).with_query(march().to_query());
    monthly.fetch(&march()).unwrap();
    let target = monthly.find(3, false).cloned().unwrap();

    let deleted =
        workflows::delete_monthly_row(&target, &mut expenses, &mut monthly, &FixedConfirm(true))
            .unwrap();

    assert!(deleted);
    assert!(monthly.expenses().is_empty());
    assert_eq!(
        fake.trace(),
        vec![
            "GET /monthly-view/",
            "DELETE /expenses/3/",
            "GET /monthly-view/",
            "GET /monthly-view/",
        ]
    );
}
