// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, asset, context, monthly_row};
use painel::api::Method;
use painel::error::ErrorKind;
use painel::models::{AssetType, InstallmentInput, NewAsset, NewCategory, RecurringInput};
use painel::notify::Toast;
use painel::stores::assets::AssetStore;
use painel::stores::categories::CategoryStore;
use painel::stores::expenses::ExpenseStore;
use painel::stores::installments::InstallmentStore;
use painel::stores::recurring::RecurringStore;
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn new_asset_code_is_trimmed_and_uppercased() {
    let input = NewAsset::new("  mxrf11 ", AssetType::Fii).unwrap();
    assert_eq!(input.code, "MXRF11");
    assert!(NewAsset::new("", AssetType::Acao).is_err());
    assert!(NewAsset::new("PETR4-OLD", AssetType::Acao).is_err());
    assert!(NewAsset::new("ABCDEFGHIJK", AssetType::Etf).is_err());
    assert_eq!("bdr".parse::<AssetType>().unwrap(), AssetType::Bdr);
}

#[test]
fn creating_an_asset_posts_then_refetches() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/assets/", 200, json!([]))
        .on(Method::Get, "/assets/", 200, json!([asset(1, "MXRF11", "FII")]))
        .on(Method::Post, "/assets/", 201, asset(1, "MXRF11", "FII"));
    let (ctx, notifier) = context(&fake);
    let mut store = AssetStore::new(ctx);
    store.fetch().unwrap();
    assert!(store.items().is_empty());

    let input = NewAsset::new("mxrf11", AssetType::Fii).unwrap();
    let created = store.create(&input).unwrap();

    assert_eq!(created.code, "MXRF11");
    assert_eq!(
        fake.calls(Method::Post, "/assets/")[0].body,
        Some(json!({ "code": "MXRF11", "type": "FII" }))
    );
    assert_eq!(
        fake.trace(),
        vec!["GET /assets/", "POST /assets/", "GET /assets/"]
    );
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.find_by_code("mxrf11").map(|a| a.id), Some(1));
    assert_eq!(
        notifier.events(),
        vec![
            (Toast::Pending, "Registering new asset...".to_string()),
            (Toast::Success, "Asset registered.".to_string()),
        ]
    );
}

#[test]
fn duplicate_asset_shows_the_server_message() {
    let fake = FakeApi::new();
    fake.on(
        Method::Post,
        "/assets/",
        400,
        json!({ "code": ["asset with this code already exists."] }),
    );
    let (ctx, notifier) = context(&fake);
    let mut store = AssetStore::new(ctx);

    let err = store
        .create(&NewAsset::new("MXRF11", AssetType::Fii).unwrap())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        notifier.failures(),
        vec!["asset with this code already exists."]
    );
    // No reload after a failed write.
    assert!(fake.calls(Method::Get, "/assets/").is_empty());
}

#[test]
fn category_errors_fall_back_to_the_generic_text() {
    let fake = FakeApi::new();
    fake.on(
        Method::Post,
        "/categories/",
        400,
        json!({ "name": ["category with this name already exists."] }),
    )
    .on(Method::Patch, "/categories/3/", 500, json!("Server Error"));
    let (ctx, notifier) = context(&fake);
    let mut store = CategoryStore::new(ctx);

    store
        .create(&NewCategory {
            name: "Food".into(),
        })
        .unwrap_err();
    store
        .update(
            3,
            &NewCategory {
                name: "Home".into(),
            },
        )
        .unwrap_err();

    assert_eq!(
        notifier.failures(),
        vec![
            "category with this name already exists.",
            "Could not update the category. Check whether it already exists.",
        ]
    );
}

#[test]
fn delete_prunes_locally_and_reloads() {
    let fake = FakeApi::new();
    fake.on(
        Method::Get,
        "/categories/",
        200,
        json!([{ "id": 1, "name": "Food" }, { "id": 2, "name": "Rent" }]),
    )
    .on(Method::Get, "/categories/", 200, json!([{ "id": 2, "name": "Rent" }]))
    .on(Method::Delete, "/categories/1/", 204, json!(null));
    let (ctx, _) = context(&fake);
    let mut store = CategoryStore::new(ctx);
    store.fetch().unwrap();
    assert_eq!(store.find_by_name("food").map(|c| c.id), Some(1));

    store.delete(1).unwrap();

    assert_eq!(store.items().len(), 1);
    assert!(store.find(1).is_none());
    assert_eq!(fake.calls(Method::Get, "/categories/").len(), 2);
}

#[test]
fn expense_delete_keeps_the_recurring_row_sharing_its_id() {
    let mut gym = monthly_row(3, "Gym", "2025-03-05", false);
    gym["is_recurring"] = json!(true);
    let fake = FakeApi::new();
    fake.on(
        Method::Get,
        "/monthly-view/",
        200,
        json!([gym, monthly_row(3, "Electricity", "2025-03-20", false)]),
    )
    // The reload fails so the local pruning stays visible.
    .on(Method::Get, "/monthly-view/", 500, json!({}))
    .on(Method::Delete, "/expenses/3/", 204, json!(null));
    let (ctx, _) = context(&fake);
    let mut store = ExpenseStore::new(ctx);
    store.fetch().unwrap();
    assert_eq!(store.find(3).map(|row| row.name.as_str()), Some("Electricity"));

    store.delete(3).unwrap();

    let left: Vec<&str> = store.items().iter().map(|row| row.name.as_str()).collect();
    assert_eq!(left, vec!["Gym"]);
    assert!(store.find(3).is_none());
    assert_eq!(
        fake.trace(),
        vec!["GET /monthly-view/", "DELETE /expenses/3/", "GET /monthly-view/"]
    );
}

#[test]
fn failed_load_records_the_error_and_keeps_items() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/recurring/", 500, json!({ "detail": "boom" }));
    let (ctx, notifier) = context(&fake);
    let mut store = RecurringStore::new(ctx);

    assert!(store.fetch().is_err());

    assert!(!store.state().loading);
    assert_eq!(
        store.state().error.as_deref(),
        Some("Could not load the recurring expenses.")
    );
    assert_eq!(
        notifier.last(),
        Some((
            Toast::Failure,
            "Could not load the recurring expenses.".to_string()
        ))
    );
}

#[test]
fn recurring_updates_use_put_and_omit_missing_category() {
    let fake = FakeApi::new();
    fake.on(Method::Put, "/recurring/5/", 200, json!({}))
        .on(Method::Get, "/recurring/", 200, json!([]));
    let (ctx, _) = context(&fake);
    let mut store = RecurringStore::new(ctx);
    let input = RecurringInput {
        name: "Internet".into(),
        amount: Decimal::new(9990, 2),
        due_day: 10,
        category_id: None,
        start_date: "2025-01-01".parse().unwrap(),
        end_date: None,
        active: true,
    };

    store.update(5, &input).unwrap();

    let body = fake.calls(Method::Put, "/recurring/5/")[0].body.clone().unwrap();
    assert!(body.get("category_id").is_none());
    assert_eq!(body["due_day"], json!(10));
    assert_eq!(body["end_date"], json!(null));
    assert_eq!(body["active"], json!(true));
}

#[test]
fn installment_plan_is_created_and_listed() {
    let plan = json!({
        "id": 4,
        "name": "Laptop",
        "total_amount": "3000.00",
        "installments_quantity": 12,
        "first_due_date": "2025-02-10",
        "category": null
    });
    let fake = FakeApi::new();
    fake.on(Method::Post, "/installments/", 201, plan.clone())
        .on(Method::Get, "/installments/", 200, json!([plan]));
    let (ctx, _) = context(&fake);
    let mut store = InstallmentStore::new(ctx);

    let created = store
        .create(&InstallmentInput {
            name: "Laptop".into(),
            total_amount: Decimal::new(300000, 2),
            installments_quantity: 12,
            first_due_date: "2025-02-10".parse().unwrap(),
            category_id: None,
        })
        .unwrap();

    assert_eq!(created.installment_amount(), Decimal::new(25000, 2));
    assert_eq!(store.items().len(), 1);
}
