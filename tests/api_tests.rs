// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use std::rc::Rc;

use common::{FakeApi, logged_in_client};
use painel::api::{ApiClient, Method, Query};
use painel::error::ErrorKind;
use painel::models::Asset;
use painel::session::TokenStore;
use serde_json::json;

#[test]
fn attaches_the_stored_access_token() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/assets/", 200, json!([]));
    let api = logged_in_client(&fake);

    let assets: Vec<Asset> = api.get("/assets/", Query::new()).unwrap();

    assert!(assets.is_empty());
    assert_eq!(fake.requests()[0].bearer.as_deref(), Some("access-1"));
}

#[test]
fn refreshes_once_and_replays_the_request() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/assets/", 401, json!({ "detail": "Token expired" }))
        .on(
            Method::Get,
            "/assets/",
            200,
            json!([{ "id": 1, "code": "MXRF11", "type": "FII" }]),
        )
        .on(Method::Post, "/token/refresh/", 200, json!({ "access": "access-2" }));
    let api = logged_in_client(&fake);

    let assets: Vec<Asset> = api.get("/assets/", Query::new()).unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(
        fake.trace(),
        vec!["GET /assets/", "POST /token/refresh/", "GET /assets/"]
    );
    let refresh = &fake.calls(Method::Post, "/token/refresh/")[0];
    assert_eq!(refresh.body, Some(json!({ "refresh": "refresh-1" })));
    assert_eq!(refresh.bearer, None);
    let replay = &fake.calls(Method::Get, "/assets/")[1];
    assert_eq!(replay.bearer.as_deref(), Some("access-2"));
    assert_eq!(
        api.tokens().access_token().unwrap().as_deref(),
        Some("access-2")
    );
    assert!(!api.login_required());
}

#[test]
fn a_second_unauthorized_response_is_not_retried() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/categories/", 401, json!({ "detail": "nope" }))
        .on(Method::Post, "/token/refresh/", 200, json!({ "access": "access-2" }));
    let api = logged_in_client(&fake);

    let err = api
        .get::<serde_json::Value>("/categories/", Query::new())
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(fake.calls(Method::Post, "/token/refresh/").len(), 1);
    assert_eq!(fake.calls(Method::Get, "/categories/").len(), 2);
}

#[test]
fn refresh_failure_clears_the_session_and_returns_the_original_error() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/me/", 401, json!({ "detail": "Token expired" }))
        .on(
            Method::Post,
            "/token/refresh/",
            401,
            json!({ "detail": "Token is blacklisted" }),
        );
    let api = logged_in_client(&fake);

    let err = api.get::<serde_json::Value>("/me/", Query::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.detail().as_deref(), Some("Token expired"));
    assert!(api.login_required());
    assert_eq!(api.tokens().access_token().unwrap(), None);
    assert_eq!(api.tokens().refresh_token().unwrap(), None);
}

#[test]
fn unauthorized_without_refresh_token_skips_the_refresh() {
    let fake = FakeApi::new();
    fake.on(Method::Get, "/assets/", 401, json!({ "detail": "Auth required" }));
    let tokens = TokenStore::in_memory().unwrap();
    tokens.set_access_token("stale").unwrap();
    let api = Rc::new(ApiClient::new(fake.clone(), tokens));

    let err = api.get::<serde_json::Value>("/assets/", Query::new()).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(fake.trace(), vec!["GET /assets/"]);
    assert!(api.login_required());
    assert_eq!(api.tokens().access_token().unwrap(), None);
}

#[test]
fn non_auth_errors_keep_their_kind_and_body() {
    let fake = FakeApi::new();
    fake.on(
        Method::Post,
        "/categories/",
        400,
        json!({ "name": ["category with this name already exists."] }),
    )
    .on(Method::Delete, "/assets/9/", 404, json!({ "detail": "Not found." }));
    let api = logged_in_client(&fake);

    let err = api.post("/categories/", &json!({ "name": "Food" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.field_message("name").as_deref(),
        Some("category with this name already exists.")
    );

    let err = api.delete("/assets/9/").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(fake.calls(Method::Post, "/token/refresh/").is_empty());
}

#[test]
fn empty_success_bodies_decode_as_null() {
    let fake = FakeApi::new();
    fake.on(Method::Patch, "/expenses/4/", 200, json!(null));
    let api = logged_in_client(&fake);

    let value = api.patch("/expenses/4/", &json!({ "paid": true })).unwrap();
    assert_eq!(value, serde_json::Value::Null);
}
