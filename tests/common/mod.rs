// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use painel::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use painel::error::Result;
use painel::notify::{Notifier, Toast};
use painel::session::TokenStore;
use painel::stores::StoreContext;
use serde_json::{Value, json};

/// Scripted in-memory API. Each (method, path) route answers from a queue;
/// the last queued response keeps being returned.
#[derive(Default)]
pub struct FakeApi {
    routes: RefCell<Vec<(Method, String, VecDeque<ApiResponse>)>>,
    log: RefCell<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let resp = ApiResponse::json(status, &body);
        let mut routes = self.routes.borrow_mut();
        match routes
            .iter_mut()
            .find(|(m, p, _)| *m == method && p == path)
        {
            Some((_, _, queue)) => queue.push_back(resp),
            None => routes.push((method, path.to_string(), VecDeque::from([resp]))),
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.borrow().clone()
    }

    pub fn calls(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    /// `METHOD path` of every request, in order.
    pub fn trace(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Transport for FakeApi {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.log.borrow_mut().push(request.clone());
        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .iter_mut()
            .find(|(m, p, _)| *m == request.method && *p == request.path)
            .map(|(_, _, queue)| queue);
        let resp = match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(resp.unwrap_or_else(|| ApiResponse::json(404, &json!({ "detail": "Not found." }))))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    events: RefCell<Vec<(Toast, String)>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<(Toast, String)> {
        self.events.borrow().clone()
    }

    pub fn last(&self) -> Option<(Toast, String)> {
        self.events.borrow().last().cloned()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(t, _)| *t == Toast::Failure)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast, message: &str) {
        self.events.borrow_mut().push((toast, message.to_string()));
    }
}

pub fn logged_in_client(fake: &Rc<FakeApi>) -> Rc<ApiClient> {
    let tokens = TokenStore::in_memory().unwrap();
    tokens.store_pair("access-1", "refresh-1").unwrap();
    Rc::new(ApiClient::new(fake.clone(), tokens))
}

pub fn context(fake: &Rc<FakeApi>) -> (StoreContext, Rc<RecordingNotifier>) {
    let notifier = Rc::new(RecordingNotifier::default());
    let ctx = StoreContext::new(logged_in_client(fake), notifier.clone());
    (ctx, notifier)
}

pub fn monthly_row(id: i64, name: &str, due: &str, paid: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "amount": "100.00",
        "due_date": due,
        "payment_date": null,
        "category": null,
        "paid": paid,
        "is_recurring": false,
        "installment_origin": null
    })
}

pub fn asset(id: i64, code: &str, r#type: &str) -> Value {
    json!({ "id": id, "code": code, "type": r#type })
}
