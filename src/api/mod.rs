// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated access to the finance REST API.
//!
//! Every request carries the persisted access token. A 401 triggers one
//! refresh through `/token/refresh/` and one replay of the request; if that
//! is impossible the session is torn down and the caller must log in again.

mod transport;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

use std::cell::Cell;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::session::TokenStore;

pub const TOKEN_PATH: &str = "/token/";
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

pub type Query = Vec<(String, String)>;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    tokens: TokenStore,
    login_required: Cell<bool>,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static, tokens: TokenStore) -> Self {
        Self {
            transport: Box::new(transport),
            tokens,
            login_required: Cell::new(false),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Set once the session could not be recovered; cleared by a new login.
    pub fn login_required(&self) -> bool {
        self.login_required.get()
    }

    pub fn start_session(&self, access: &str, refresh: &str) -> Result<()> {
        self.tokens.store_pair(access, refresh)?;
        self.login_required.set(false);
        Ok(())
    }

    pub fn end_session(&self) -> Result<()> {
        self.tokens.clear()?;
        self.login_required.set(true);
        Ok(())
    }

    /// Sends an authenticated request, refreshing the access token at most once.
    pub fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.bearer = self.tokens.access_token()?;
        debug!(method = %request.method, path = %request.path, "api request");
        let resp = self.transport.execute(&request)?;
        if resp.status != 401 {
            return check(&request.path, resp);
        }

        let original = status_error(&request.path, &resp);
        let Some(refresh) = self.tokens.refresh_token()? else {
            warn!(path = %request.path, "unauthorized and no refresh token; ending session");
            self.end_session()?;
            return Err(original);
        };

        match self.refresh_access(&refresh) {
            Ok(access) => {
                self.tokens.set_access_token(&access)?;
                request.bearer = Some(access);
                debug!(path = %request.path, "replaying request after token refresh");
                let replay = self.transport.execute(&request)?;
                check(&request.path, replay)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; ending session");
                self.end_session()?;
                Err(original)
            }
        }
    }

    /// Sends a request without credentials and without the refresh path.
    pub fn send_anonymous(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method, path = %request.path, "anonymous api request");
        let resp = self.transport.execute(&request)?;
        check(&request.path, resp)
    }

    fn refresh_access(&self, refresh: &str) -> Result<String> {
        let request = ApiRequest::new(Method::Post, TOKEN_REFRESH_PATH)
            .with_body(json!({ "refresh": refresh }));
        let resp = self.send_anonymous(request)?;
        let parsed: RefreshResponse = decode(TOKEN_REFRESH_PATH, &resp)?;
        Ok(parsed.access)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<T> {
        let resp = self.send(ApiRequest::new(Method::Get, path).with_query(query))?;
        decode(path, &resp)
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.write(Method::Post, path, body)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.write(Method::Put, path, body)
    }

    pub fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.write(Method::Patch, path, body)
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::new(Method::Delete, path))?;
        Ok(())
    }

    fn write<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<Value> {
        let body = serde_json::to_value(body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })?;
        let resp = self.send(ApiRequest::new(method, path).with_body(body))?;
        Ok(resp.json_body())
    }
}

fn status_error(path: &str, resp: &ApiResponse) -> ApiError {
    ApiError::Status {
        status: resp.status,
        path: path.to_string(),
        body: resp.json_body(),
    }
}

fn check(path: &str, resp: ApiResponse) -> Result<ApiResponse> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(status_error(path, &resp))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, resp: &ApiResponse) -> Result<T> {
    serde_json::from_str(&resp.body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// `/base/{id}/`
pub fn item_path(base: &str, id: i64) -> String {
    format!("{}{}/", base, id)
}
