// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the API adapter and the stores built on top of it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("request to {path} failed with status {status}")]
    Status {
        status: u16,
        path: String,
        body: Value,
    },

    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("token storage: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Refused on the client before any request was issued.
    #[error("{0}")]
    Rejected(String),
}

/// Coarse classification used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Authentication,
    Validation,
    NotFound,
    Conflict,
    Server,
    Rejected,
    Storage,
    Decode,
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Status { status, .. } => match *status {
                401 | 403 => ErrorKind::Authentication,
                404 => ErrorKind::NotFound,
                409 => ErrorKind::Conflict,
                400..=499 => ErrorKind::Validation,
                _ => ErrorKind::Server,
            },
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::Storage(_) => ErrorKind::Storage,
            ApiError::Rejected(_) => ErrorKind::Rejected,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// First message of a field error list, e.g. `{"name": ["already exists"]}`.
    pub fn field_message(&self, field: &str) -> Option<String> {
        let entry = self.body()?.get(field)?;
        match entry {
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// The `detail` string the server attaches to non-field errors.
    pub fn detail(&self) -> Option<String> {
        self.body()?
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
