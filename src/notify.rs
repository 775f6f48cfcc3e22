// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transient user notifications emitted around every mutation.

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    Pending,
    Success,
    Failure,
}

pub trait Notifier {
    fn notify(&self, toast: Toast, message: &str);
}

/// Prints progress to stderr and outcomes to stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast, message: &str) {
        match toast {
            Toast::Pending => eprintln!("… {}", message),
            Toast::Success => println!("✔ {}", message),
            Toast::Failure => eprintln!("✖ {}", message),
        }
    }
}

pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _toast: Toast, _message: &str) {}
}

/// Where a server-provided explanation lives in an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    /// `{"<field>": ["message", ...]}`
    FirstOf(&'static str),
    /// `{"detail": "message"}`
    Detail,
}

/// The pending / success / failure texts of one mutation.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub pending: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    pub server_field: Option<ErrorField>,
}

impl Messages {
    pub const fn new(pending: &'static str, success: &'static str, failure: &'static str) -> Self {
        Self {
            pending,
            success,
            failure,
            server_field: None,
        }
    }

    pub const fn with_server_field(mut self, field: ErrorField) -> Self {
        self.server_field = Some(field);
        self
    }

    /// Server explanation when one is present, else the generic text.
    pub fn failure_text(&self, err: &ApiError) -> String {
        let from_server = match self.server_field {
            Some(ErrorField::FirstOf(field)) => err.field_message(field),
            Some(ErrorField::Detail) => err.detail(),
            None => None,
        };
        match err {
            ApiError::Rejected(reason) => reason.clone(),
            _ => from_server.unwrap_or_else(|| self.failure.to_string()),
        }
    }
}

/// Runs `op` between a pending toast and its outcome toast. The error is
/// still returned so callers can keep their input open.
pub fn tracked<R>(
    notifier: &dyn Notifier,
    messages: &Messages,
    op: impl FnOnce() -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    notifier.notify(Toast::Pending, messages.pending);
    match op() {
        Ok(value) => {
            notifier.notify(Toast::Success, messages.success);
            Ok(value)
        }
        Err(err) => {
            notifier.notify(Toast::Failure, &messages.failure_text(&err));
            Err(err)
        }
    }
}
