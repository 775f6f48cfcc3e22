// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;

use super::{CollectionStore, Editable, Resource};
use crate::api::{Method, item_path};
use crate::error::{ApiError, Result};
use crate::models::{Expense, ExpenseInput, MonthlyExpense};
use crate::notify::{Messages, tracked};

/// Single expenses. Reads come from the monthly projection, writes go to
/// `/expenses/`.
pub struct Expenses;

const MARK_PAID: Messages = Messages::new(
    "Updating expense...",
    "Expense marked as paid.",
    "Could not mark the expense as paid.",
);

impl Resource for Expenses {
    type Item = MonthlyExpense;
    type Input = ExpenseInput;
    type Created = Expense;

    const LIST_PATH: &'static str = "/monthly-view/";
    const PATH: &'static str = "/expenses/";
    const LOAD_FAILED: &'static str = "Could not load the expenses.";
    const CREATE: Messages = Messages::new(
        "Registering expense...",
        "Expense registered.",
        "Could not register the expense.",
    );
    const DELETE: Messages = Messages::new(
        "Deleting expense...",
        "Expense deleted.",
        "Could not delete the expense.",
    );

    /// Recurring rows of the projection reuse their template's id.
    fn owns(item: &MonthlyExpense, id: i64) -> bool {
        !item.is_recurring && item.id == id
    }
}

impl Editable for Expenses {
    const UPDATE_METHOD: Method = Method::Put;
    const UPDATE: Messages = Messages::new(
        "Updating expense...",
        "Expense updated.",
        "Could not update the expense.",
    );
}

pub type ExpenseStore = CollectionStore<Expenses>;

impl CollectionStore<Expenses> {
    /// Flags a plain expense as paid. Only `paid` is sent. The list is not
    /// reloaded here; callers refresh the monthly projection they display.
    pub fn mark_as_paid(&mut self, row: &MonthlyExpense) -> Result<()> {
        if row.is_recurring {
            return Err(ApiError::Rejected(format!(
                "'{}' comes from a recurring template; register a paid instance instead",
                row.name
            )));
        }
        let api = &self.ctx.api;
        let path = item_path(Expenses::PATH, row.id);
        tracked(self.ctx.notifier.as_ref(), &MARK_PAID, || {
            api.patch(&path, &json!({ "paid": true }))
        })?;
        Ok(())
    }
}
