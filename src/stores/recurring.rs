// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use super::{CollectionStore, Editable, Resource};
use crate::api::Method;
use crate::error::{ApiError, Result};
use crate::models::{MonthRef, MonthlyExpense, PaidRecurringExpense, RecurringExpense, RecurringInput};
use crate::notify::{Messages, tracked};

pub struct Recurring;

pub const PAID_RECURRING_PATH: &str = "/paid-recurring/";

const PAID_INSTANCE: Messages = Messages::new(
    "Registering recurring payment...",
    "Payment registered.",
    "Could not register the recurring expense payment.",
);

impl Resource for Recurring {
    type Item = RecurringExpense;
    type Input = RecurringInput;
    type Created = RecurringExpense;

    const LIST_PATH: &'static str = "/recurring/";
    const PATH: &'static str = "/recurring/";
    const LOAD_FAILED: &'static str = "Could not load the recurring expenses.";
    const CREATE: Messages = Messages::new(
        "Saving recurring expense...",
        "Recurring expense saved.",
        "Could not save the recurring expense.",
    );
    const DELETE: Messages = Messages::new(
        "Deleting recurring expense...",
        "Recurring expense deleted.",
        "Could not delete the recurring expense.",
    );
}

impl Editable for Recurring {
    const UPDATE_METHOD: Method = Method::Put;
    const UPDATE: Messages = Messages::new(
        "Editing recurring expense...",
        "Recurring expense edited.",
        "Could not edit the recurring expense.",
    );
}

pub type RecurringStore = CollectionStore<Recurring>;

/// Payment record for the occurrence `row` stands for. The period comes
/// from the occurrence's due date, not from `today`.
pub fn paid_instance(row: &MonthlyExpense, today: NaiveDate) -> PaidRecurringExpense {
    let period = MonthRef::of(row.due_date);
    PaidRecurringExpense {
        recurring_expense_id: row.id,
        payment_date: today,
        month: period.month,
        year: period.year,
    }
}

impl CollectionStore<Recurring> {
    /// Records one occurrence as paid. The template itself is untouched, so
    /// the template collection is not reloaded.
    pub fn create_paid_instance(
        &self,
        row: &MonthlyExpense,
        today: NaiveDate,
    ) -> Result<PaidRecurringExpense> {
        if !row.is_recurring {
            return Err(ApiError::Rejected(format!(
                "'{}' is not a recurring expense",
                row.name
            )));
        }
        let payload = paid_instance(row, today);
        let api = &self.ctx.api;
        tracked(self.ctx.notifier.as_ref(), &PAID_INSTANCE, || {
            api.post(PAID_RECURRING_PATH, &payload)
        })?;
        Ok(payload)
    }
}
