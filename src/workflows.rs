// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Operations spanning more than one store. Stores are passed in
//! explicitly; nothing here holds state of its own.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::models::{MonthlyExpense, PaidRecurringExpense};
use crate::services::{Confirm, Confirmation};
use crate::stores::expenses::ExpenseStore;
use crate::stores::monthly::MonthlyExpenseStore;
use crate::stores::recurring::RecurringStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Payment {
    /// A plain expense had its `paid` flag set.
    Flagged,
    /// A paid instance was recorded for a recurring occurrence.
    Instance(PaidRecurringExpense),
}

/// Marks a projected row as paid through whichever path its origin needs,
/// then reloads the projection so the row shows the new status.
pub fn mark_as_paid(
    row: &MonthlyExpense,
    expenses: &mut ExpenseStore,
    recurring: &RecurringStore,
    monthly: &mut MonthlyExpenseStore,
    today: NaiveDate,
) -> Result<Payment> {
    let payment = if row.is_recurring {
        Payment::Instance(recurring.create_paid_instance(row, today)?)
    } else {
        expenses.mark_as_paid(row)?;
        Payment::Flagged
    };
    monthly.reload()?;
    Ok(payment)
}

/// Runs `op` only after the user agreed. `Ok(None)` means they declined and
/// nothing was sent.
pub fn confirmed<R>(
    confirm: &dyn Confirm,
    request: &Confirmation,
    op: impl FnOnce() -> Result<R>,
) -> Result<Option<R>> {
    if !confirm.confirm(request) {
        info!(title = %request.title, "destructive operation cancelled");
        return Ok(None);
    }
    op().map(Some)
}

/// Deletes a plain expense from the monthly view. Rows generated from a
/// recurring template or an installment plan are managed through those.
pub fn delete_monthly_row(
    row: &MonthlyExpense,
    expenses: &mut ExpenseStore,
    monthly: &mut MonthlyExpenseStore,
    confirm: &dyn Confirm,
) -> Result<bool> {
    if row.is_recurring || row.is_installment() {
        return Err(ApiError::Rejected(format!(
            "'{}' is a {} expense; delete it from its {} instead",
            row.name,
            row.kind_label(),
            if row.is_recurring { "template" } else { "installment plan" },
        )));
    }
    let request = Confirmation::new(
        "Delete expense",
        format!("'{}' ({}) will be permanently deleted.", row.name, row.due_date),
    );
    let deleted = confirmed(confirm, &request, || expenses.delete(row.id))?;
    if deleted.is_none() {
        return Ok(false);
    }
    monthly.reload()?;
    Ok(true)
}
