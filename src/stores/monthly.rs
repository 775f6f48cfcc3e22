// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ResourceState, StoreContext, load};
use crate::error::Result;
use crate::models::MonthlyExpense;
use crate::views::MonthlyFilter;

pub const MONTHLY_VIEW_PATH: &str = "/monthly-view/";

const LOAD_FAILED: &str = "Could not load this month's expenses.";

/// Read-only view of the backend's monthly projection.
pub struct MonthlyExpenseStore {
    ctx: StoreContext,
    state: ResourceState<MonthlyExpense>,
    filter: Option<MonthlyFilter>,
}

impl MonthlyExpenseStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            state: ResourceState::default(),
            filter: None,
        }
    }

    pub fn expenses(&self) -> &[MonthlyExpense] {
        &self.state.items
    }

    pub fn state(&self) -> &ResourceState<MonthlyExpense> {
        &self.state
    }

    pub fn filter(&self) -> Option<&MonthlyFilter> {
        self.filter.as_ref()
    }

    /// Recurring rows carry their template's id, so a row is only unique
    /// together with its kind.
    pub fn find(&self, id: i64, recurring: bool) -> Option<&MonthlyExpense> {
        self.state
            .items
            .iter()
            .find(|row| row.id == id && row.is_recurring == recurring)
    }

    pub fn fetch(&mut self, filter: &MonthlyFilter) -> Result<()> {
        self.filter = Some(filter.clone());
        let api = &self.ctx.api;
        let rows = load(
            self.ctx.notifier.as_ref(),
            &mut self.state,
            LOAD_FAILED,
            || api.get::<Vec<MonthlyExpense>>(MONTHLY_VIEW_PATH, filter.to_query()),
        )?;
        self.state.replace(rows);
        Ok(())
    }

    /// Re-runs the last projection query; a no-op before the first fetch.
    pub fn reload(&mut self) -> Result<()> {
        match self.filter.clone() {
            Some(filter) => self.fetch(&filter),
            None => Ok(()),
        }
    }
}
