// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over fetched collections: filtering, ordering, paging.
//! Nothing here mutates the source collection.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::api::Query;
use crate::models::{MonthCard, MonthRef, MonthlyExpense};

/// Month cards shown per page.
pub const PAGE_SIZE: u64 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Paid,
}

impl StatusFilter {
    pub fn matches(self, row: &MonthlyExpense) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !row.paid,
            StatusFilter::Paid => row.paid,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "paid" => Ok(StatusFilter::Paid),
            other => Err(format!("Unknown status '{}', expected all|pending|paid", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Recurring,
    Simple,
    Installment,
}

impl KindFilter {
    pub fn matches(self, row: &MonthlyExpense) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Recurring => row.is_recurring,
            KindFilter::Installment => row.installment_origin.is_some(),
            KindFilter::Simple => !row.is_recurring && row.installment_origin.is_none(),
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "recurring" => Ok(KindFilter::Recurring),
            "simple" => Ok(KindFilter::Simple),
            "installment" => Ok(KindFilter::Installment),
            other => Err(format!(
                "Unknown kind '{}', expected all|recurring|simple|installment",
                other
            )),
        }
    }
}

/// Case-insensitive substring match; an empty term matches everything.
pub fn name_matches(name: &str, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// Client-held predicates over the monthly projection, applied conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseView {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub kind: KindFilter,
}

impl ExpenseView {
    pub fn matches(&self, row: &MonthlyExpense) -> bool {
        let by_name = self
            .search
            .as_deref()
            .is_none_or(|term| name_matches(&row.name, term));
        by_name && self.status.matches(row) && self.kind.matches(row)
    }

    pub fn apply<'a>(&self, rows: &'a [MonthlyExpense]) -> Vec<&'a MonthlyExpense> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Most recent period first.
pub fn card_order<I>(a: &MonthCard<I>, b: &MonthCard<I>) -> Ordering {
    b.year.cmp(&a.year).then(b.month.cmp(&a.month))
}

pub fn sort_cards<I>(cards: &[MonthCard<I>]) -> Vec<&MonthCard<I>> {
    let mut sorted: Vec<&MonthCard<I>> = cards.iter().collect();
    sorted.sort_by(|a, b| card_order(a, b));
    sorted
}

pub fn total_pages(count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Page navigation. Moving never leaves `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current: u64,
    pub total: u64,
}

impl Pager {
    pub fn new(current: u64, count: u64) -> Self {
        Self {
            current: current.max(1),
            total: total_pages(count, PAGE_SIZE),
        }
    }

    pub fn previous(&self) -> Option<u64> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u64> {
        (self.current < self.total).then(|| self.current + 1)
    }

    pub fn label(&self) -> String {
        format!("page {}/{}", self.current, self.total.max(1))
    }
}

/// Optional year/month narrowing for month-card listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodFilter {
    pub fn to_query(&self, page: u64) -> Query {
        let mut query = Query::new();
        if let Some(year) = self.year {
            query.push(("year".into(), year.to_string()));
        }
        if let Some(month) = self.month {
            query.push(("month".into(), month.to_string()));
        }
        query.push(("page".into(), page.to_string()));
        query
    }
}

/// Server-side narrowing of the monthly projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyFilter {
    pub period: MonthRef,
    pub search: Option<String>,
}

impl MonthlyFilter {
    pub fn new(period: MonthRef) -> Self {
        Self {
            period,
            search: None,
        }
    }

    pub fn current(today: NaiveDate) -> Self {
        Self::new(MonthRef {
            month: today.month(),
            year: today.year(),
        })
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = vec![
            ("due_date__year".to_string(), self.period.year.to_string()),
            ("due_date__month".to_string(), format!("{:02}", self.period.month)),
        ];
        if let Some(search) = &self.search {
            query.push(("search".into(), search.clone()));
        }
        query
    }
}
