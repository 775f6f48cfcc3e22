// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Acao,
    Fii,
    Bdr,
    Etf,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetType::Acao => "ACAO",
            AssetType::Fii => "FII",
            AssetType::Bdr => "BDR",
            AssetType::Etf => "ETF",
        };
        f.write_str(s)
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACAO" => Ok(AssetType::Acao),
            "FII" => Ok(AssetType::Fii),
            "BDR" => Ok(AssetType::Bdr),
            "ETF" => Ok(AssetType::Etf),
            other => Err(format!(
                "Unknown asset type '{}', expected ACAO|FII|BDR|ETF",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub code: String,
    pub r#type: AssetType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    pub code: String,
    pub r#type: AssetType,
}

static ASSET_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{1,10}$").unwrap());

impl NewAsset {
    /// Normalises the code the way the server stores it (trimmed, upper-case).
    pub fn new(code: &str, r#type: AssetType) -> Result<Self, String> {
        let code = code.trim().to_uppercase();
        if !ASSET_CODE.is_match(&code) {
            return Err(format!(
                "Invalid asset code '{}', expected 1-10 letters or digits",
                code
            ));
        }
        Ok(Self { code, r#type })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// A (month, year) reference period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthRef {
    pub month: u32,
    pub year: i32,
}

impl MonthRef {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Month/year container of dividend or investment line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCard<I> {
    pub id: i64,
    pub month: u32,
    pub year: i32,
    #[serde(rename = "itens", default = "Vec::new")]
    pub items: Vec<I>,
}

impl<I> MonthCard<I> {
    pub fn period(&self) -> MonthRef {
        MonthRef {
            month: self.month,
            year: self.year,
        }
    }
}

pub trait Identified {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDividend {
    pub id: i64,
    pub asset: Asset,
    pub value: Decimal,
    pub received_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendInput {
    pub asset_id: i64,
    pub value: Decimal,
    pub received_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Buy,
    Sell,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderType::Buy => "BUY",
            OrderType::Sell => "SELL",
        })
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(OrderType::Buy),
            "SELL" => Ok(OrderType::Sell),
            other => Err(format!("Unknown order type '{}', expected BUY|SELL", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInvestment {
    pub id: i64,
    pub asset: Asset,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub operation_date: NaiveDate,
}

impl ItemInvestment {
    pub fn total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentInput {
    pub asset_id: i64,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub operation_date: NaiveDate,
}

macro_rules! identified {
    ($($t:ty),* $(,)?) => {
        $(impl Identified for $t {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(
    Asset,
    Category,
    ItemDividend,
    ItemInvestment,
    RecurringExpense,
    InstallmentExpense,
    MonthlyExpense,
);

pub type DividendMonth = MonthCard<ItemDividend>;
pub type InvestmentMonth = MonthCard<ItemInvestment>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub paid: bool,
}

/// Body for creating or fully replacing a single expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub due_day: u32,
    pub category: Option<Category>,
    pub active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringInput {
    pub name: String,
    pub amount: Decimal,
    pub due_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidRecurringExpense {
    pub recurring_expense_id: i64,
    pub payment_date: NaiveDate,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentExpense {
    pub id: i64,
    pub name: String,
    pub total_amount: Decimal,
    pub installments_quantity: u32,
    pub first_due_date: NaiveDate,
    pub category: Option<Category>,
}

impl InstallmentExpense {
    pub fn installment_amount(&self) -> Decimal {
        if self.installments_quantity == 0 {
            return self.total_amount;
        }
        (self.total_amount / Decimal::from(self.installments_quantity)).round_dp(2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentInput {
    pub name: String,
    pub total_amount: Decimal,
    pub installments_quantity: u32,
    pub first_due_date: NaiveDate,
    pub category_id: Option<i64>,
}

/// Row of the backend's monthly projection. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub paid: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub installment_origin: Option<InstallmentExpense>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MonthlyExpense {
    pub fn is_installment(&self) -> bool {
        self.installment_origin.is_some()
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_recurring {
            "recurring"
        } else if self.is_installment() {
            "installment"
        } else {
            "simple"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
