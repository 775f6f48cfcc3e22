// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-card collections (dividends, investments): paginated cards, each
//! holding the line items of one (month, year).

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use super::{ResourceState, StoreContext, load};
use crate::api::item_path;
use crate::error::{ApiError, Result};
use crate::models::{
    DividendInput, Identified, InvestmentInput, ItemDividend, ItemInvestment, MonthCard, MonthRef,
    Page,
};
use crate::notify::{ErrorField, Messages, Toast, tracked};
use crate::views::{self, PAGE_SIZE, PeriodFilter};

pub trait CardKind {
    type Item: DeserializeOwned + Identified;
    type Input;

    const CARDS_PATH: &'static str;
    const ITEMS_PATH: &'static str;
    const LOAD_FAILED: &'static str;
    const MONTH_EXISTS: &'static str;
    const ADD_ITEM: Messages;
    const UPDATE_ITEM: Messages;
    const DELETE_ITEM: Messages;
    const CREATE_MONTH: Messages;
    const DELETE_MONTH: Messages;

    /// Wire body for an item. `card` is set on creation only.
    fn item_body(input: &Self::Input, card: Option<i64>) -> Value;
}

pub struct Dividends;

impl CardKind for Dividends {
    type Item = ItemDividend;
    type Input = DividendInput;

    const CARDS_PATH: &'static str = "/cards-dividends/";
    const ITEMS_PATH: &'static str = "/itens-dividends/";
    const LOAD_FAILED: &'static str = "Could not load the dividend records.";
    const MONTH_EXISTS: &'static str = "This month is already registered.";
    const ADD_ITEM: Messages = Messages::new(
        "Adding dividend...",
        "Dividend added.",
        "Could not add the dividend.",
    );
    const UPDATE_ITEM: Messages = Messages::new(
        "Updating record...",
        "Dividend updated.",
        "Could not update the record.",
    );
    const DELETE_ITEM: Messages = Messages::new(
        "Deleting dividend...",
        "Dividend deleted.",
        "Could not delete the dividend.",
    );
    const CREATE_MONTH: Messages = Messages::new(
        "Creating month record...",
        "New reference month created.",
        "Could not create the month record.",
    )
    .with_server_field(ErrorField::Detail);
    const DELETE_MONTH: Messages = Messages::new(
        "Deleting month and all of its records...",
        "Month deleted.",
        "Could not delete the month.",
    );

    fn item_body(input: &DividendInput, card: Option<i64>) -> Value {
        let mut body = json!({
            "value": input.value,
            "received_date": input.received_date,
            "asset_id": input.asset_id,
        });
        if let Some(card) = card {
            body["card_month"] = json!(card);
        }
        body
    }
}

pub struct Investments;

impl CardKind for Investments {
    type Item = ItemInvestment;
    type Input = InvestmentInput;

    const CARDS_PATH: &'static str = "/cards-investiments/";
    const ITEMS_PATH: &'static str = "/itens-investiments/";
    const LOAD_FAILED: &'static str = "Could not load the investments.";
    const MONTH_EXISTS: &'static str = "This month is already registered.";
    const ADD_ITEM: Messages = Messages::new(
        "Adding investment...",
        "Investment added.",
        "Could not add the investment.",
    );
    const UPDATE_ITEM: Messages = Messages::new(
        "Updating record...",
        "Investment updated.",
        "Could not update the record.",
    );
    const DELETE_ITEM: Messages = Messages::new(
        "Deleting investment...",
        "Investment deleted.",
        "Could not delete the investment.",
    );
    const CREATE_MONTH: Messages = Messages::new(
        "Creating month record...",
        "New reference month added.",
        "Could not add the month record.",
    )
    .with_server_field(ErrorField::Detail);
    const DELETE_MONTH: Messages = Messages::new(
        "Deleting investment card...",
        "Card deleted.",
        "Could not delete the card.",
    );

    fn item_body(input: &InvestmentInput, card: Option<i64>) -> Value {
        let mut body = json!({
            "asset_id": input.asset_id,
            "order_type": input.order_type,
            "quantity": input.quantity,
            "unit_price": input.unit_price,
            "operation_date": input.operation_date,
        });
        if let Some(card) = card {
            body["card"] = json!(card);
        }
        body
    }
}

pub struct CardStore<K: CardKind> {
    ctx: StoreContext,
    state: ResourceState<MonthCard<K::Item>>,
    count: u64,
    filter: PeriodFilter,
    page: u64,
    _kind: PhantomData<K>,
}

pub type DividendStore = CardStore<Dividends>;
pub type InvestmentStore = CardStore<Investments>;

impl<K: CardKind> CardStore<K> {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            state: ResourceState::default(),
            count: 0,
            filter: PeriodFilter::default(),
            page: 1,
            _kind: PhantomData,
        }
    }

    pub fn cards(&self) -> &[MonthCard<K::Item>] {
        &self.state.items
    }

    pub fn state(&self) -> &ResourceState<MonthCard<K::Item>> {
        &self.state
    }

    /// Total number of cards the server reports across all pages.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        views::total_pages(self.count, PAGE_SIZE)
    }

    pub fn sorted_cards(&self) -> Vec<&MonthCard<K::Item>> {
        views::sort_cards(&self.state.items)
    }

    /// Loads one page. Changing page always goes back to the server.
    pub fn fetch(&mut self, filter: PeriodFilter, page: u64) -> Result<()> {
        self.filter = filter;
        self.page = page.max(1);
        let query = self.filter.to_query(self.page);
        let api = &self.ctx.api;
        let page = load(
            self.ctx.notifier.as_ref(),
            &mut self.state,
            K::LOAD_FAILED,
            || api.get::<Page<MonthCard<K::Item>>>(K::CARDS_PATH, query),
        )?;
        self.count = page.count;
        self.state.replace(page.results);
        Ok(())
    }

    fn refresh(&mut self) {
        if let Err(err) = self.fetch(self.filter, self.page) {
            debug!(error = %err, path = K::CARDS_PATH, "reload after write failed");
        }
    }

    pub fn add_item(&mut self, card_id: i64, input: &K::Input) -> Result<()> {
        let api = &self.ctx.api;
        let body = K::item_body(input, Some(card_id));
        tracked(self.ctx.notifier.as_ref(), &K::ADD_ITEM, || {
            api.post(K::ITEMS_PATH, &body)
        })?;
        self.refresh();
        Ok(())
    }

    pub fn update_item(&mut self, item_id: i64, input: &K::Input) -> Result<()> {
        let api = &self.ctx.api;
        let body = K::item_body(input, None);
        let path = item_path(K::ITEMS_PATH, item_id);
        tracked(self.ctx.notifier.as_ref(), &K::UPDATE_ITEM, || {
            api.patch(&path, &body)
        })?;
        self.refresh();
        Ok(())
    }

    /// Removes the item from every loaded card, then reloads.
    pub fn delete_item(&mut self, item_id: i64) -> Result<()> {
        let api = &self.ctx.api;
        let path = item_path(K::ITEMS_PATH, item_id);
        tracked(self.ctx.notifier.as_ref(), &K::DELETE_ITEM, || api.delete(&path))?;
        for card in &mut self.state.items {
            card.items.retain(|item| item.id() != item_id);
        }
        self.refresh();
        Ok(())
    }

    /// The duplicate check only sees the loaded page; the server has the
    /// final word.
    pub fn has_month(&self, period: MonthRef) -> bool {
        self.state.items.iter().any(|card| card.period() == period)
    }

    pub fn create_month(&mut self, period: MonthRef) -> Result<()> {
        if self.has_month(period) {
            self.ctx.notifier.notify(Toast::Failure, K::MONTH_EXISTS);
            return Err(ApiError::Rejected(K::MONTH_EXISTS.to_string()));
        }
        let api = &self.ctx.api;
        let body = json!({ "month": period.month, "year": period.year });
        tracked(self.ctx.notifier.as_ref(), &K::CREATE_MONTH, || {
            api.post(K::CARDS_PATH, &body)
        })?;
        self.refresh();
        Ok(())
    }

    pub fn delete_card(&mut self, card_id: i64) -> Result<()> {
        let api = &self.ctx.api;
        let path = item_path(K::CARDS_PATH, card_id);
        tracked(self.ctx.notifier.as_ref(), &K::DELETE_MONTH, || api.delete(&path))?;
        self.state.items.retain(|card| card.id != card_id);
        self.refresh();
        Ok(())
    }

    pub fn find_card(&self, card_id: i64) -> Option<&MonthCard<K::Item>> {
        self.state.items.iter().find(|card| card.id == card_id)
    }

    pub fn find_item(&self, item_id: i64) -> Option<&K::Item> {
        self.state
            .items
            .iter()
            .flat_map(|card| card.items.iter())
            .find(|item| item.id() == item_id)
    }
}
