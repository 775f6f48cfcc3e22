// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::rc::Rc;

use anyhow::Result;

use crate::api::{ApiClient, HttpTransport};
use crate::config::Config;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::services::{Chime, Confirm, FixedConfirm, StdinConfirm, detect_chime};
use crate::session::TokenStore;
use crate::stores::StoreContext;
use crate::stores::assets::AssetStore;
use crate::stores::cards::{DividendStore, InvestmentStore};
use crate::stores::categories::CategoryStore;
use crate::stores::expenses::ExpenseStore;
use crate::stores::installments::InstallmentStore;
use crate::stores::monthly::MonthlyExpenseStore;
use crate::stores::recurring::RecurringStore;
use crate::{db, utils};

/// Application root: the shared API handle plus the injected services.
pub struct App {
    pub ctx: StoreContext,
    pub confirm: Box<dyn Confirm>,
    pub chime: Box<dyn Chime>,
}

impl App {
    pub fn new(ctx: StoreContext, confirm: Box<dyn Confirm>, chime: Box<dyn Chime>) -> Self {
        Self {
            ctx,
            confirm,
            chime,
        }
    }

    pub fn from_config(config: &Config, assume_yes: bool) -> Result<Self> {
        let conn = db::open_or_init(&config.data_dir)?;
        let tokens = TokenStore::new(conn)?;
        let transport = HttpTransport::new(utils::http_client(config.timeout)?, &config.api_url);
        let api = Rc::new(ApiClient::new(transport, tokens));
        let notifier: Rc<dyn Notifier> = Rc::new(ConsoleNotifier);
        let confirm: Box<dyn Confirm> = if assume_yes {
            Box::new(FixedConfirm(true))
        } else {
            Box::new(StdinConfirm)
        };
        Ok(Self::new(StoreContext::new(api, notifier), confirm, detect_chime()))
    }

    pub fn api(&self) -> &ApiClient {
        &self.ctx.api
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.ctx.notifier.as_ref()
    }

    pub fn assets(&self) -> AssetStore {
        AssetStore::new(self.ctx.clone())
    }

    pub fn categories(&self) -> CategoryStore {
        CategoryStore::new(self.ctx.clone())
    }

    pub fn dividends(&self) -> DividendStore {
        DividendStore::new(self.ctx.clone())
    }

    pub fn investments(&self) -> InvestmentStore {
        InvestmentStore::new(self.ctx.clone())
    }

    pub fn monthly(&self) -> MonthlyExpenseStore {
        MonthlyExpenseStore::new(self.ctx.clone())
    }

    pub fn expenses(&self) -> ExpenseStore {
        ExpenseStore::new(self.ctx.clone())
    }

    pub fn recurring(&self) -> RecurringStore {
        RecurringStore::new(self.ctx.clone())
    }

    pub fn installments(&self) -> InstallmentStore {
        InstallmentStore::new(self.ctx.clone())
    }
}
