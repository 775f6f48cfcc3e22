// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::db;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `PAINEL_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = get("PAINEL_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let data_dir = match get("PAINEL_DATA_DIR").filter(|s| !s.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => db::default_data_dir()?,
        };
        let timeout = match get("PAINEL_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid PAINEL_TIMEOUT_SECS '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let log_format = match get("PAINEL_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Ok(Self {
            api_url,
            data_dir,
            timeout: Duration::from_secs(timeout),
            log_format,
        })
    }
}
