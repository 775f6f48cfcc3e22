// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable storage for the session tokens.

use rusqlite::{Connection, OptionalExtension, params};

use crate::db;

const ACCESS_KEY: &str = "access_token";
const REFRESH_KEY: &str = "refresh_token";

pub struct TokenStore {
    conn: Connection,
}

impl TokenStore {
    pub fn new(conn: Connection) -> rusqlite::Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> rusqlite::Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()
    }

    fn set(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn access_token(&self) -> rusqlite::Result<Option<String>> {
        self.get(ACCESS_KEY)
    }

    pub fn refresh_token(&self) -> rusqlite::Result<Option<String>> {
        self.get(REFRESH_KEY)
    }

    pub fn set_access_token(&self, token: &str) -> rusqlite::Result<()> {
        self.set(ACCESS_KEY, token)
    }

    pub fn store_pair(&self, access: &str, refresh: &str) -> rusqlite::Result<()> {
        self.set(ACCESS_KEY, access)?;
        self.set(REFRESH_KEY, refresh)
    }

    pub fn clear(&self) -> rusqlite::Result<()> {
        self.conn.execute(
            "DELETE FROM settings WHERE key IN (?1, ?2)",
            params![ACCESS_KEY, REFRESH_KEY],
        )?;
        Ok(())
    }
}
