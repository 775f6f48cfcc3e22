// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiRequest, Method, Query, TOKEN_PATH, decode};
use crate::error::Result;
use crate::models::User;
use crate::notify::{Notifier, Toast};
use crate::services::{Chime, Sound};

pub const ME_PATH: &str = "/me/";

#[derive(Debug, Deserialize)]
struct TokenPair {
    access: String,
    refresh: String,
}

/// Exchanges credentials for a token pair, persists it and returns the
/// verified user.
pub fn login(
    api: &ApiClient,
    notifier: &dyn Notifier,
    chime: &dyn Chime,
    username: &str,
    password: &str,
) -> Result<User> {
    notifier.notify(Toast::Pending, "Authenticating...");
    let request = ApiRequest::new(Method::Post, TOKEN_PATH)
        .with_body(json!({ "username": username, "password": password }));
    let pair = api
        .send_anonymous(request)
        .and_then(|resp| decode::<TokenPair>(TOKEN_PATH, &resp));
    let pair = match pair {
        Ok(pair) => pair,
        Err(err) => {
            notifier.notify(Toast::Failure, "Invalid credentials. Try again.");
            return Err(err);
        }
    };
    let verified = api
        .start_session(&pair.access, &pair.refresh)
        .and_then(|()| api.get::<User>(ME_PATH, Query::new()));
    let user = match verified {
        Ok(user) => user,
        Err(err) => {
            // A session whose user cannot be loaded is not kept.
            if let Err(clear_err) = api.end_session() {
                warn!(error = %clear_err, "could not discard the unverified session");
            }
            warn!(error = %err, "login could not load the user");
            notifier.notify(Toast::Failure, "Could not complete the login. Try again.");
            return Err(err);
        }
    };
    info!(username = %user.username, "logged in");
    notifier.notify(Toast::Success, "Logged in.");
    chime.play(Sound::Login, 0.8);
    Ok(user)
}

pub fn logout(api: &ApiClient, notifier: &dyn Notifier) -> Result<()> {
    api.tokens().clear()?;
    info!("logged out");
    notifier.notify(Toast::Success, "Logged out.");
    Ok(())
}

/// The current user, or `None` when no session is stored.
pub fn current_user(api: &ApiClient) -> Result<Option<User>> {
    if api.tokens().access_token()?.is_none() {
        return Ok(None);
    }
    api.get::<User>(ME_PATH, Query::new()).map(Some)
}
