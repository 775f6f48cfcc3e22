// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use crate::app::App;
use crate::auth;
use crate::utils::arg;

pub fn login(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let username = arg(m, "username")?;
    let password = match m.get_one::<String>("password").filter(|p| !p.is_empty()) {
        Some(password) => password.clone(),
        None => read_password()?,
    };
    let user = auth::login(
        app.api(),
        app.notifier(),
        app.chime.as_ref(),
        username,
        &password,
    )?;
    println!("Welcome, {}.", user.username);
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("A password is required (or set PAINEL_PASSWORD)");
    }
    Ok(password)
}

pub fn logout(app: &App) -> Result<()> {
    auth::logout(app.api(), app.notifier())?;
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match auth::current_user(app.api())? {
        Some(user) if user.email.is_empty() => println!("{} (#{})", user.username, user.id),
        Some(user) => println!("{} <{}> (#{})", user.username, user.email, user.id),
        None => println!("Not logged in."),
    }
    Ok(())
}
