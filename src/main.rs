// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use painel::app::App;
use painel::config::{Config, LogFormat};
use painel::{cli, commands};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let config = Config::from_env()?;
    init_tracing(config.log_format);
    tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "starting");

    let app = App::from_config(&config, matches.get_flag("yes"))?;

    let outcome = match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&app, sub),
        Some(("logout", _)) => commands::auth::logout(&app),
        Some(("whoami", _)) => commands::auth::whoami(&app),
        Some(("asset", sub)) => commands::assets::handle(&app, sub),
        Some(("category", sub)) => commands::categories::handle(&app, sub),
        Some(("dividend", sub)) => commands::dividends::handle(&app, sub),
        Some(("invest", sub)) => commands::investments::handle(&app, sub),
        Some(("expense", sub)) => commands::expenses::handle(&app, sub),
        Some(("recurring", sub)) => commands::recurring::handle(&app, sub),
        Some(("installment", sub)) => commands::installments::handle(&app, sub),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if app.api().login_required() {
        eprintln!("Session expired. Run `painel login --username <name>` to sign in again.");
    }
    outcome
}
