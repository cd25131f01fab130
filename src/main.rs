// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use tallybook::{backup, cli, commands, ledger::Ledger, repo::Repository, store};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let repo = Repository::new(store::Store::open_or_init()?);
    // Load runs migrations before any other read.
    let mut ledger = Ledger::load(&repo)?;

    if repo.is_first_launch()? {
        repo.set_first_launch_complete()?;
    }

    // Evaluated once per start; never fatal.
    if let Err(e) = backup::check_auto_backup(&repo, Utc::now()) {
        tracing::warn!(error = %e, "auto backup failed");
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized at {}", store::store_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&repo, &mut ledger, sub)?,
        Some(("business", sub)) => commands::businesses::handle(&repo, &mut ledger, sub)?,
        Some(("report", sub)) => {
            let symbol = repo.settings()?.currency_symbol;
            commands::reports::handle(&ledger, &symbol, sub)?
        }
        Some(("backup", sub)) => commands::backup::handle(&repo, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&repo, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
