// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup;
use crate::repo::Repository;
use crate::utils::maybe_print_json;
use anyhow::{Context, Result, bail};

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", _)) => {
            let record = backup::create_backup(repo)?;
            println!(
                "Backup created at {} (version {})",
                record.timestamp, record.version
            );
        }
        Some(("show", sub)) => match backup::last_backup(repo)? {
            Some(record) => {
                if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &record)? {
                    let data = &record.data;
                    println!(
                        "Backup from {} (version {}): {} transactions, {} businesses",
                        record.timestamp,
                        record.version,
                        data.transactions.as_ref().map_or(0, |t| t.len()),
                        data.businesses.as_ref().map_or(0, |b| b.len()),
                    );
                }
            }
            None => println!("No backup stored"),
        },
        Some(("export", sub)) => {
            let text = backup::export_json(repo)?;
            match sub.get_one::<String>("out") {
                Some(path) => {
                    std::fs::write(path, &text)
                        .with_context(|| format!("Write backup to {}", path))?;
                    println!("Backup exported to {}", path);
                }
                None => println!("{}", text),
            }
        }
        Some(("import", sub)) => {
            let path = sub.get_one::<String>("file").unwrap();
            let text =
                std::fs::read_to_string(path).with_context(|| format!("Read backup {}", path))?;
            backup::import_json(repo, &text)?;
            println!("Backup imported; restart to pick up restored state");
        }
        Some(("restore", _)) => match backup::last_backup(repo)? {
            Some(record) => {
                backup::restore_from_backup(repo, &record)?;
                println!("Restored backup from {}", record.timestamp);
            }
            None => bail!("No backup stored to restore from"),
        },
        _ => {}
    }
    Ok(())
}
