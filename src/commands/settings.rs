// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::BackupFrequency;
use crate::repo::Repository;
use crate::utils::maybe_print_json;
use anyhow::{Result, bail};

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let settings = repo.settings()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
        }
        Some(("set", sub)) => set(repo, sub)?,
        Some(("pin", sub)) => pin(repo, sub)?,
        Some(("biometric", sub)) => biometric(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => bail!("Invalid boolean '{}'", other),
    }
}

fn set(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let key = sub.get_one::<String>("key").unwrap();
    let value = sub.get_one::<String>("value").unwrap();
    let mut settings = repo.settings()?;
    match key.as_str() {
        "language" => settings.language = value.clone(),
        "theme" => settings.theme = value.clone(),
        "currency" => settings.currency = value.clone(),
        "currency-symbol" => settings.currency_symbol = value.clone(),
        "notifications" => settings.notifications = parse_bool(value)?,
        "daily-reminder" => settings.daily_reminder = parse_bool(value)?,
        "reminder-time" => settings.reminder_time = value.clone(),
        "auto-backup" => settings.auto_backup = parse_bool(value)?,
        "backup-frequency" => {
            settings.backup_frequency = match value.as_str() {
                "daily" => BackupFrequency::Daily,
                "weekly" => BackupFrequency::Weekly,
                "monthly" => BackupFrequency::Monthly,
                other => bail!("Invalid frequency '{}', expected daily|weekly|monthly", other),
            }
        }
        other => bail!("Unknown settings key '{}'", other),
    }
    repo.save_settings(&settings)?;
    println!("{} = {}", key, value);
    Ok(())
}

fn pin(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    match sub.subcommand() {
        Some(("set", s)) => {
            let code = s.get_one::<String>("code").unwrap();
            if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
                bail!("PIN must be exactly 4 digits");
            }
            repo.save_pin_code(code)?;
            let mut settings = repo.settings()?;
            settings.pin_enabled = true;
            repo.save_settings(&settings)?;
            println!("PIN set");
        }
        Some(("clear", _)) => {
            repo.remove_pin_code()?;
            let mut settings = repo.settings()?;
            settings.pin_enabled = false;
            repo.save_settings(&settings)?;
            println!("PIN cleared");
        }
        _ => {}
    }
    Ok(())
}

fn biometric(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let enabled = parse_bool(sub.get_one::<String>("state").unwrap())?;
    repo.set_biometric_enabled(enabled)?;
    let mut settings = repo.settings()?;
    settings.biometric_enabled = enabled;
    repo.save_settings(&settings)?;
    println!("Biometric unlock {}", if enabled { "on" } else { "off" });
    Ok(())
}
