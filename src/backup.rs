// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BackupData, BackupPayload};
use crate::repo::{CURRENT_APP_VERSION, Repository};
use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup text is not a valid backup: {0}")]
    InvalidFormat(String),
}

/// Snapshot all four entities into the single backup slot, overwriting any
/// previous backup, and return the record. Missing entities default to
/// empty collections / default settings.
pub fn create_backup(repo: &Repository) -> Result<BackupData> {
    let backup = BackupData {
        version: CURRENT_APP_VERSION.to_string(),
        timestamp: Utc::now(),
        data: BackupPayload {
            transactions: Some(repo.transactions()?.unwrap_or_default()),
            businesses: Some(repo.businesses()?.unwrap_or_default()),
            settings: Some(repo.settings()?),
            current_business_id: Some(repo.current_business()?.unwrap_or_default()),
        },
    };
    repo.save_backup(&backup)?;
    tracing::info!(version = %backup.version, "backup created");
    Ok(backup)
}

pub fn last_backup(repo: &Repository) -> Result<Option<BackupData>> {
    repo.backup()
}

/// Overwrite each live entity for which the backup carries a value. Absent
/// fields leave current state untouched; an empty current-business id is
/// also skipped (it never points anywhere useful).
pub fn restore_from_backup(repo: &Repository, backup: &BackupData) -> Result<()> {
    if let Some(transactions) = &backup.data.transactions {
        repo.save_transactions(transactions)?;
    }
    if let Some(businesses) = &backup.data.businesses {
        repo.save_businesses(businesses)?;
    }
    if let Some(settings) = &backup.data.settings {
        repo.save_settings(settings)?;
    }
    if let Some(id) = &backup.data.current_business_id {
        if !id.is_empty() {
            repo.save_current_business(id)?;
        }
    }
    Ok(())
}

/// Pretty-printed JSON of a freshly created backup (not the stored slot).
pub fn export_json(repo: &Repository) -> Result<String> {
    let backup = create_backup(repo)?;
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Parse and restore exported backup text. Fails closed: malformed JSON or
/// a record without both `version` and `data` is rejected before any write.
pub fn import_json(repo: &Repository, text: &str) -> Result<()> {
    let backup: BackupData = serde_json::from_str(text)
        .map_err(|e| BackupError::InvalidFormat(e.to_string()))?;
    if backup.version.is_empty() {
        return Err(BackupError::InvalidFormat("missing version".into()).into());
    }
    restore_from_backup(repo, &backup)
}

/// Startup auto-backup check. Backs up when enabled and the configured
/// interval has elapsed since `last_backup_date` (or when never backed up),
/// then stamps the settings. Returns whether a backup was taken.
pub fn check_auto_backup(repo: &Repository, now: DateTime<Utc>) -> Result<bool> {
    let mut settings = repo.settings()?;
    if !settings.auto_backup {
        return Ok(false);
    }

    let due = match settings.last_backup_date {
        None => true,
        Some(last) => {
            let days_since = (now - last).num_days();
            days_since >= settings.backup_frequency.interval_days()
        }
    };
    if !due {
        return Ok(false);
    }

    create_backup(repo)?;
    settings.last_backup_date = Some(now);
    repo.save_settings(&settings)?;
    tracing::info!("auto backup completed");
    Ok(true)
}
