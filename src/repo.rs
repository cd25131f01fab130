// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AppSettings, BackupData, Business, Transaction};
use crate::store::Store;
use anyhow::Result;

/// Version stamped into new stores and backups; drives the migration run.
pub const CURRENT_APP_VERSION: &str = "1.0.0";

pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const BUSINESSES: &str = "businesses";
    pub const CURRENT_BUSINESS: &str = "current_business";
    pub const SETTINGS: &str = "settings";
    pub const APP_VERSION: &str = "app_version";
    pub const BACKUP: &str = "backup";
    pub const FIRST_LAUNCH: &str = "first_launch";
    pub const PIN_CODE: &str = "pin_code";
    pub const BIOMETRIC_ENABLED: &str = "biometric_enabled";
}

/// Typed accessors over the store, one fixed key per entity. Every save is
/// a whole-value overwrite; there are no delta writes.
pub struct Repository {
    store: Store,
}

impl Repository {
    pub fn new(store: Store) -> Repository {
        Repository { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.store.set(keys::TRANSACTIONS, &transactions)
    }

    pub fn transactions(&self) -> Result<Option<Vec<Transaction>>> {
        self.store.get(keys::TRANSACTIONS)
    }

    pub fn save_businesses(&self, businesses: &[Business]) -> Result<()> {
        self.store.set(keys::BUSINESSES, &businesses)
    }

    pub fn businesses(&self) -> Result<Option<Vec<Business>>> {
        self.store.get(keys::BUSINESSES)
    }

    pub fn save_current_business(&self, business_id: &str) -> Result<()> {
        self.store.set(keys::CURRENT_BUSINESS, &business_id)
    }

    pub fn current_business(&self) -> Result<Option<String>> {
        self.store.get(keys::CURRENT_BUSINESS)
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.store.set(keys::SETTINGS, settings)
    }

    /// Always yields a complete record: a partial stored object merges over
    /// defaults during deserialization, an absent key yields the defaults.
    pub fn settings(&self) -> Result<AppSettings> {
        Ok(self.store.get(keys::SETTINGS)?.unwrap_or_default())
    }

    pub fn stored_settings(&self) -> Result<Option<AppSettings>> {
        self.store.get(keys::SETTINGS)
    }

    // PIN is stored as written. The source app kept it plaintext; that
    // contract is preserved here, see DESIGN.md.
    pub fn save_pin_code(&self, pin: &str) -> Result<()> {
        self.store.set(keys::PIN_CODE, &pin)
    }

    pub fn pin_code(&self) -> Result<Option<String>> {
        self.store.get(keys::PIN_CODE)
    }

    pub fn remove_pin_code(&self) -> Result<()> {
        self.store.remove(keys::PIN_CODE)
    }

    pub fn set_biometric_enabled(&self, enabled: bool) -> Result<()> {
        self.store.set(keys::BIOMETRIC_ENABLED, &enabled)
    }

    pub fn biometric_enabled(&self) -> Result<bool> {
        Ok(self
            .store
            .get(keys::BIOMETRIC_ENABLED)?
            .unwrap_or(false))
    }

    /// True iff the first-launch marker was never written.
    pub fn is_first_launch(&self) -> Result<bool> {
        Ok(self.store.get::<bool>(keys::FIRST_LAUNCH)?.is_none())
    }

    pub fn set_first_launch_complete(&self) -> Result<()> {
        self.store.set(keys::FIRST_LAUNCH, &false)
    }

    pub fn stored_app_version(&self) -> Result<Option<String>> {
        self.store.get(keys::APP_VERSION)
    }

    pub fn set_app_version(&self, version: &str) -> Result<()> {
        self.store.set(keys::APP_VERSION, &version)
    }

    pub fn save_backup(&self, backup: &BackupData) -> Result<()> {
        self.store.set(keys::BACKUP, backup)
    }

    pub fn backup(&self) -> Result<Option<BackupData>> {
        self.store.get(keys::BACKUP)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
