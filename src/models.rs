// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
        }
    }
}

/// A single income or expense entry. `date` is a calendar date so persisted
/// range filters compare correctly; `time` stays an HH:MM display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: TransactionStatus,
    pub business_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    /// Days between automatic backups.
    pub fn interval_days(self) -> i64 {
        match self {
            BackupFrequency::Daily => 1,
            BackupFrequency::Weekly => 7,
            BackupFrequency::Monthly => 30,
        }
    }
}

/// User preferences. Container-level `#[serde(default)]` merges a partial
/// stored record over the full default set, so every field is always
/// present after a read no matter which build wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub language: String,
    pub theme: String,
    pub currency: String,
    pub currency_symbol: String,
    pub notifications: bool,
    pub daily_reminder: bool,
    pub reminder_time: String,
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
    pub last_backup_date: Option<DateTime<Utc>>,
    pub pin_enabled: bool,
    pub biometric_enabled: bool,
    pub show_onboarding: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            language: "en".into(),
            theme: "light".into(),
            currency: "BDT".into(),
            currency_symbol: "\u{09f3}".into(),
            notifications: true,
            daily_reminder: false,
            reminder_time: "09:00".into(),
            auto_backup: true,
            backup_frequency: BackupFrequency::Weekly,
            last_backup_date: None,
            pin_enabled: false,
            biometric_enabled: false,
            show_onboarding: true,
        }
    }
}

/// Full point-in-time snapshot. Payload fields are optional: a backup
/// missing one of them restores partially, leaving the live entity alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub data: BackupPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub businesses: Option<Vec<Business>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_business_id: Option<String>,
}
