// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tallybook::backup::{
    check_auto_backup, create_backup, export_json, import_json, last_backup, restore_from_backup,
};
use tallybook::models::{
    AppSettings, BackupFrequency, Business, Transaction, TransactionKind, TransactionStatus,
};
use tallybook::repo::Repository;
use tallybook::store::Store;

fn setup() -> Repository {
    Repository::new(Store::open_in_memory().unwrap())
}

fn sample_transaction(id: &str) -> Transaction {
    Transaction {
        id: id.into(),
        kind: TransactionKind::Income,
        amount: Decimal::from(1500),
        category: "sales".into(),
        description: "Product Sales".into(),
        date: "2025-08-10".parse().unwrap(),
        time: "11:30".into(),
        notes: Some("invoice 7".into()),
        status: TransactionStatus::Completed,
        business_id: "b1".into(),
        attachments: Some(vec![]),
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

fn sample_business(id: &str, name: &str) -> Business {
    Business {
        id: id.into(),
        name: name.into(),
        owner_name: "Ahmed".into(),
        phone: "+880 1712-000000".into(),
        email: "info@example.com".into(),
        address: "Dhaka".into(),
        logo: None,
        created_at: Some(Utc::now()),
    }
}

fn seed(repo: &Repository) {
    repo.save_transactions(&[sample_transaction("t1"), sample_transaction("t2")])
        .unwrap();
    repo.save_businesses(&[sample_business("b1", "Trading Co.")])
        .unwrap();
    repo.save_current_business("b1").unwrap();
    let mut settings = AppSettings::default();
    settings.currency = "USD".into();
    repo.save_settings(&settings).unwrap();
}

#[test]
fn create_fills_slot_and_overwrites() {
    let repo = setup();
    seed(&repo);
    assert!(last_backup(&repo).unwrap().is_none());

    let first = create_backup(&repo).unwrap();
    assert_eq!(first.data.transactions.as_ref().unwrap().len(), 2);
    assert_eq!(first.data.current_business_id.as_deref(), Some("b1"));

    repo.save_transactions(&[sample_transaction("t3")]).unwrap();
    create_backup(&repo).unwrap();
    let stored = last_backup(&repo).unwrap().unwrap();
    // Single slot: only the latest snapshot survives.
    assert_eq!(stored.data.transactions.as_ref().unwrap().len(), 1);
}

#[test]
fn create_defaults_missing_entities() {
    let repo = setup();
    let backup = create_backup(&repo).unwrap();
    assert_eq!(backup.data.transactions.as_ref().unwrap().len(), 0);
    assert_eq!(backup.data.businesses.as_ref().unwrap().len(), 0);
    assert_eq!(backup.data.settings.as_ref().unwrap(), &AppSettings::default());
    assert_eq!(backup.data.current_business_id.as_deref(), Some(""));
}

#[test]
fn export_import_roundtrip() {
    let repo = setup();
    seed(&repo);
    let text = export_json(&repo).unwrap();
    // Wire format is the original camelCase shape.
    assert!(text.contains("\"businessId\""));
    assert!(text.contains("\"currentBusinessId\""));

    let other = setup();
    import_json(&other, &text).unwrap();
    let transactions = other.transactions().unwrap().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].amount, Decimal::from(1500));
    assert_eq!(other.businesses().unwrap().unwrap()[0].name, "Trading Co.");
    assert_eq!(other.current_business().unwrap().as_deref(), Some("b1"));
    assert_eq!(other.settings().unwrap().currency, "USD");
}

#[test]
fn import_rejects_malformed_text() {
    let repo = setup();
    assert!(import_json(&repo, "not json at all").is_err());
    // Nothing was written.
    assert!(repo.transactions().unwrap().is_none());
}

#[test]
fn import_requires_version_and_data() {
    let repo = setup();
    let no_data = r#"{"version":"1.0.0","timestamp":"2025-08-01T00:00:00Z"}"#;
    assert!(import_json(&repo, no_data).is_err());

    let no_version = r#"{"timestamp":"2025-08-01T00:00:00Z","data":{}}"#;
    assert!(import_json(&repo, no_version).is_err());

    let empty_version = r#"{"version":"","timestamp":"2025-08-01T00:00:00Z","data":{}}"#;
    assert!(import_json(&repo, empty_version).is_err());
}

#[test]
fn partial_import_leaves_absent_fields_untouched() {
    let repo = setup();
    seed(&repo);

    // Backup carries transactions and settings but no businesses key.
    let text = r#"{
        "version": "1.0.0",
        "timestamp": "2025-08-01T00:00:00Z",
        "data": {
            "transactions": [],
            "settings": { "currency": "EUR" }
        }
    }"#;
    import_json(&repo, text).unwrap();

    // Empty transactions list is a value: replaced.
    assert_eq!(repo.transactions().unwrap().unwrap().len(), 0);
    assert_eq!(repo.settings().unwrap().currency, "EUR");
    // Businesses untouched.
    assert_eq!(repo.businesses().unwrap().unwrap().len(), 1);
    assert_eq!(repo.current_business().unwrap().as_deref(), Some("b1"));
}

#[test]
fn restore_skips_empty_current_business_id() {
    let repo = setup();
    seed(&repo);
    let mut backup = create_backup(&repo).unwrap();
    backup.data.current_business_id = Some(String::new());
    repo.save_current_business("b9").unwrap();
    restore_from_backup(&repo, &backup).unwrap();
    assert_eq!(repo.current_business().unwrap().as_deref(), Some("b9"));
}

#[test]
fn auto_backup_runs_when_never_backed_up() {
    let repo = setup();
    seed(&repo);
    let now = Utc::now();
    assert!(check_auto_backup(&repo, now).unwrap());
    assert!(last_backup(&repo).unwrap().is_some());
    assert_eq!(repo.settings().unwrap().last_backup_date, Some(now));
}

#[test]
fn auto_backup_respects_frequency() {
    let repo = setup();
    seed(&repo);
    let now = Utc::now();

    let mut settings = repo.settings().unwrap();
    settings.backup_frequency = BackupFrequency::Weekly;
    settings.last_backup_date = Some(now - Duration::days(3));
    repo.save_settings(&settings).unwrap();
    assert!(!check_auto_backup(&repo, now).unwrap());

    let mut settings = repo.settings().unwrap();
    settings.last_backup_date = Some(now - Duration::days(8));
    repo.save_settings(&settings).unwrap();
    assert!(check_auto_backup(&repo, now).unwrap());
}

#[test]
fn auto_backup_disabled_never_runs() {
    let repo = setup();
    seed(&repo);
    let mut settings = repo.settings().unwrap();
    settings.auto_backup = false;
    settings.last_backup_date = None;
    repo.save_settings(&settings).unwrap();
    assert!(!check_auto_backup(&repo, Utc::now()).unwrap());
    assert!(last_backup(&repo).unwrap().is_none());
}
