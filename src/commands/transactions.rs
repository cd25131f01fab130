// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, TransactionFilters};
use crate::ledger::{Ledger, NewTransaction, TransactionPatch};
use crate::models::{Transaction, TransactionKind, TransactionStatus};
use crate::repo::Repository;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use chrono::Local;

pub fn handle(repo: &Repository, ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("update", sub)) => update(repo, ledger, sub)?,
        Some(("delete", sub)) => delete(repo, ledger, sub)?,
        Some(("export", sub)) => export(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn parse_kind(s: &str) -> Result<TransactionKind> {
    match s {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => bail!("Invalid type '{}', expected income or expense", other),
    }
}

pub fn parse_status(s: &str) -> Result<TransactionStatus> {
    match s {
        "completed" => Ok(TransactionStatus::Completed),
        "pending" => Ok(TransactionStatus::Pending),
        other => bail!("Invalid status '{}', expected completed or pending", other),
    }
}

fn add(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let time = sub
        .get_one::<String>("time")
        .cloned()
        .unwrap_or_else(|| Local::now().format("%H:%M").to_string());
    let status = if sub.get_flag("pending") {
        TransactionStatus::Pending
    } else {
        TransactionStatus::Completed
    };

    let transaction = ledger.add_transaction(
        repo,
        NewTransaction {
            kind,
            amount,
            category: sub.get_one::<String>("category").unwrap().clone(),
            description: sub.get_one::<String>("description").unwrap().clone(),
            date,
            time,
            notes: sub.get_one::<String>("notes").cloned(),
            status,
            business_id: ledger.current_business_id().to_string(),
        },
    )?;
    println!(
        "Recorded {} {} '{}' on {} ({})",
        transaction.kind, transaction.amount, transaction.description, transaction.date,
        transaction.id
    );
    Ok(())
}

/// Build the filter set from CLI flags; shared with tests.
pub fn filters_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilters> {
    Ok(TransactionFilters {
        kind: sub
            .get_one::<String>("type")
            .map(|s| parse_kind(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
        date_from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        date_to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
        search: sub.get_one::<String>("search").cloned(),
    })
}

fn row(t: &Transaction) -> Vec<String> {
    vec![
        t.id.clone(),
        t.date.to_string(),
        t.kind.to_string(),
        t.amount.to_string(),
        t.category.clone(),
        t.description.clone(),
        t.status.to_string(),
    ]
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let filters = filters_from_args(sub)?;
    let matches = analytics::filter_transactions(
        ledger.transactions(),
        ledger.current_business_id(),
        &filters,
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &matches)? {
        let rows: Vec<Vec<String>> = matches.into_iter().map(row).collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Category", "Description", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = TransactionPatch {
        kind: sub
            .get_one::<String>("type")
            .map(|s| parse_kind(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        time: sub.get_one::<String>("time").cloned(),
        notes: sub.get_one::<String>("notes").cloned(),
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
    };
    ledger.update_transaction(repo, id, patch)?;
    println!("Updated {}", id);
    Ok(())
}

fn delete(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    ledger.delete_transaction(repo, id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn export(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let business_id = ledger.current_business_id();
    let items: Vec<&Transaction> = ledger
        .transactions()
        .iter()
        .filter(|t| t.business_id == business_id)
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "time",
                "type",
                "amount",
                "category",
                "description",
                "status",
                "notes",
            ])?;
            for t in &items {
                wtr.write_record([
                    t.id.as_str(),
                    &t.date.to_string(),
                    t.time.as_str(),
                    &t.kind.to_string(),
                    &t.amount.to_string(),
                    t.category.as_str(),
                    t.description.as_str(),
                    &t.status.to_string(),
                    t.notes.as_deref().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            bail!("Unknown export format '{}', expected csv or json", fmt);
        }
    }
    println!("Exported {} transactions to {}", items.len(), out);
    Ok(())
}
