// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::repo::Repository;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(repo: &Repository, ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("use", sub)) => switch(repo, ledger, sub)?,
        Some(("delete", sub)) => delete(repo, ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let business = ledger.add_business(
        repo,
        sub.get_one::<String>("name").unwrap().clone(),
        sub.get_one::<String>("owner").unwrap().clone(),
        sub.get_one::<String>("phone").unwrap().clone(),
        sub.get_one::<String>("email").unwrap().clone(),
        sub.get_one::<String>("address").unwrap().clone(),
    )?;
    println!("Added business '{}' ({})", business.name, business.id);
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ledger.businesses())? {
        let rows: Vec<Vec<String>> = ledger
            .businesses()
            .iter()
            .map(|b| {
                let active = if b.id == ledger.current_business_id() {
                    "*"
                } else {
                    ""
                };
                vec![
                    active.into(),
                    b.id.clone(),
                    b.name.clone(),
                    b.owner_name.clone(),
                    b.phone.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Id", "Name", "Owner", "Phone"], rows));
    }
    Ok(())
}

fn switch(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    ledger.set_current_business(repo, id)?;
    println!("Active business is now {}", id);
    Ok(())
}

fn delete(repo: &Repository, ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    ledger.delete_business(repo, id)?;
    println!(
        "Deleted business {} (active: {})",
        id,
        ledger.current_business_id()
    );
    Ok(())
}
