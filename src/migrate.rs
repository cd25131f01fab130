// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::{CURRENT_APP_VERSION, Repository};
use anyhow::{Context, Result};
use std::cmp::Ordering;

/// One-way transform over stored state. Steps run at-least-once: a failure
/// leaves the stored version unchanged and the step re-runs next launch,
/// so every step must tolerate seeing its own output.
pub struct Migration {
    pub target_version: &'static str,
    pub apply: fn(&Repository) -> Result<()>,
}

/// Split on `.` and compare numeric parts left to right; missing trailing
/// parts count as zero. `None` when either version has a non-numeric part.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let pa = parse_version(a)?;
    let pb = parse_version(b)?;
    for i in 0..pa.len().max(pb.len()) {
        let x = pa.get(i).copied().unwrap_or(0);
        let y = pb.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => {}
            other => return Some(other),
        }
    }
    Some(Ordering::Equal)
}

fn parse_version(v: &str) -> Option<Vec<u64>> {
    v.split('.').map(|p| p.parse::<u64>().ok()).collect()
}

/// Ordered list of shipped migrations, ascending by target version.
pub fn builtin_migrations() -> Vec<Migration> {
    vec![
        Migration {
            target_version: "1.0.1",
            apply: |repo| {
                // Backfill the attachments field on pre-1.0.1 transactions.
                if let Some(mut transactions) = repo.transactions()? {
                    for t in &mut transactions {
                        if t.attachments.is_none() {
                            t.attachments = Some(Vec::new());
                        }
                    }
                    repo.save_transactions(&transactions)?;
                }
                Ok(())
            },
        },
        Migration {
            target_version: "1.1.0",
            apply: |repo| {
                // Rewrite settings merged over the current default set.
                // Deserialization already fills missing fields from
                // AppSettings::default(); saving materializes the full
                // record for older partial objects.
                if let Some(settings) = repo.stored_settings()? {
                    repo.save_settings(&settings)?;
                }
                Ok(())
            },
        },
    ]
}

/// Run all pending migrations against `repo`, then stamp the current
/// version. Called once at load time, before any other repository read.
pub fn run(repo: &Repository) -> Result<()> {
    run_with(repo, CURRENT_APP_VERSION, &builtin_migrations())
}

pub fn run_with(repo: &Repository, current: &str, migrations: &[Migration]) -> Result<()> {
    let stored = match repo.stored_app_version()? {
        Some(v) => v,
        None => {
            // Fresh store: stamp and skip.
            repo.set_app_version(current)?;
            return Ok(());
        }
    };

    let cmp = match compare_versions(&stored, current) {
        Some(c) => c,
        None => {
            // A malformed stored version means the version key itself is
            // untrustworthy. Reset to current and skip, the only choice
            // that cannot double-apply a step.
            tracing::warn!(stored = %stored, "malformed stored version, resetting");
            repo.set_app_version(current)?;
            return Ok(());
        }
    };

    if cmp != Ordering::Less {
        return Ok(());
    }

    for migration in migrations {
        if compare_versions(&stored, migration.target_version) == Some(Ordering::Less) {
            tracing::info!(version = migration.target_version, "running migration");
            (migration.apply)(repo)
                .with_context(|| format!("Migration to {} failed", migration.target_version))?;
        }
    }

    repo.set_app_version(current)?;
    Ok(())
}
