// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;

/// Data integrity report: orphaned transactions (business deleted), a
/// dangling current-business pointer, and non-positive amounts that predate
/// validation.
pub fn handle(ledger: &Ledger) -> Result<()> {
    let mut rows = Vec::new();

    for t in ledger.transactions() {
        if !ledger.businesses().iter().any(|b| b.id == t.business_id) {
            rows.push(vec![
                "orphaned_transaction".into(),
                format!("{} -> {}", t.id, t.business_id),
            ]);
        }
        if t.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("{} ({})", t.id, t.amount),
            ]);
        }
    }

    if ledger.current_business().is_none() {
        rows.push(vec![
            "dangling_current_business".into(),
            ledger.current_business_id().to_string(),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
