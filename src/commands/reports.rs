// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::commands::transactions::parse_kind;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use serde_json::json;

pub fn handle(ledger: &Ledger, symbol: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, symbol, sub)?,
        Some(("categories", sub)) => categories(ledger, symbol, sub)?,
        Some(("trends", sub)) => trends(ledger, symbol, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(ledger: &Ledger, symbol: &str, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let txns = ledger.transactions();
    let biz = ledger.current_business_id();

    let report = json!({
        "business": ledger.current_business().map(|b| b.name.clone()),
        "todayIncome": analytics::today_income(txns, biz, today),
        "todayExpense": analytics::today_expense(txns, biz, today),
        "monthlyIncome": analytics::monthly_income(txns, biz, today),
        "monthlyExpense": analytics::monthly_expense(txns, biz, today),
        "yearlyIncome": analytics::yearly_income(txns, biz, today),
        "yearlyExpense": analytics::yearly_expense(txns, biz, today),
        "totalBalance": analytics::total_balance(txns, biz),
        "pendingCount": analytics::pending_count(txns, biz),
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows = vec![
            vec![
                "Today".into(),
                fmt_money(&analytics::today_income(txns, biz, today), symbol),
                fmt_money(&analytics::today_expense(txns, biz, today), symbol),
            ],
            vec![
                "This month".into(),
                fmt_money(&analytics::monthly_income(txns, biz, today), symbol),
                fmt_money(&analytics::monthly_expense(txns, biz, today), symbol),
            ],
            vec![
                "This year".into(),
                fmt_money(&analytics::yearly_income(txns, biz, today), symbol),
                fmt_money(&analytics::yearly_expense(txns, biz, today), symbol),
            ],
        ];
        println!("{}", pretty_table(&["Period", "Income", "Expense"], rows));
        println!(
            "Balance: {}   Pending: {}",
            fmt_money(&analytics::total_balance(txns, biz), symbol),
            analytics::pending_count(txns, biz)
        );
    }
    Ok(())
}

fn categories(ledger: &Ledger, symbol: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let today = Local::now().date_naive();
    let totals = analytics::category_totals(
        ledger.transactions(),
        ledger.current_business_id(),
        kind,
        today,
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let rows: Vec<Vec<String>> = totals
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total, symbol)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    Ok(())
}

fn trends(ledger: &Ledger, symbol: &str, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let points =
        analytics::monthly_trends(ledger.transactions(), ledger.current_business_id(), today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        let rows: Vec<Vec<String>> = points
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_money(&p.income, symbol),
                    fmt_money(&p.expense, symbol),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
