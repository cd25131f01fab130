// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::analytics::{
    self, Period, TransactionFilters, category_totals, filter_transactions, monthly_trends,
    pending_count, period_range, total_balance,
};
use tallybook::models::{Transaction, TransactionKind, TransactionStatus};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn txn(
    kind: TransactionKind,
    amount: i64,
    category: &str,
    description: &str,
    day: &str,
    status: TransactionStatus,
    business_id: &str,
) -> Transaction {
    Transaction {
        id: format!("txn_{}_{}", day, amount),
        kind,
        amount: dec(amount),
        category: category.into(),
        description: description.into(),
        date: date(day),
        time: "10:00".into(),
        notes: None,
        status,
        business_id: business_id.into(),
        attachments: Some(vec![]),
        created_at: None,
        updated_at: None,
    }
}

const TODAY: &str = "2025-08-15";

use TransactionKind::{Expense, Income};
use TransactionStatus::{Completed, Pending};

#[test]
fn period_ranges_contain_today() {
    let today = date(TODAY);
    assert_eq!(period_range(today, Period::Today), (today, today));
    assert_eq!(
        period_range(today, Period::Month),
        (date("2025-08-01"), today)
    );
    assert_eq!(
        period_range(today, Period::Year),
        (date("2025-01-01"), today)
    );
}

#[test]
fn today_scenario_income_expense_balance() {
    let txns = vec![
        txn(Income, 1000, "sales", "Product Sales", TODAY, Completed, "b1"),
        txn(Expense, 400, "rent", "Office Rent", TODAY, Completed, "b1"),
    ];
    let today = date(TODAY);
    assert_eq!(analytics::today_income(&txns, "b1", today), dec(1000));
    assert_eq!(analytics::today_expense(&txns, "b1", today), dec(400));
    assert_eq!(total_balance(&txns, "b1"), dec(600));
}

#[test]
fn balance_is_lifetime_and_ignores_dates() {
    let txns = vec![
        txn(Income, 500, "sales", "Old sale", "2019-01-01", Completed, "b1"),
        txn(Expense, 200, "rent", "Old rent", "2020-06-30", Completed, "b1"),
        txn(Income, 100, "sales", "Recent", TODAY, Completed, "b1"),
    ];
    assert_eq!(total_balance(&txns, "b1"), dec(400));
}

#[test]
fn pending_excluded_from_sums_but_counted() {
    let txns = vec![
        txn(Income, 1000, "sales", "Done", TODAY, Completed, "b1"),
        txn(Income, 999, "sales", "Waiting", TODAY, Pending, "b1"),
        txn(Expense, 50, "rent", "Waiting too", "2024-01-01", Pending, "b1"),
    ];
    let today = date(TODAY);
    assert_eq!(analytics::today_income(&txns, "b1", today), dec(1000));
    assert_eq!(total_balance(&txns, "b1"), dec(1000));
    assert_eq!(pending_count(&txns, "b1"), 2);
}

#[test]
fn other_business_and_orphans_are_invisible() {
    let txns = vec![
        txn(Income, 1000, "sales", "Mine", TODAY, Completed, "b1"),
        txn(Income, 500, "sales", "Other biz", TODAY, Completed, "b2"),
        txn(Income, 250, "sales", "Orphan", TODAY, Completed, "deleted_biz"),
    ];
    let today = date(TODAY);
    assert_eq!(analytics::today_income(&txns, "b1", today), dec(1000));
    assert_eq!(pending_count(&txns, "b1"), 0);
    assert_eq!(
        filter_transactions(&txns, "b1", &TransactionFilters::default()).len(),
        1
    );
}

#[test]
fn monthly_and_yearly_sums_respect_boundaries() {
    let txns = vec![
        txn(Income, 100, "sales", "In month", "2025-08-01", Completed, "b1"),
        txn(Income, 200, "sales", "Prev month", "2025-07-31", Completed, "b1"),
        txn(Income, 400, "sales", "Prev year", "2024-12-31", Completed, "b1"),
    ];
    let today = date(TODAY);
    assert_eq!(analytics::monthly_income(&txns, "b1", today), dec(100));
    assert_eq!(analytics::yearly_income(&txns, "b1", today), dec(300));
}

#[test]
fn trends_always_six_points_zero_filled() {
    let points = monthly_trends(&[], "b1", date(TODAY));
    assert_eq!(points.len(), 6);
    let labels: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(labels, ["Mar", "Apr", "May", "Jun", "Jul", "Aug"]);
    for p in &points {
        assert_eq!(p.income, dec(0));
        assert_eq!(p.expense, dec(0));
    }
}

#[test]
fn trends_bucket_by_calendar_month_oldest_first() {
    let txns = vec![
        txn(Income, 100, "sales", "March", "2025-03-01", Completed, "b1"),
        txn(Income, 50, "sales", "March end", "2025-03-31", Completed, "b1"),
        txn(Expense, 70, "rent", "July", "2025-07-10", Completed, "b1"),
        txn(Income, 30, "sales", "Aug after today", "2025-08-29", Completed, "b1"),
        txn(Income, 999, "sales", "Too old", "2025-02-28", Completed, "b1"),
    ];
    let points = monthly_trends(&txns, "b1", date(TODAY));
    assert_eq!(points[0].month, "Mar");
    assert_eq!(points[0].income, dec(150));
    assert_eq!(points[4].month, "Jul");
    assert_eq!(points[4].expense, dec(70));
    // Current month covers its full calendar span.
    assert_eq!(points[5].income, dec(30));
}

#[test]
fn trends_cross_year_boundary() {
    let points = monthly_trends(&[], "b1", date("2025-02-10"));
    let labels: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(labels, ["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
}

#[test]
fn category_totals_descending_with_stable_ties() {
    let txns = vec![
        txn(Expense, 100, "utilities", "Power", "2025-08-02", Completed, "b1"),
        txn(Expense, 200, "rent", "Office", "2025-08-03", Completed, "b1"),
        txn(Expense, 100, "transport", "Fuel", "2025-08-04", Completed, "b1"),
        txn(Expense, 40, "rent", "Storage", "2025-08-05", Completed, "b1"),
    ];
    let totals = category_totals(&txns, "b1", Expense, date(TODAY));
    let names: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
    // rent 240, then the 100/100 tie in encounter order.
    assert_eq!(names, ["rent", "utilities", "transport"]);
    assert_eq!(totals[0].total, dec(240));
}

#[test]
fn category_totals_scoped_to_current_month_and_completed() {
    let txns = vec![
        txn(Expense, 100, "rent", "This month", "2025-08-02", Completed, "b1"),
        txn(Expense, 900, "rent", "Last month", "2025-07-02", Completed, "b1"),
        txn(Expense, 500, "rent", "Pending", "2025-08-03", Pending, "b1"),
        txn(Income, 50, "sales", "Wrong kind", "2025-08-04", Completed, "b1"),
    ];
    let totals = category_totals(&txns, "b1", Expense, date(TODAY));
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].category, "rent");
    assert_eq!(totals[0].total, dec(100));
}

#[test]
fn search_matches_description_or_category() {
    let txns = vec![
        txn(Expense, 400, "rent", "Office Rent Payment", TODAY, Completed, "b1"),
        txn(Income, 900, "salary", "Salary", TODAY, Completed, "b1"),
    ];
    let filters = TransactionFilters {
        search: Some("rent".into()),
        ..Default::default()
    };
    let found = filter_transactions(&txns, "b1", &filters);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "Office Rent Payment");
}

#[test]
fn search_runs_after_other_filters() {
    let txns = vec![
        txn(Expense, 400, "rent", "Office Rent Payment", TODAY, Completed, "b1"),
        txn(Income, 100, "other", "Rental Income", TODAY, Completed, "b1"),
    ];
    // Both match "rent" textually, but the type filter is applied first.
    let filters = TransactionFilters {
        kind: Some(Income),
        search: Some("rent".into()),
        ..Default::default()
    };
    let found = filter_transactions(&txns, "b1", &filters);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "Rental Income");
}

#[test]
fn empty_search_is_ignored() {
    let txns = vec![txn(Income, 10, "sales", "Anything", TODAY, Completed, "b1")];
    let filters = TransactionFilters {
        search: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(filter_transactions(&txns, "b1", &filters).len(), 1);
}

#[test]
fn filters_and_combine() {
    let txns = vec![
        txn(Expense, 10, "rent", "A", "2025-08-01", Completed, "b1"),
        txn(Expense, 20, "rent", "B", "2025-08-10", Pending, "b1"),
        txn(Expense, 30, "food", "C", "2025-08-10", Completed, "b1"),
        txn(Expense, 40, "rent", "D", "2025-07-01", Completed, "b1"),
    ];
    let filters = TransactionFilters {
        kind: Some(Expense),
        category: Some("rent".into()),
        status: Some(Completed),
        date_from: Some(date("2025-08-01")),
        date_to: Some(date("2025-08-31")),
        ..Default::default()
    };
    let found = filter_transactions(&txns, "b1", &filters);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "A");
}
