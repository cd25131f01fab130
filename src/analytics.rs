// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived metrics over the in-memory transaction collection. Everything
//! here is a pure function of `(transactions, business_id, today)`: queries
//! scope to the given business first (orphans from deleted businesses fall
//! out here), and monetary sums count completed transactions only.

use crate::models::{Transaction, TransactionKind, TransactionStatus};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum Period {
    Today,
    Month,
    Year,
}

/// Inclusive `[start, end]` of the period containing `today`.
pub fn period_range(today: NaiveDate, period: Period) -> (NaiveDate, NaiveDate) {
    match period {
        Period::Today => (today, today),
        Period::Month => (today.with_day(1).unwrap_or(today), today),
        Period::Year => (
            NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            today,
        ),
    }
}

fn completed_sum(
    transactions: &[Transaction],
    business_id: &str,
    kind: TransactionKind,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.business_id == business_id && t.kind == kind)
        .filter(|t| t.status == TransactionStatus::Completed)
        .filter(|t| match range {
            Some((start, end)) => t.date >= start && t.date <= end,
            None => true,
        })
        .map(|t| t.amount)
        .sum()
}

pub fn income_for(
    transactions: &[Transaction],
    business_id: &str,
    today: NaiveDate,
    period: Period,
) -> Decimal {
    let range = period_range(today, period);
    completed_sum(transactions, business_id, TransactionKind::Income, Some(range))
}

pub fn expense_for(
    transactions: &[Transaction],
    business_id: &str,
    today: NaiveDate,
    period: Period,
) -> Decimal {
    let range = period_range(today, period);
    completed_sum(transactions, business_id, TransactionKind::Expense, Some(range))
}

pub fn today_income(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    income_for(transactions, business_id, today, Period::Today)
}

pub fn today_expense(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    expense_for(transactions, business_id, today, Period::Today)
}

pub fn monthly_income(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    income_for(transactions, business_id, today, Period::Month)
}

pub fn monthly_expense(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    expense_for(transactions, business_id, today, Period::Month)
}

pub fn yearly_income(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    income_for(transactions, business_id, today, Period::Year)
}

pub fn yearly_expense(transactions: &[Transaction], business_id: &str, today: NaiveDate) -> Decimal {
    expense_for(transactions, business_id, today, Period::Year)
}

/// Lifetime completed income minus lifetime completed expense, unscoped by
/// date.
pub fn total_balance(transactions: &[Transaction], business_id: &str) -> Decimal {
    let income = completed_sum(transactions, business_id, TransactionKind::Income, None);
    let expense = completed_sum(transactions, business_id, TransactionKind::Expense, None);
    income - expense
}

/// Pending transactions are excluded from every monetary aggregate and
/// counted here instead, regardless of date.
pub fn pending_count(transactions: &[Transaction], business_id: &str) -> usize {
    transactions
        .iter()
        .filter(|t| t.business_id == business_id && t.status == TransactionStatus::Pending)
        .count()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Current-month completed totals per category for one kind, descending by
/// total. The sort is stable, so equal totals keep first-encounter order.
pub fn category_totals(
    transactions: &[Transaction],
    business_id: &str,
    kind: TransactionKind,
    today: NaiveDate,
) -> Vec<CategoryTotal> {
    let (start, end) = period_range(today, Period::Month);
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for t in transactions {
        if t.business_id != business_id
            || t.kind != kind
            || t.status != TransactionStatus::Completed
            || t.date < start
            || t.date > end
        {
            continue;
        }
        match totals.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.total += t.amount,
            None => totals.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthPoint {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

fn shift_month(today: NaiveDate, back: u32) -> NaiveDate {
    let total = today.year() * 12 + today.month0() as i32 - back as i32;
    let (y, m0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(y, m0 + 1, 1).unwrap_or(today)
}

fn month_end(start: NaiveDate) -> NaiveDate {
    let (y, m) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(start)
}

/// The trailing six calendar months including the current one, oldest
/// first, labeled by abbreviated month name. Always exactly six points;
/// months with no transactions are zero-filled.
pub fn monthly_trends(
    transactions: &[Transaction],
    business_id: &str,
    today: NaiveDate,
) -> Vec<MonthPoint> {
    (0..6u32)
        .rev()
        .map(|back| {
            let start = shift_month(today, back);
            let end = month_end(start);
            let range = Some((start, end));
            MonthPoint {
                month: start.format("%b").to_string(),
                income: completed_sum(transactions, business_id, TransactionKind::Income, range),
                expense: completed_sum(transactions, business_id, TransactionKind::Expense, range),
            }
        })
        .collect()
}

/// Optional filters, AND-combined. `search` is evaluated last: once the
/// earlier filters pass, a non-empty search decides membership outright by
/// case-insensitive substring match on description or category.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilters {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub status: Option<TransactionStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
}

pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    business_id: &str,
    filters: &TransactionFilters,
) -> Vec<&'a Transaction> {
    let search = filters
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase());
    transactions
        .iter()
        .filter(|t| {
            if t.business_id != business_id {
                return false;
            }
            if let Some(kind) = filters.kind {
                if t.kind != kind {
                    return false;
                }
            }
            if let Some(category) = &filters.category {
                if &t.category != category {
                    return false;
                }
            }
            if let Some(status) = filters.status {
                if t.status != status {
                    return false;
                }
            }
            if let Some(from) = filters.date_from {
                if t.date < from {
                    return false;
                }
            }
            if let Some(to) = filters.date_to {
                if t.date > to {
                    return false;
                }
            }
            if let Some(needle) = &search {
                return t.description.to_lowercase().contains(needle)
                    || t.category.to_lowercase().contains(needle);
            }
            true
        })
        .collect()
}
