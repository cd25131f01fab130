// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::migrate;
use crate::models::{Business, Transaction, TransactionKind, TransactionStatus};
use crate::repo::Repository;
use crate::utils::next_id;
use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("cannot delete the last business")]
    LastBusiness,
    #[error("transaction amount must be positive")]
    NonPositiveAmount,
    #[error("no such transaction '{0}'")]
    UnknownTransaction(String),
    #[error("no such business '{0}'")]
    UnknownBusiness(String),
}

/// Input for a new transaction; id and timestamps are generated on add.
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub status: TransactionStatus,
    pub business_id: String,
}

/// Field-wise update; `None` leaves the field alone.
#[derive(Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub status: Option<TransactionStatus>,
}

#[derive(Default)]
pub struct BusinessPatch {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}

fn default_business() -> Business {
    Business {
        id: next_id("biz"),
        name: "My Business".into(),
        owner_name: String::new(),
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        logo: None,
        created_at: Some(Utc::now()),
    }
}

/// In-memory domain state with explicit write-through persistence: every
/// mutation saves the affected collection before returning, so persisted
/// state never trails the accepted change.
pub struct Ledger {
    transactions: Vec<Transaction>,
    businesses: Vec<Business>,
    current_business_id: String,
}

impl Ledger {
    /// Run pending migrations, then load domain state. A store with no
    /// businesses is seeded with one default business (the collection must
    /// never be empty); a missing or dangling current-business pointer is
    /// repaired to the first business.
    pub fn load(repo: &Repository) -> Result<Ledger> {
        migrate::run(repo)?;

        let transactions = repo.transactions()?.unwrap_or_default();

        let businesses = match repo.businesses()? {
            Some(list) if !list.is_empty() => list,
            _ => {
                let seeded = vec![default_business()];
                repo.save_businesses(&seeded)?;
                seeded
            }
        };

        let current_business_id = match repo.current_business()? {
            Some(id) if businesses.iter().any(|b| b.id == id) => id,
            _ => {
                let id = businesses[0].id.clone();
                repo.save_current_business(&id)?;
                id
            }
        };

        Ok(Ledger {
            transactions,
            businesses,
            current_business_id,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn current_business_id(&self) -> &str {
        &self.current_business_id
    }

    pub fn current_business(&self) -> Option<&Business> {
        self.businesses
            .iter()
            .find(|b| b.id == self.current_business_id)
    }

    pub fn add_transaction(&mut self, repo: &Repository, new: NewTransaction) -> Result<Transaction> {
        if new.amount <= Decimal::ZERO {
            bail!(LedgerError::NonPositiveAmount);
        }
        let now = Utc::now();
        let transaction = Transaction {
            id: next_id("txn"),
            kind: new.kind,
            amount: new.amount,
            category: new.category,
            description: new.description,
            date: new.date,
            time: new.time,
            notes: new.notes,
            status: new.status,
            business_id: new.business_id,
            attachments: Some(Vec::new()),
            created_at: Some(now),
            updated_at: Some(now),
        };
        // Newest first, matching list views.
        self.transactions.insert(0, transaction.clone());
        repo.save_transactions(&self.transactions)?;
        Ok(transaction)
    }

    pub fn update_transaction(
        &mut self,
        repo: &Repository,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<()> {
        let t = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::UnknownTransaction(id.to_string()))?;
        if let Some(amount) = patch.amount {
            if amount <= Decimal::ZERO {
                bail!(LedgerError::NonPositiveAmount);
            }
            t.amount = amount;
        }
        if let Some(kind) = patch.kind {
            t.kind = kind;
        }
        if let Some(category) = patch.category {
            t.category = category;
        }
        if let Some(description) = patch.description {
            t.description = description;
        }
        if let Some(date) = patch.date {
            t.date = date;
        }
        if let Some(time) = patch.time {
            t.time = time;
        }
        if let Some(notes) = patch.notes {
            t.notes = Some(notes);
        }
        if let Some(status) = patch.status {
            t.status = status;
        }
        t.updated_at = Some(Utc::now());
        repo.save_transactions(&self.transactions)?;
        Ok(())
    }

    pub fn delete_transaction(&mut self, repo: &Repository, id: &str) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            bail!(LedgerError::UnknownTransaction(id.to_string()));
        }
        repo.save_transactions(&self.transactions)?;
        Ok(())
    }

    pub fn add_business(
        &mut self,
        repo: &Repository,
        name: String,
        owner_name: String,
        phone: String,
        email: String,
        address: String,
    ) -> Result<Business> {
        let business = Business {
            id: next_id("biz"),
            name,
            owner_name,
            phone,
            email,
            address,
            logo: None,
            created_at: Some(Utc::now()),
        };
        self.businesses.push(business.clone());
        repo.save_businesses(&self.businesses)?;
        Ok(business)
    }

    pub fn update_business(
        &mut self,
        repo: &Repository,
        id: &str,
        patch: BusinessPatch,
    ) -> Result<()> {
        let b = self
            .businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| LedgerError::UnknownBusiness(id.to_string()))?;
        if let Some(name) = patch.name {
            b.name = name;
        }
        if let Some(owner_name) = patch.owner_name {
            b.owner_name = owner_name;
        }
        if let Some(phone) = patch.phone {
            b.phone = phone;
        }
        if let Some(email) = patch.email {
            b.email = email;
        }
        if let Some(address) = patch.address {
            b.address = address;
        }
        if let Some(logo) = patch.logo {
            b.logo = Some(logo);
        }
        repo.save_businesses(&self.businesses)?;
        Ok(())
    }

    /// Deleting the last business is rejected with the list unchanged.
    /// Deleting the active business moves the pointer to the first
    /// remaining one. Transactions of the deleted business are kept;
    /// aggregate queries scope by business id and never see them.
    pub fn delete_business(&mut self, repo: &Repository, id: &str) -> Result<()> {
        if self.businesses.len() <= 1 {
            bail!(LedgerError::LastBusiness);
        }
        let before = self.businesses.len();
        self.businesses.retain(|b| b.id != id);
        if self.businesses.len() == before {
            bail!(LedgerError::UnknownBusiness(id.to_string()));
        }
        repo.save_businesses(&self.businesses)?;
        if self.current_business_id == id {
            self.current_business_id = self.businesses[0].id.clone();
            repo.save_current_business(&self.current_business_id)?;
        }
        Ok(())
    }

    pub fn set_current_business(&mut self, repo: &Repository, id: &str) -> Result<()> {
        if !self.businesses.iter().any(|b| b.id == id) {
            bail!(LedgerError::UnknownBusiness(id.to_string()));
        }
        self.current_business_id = id.to_string();
        repo.save_current_business(id)?;
        Ok(())
    }

    /// Wipe the store and reseed a single default business.
    pub fn clear_all(&mut self, repo: &Repository) -> Result<()> {
        repo.clear()?;
        self.transactions.clear();
        self.businesses = vec![default_business()];
        self.current_business_id = self.businesses[0].id.clone();
        repo.save_businesses(&self.businesses)?;
        repo.save_current_business(&self.current_business_id)?;
        Ok(())
    }
}
