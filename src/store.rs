// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode value for key '{0}'")]
    Encode(String, #[source] serde_json::Error),
    #[error("failed to write key '{0}'")]
    Write(String, #[source] rusqlite::Error),
}

pub fn store_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

/// JSON key-value store over a single sqlite table. Writes are atomic per
/// key; there is no transaction spanning multiple keys.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_or_init() -> Result<Store> {
        Store::open_at(&store_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Store> {
        let conn =
            Connection::open(path).with_context(|| format!("Open store at {}", path.display()))?;
        Store::init(conn)
    }

    pub fn open_in_memory() -> Result<Store> {
        Store::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Store> {
        conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
        )?;
        Ok(Store { conn })
    }

    /// Serialize `value` and write it under `key`, replacing any prior
    /// value. Serialization or write failure propagates as `StoreError`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::Encode(key.to_string(), e))?;
        self.conn
            .execute(
                "INSERT INTO kv(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, json],
            )
            .map_err(|e| StoreError::Write(key.to_string(), e))?;
        Ok(())
    }

    /// Read and deserialize the value at `key`. Absent keys and unreadable
    /// values both yield `None`; read failures are logged, never raised, so
    /// a corrupt entry behaves like one that was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = match self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
        {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, treating as absent");
                return Ok(None);
            }
        };
        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(v) => Ok(Some(v)),
                Err(e) => {
                    tracing::warn!(key, error = %e, "stored value undecodable, treating as absent");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Delete `key`; no-op when absent.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }

    /// Erase every key in this application's namespace. Other tables in a
    /// shared database file are left alone.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for k in rows {
            out.push(k?);
        }
        Ok(out)
    }
}
