//! Durable key-value storage for JSON values.
//!
//! Reads never fail from the caller's point of view: an absent key, an
//! unavailable medium or an undecodable value all yield the caller's default.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub trait KvStore {
    /// Raw stored text for `key`, if any.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Store every entry, all or nothing where the medium allows it.
    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()>;

    fn write(&mut self, key: &str, value: String) -> AppResult<()> {
        self.write_all(&[(key, value)])
    }

    /// Record an operation in the store's journal, if it keeps one.
    fn journal(&self, _operation: &str, _target: &str, _message: &str) {}

    fn describe(&self) -> String;
}

/// Read `key` and decode it, falling back to `default` on any failure.
pub fn get<T: DeserializeOwned>(store: &dyn KvStore, key: &str, default: T) -> T {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            log::warn!("read of '{key}' failed, using default: {e}");
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("stored value for '{key}' is not decodable, using default: {e}");
            default
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn set<T: Serialize + ?Sized>(store: &mut dyn KvStore, key: &str, value: &T) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.write(key, json)
}

// ---------------------------
// SQLite
// ---------------------------

pub struct SqliteStore {
    pool: DbPool,
    label: String,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
            label: path.to_string(),
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory()?,
            label: ":memory:".to_string(),
        })
    }
}

impl KvStore for SqliteStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt.query_row([key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        let tx = self.pool.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?;
            for (key, value) in entries {
                stmt.execute(params![key, value, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn journal(&self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.pool.conn, operation, target, message);
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.label)
    }
}

// ---------------------------
// In-process
// ---------------------------

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        for (key, value) in entries {
            self.values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ---------------------------
// No medium
// ---------------------------

/// Storage that is not there: reads are absent, writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl KvStore for NullStore {
    fn read(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        log::trace!("dropping {} writes, no storage medium", entries.len());
        Ok(())
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}
