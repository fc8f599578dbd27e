//! Store module - key-value storage for JSON blobs
//!
//! Every blob (habit log, profile, goals, plans) lives under a well-known string
//! key. Writers replace the whole blob; there is no partial update.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

pub const HABIT_LOG_KEY: &str = "habitLog";
pub const PROFILE_KEY: &str = "profile";
pub const GOALS_KEY: &str = "goals";
pub const WEEKLY_PLAN_KEY: &str = "weeklyPlan";
pub const WEEKLY_TRACKER_KEY: &str = "weeklyTracker";
pub const WORKOUT_PLANS_KEY: &str = "workoutPlans";

/// Persistent string-to-JSON store
pub trait LogStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create store
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Throwaway store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl LogStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

/// In-memory store
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

/// Read a key as raw JSON; store failures and corrupt JSON become `Null`
pub fn load_value<S: LogStore + ?Sized>(store: &S, key: &str) -> Value {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Corrupt JSON under '{}': {}", key, e);
                Value::Null
            }
        },
        Ok(None) => {
            debug!("No value stored under '{}'", key);
            Value::Null
        }
        Err(e) => {
            error!("Storage load error for '{}': {}", key, e);
            Value::Null
        }
    }
}

/// Read and deserialize a key, falling back to `T::default()`
pub fn load_or_default<S, T>(store: &S, key: &str) -> T
where
    S: LogStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let value = load_value(store, key);
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        error!("Unexpected shape under '{}': {}", key, e);
        T::default()
    })
}

/// Read and deserialize a key for a read-modify-write.
///
/// A missing key is `T::default()`; unreadable or corrupt data is an error
/// so the caller never overwrites what it could not read.
pub fn load_for_update<S, T>(store: &S, key: &str) -> Result<T>
where
    S: LogStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).with_context(|| format!("unreadable data under '{}'", key)),
        None => Ok(T::default()),
    }
}

/// Serialize and write a key
pub fn save<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: LogStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
