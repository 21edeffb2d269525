//! SQLite-backed key-value store for the board.
//!
//! The board is kept as three independently keyed JSON documents, one per
//! collection. Each document is read once at startup and rewritten in full
//! whenever its collection changes.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::*;
use crate::planner::{seed, PlannerState, StateStore};

pub const MONTHS_KEY: &str = "dt_months";
pub const ACTIVITIES_KEY: &str = "dt_activities";
pub const ARROWS_KEY: &str = "dt_arrows";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "phase-planner")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("planner.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Raw key-value operations
    // ============================================================

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    pub fn delete_value(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    // ============================================================
    // JSON documents
    // ============================================================

    /// Read and decode the document at `key`.
    ///
    /// Returns `None` when the key is missing, unreadable, or does not decode
    /// as `T`; callers fall back to their defaults.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_value(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {:#}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unparsable {}: {}", key, e);
                None
            }
        }
    }

    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.put_value(key, &json)
    }

    /// Load the board, using the seed for any collection that is absent or
    /// unparsable.
    pub fn load_state(&self) -> PlannerState {
        let months = self.load_json(MONTHS_KEY).unwrap_or_else(seed::months);
        let activities = self
            .load_json(ACTIVITIES_KEY)
            .unwrap_or_else(seed::activities);
        let arrows = self.load_json(ARROWS_KEY).unwrap_or_else(seed::arrows);
        PlannerState::new(months, activities, arrows)
    }
}

impl StateStore for Database {
    fn save_months(&self, months: &[String]) -> Result<()> {
        self.save_json(MONTHS_KEY, months)
    }

    fn save_activities(&self, activities: &[Activity]) -> Result<()> {
        self.save_json(ACTIVITIES_KEY, activities)
    }

    fn save_arrows(&self, arrows: &[Arrow]) -> Result<()> {
        self.save_json(ARROWS_KEY, arrows)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}
