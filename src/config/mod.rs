//! Key-value configuration storage backed by SQLite.
//!
//! Shares a database with [`AuthStorage`](crate::auth::AuthStorage), pass
//! the same path to both. [`Settings::resolve`] layers command-line flags
//! over stored values over built-in defaults.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::consts::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, default_image_dir};

pub const KEY_TEXT_MODEL: &str = "text_model";
pub const KEY_IMAGE_MODEL: &str = "image_model";
pub const KEY_IMAGE_DIR: &str = "image_dir";

/// Keys accepted by `moodbrew config`.
pub const KNOWN_KEYS: &[&str] = &[KEY_TEXT_MODEL, KEY_IMAGE_MODEL, KEY_IMAGE_DIR];

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored pairs, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to read config")
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("config lock poisoned"))
    }
}

/// Effective settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub text_model: String,
    pub image_model: String,
    pub image_dir: PathBuf,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub image_dir: Option<PathBuf>,
}

impl Settings {
    /// Flag, then stored value, then default.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self> {
        let text_model = match overrides.text_model {
            Some(m) => m,
            None => config
                .get(KEY_TEXT_MODEL)?
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        };
        let image_model = match overrides.image_model {
            Some(m) => m,
            None => config
                .get(KEY_IMAGE_MODEL)?
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        };
        let image_dir = match overrides.image_dir {
            Some(dir) => dir,
            None => config
                .get(KEY_IMAGE_DIR)?
                .map(PathBuf::from)
                .unwrap_or_else(default_image_dir),
        };
        Ok(Self {
            text_model,
            image_model,
            image_dir,
        })
    }
}
