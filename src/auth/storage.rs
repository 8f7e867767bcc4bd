use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Credential types stored per provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Credential {
    #[serde(rename = "api_key")]
    ApiKey { key: String },
}

/// Manages credential storage in SQLite.
///
/// Shares a database with [`Config`](crate::config::Config), pass the same path.
pub struct AuthStorage {
    conn: Mutex<Connection>,
}

impl AuthStorage {
    /// Open or create a credentials table in the given database path.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open auth database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                provider TEXT PRIMARY KEY,
                data     TEXT NOT NULL
            )",
        )
        .context("failed to create credentials table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get credential for a provider.
    pub fn get(&self, provider: &str) -> Result<Option<Credential>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT data FROM credentials WHERE provider = ?1")?;
        let mut rows = stmt.query([provider])?;
        match rows.next()? {
            Some(row) => {
                let json: String = row.get(0)?;
                let cred: Credential = serde_json::from_str(&json)?;
                Ok(Some(cred))
            }
            None => Ok(None),
        }
    }

    /// Store credential for a provider (upsert).
    pub fn set(&self, provider: &str, credential: Credential) -> Result<()> {
        let json = serde_json::to_string(&credential)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO credentials (provider, data) VALUES (?1, ?2)
             ON CONFLICT(provider) DO UPDATE SET data = excluded.data",
            [provider, &json],
        )?;
        Ok(())
    }

    /// Remove credential for a provider.
    pub fn remove(&self, provider: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM credentials WHERE provider = ?1", [provider])?;
        Ok(())
    }

    /// Get the API key for a provider.
    /// Priority: stored key, then the first non-empty environment variable.
    pub fn get_api_key(&self, provider: &str, env_vars: &[&str]) -> Result<Option<String>> {
        if let Some(Credential::ApiKey { key }) = self.get(provider)? {
            return Ok(Some(key));
        }

        Ok(env_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.is_empty()))
    }

    /// Human-readable source of the key, for the banner and `/whoami`.
    pub fn status(&self, provider: &str, env_vars: &[&str]) -> Result<String> {
        if self.get(provider)?.is_some() {
            return Ok("API key ✓".to_string());
        }
        let from_env = env_vars
            .iter()
            .find(|var| std::env::var(var).map(|k| !k.is_empty()).unwrap_or(false));
        Ok(match from_env {
            Some(var) => format!("API key ({var}) ✓"),
            None => "not authenticated".to_string(),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("auth storage lock poisoned"))
    }
}
