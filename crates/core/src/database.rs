use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{named_params, Connection, OptionalExtension};

use crate::config::AppConfig;
use crate::storage::KeyValueStore;

const SCHEMA_VERSION: i64 = 1;

/// SQLite-backed [`KeyValueStore`] living in the configured data directory.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    #[cfg(test)]
    fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    pub fn schema_version(&self) -> Result<i64> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw.and_then(|value| value.parse().ok()).unwrap_or(0))
    }

    #[cfg(test)]
    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS meta (key TEXT PRIMARY KEY, value TEXT);
                 CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                 );
                ",
            )
            .context("Failed to apply schema migrations")?;
        let version = SCHEMA_VERSION.to_string();
        self.conn.execute(
            "INSERT INTO meta (key, value) VALUES ('schema_version', :version)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params! { ":version": version },
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = :key",
                named_params! { ":key": key },
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{}'", key))?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (:key, :value, :updated)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                named_params! {
                    ":key": key,
                    ":value": value,
                    ":updated": updated,
                },
            )
            .with_context(|| format!("Failed to write '{}'", key))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute(
                "DELETE FROM kv_store WHERE key = :key",
                named_params! { ":key": key },
            )
            .with_context(|| format!("Failed to remove '{}'", key))?;
        Ok(affected > 0)
    }
}
