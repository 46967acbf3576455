//! Database module for lorepo.
//!
//! Provides SQLite connectivity and migration management for the item
//! catalogue and the per-item attribute records.

mod item;
mod item_data;
mod schema;

pub use item::{format_topics, Item, ItemRepository, NewItem};
pub use item_data::{ItemData, ItemDataRepository};
pub use schema::MIGRATIONS;

use std::path::Path;

use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

use crate::Result;

/// Database wrapper for managing the SQLite connection and migrations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database connection at the specified path.
    ///
    /// The database file and its parent directories are created if missing,
    /// and pending migrations are applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::configure_connection(&conn)?;

        let mut db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");
        let conn = Connection::open_in_memory()?;
        Self::configure_connection(&conn)?;

        let mut db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        // journal_mode and busy_timeout return a value, so query_row is required
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        let _: i64 = conn.query_row("PRAGMA busy_timeout = 5000", [], |row| row.get(0))?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a new transaction.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Get the current schema version (0 when no migration has run).
    pub fn schema_version(&self) -> Result<i64> {
        let table_exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;

        Ok(version)
    }

    /// Apply pending migrations.
    pub fn migrate(&mut self) -> Result<()> {
        let current = self.schema_version()?;

        for (i, migration) in MIGRATIONS.iter().enumerate().skip(current as usize) {
            let version = (i + 1) as i64;
            debug!("Applying migration v{}", version);

            let tx = self.conn.transaction()?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version    INTEGER PRIMARY KEY,
                    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            )?;
            tx.execute_batch(migration)?;
            tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
            tx.commit()?;
        }

        Ok(())
    }
}
