//! Database schema migration management and versioning.
//!
//! Migrations are registered in version order and applied inside a single
//! transaction when a connection is opened through [`crate::db::db::Db`].
//! Each applied version is recorded in the `migrations` table.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ponto::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("ponto.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table for applied migrations.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, in the order they must be applied.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: one row per user and day.
        // Breaks and the justification are JSON documents, as in the remote store
        self.add_migration(1, "create_records", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS records (
                    id INTEGER PRIMARY KEY,
                    discord_id TEXT NOT NULL,
                    usuario TEXT NOT NULL,
                    date DATE NOT NULL,
                    entrada TEXT,
                    saida TEXT,
                    pausas TEXT NOT NULL DEFAULT '[]',
                    total_horas TEXT NOT NULL DEFAULT '0h 0m',
                    total_pausas TEXT NOT NULL DEFAULT '0h 0m',
                    justificativa TEXT,
                    UNIQUE (discord_id, date)
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: indices matching the paged scan (date desc, id asc),
        // with and without a user equality filter
        self.add_migration(2, "add_record_scan_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_records_date ON records(date DESC, discord_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_records_user_date ON records(discord_id, date DESC)", [])?;
            Ok(())
        });

        // Version 3: last modification time, set by every upsert
        self.add_migration(3, "add_records_updated_at", |tx| {
            tx.execute("ALTER TABLE records ADD COLUMN updated_at TIMESTAMP", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the current schema version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
