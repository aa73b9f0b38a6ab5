//! SQLite persistence for ponto.
//!
//! - [`db`] opens the database file in the data directory and applies
//!   pending migrations.
//! - [`migrations`] holds the versioned schema.
//! - [`records`] stores one attendance record per user and day and answers
//!   the paged scans used by the `records`, `balance` and `export` commands.

pub mod db;
pub mod migrations;
pub mod records;
