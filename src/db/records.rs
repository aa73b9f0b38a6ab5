//! SQLite persistence for attendance records.
//!
//! One row per user and date. Break intervals and the justification are kept
//! as JSON text so a row carries the same document shape the bot and the
//! remote backend exchange.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use ponto::db::records::Records;
//! use ponto::libs::clock::TimezonePolicy;
//! use ponto::libs::record::AttendanceRecord;
//!
//! let records = Records::new()?;
//! let record = AttendanceRecord::clock_in("Ana", "42", Local::now().fixed_offset(), &TimezonePolicy::default());
//! records.upsert(&record)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::pagination::{fetch_page, Page, PageCursor, PageFilter, RecordStore, StoreQuery};
use crate::libs::record::{AttendanceRecord, ViewSettings};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const COLUMNS: &str = "usuario, discord_id, date, entrada, saida, pausas, total_horas, total_pausas, justificativa";

const UPSERT_RECORD: &str = "INSERT INTO records
    (usuario, discord_id, date, entrada, saida, pausas, total_horas, total_pausas, justificativa, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, datetime(CURRENT_TIMESTAMP, 'localtime'))
    ON CONFLICT (discord_id, date) DO UPDATE SET
        usuario = excluded.usuario,
        entrada = excluded.entrada,
        saida = excluded.saida,
        pausas = excluded.pausas,
        total_horas = excluded.total_horas,
        total_pausas = excluded.total_pausas,
        justificativa = excluded.justificativa,
        updated_at = excluded.updated_at";

// Keyset scan: date descending, discord id ascending, strictly after the cursor
const SELECT_PAGE: &str = "WHERE (?1 IS NULL OR discord_id = ?1)
    AND date >= ?2
    AND (?3 IS NULL OR date < ?3 OR (date = ?3 AND discord_id > ?4))
    ORDER BY date DESC, discord_id ASC
    LIMIT ?5";

const SELECT_BY_KEY: &str = "WHERE discord_id = ?1 AND date = ?2";

const SELECT_RANGE: &str = "WHERE (?1 IS NULL OR discord_id = ?1)
    AND date >= ?2 AND date <= ?3
    ORDER BY date ASC, discord_id ASC";

const SELECT_USERS: &str = "SELECT discord_id, MAX(usuario) FROM records GROUP BY discord_id ORDER BY discord_id";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns as SQLite hands them back, before JSON and date decoding.
struct RecordRow {
    usuario: String,
    discord_id: String,
    date: String,
    entrada: Option<String>,
    saida: Option<String>,
    pausas: String,
    total_horas: String,
    total_pausas: String,
    justificativa: Option<String>,
}

impl RecordRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            usuario: row.get(0)?,
            discord_id: row.get(1)?,
            date: row.get(2)?,
            entrada: row.get(3)?,
            saida: row.get(4)?,
            pausas: row.get(5)?,
            total_horas: row.get(6)?,
            total_pausas: row.get(7)?,
            justificativa: row.get(8)?,
        })
    }
}

impl TryFrom<RecordRow> for AttendanceRecord {
    type Error = anyhow::Error;

    fn try_from(row: RecordRow) -> Result<Self> {
        let data = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).with_context(|| format!("bad date in records: '{}'", row.date))?;
        let pausas = serde_json::from_str(&row.pausas).with_context(|| format!("bad breaks for {} on {}", row.discord_id, row.date))?;
        let justificativa = row.justificativa.as_deref().map(serde_json::from_str).transpose()?;

        Ok(AttendanceRecord {
            usuario: row.usuario,
            discord_id: row.discord_id,
            data,
            entrada: row.entrada,
            saida: row.saida,
            pausas,
            total_horas: row.total_horas,
            total_pausas: row.total_pausas,
            justificativa,
        })
    }
}

fn date_param(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub struct Records {
    pub conn: Arc<Mutex<Connection>>,
}

impl Records {
    /// Opens the records store in the data directory.
    pub fn new() -> Result<Records> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Records {
        Records {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }

    /// Inserts the record, or replaces the stored one with the same user and date.
    pub fn upsert(&self, record: &AttendanceRecord) -> Result<()> {
        let pausas = serde_json::to_string(&record.pausas)?;
        let justificativa = record.justificativa.as_ref().map(serde_json::to_string).transpose()?;

        let conn = self.conn.lock();
        conn.execute(
            UPSERT_RECORD,
            params![
                record.usuario,
                record.discord_id,
                date_param(record.data),
                record.entrada,
                record.saida,
                pausas,
                record.total_horas,
                record.total_pausas,
                justificativa,
            ],
        )?;
        Ok(())
    }

    pub fn fetch(&self, discord_id: &str, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        let sql = format!("SELECT {} FROM records {}", COLUMNS, SELECT_BY_KEY);
        let conn = self.conn.lock();
        let row = conn
            .query_row(&sql, params![discord_id, date_param(date)], RecordRow::from_row)
            .optional()?;
        row.map(AttendanceRecord::try_from).transpose()
    }

    /// Records between two dates (inclusive), oldest first.
    pub fn fetch_range(&self, discord_id: Option<&str>, from: NaiveDate, to: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let sql = format!("SELECT {} FROM records {}", COLUMNS, SELECT_RANGE);
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![discord_id, date_param(from), date_param(to)], RecordRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }

    /// Known users as `(discord_id, usuario)`, ordered by id.
    pub fn users(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_USERS)?;
        let users = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    pub fn fetch_page(&self, filter: &PageFilter, cursor: Option<&PageCursor>, settings: &ViewSettings) -> Result<Page> {
        fetch_page(self, filter, cursor, settings)
    }
}

impl RecordStore for Records {
    fn query(&self, query: &StoreQuery) -> Result<Vec<AttendanceRecord>> {
        let sql = format!("SELECT {} FROM records {}", COLUMNS, SELECT_PAGE);
        let cursor_date = query.after.map(|c| date_param(c.data));
        let cursor_id = query.after.map(|c| c.discord_id.as_str());
        let limit = i64::try_from(query.limit)?;

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![query.user_id, date_param(query.start_date), cursor_date, cursor_id, limit],
                RecordRow::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::attendance::BreakInterval;
    use crate::libs::justification::{Justification, JustificationStatus};
    use chrono::{DateTime, Duration};

    fn store() -> Records {
        Records::from_db(Db::in_memory().unwrap())
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_upsert_replaces_same_user_and_date() {
        let records = store();
        let mut record = AttendanceRecord::new("Ana", "42", day(0));
        record.entrada = Some("09:00".into());
        records.upsert(&record).unwrap();

        record.saida = Some("18:00".into());
        record.pausas.push(BreakInterval::closed(
            DateTime::parse_from_rfc3339("2025-03-01T12:00:00-03:00").unwrap(),
            DateTime::parse_from_rfc3339("2025-03-01T13:00:00-03:00").unwrap(),
        ));
        record.justificativa = Some(Justification::new(JustificationStatus::Approved, "1h 0m"));
        records.upsert(&record).unwrap();

        let stored = records.fetch("42", day(0)).unwrap().unwrap();
        assert_eq!(stored, record);
        assert_eq!(records.users().unwrap(), vec![("42".to_string(), "Ana".to_string())]);
        assert!(records.fetch("42", day(1)).unwrap().is_none());
    }

    #[test]
    fn test_keyset_query_matches_in_memory_store() {
        let records = store();
        let mut memory = Vec::new();
        for i in 0..10 {
            for (name, id) in [("Bia", "7"), ("Ana", "42")] {
                let record = AttendanceRecord::new(name, id, day(i));
                records.upsert(&record).unwrap();
                memory.push(record);
            }
        }

        let cursor = PageCursor {
            data: day(6),
            discord_id: "42".into(),
        };
        for user in [None, Some("7")] {
            for after in [None, Some(&cursor)] {
                let query = StoreQuery {
                    user_id: user,
                    start_date: day(2),
                    after,
                    limit: 5,
                };
                assert_eq!(records.query(&query).unwrap(), memory.query(&query).unwrap());
            }
        }
    }

    #[test]
    fn test_fetch_range_is_inclusive_and_ascending() {
        let records = store();
        for i in 0..5 {
            records.upsert(&AttendanceRecord::new("Ana", "42", day(i))).unwrap();
        }
        let range = records.fetch_range(Some("42"), day(1), day(3)).unwrap();
        let dates: Vec<NaiveDate> = range.iter().map(|r| r.data).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert!(records.fetch_range(Some("7"), day(0), day(4)).unwrap().is_empty());
    }
}
