//! Cursor-based paging over attendance records.
//!
//! Records are fetched newest first in pages of [`PAGE_SIZE`]. The store can
//! combine user equality with a single date range bound (`date >= start`), so
//! the optional end date is applied here, on the fetched page.
//!
//! ## Paging Rules
//!
//! - `has_more` is conservative: it is true whenever the store returned a full
//!   page, even if the end-date filter removed some or all of it. A short page
//!   is the only signal that the scan is over.
//! - `next_cursor` is the last record that survived the end-date filter. When
//!   nothing survived but the page was full, it falls back to the last raw
//!   record so that a page made only of records newer than the end date does
//!   not stop the scan. A short page has no cursor.
//! - Because records arrive in descending date order, the records removed by
//!   an upper date bound always form a prefix of the page, so resuming after
//!   the last survivor never skips or repeats a record.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ponto::libs::pagination::{fetch_page, PageFilter};
//! use ponto::libs::record::{AttendanceRecord, ViewSettings};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let store: Vec<AttendanceRecord> = vec![AttendanceRecord::new("Ana", "42", start)];
//! let filter = PageFilter::new(None, start, None);
//! let page = fetch_page(&store, &filter, None, &ViewSettings::default())?;
//! assert_eq!(page.records.len(), 1);
//! assert!(!page.has_more);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::error::PontoError;
use crate::libs::record::{AttendanceRecord, RecordView, ViewSettings};
use anyhow::Result;
use base64::prelude::*;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// Number of records requested from the store per page.
pub const PAGE_SIZE: usize = 20;

/// Lookback window used when no start date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Which records a scan covers. Both date bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFilter {
    pub user_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PageFilter {
    pub fn new(user_id: Option<String>, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            user_id,
            start_date,
            end_date,
        }
    }

    /// Builds a filter from request-style parameters.
    ///
    /// Without an explicit start date the window starts `lookback_days`
    /// before `today`; negative lookbacks count as zero. A lookback that
    /// leaves the calendar is an error.
    pub fn from_window(
        user_id: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        lookback_days: i64,
        today: NaiveDate,
    ) -> Result<Self, PontoError> {
        let start_date = match start_date {
            Some(date) => date,
            None => u64::try_from(lookback_days.max(0))
                .ok()
                .and_then(|days| today.checked_sub_days(Days::new(days)))
                .ok_or(PontoError::InvalidLookback(lookback_days))?,
        };
        Ok(Self::new(user_id, start_date, end_date))
    }

    pub fn accepts_end(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| date <= end)
    }
}

/// Position after which a scan resumes: the last record of the previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub data: NaiveDate,
    pub discord_id: String,
}

impl PageCursor {
    pub fn of(record: &AttendanceRecord) -> Self {
        Self {
            data: record.data,
            discord_id: record.discord_id.clone(),
        }
    }

    /// Opaque token handed to clients.
    pub fn encode(&self) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(format!("{}|{}", self.data.format("%Y-%m-%d"), self.discord_id))
    }

    pub fn decode(token: &str) -> Result<Self, PontoError> {
        let invalid = || PontoError::InvalidCursor(token.to_string());
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(token.trim()).map_err(|_| invalid())?;
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (date, discord_id) = text.split_once('|').ok_or_else(invalid)?;
        let data = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        Ok(Self {
            data,
            discord_id: discord_id.to_string(),
        })
    }

    /// Whether `record` comes strictly after this cursor in scan order.
    pub fn precedes(&self, record: &AttendanceRecord) -> bool {
        scan_order(&self.data, &self.discord_id, &record.data, &record.discord_id) == Ordering::Less
    }
}

/// Scan order: date descending, then discord id ascending.
pub fn scan_order(a_date: &NaiveDate, a_id: &str, b_date: &NaiveDate, b_id: &str) -> Ordering {
    b_date.cmp(a_date).then_with(|| a_id.cmp(b_id))
}

/// One indexed store request.
#[derive(Debug, Clone, Copy)]
pub struct StoreQuery<'a> {
    pub user_id: Option<&'a str>,
    pub start_date: NaiveDate,
    pub after: Option<&'a PageCursor>,
    pub limit: usize,
}

/// Storage able to answer a single paged, date-descending query.
///
/// Implementations return at most `limit` records with
/// `data >= start_date` (and the user, if given), in scan order, strictly
/// after `after`.
pub trait RecordStore {
    fn query(&self, query: &StoreQuery) -> Result<Vec<AttendanceRecord>>;
}

impl RecordStore for Vec<AttendanceRecord> {
    fn query(&self, query: &StoreQuery) -> Result<Vec<AttendanceRecord>> {
        let mut matching: Vec<&AttendanceRecord> = self
            .iter()
            .filter(|r| query.user_id.map_or(true, |user| r.discord_id == user))
            .filter(|r| r.data >= query.start_date)
            .filter(|r| query.after.map_or(true, |cursor| cursor.precedes(r)))
            .collect();
        matching.sort_by(|a, b| scan_order(&a.data, &a.discord_id, &b.data, &b.discord_id));
        Ok(matching.into_iter().take(query.limit).cloned().collect())
    }
}

/// One page of mapped records.
#[derive(Debug, Clone)]
pub struct Page {
    pub records: Vec<RecordView>,
    pub next_cursor: Option<PageCursor>,
    pub has_more: bool,
    /// Records the store returned before the end-date filter.
    pub fetched: usize,
}

/// Wire shape of a page: `{records, nextCursor, hasMore}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<'a> {
    pub records: &'a [RecordView],
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl Page {
    pub fn response(&self) -> PageResponse<'_> {
        PageResponse {
            records: &self.records,
            next_cursor: self.next_cursor.as_ref().map(PageCursor::encode),
            has_more: self.has_more,
        }
    }
}

/// Fetches and maps the page that follows `cursor`.
///
/// Store failures propagate unchanged; nothing is retried.
pub fn fetch_page<S: RecordStore + ?Sized>(
    store: &S,
    filter: &PageFilter,
    cursor: Option<&PageCursor>,
    settings: &ViewSettings,
) -> Result<Page> {
    let raw = store.query(&StoreQuery {
        user_id: filter.user_id.as_deref(),
        start_date: filter.start_date,
        after: cursor,
        limit: PAGE_SIZE,
    })?;

    let fetched = raw.len();
    let has_more = fetched == PAGE_SIZE;
    let survivors: Vec<&AttendanceRecord> = raw.iter().filter(|r| filter.accepts_end(r.data)).collect();

    let next_cursor = match survivors.last() {
        _ if !has_more => None,
        Some(last) => Some(PageCursor::of(last)),
        None => raw.last().map(PageCursor::of),
    };

    debug!(
        fetched,
        kept = survivors.len(),
        has_more,
        user = ?filter.user_id,
        "fetched attendance page"
    );

    Ok(Page {
        records: survivors.into_iter().map(|r| RecordView::from_record(r, settings)).collect(),
        next_cursor,
        has_more,
        fetched,
    })
}

/// Follows the cursor until the store runs out of pages.
pub fn walk_all<S: RecordStore + ?Sized>(store: &S, filter: &PageFilter, settings: &ViewSettings) -> Result<Vec<RecordView>> {
    let mut records = Vec::new();
    let mut cursor: Option<PageCursor> = None;

    loop {
        let page = fetch_page(store, filter, cursor.as_ref(), settings)?;
        records.extend(page.records);
        match page.next_cursor {
            Some(next) if page.has_more => cursor = Some(next),
            _ => break,
        }
    }

    Ok(records)
}
