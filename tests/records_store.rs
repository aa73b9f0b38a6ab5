#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use ponto::db::db::{Db, DB_FILE_NAME};
    use ponto::db::records::Records;
    use ponto::libs::pagination::{walk_all, PageCursor, PageFilter, PAGE_SIZE};
    use ponto::libs::record::{AttendanceRecord, ViewSettings};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// A database file in a throwaway directory.
    struct StoreTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join(DB_FILE_NAME);
            StoreTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl StoreTestContext {
        fn records(&self) -> Records {
            Records::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(offset)
    }

    fn seed_45(records: &Records) {
        for i in 0..45 {
            let mut record = AttendanceRecord::new("Ana", "42", day(i));
            record.entrada = Some("09:00".into());
            record.saida = Some("17:00".into());
            records.upsert(&record).unwrap();
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_records_survive_reopen(ctx: &mut StoreTestContext) {
        {
            let records = ctx.records();
            let mut record = AttendanceRecord::new("Ana", "42", day(0));
            record.entrada = Some("08:30".into());
            records.upsert(&record).unwrap();
        }

        let records = ctx.records();
        let stored = records.fetch("42", day(0)).unwrap().unwrap();
        assert_eq!(stored.entrada.as_deref(), Some("08:30"));
        assert_eq!(stored.saida, None);
        assert!(stored.pausas.is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_pages_without_end_date(ctx: &mut StoreTestContext) {
        let records = ctx.records();
        seed_45(&records);
        let filter = PageFilter::new(Some("42".into()), day(0), None);
        let settings = ViewSettings::default();

        let first = records.fetch_page(&filter, None, &settings).unwrap();
        assert_eq!(first.records.len(), PAGE_SIZE);
        assert!(first.has_more);
        assert_eq!(first.records[0].data, day(44));
        assert_eq!(first.next_cursor, Some(PageCursor { data: day(25), discord_id: "42".into() }));

        let second = records.fetch_page(&filter, first.next_cursor.as_ref(), &settings).unwrap();
        assert_eq!(second.records[0].data, day(24));
        assert!(second.has_more);

        let third = records.fetch_page(&filter, second.next_cursor.as_ref(), &settings).unwrap();
        assert_eq!(third.records.len(), 5);
        assert!(!third.has_more);
        assert!(third.next_cursor.is_none());
        assert_eq!(third.records.last().unwrap().data, day(0));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_end_date_filter_keeps_scanning_past_empty_page(ctx: &mut StoreTestContext) {
        let records = ctx.records();
        seed_45(&records);
        let filter = PageFilter::new(None, day(0), Some(day(9)));
        let settings = ViewSettings::default();

        // Days 44..25: nothing survives, but the page was full
        let first = records.fetch_page(&filter, None, &settings).unwrap();
        assert!(first.records.is_empty());
        assert!(first.has_more);
        assert_eq!(first.fetched, PAGE_SIZE);
        assert_eq!(first.next_cursor.as_ref().map(|c| c.data), Some(day(25)));

        // Days 24..5: only 9..5 survive
        let second = records.fetch_page(&filter, first.next_cursor.as_ref(), &settings).unwrap();
        let dates: Vec<NaiveDate> = second.records.iter().map(|r| r.data).collect();
        assert_eq!(dates, (5..=9).rev().map(day).collect::<Vec<_>>());
        assert_eq!(second.next_cursor.as_ref().map(|c| c.data), Some(day(5)));

        let all = walk_all(&records, &filter, &settings).unwrap();
        assert_eq!(all.len(), 10);
        assert!(all.iter().all(|r| r.data <= day(9)));
        assert!(all.iter().all(|r| r.total_horas == "8h 0m"));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_cursor_token_resumes_scan(ctx: &mut StoreTestContext) {
        let records = ctx.records();
        seed_45(&records);
        let filter = PageFilter::new(None, day(0), None);
        let settings = ViewSettings::default();

        let first = records.fetch_page(&filter, None, &settings).unwrap();
        let token = first.response().next_cursor.unwrap();
        let cursor = PageCursor::decode(&token).unwrap();

        let second = records.fetch_page(&filter, Some(&cursor), &settings).unwrap();
        assert_eq!(second.records[0].data, day(24));
    }
}
