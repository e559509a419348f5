use crate::api::ApiClient;
use crate::types::{DayPatch, DayRecord};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Write every record (optionally one year's) as pretty JSON, oldest first.
pub async fn export_days(client: &ApiClient, year: Option<i32>, out: &mut impl Write) -> Result<usize> {
    let mut records = client
        .list_days()
        .await
        .context("Failed to fetch day records")?;
    records.retain(|record| year.map_or(true, |y| record.date.year() == y));
    records.sort_by_key(|record| record.date);

    serde_json::to_writer_pretty(&mut *out, &records).context("Failed to write JSON")?;
    writeln!(out)?;
    info!(count = records.len(), "exported day records");
    Ok(records.len())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

pub fn read_import_file(path: &Path) -> Result<Vec<DayRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Create each record, updating it in place when the date already exists.
/// A failing record is logged and counted; the rest still go through.
pub async fn import_days(client: &ApiClient, records: &[DayRecord]) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for record in records {
        if client.create_day(record).await.is_ok() {
            summary.created += 1;
            continue;
        }
        let patch = DayPatch::full(record.content.clone(), record.completed);
        match client.update_day(record.date, &patch).await {
            Ok(_) => summary.updated += 1,
            Err(e) => {
                warn!(date = %record.date, error = %e, "failed to import day");
                summary.failed += 1;
            }
        }
    }
    info!(
        created = summary.created,
        updated = summary.updated,
        failed = summary.failed,
        "import finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::calendar::CalendarDate;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn record(d: &str, content: &str, completed: bool) -> DayRecord {
        DayRecord {
            content: content.to_string(),
            completed,
            ..DayRecord::empty(date(d))
        }
    }

    #[tokio::test]
    async fn export_filters_by_year_and_sorts() {
        let backend = DevBackend::new();
        let client = ApiClient::dev(backend).unwrap();
        import_days(
            &client,
            &[
                record("2024-05-01", "b", true),
                record("2023-12-31", "old", false),
                record("2024-01-02", "a", false),
            ],
        )
        .await;

        let mut out = Vec::new();
        let count = export_days(&client, Some(2024), &mut out).await.unwrap();
        assert_eq!(count, 2);

        let exported: Vec<DayRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(exported[0].date, date("2024-01-02"));
        assert_eq!(exported[1].date, date("2024-05-01"));
    }

    #[tokio::test]
    async fn import_updates_existing_dates() {
        let backend = DevBackend::new();
        let client = ApiClient::dev(backend.clone()).unwrap();
        import_days(&client, &[record("2024-03-15", "first", false)]).await;

        let summary = import_days(
            &client,
            &[
                record("2024-03-15", "second", true),
                record("2024-03-16", "new", false),
            ],
        )
        .await;
        assert_eq!(
            summary,
            ImportSummary {
                created: 1,
                updated: 1,
                failed: 0
            }
        );
        let updated = backend.get(date("2024-03-15")).unwrap();
        assert_eq!(updated.content, "second");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn import_counts_failures() {
        let backend = DevBackend::new();
        backend.set_fail_writes(true);
        let client = ApiClient::dev(backend).unwrap();
        let summary = import_days(&client, &[record("2024-03-15", "x", true)]).await;
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn reads_exported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("days.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "date": "2024-03-15", "content": "hi", "completed": true}]"#,
        )
        .unwrap();
        let records = read_import_file(&path).unwrap();
        assert_eq!(records, vec![DayRecord { id: Some(1), ..record("2024-03-15", "hi", true) }]);
    }
}
