//! Read-only queries against the scan tables.
//!
//! The schema belongs to the backup app. Nothing here creates, migrates or
//! validates it; a missing table or column surfaces as a query error.

use crate::config::InspectorConfig;
use crate::error::{self, InspectError, Result};
use crate::report::Report;
use crate::sqlite::Value;
use crate::summary::parse_summary;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

const LATEST_SCAN_SQL: &str = "SELECT id, created_at_ms, podio_backup_item_id, summary \
     FROM scans ORDER BY created_at_ms DESC LIMIT 1";
const COUNT_APPS_SQL: &str = "SELECT COUNT(*) FROM scan_apps WHERE scan_id = ?1";
const COUNT_FILES_SQL: &str = "SELECT COUNT(*) FROM scan_files WHERE scan_id = ?1";
const DOWNLOAD_COUNTS_SQL: &str = "SELECT COUNT(*), \
     COALESCE(SUM(CASE WHEN status = 'done' THEN 1 ELSE 0 END), 0) \
     FROM downloads WHERE scan_id = ?1";

/// The observed columns of one `scans` row
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    pub id: Value,
    pub created_at_ms: Value,
    pub podio_backup_item_id: Value,
    pub summary: Value,
}

impl fmt::Display for ScanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.id, self.created_at_ms, self.podio_backup_item_id, self.summary
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DownloadCounts {
    pub total: i64,
    pub done: i64,
}

/// Child row counts for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounts {
    pub apps: i64,
    pub files: i64,
    pub downloads: DownloadCounts,
}

/// Owns the single read-only connection for the duration of a run.
///
/// Dropping the inspector releases the connection; [`Inspector::close`]
/// does the same but reports a failed close.
pub struct Inspector {
    conn: Connection,
    path: PathBuf,
}

impl Inspector {
    /// Open the database named by `config`.
    ///
    /// The file must already exist and be a SQLite database. It is never
    /// created and never opened for writing.
    pub fn open(config: &InspectorConfig) -> Result<Self> {
        let path = config.path();
        info!("opening scan database at {}", path.display());

        let open_err = |source| InspectError::Open {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(open_err)?;

        // SQLite reads the header lazily; touch the catalog so a non-database
        // file fails here rather than on the first scan query.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(open_err)?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// The scan with the greatest `created_at_ms`, if any
    pub fn latest_scan(&self) -> Result<Option<ScanRow>> {
        let scan = self
            .conn
            .query_row(LATEST_SCAN_SQL, [], |row| {
                Ok(ScanRow {
                    id: row.get(0)?,
                    created_at_ms: row.get(1)?,
                    podio_backup_item_id: row.get(2)?,
                    summary: row.get(3)?,
                })
            })
            .optional()
            .map_err(error::query("latest scan"))?;
        match &scan {
            Some(row) => debug!("latest scan is {}", row.id),
            None => info!("no scans recorded"),
        }
        Ok(scan)
    }

    pub fn count_apps(&self, scan_id: &Value) -> Result<i64> {
        self.count(COUNT_APPS_SQL, scan_id, "scan_apps count")
    }

    pub fn count_files(&self, scan_id: &Value) -> Result<i64> {
        self.count(COUNT_FILES_SQL, scan_id, "scan_files count")
    }

    /// Total downloads for the scan and how many of them are `done`
    pub fn download_counts(&self, scan_id: &Value) -> Result<DownloadCounts> {
        self.conn
            .query_row(DOWNLOAD_COUNTS_SQL, [scan_id], |row| {
                Ok(DownloadCounts {
                    total: row.get(0)?,
                    done: row.get(1)?,
                })
            })
            .map_err(error::query("downloads count"))
    }

    pub fn scan_counts(&self, scan_id: &Value) -> Result<ScanCounts> {
        let counts = ScanCounts {
            apps: self.count_apps(scan_id)?,
            files: self.count_files(scan_id)?,
            downloads: self.download_counts(scan_id)?,
        };
        debug!(
            "scan {scan_id}: {} apps, {} files, {}/{} downloads done",
            counts.apps, counts.files, counts.downloads.done, counts.downloads.total
        );
        Ok(counts)
    }

    /// Run every query for the latest scan. Counts are skipped when there
    /// is no scan.
    pub fn inspect(&self) -> Result<Report> {
        let Some(scan) = self.latest_scan()? else {
            return Ok(Report::default());
        };
        let counts = self.scan_counts(&scan.id)?;
        let summary = parse_summary(&scan.summary);
        Ok(Report {
            latest_scan: Some(scan),
            counts: Some(counts),
            summary,
        })
    }

    pub fn close(self) -> Result<()> {
        info!("closing scan database at {}", self.path.display());
        self.conn
            .close()
            .map_err(|(_, source)| InspectError::Close(source))
    }

    fn count(&self, sql: &str, scan_id: &Value, what: &'static str) -> Result<i64> {
        self.conn
            .query_row(sql, [scan_id], |row| row.get(0))
            .map_err(error::query(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_counts_serialize_as_nested_json() {
        let counts = ScanCounts {
            apps: 3,
            files: 12,
            downloads: DownloadCounts { total: 12, done: 9 },
        };
        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            json!({"apps": 3, "files": 12, "downloads": {"total": 12, "done": 9}})
        );
    }

    #[test]
    fn scan_row_renders_as_a_tuple() {
        let row = ScanRow {
            id: Value::Integer(4),
            created_at_ms: Value::Integer(1_000),
            podio_backup_item_id: Value::Null,
            summary: Value::from("{}"),
        };
        assert_eq!(row.to_string(), "(4, 1000, None, \"{}\")");
    }
}
