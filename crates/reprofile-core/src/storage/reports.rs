//! Report cache storage

use crate::report::{Report, ReportCacheEntry};
use crate::storage::db::DatabaseError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

/// Cached report lists, one per connection
///
/// Entries never expire; they stay valid until the next `write` for the
/// same connection replaces them.
pub struct ReportCacheStore<'a> {
    conn: &'a Connection,
}

impl<'a> ReportCacheStore<'a> {
    /// Create a new report cache store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Replace the cached reports for a connection
    ///
    /// # Errors
    /// Returns an error if the cache cannot be written
    pub fn write(&self, connection_name: &str, reports: &[Report]) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(reports)
            .map_err(|e| DatabaseError::Corrupt(format!("Failed to serialize reports: {e}")))?;

        self.conn.execute(
            r"
            INSERT OR REPLACE INTO report_cache (connection_name, reports, fetched_at)
            VALUES (?1, ?2, ?3)
            ",
            params![connection_name, json, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// Read the cached reports for a connection
    ///
    /// Returns an empty list when nothing has been cached yet.
    ///
    /// # Errors
    /// Returns an error if the cache cannot be read
    pub fn read(&self, connection_name: &str) -> Result<Vec<Report>, DatabaseError> {
        Ok(self
            .entry(connection_name)?
            .map(|entry| entry.reports)
            .unwrap_or_default())
    }

    /// Read the full cache entry for a connection
    ///
    /// # Errors
    /// Returns an error if the cache cannot be read or the entry is corrupt
    pub fn entry(&self, connection_name: &str) -> Result<Option<ReportCacheEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT connection_name, reports, fetched_at
            FROM report_cache
            WHERE connection_name = ?1
            ",
        )?;

        let result = stmt.query_row(params![connection_name], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        });

        match result {
            Ok((name, json, fetched_at)) => Ok(Some(parse_entry(name, &json, &fetched_at)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every cache entry, ordered by connection name
    ///
    /// # Errors
    /// Returns an error if the cache cannot be read
    pub fn list(&self) -> Result<Vec<ReportCacheEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT connection_name, reports, fetched_at
            FROM report_cache
            ORDER BY connection_name
            ",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (name, json, fetched_at) = row?;
            entries.push(parse_entry(name, &json, &fetched_at)?);
        }
        Ok(entries)
    }
}

fn parse_entry(
    connection_name: String,
    json: &str,
    fetched_at: &str,
) -> Result<ReportCacheEntry, DatabaseError> {
    let reports: Vec<Report> = serde_json::from_str(json)
        .map_err(|e| DatabaseError::Corrupt(format!("Failed to parse cached reports: {e}")))?;
    let fetched_at = DateTime::parse_from_rfc3339(fetched_at)
        .map_err(|e| DatabaseError::Corrupt(format!("Invalid datetime: {e}")))?
        .with_timezone(&Utc);

    Ok(ReportCacheEntry {
        connection_name,
        reports,
        fetched_at,
    })
}
