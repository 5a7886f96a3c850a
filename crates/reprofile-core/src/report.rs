//! Remote report snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The all-zero GUID some report services use for "no report"
const NIL_GUID: &str = "00000000-0000-0000-0000-000000000000";

/// Opaque report identifier as handed out by the remote service
///
/// Ids compare exactly, except that two GUID-shaped ids compare ignoring
/// ASCII case, so `5B1C...` typed by hand matches the service's `5b1c...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Wrap a raw identifier
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id stands for "no report selected"
    #[must_use]
    pub fn is_unset(&self) -> bool {
        let raw = self.0.trim();
        raw.is_empty() || raw.eq_ignore_ascii_case(NIL_GUID)
    }
}

impl PartialEq for ReportId {
    fn eq(&self, other: &Self) -> bool {
        if is_guid(&self.0) && is_guid(&other.0) {
            self.0.eq_ignore_ascii_case(&other.0)
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for ReportId {}

impl Hash for ReportId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if is_guid(&self.0) {
            self.0.to_ascii_lowercase().hash(state);
        } else {
            self.0.hash(state);
        }
    }
}

/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` with hex digits in either case
fn is_guid(raw: &str) -> bool {
    raw.len() == 36
        && raw.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ReportId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A report as retrieved from a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Remote identifier
    pub id: ReportId,
    /// Display name
    pub name: String,
    /// Description, empty when the service has none
    #[serde(default)]
    pub description: String,
}

impl Report {
    /// Create a report with an empty description
    #[must_use]
    pub fn new(id: impl Into<ReportId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The most recently fetched report list for one connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCacheEntry {
    /// Connection the reports were fetched from
    pub connection_name: String,
    /// Reports in retrieval order
    pub reports: Vec<Report>,
    /// When the list was written to the cache
    pub fetched_at: DateTime<Utc>,
}
