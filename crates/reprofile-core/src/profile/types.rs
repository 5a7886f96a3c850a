//! Execution profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::ReportId;

/// Folded form of a profile name used for every case-insensitive comparison
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// A named binding of one connection to one selected report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionProfile {
    /// Unique identifier, stable across renames
    pub id: Uuid,
    /// Profile name, also used as a file/folder name
    pub name: String,
    /// Connection the report is fetched from
    pub source_connection_name: String,
    /// Report this profile runs
    pub selected_report_id: ReportId,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When last updated
    pub updated_at: DateTime<Utc>,
}

impl ExecutionProfile {
    /// Create a new profile
    ///
    /// Callers are expected to have validated the fields; see
    /// [`crate::ProfileManager::create_profile`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_connection_name: impl Into<String>,
        selected_report_id: ReportId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source_connection_name: source_connection_name.into(),
            selected_report_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive name comparison
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}
