//! Execution profile storage operations

use crate::profile::{name_key, ExecutionProfile};
use crate::storage::db::DatabaseError;
use rusqlite::{params, Connection};

/// Execution profile storage operations
///
/// Records are addressable by name, compared through [`name_key`] so the
/// store folds case the same way the manager does (Unicode, not ASCII). Name
/// uniqueness across the collection is the caller's job; this store only
/// guarantees that a save never leaves two records with the same name.
pub struct ProfileStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileStore<'a> {
    /// Create a new profile store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load every persisted profile, ordered by name
    ///
    /// An empty store is not an error.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or a record is corrupt
    pub fn load_all(&self) -> Result<Vec<ExecutionProfile>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT data FROM execution_profiles ORDER BY name_key, name
            ",
        )?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut profiles = Vec::new();
        for row in rows {
            profiles.push(parse_profile(&row?)?);
        }
        Ok(profiles)
    }

    /// Get a profile by name (case-insensitive)
    ///
    /// # Errors
    /// Returns an error if the profile cannot be retrieved
    pub fn get_by_name(&self, name: &str) -> Result<Option<ExecutionProfile>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT data FROM execution_profiles WHERE name_key = ?1
            ",
        )?;

        let result = stmt.query_row(params![name_key(name)], |row| row.get::<_, String>(0));

        match result {
            Ok(json) => Ok(Some(parse_profile(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace a profile
    ///
    /// Replaces any record with the same id (a rename) and any record with
    /// the same name ignoring case, in one statement. The last write wins
    /// and a failed write leaves the previous records untouched.
    ///
    /// # Errors
    /// Returns an error if the profile cannot be written
    pub fn save(&self, profile: &ExecutionProfile) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| DatabaseError::Corrupt(format!("Failed to serialize profile: {e}")))?;

        self.conn.execute(
            r"
            INSERT OR REPLACE INTO execution_profiles
                (id, name, name_key, source_connection_name, selected_report_id, data, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                profile.id.to_string(),
                profile.name,
                name_key(&profile.name),
                profile.source_connection_name,
                profile.selected_report_id.as_str(),
                json,
                profile.created_at.to_rfc3339(),
                profile.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Delete a profile by name (case-insensitive)
    ///
    /// Returns whether a record was removed; deleting an absent name is
    /// not an error.
    ///
    /// # Errors
    /// Returns an error if the delete fails
    pub fn delete(&self, name: &str) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            r"
            DELETE FROM execution_profiles WHERE name_key = ?1
            ",
            params![name_key(name)],
        )?;

        Ok(deleted > 0)
    }
}

fn parse_profile(json: &str) -> Result<ExecutionProfile, DatabaseError> {
    serde_json::from_str(json)
        .map_err(|e| DatabaseError::Corrupt(format!("Failed to parse profile: {e}")))
}
