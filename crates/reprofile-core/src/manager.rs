//! Profile manager
//!
//! Holds the authoritative in-memory profile collection and writes every
//! change through to storage. A failed write leaves the collection as it
//! was, so the caller can show the error and let the operator retry.

use crate::profile::{
    name_key, reconcile, validate_name, ExecutionProfile, ProfileError, ProfileResult,
};
use crate::report::{Report, ReportCacheEntry, ReportId};
use crate::storage::{Database, ProfileStore, ReportCacheStore};
use chrono::Utc;

/// A profile together with its connection's cached reports
#[derive(Debug, Clone)]
pub struct ProfileSelection {
    /// The selected profile
    pub profile: ExecutionProfile,
    /// Cached reports for the profile's connection
    pub reports: Vec<Report>,
    /// Index into `reports` of the profile's report, if it is still cached
    pub selected_index: Option<usize>,
}

impl ProfileSelection {
    /// The cached report the profile points at
    #[must_use]
    pub fn selected_report(&self) -> Option<&Report> {
        self.selected_index.and_then(|i| self.reports.get(i))
    }
}

/// Orchestrates profile and report cache storage
pub struct ProfileManager {
    db: Database,
    profiles: Vec<ExecutionProfile>,
    known_connections: Option<Vec<String>>,
}

impl ProfileManager {
    /// Load all profiles from the database
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the profiles cannot be read
    pub fn open(db: Database) -> ProfileResult<Self> {
        let mut profiles = ProfileStore::new(db.connection())
            .load_all()
            .map_err(ProfileError::StorageUnavailable)?;
        sort_by_name(&mut profiles);

        tracing::debug!(count = profiles.len(), "loaded execution profiles");
        Ok(Self {
            db,
            profiles,
            known_connections: None,
        })
    }

    /// Restrict profiles to connections in this list
    #[must_use]
    pub fn with_known_connections(mut self, names: Vec<String>) -> Self {
        self.known_connections = Some(names);
        self
    }

    /// All profiles, ordered by name
    #[must_use]
    pub fn list(&self) -> &[ExecutionProfile] {
        &self.profiles
    }

    /// Find a profile by name, ignoring case
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ExecutionProfile> {
        self.profiles.iter().find(|p| p.is_named(name))
    }

    /// Create and persist a new profile
    ///
    /// # Errors
    /// Returns a validation error if any field is missing or invalid,
    /// `DuplicateName` if the name is taken ignoring case, or
    /// `StorageWriteError` if the profile cannot be persisted
    pub fn create_profile(
        &mut self,
        name: &str,
        connection_name: &str,
        report_id: Option<ReportId>,
    ) -> ProfileResult<ExecutionProfile> {
        let report_id = self.validate_fields(name, connection_name, report_id)?;

        if self.find_by_name(name).is_some() {
            return Err(ProfileError::DuplicateName(name.to_string()));
        }

        let profile = ExecutionProfile::new(name, connection_name, report_id);
        ProfileStore::new(self.db.connection())
            .save(&profile)
            .map_err(ProfileError::StorageWriteError)?;

        self.profiles.push(profile.clone());
        sort_by_name(&mut self.profiles);

        tracing::info!(
            profile = %profile.name,
            connection = %profile.source_connection_name,
            "profile created"
        );
        Ok(profile)
    }

    /// Update an existing profile, optionally renaming it
    ///
    /// # Errors
    /// Returns `ProfileNotFound` if `current_name` does not exist, the same
    /// validation errors as [`Self::create_profile`], `DuplicateName` if the
    /// new name belongs to a different profile, or `StorageWriteError`
    pub fn update_profile(
        &mut self,
        current_name: &str,
        new_name: &str,
        connection_name: &str,
        report_id: Option<ReportId>,
    ) -> ProfileResult<ExecutionProfile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.is_named(current_name))
            .ok_or_else(|| ProfileError::ProfileNotFound(current_name.to_string()))?;

        let report_id = self.validate_fields(new_name, connection_name, report_id)?;

        let taken = self
            .profiles
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.is_named(new_name));
        if taken {
            return Err(ProfileError::DuplicateName(new_name.to_string()));
        }

        let mut updated = self.profiles[index].clone();
        updated.name = new_name.to_string();
        updated.source_connection_name = connection_name.to_string();
        updated.selected_report_id = report_id;
        updated.updated_at = Utc::now();

        ProfileStore::new(self.db.connection())
            .save(&updated)
            .map_err(ProfileError::StorageWriteError)?;

        let previous = std::mem::replace(&mut self.profiles[index], updated.clone());
        sort_by_name(&mut self.profiles);

        if previous.name == updated.name {
            tracing::info!(profile = %updated.name, "profile updated");
        } else {
            tracing::info!(profile = %updated.name, previous = %previous.name, "profile renamed");
        }
        Ok(updated)
    }

    /// Delete a profile by name, ignoring case
    ///
    /// Confirmation is the caller's responsibility. Returns whether a profile
    /// was removed; deleting an absent profile is not an error.
    ///
    /// # Errors
    /// Returns `StorageWriteError` if the record cannot be removed
    pub fn delete_profile(&mut self, name: &str) -> ProfileResult<bool> {
        let index = self.profiles.iter().position(|p| p.is_named(name));
        let stored_name = index.map_or(name, |i| self.profiles[i].name.as_str());

        let deleted = ProfileStore::new(self.db.connection())
            .delete(stored_name)
            .map_err(ProfileError::StorageWriteError)?;

        let removed = match index {
            Some(i) => {
                let profile = self.profiles.remove(i);
                tracing::info!(profile = %profile.name, "profile deleted");
                true
            }
            None => deleted,
        };
        Ok(removed)
    }

    /// Look up a profile and find its report in the cached list
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the cache cannot be read
    pub fn select_profile(&self, name: &str) -> ProfileResult<Option<ProfileSelection>> {
        let Some(profile) = self.find_by_name(name) else {
            return Ok(None);
        };

        let reports = self.cached_reports(&profile.source_connection_name)?;
        let selected_index = reconcile(&reports, Some(&profile.selected_report_id));
        if selected_index.is_none() {
            tracing::debug!(
                profile = %profile.name,
                report = %profile.selected_report_id,
                "selected report not in cache"
            );
        }

        tracing::info!(profile = %profile.name, "profile loaded");
        Ok(Some(ProfileSelection {
            profile: profile.clone(),
            reports,
            selected_index,
        }))
    }

    /// Make a freshly fetched report list the cache of record
    ///
    /// # Errors
    /// Returns `StorageWriteError` if the cache cannot be written
    pub fn refresh_report_cache(
        &self,
        connection_name: &str,
        reports: &[Report],
    ) -> ProfileResult<()> {
        ReportCacheStore::new(self.db.connection())
            .write(connection_name, reports)
            .map_err(ProfileError::StorageWriteError)?;

        tracing::info!(
            connection = %connection_name,
            count = reports.len(),
            "report cache refreshed"
        );
        Ok(())
    }

    /// Cached reports for a connection, empty if never fetched
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the cache cannot be read
    pub fn cached_reports(&self, connection_name: &str) -> ProfileResult<Vec<Report>> {
        ReportCacheStore::new(self.db.connection())
            .read(connection_name)
            .map_err(ProfileError::StorageUnavailable)
    }

    /// Full cache entry for a connection
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the cache cannot be read
    pub fn cache_entry(&self, connection_name: &str) -> ProfileResult<Option<ReportCacheEntry>> {
        ReportCacheStore::new(self.db.connection())
            .entry(connection_name)
            .map_err(ProfileError::StorageUnavailable)
    }

    /// Every cached connection
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the cache cannot be read
    pub fn cached_connections(&self) -> ProfileResult<Vec<ReportCacheEntry>> {
        ReportCacheStore::new(self.db.connection())
            .list()
            .map_err(ProfileError::StorageUnavailable)
    }

    /// The underlying database
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Close the database, flushing pending writes
    ///
    /// # Errors
    /// Returns `StorageWriteError` if the connection does not close cleanly
    pub fn close(self) -> ProfileResult<()> {
        self.db.close().map_err(ProfileError::StorageWriteError)
    }

    fn validate_fields(
        &self,
        name: &str,
        connection_name: &str,
        report_id: Option<ReportId>,
    ) -> ProfileResult<ReportId> {
        validate_name(name).map_err(|reason| ProfileError::InvalidName {
            name: name.to_string(),
            reason,
        })?;

        if connection_name.trim().is_empty() {
            return Err(ProfileError::ConnectionRequired);
        }

        if let Some(known) = &self.known_connections {
            if !known.iter().any(|c| c == connection_name) {
                return Err(ProfileError::UnknownConnection(connection_name.to_string()));
            }
        }

        report_id
            .filter(|id| !id.is_unset())
            .ok_or(ProfileError::ReportRequired)
    }
}

fn sort_by_name(profiles: &mut [ExecutionProfile]) {
    profiles.sort_by_cached_key(|p| name_key(&p.name));
}
