//! Connection registry
//!
//! Connections are defined in a JSON file maintained outside this tool.
//! Profiles only reference them by name.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error for {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("JSON parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// A named remote report service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Name profiles refer to
    pub name: String,
    /// Base URL of the report service
    pub url: String,
    /// Environment variable holding a bearer token, if the service needs one
    #[serde(default)]
    pub token_env: Option<String>,
}

/// The set of known connections
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Vec<ConnectionConfig>,
}

impl ConnectionRegistry {
    /// Build a registry from already-loaded connections
    #[must_use]
    pub fn new(connections: Vec<ConnectionConfig>) -> Self {
        Self { connections }
    }

    /// Load the registry file; a missing file is an empty registry
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no connection registry file");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RegistryError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let connections: Vec<ConnectionConfig> =
            serde_json::from_str(&content).map_err(|e| RegistryError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!(count = connections.len(), "loaded connection registry");
        Ok(Self { connections })
    }

    /// Connection names in file order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.connections.iter().map(|c| c.name.clone()).collect()
    }

    /// All connections in file order
    #[must_use]
    pub fn connections(&self) -> &[ConnectionConfig] {
        &self.connections
    }

    /// Look up a connection by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConnectionConfig> {
        self.connections.iter().find(|c| c.name == name)
    }

    /// Whether a connection with this exact name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = ConnectionRegistry::load(&dir.path().join("connections.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_and_lookup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("connections.json");
        fs::write(
            &path,
            r#"[
                {"name": "Prod", "url": "https://crm.example.com", "token_env": "PROD_TOKEN"},
                {"name": "Dev", "url": "http://localhost:8080"}
            ]"#,
        )
        .unwrap();

        let registry = ConnectionRegistry::load(&path).unwrap();
        assert_eq!(registry.names(), vec!["Prod", "Dev"]);
        assert!(registry.contains("Prod"));
        assert!(!registry.contains("prod"));
        assert_eq!(
            registry.get("Prod").unwrap().token_env.as_deref(),
            Some("PROD_TOKEN")
        );
        assert_eq!(registry.get("Dev").unwrap().token_env, None);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("connections.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ConnectionRegistry::load(&path),
            Err(RegistryError::Parse { .. })
        ));
    }
}
