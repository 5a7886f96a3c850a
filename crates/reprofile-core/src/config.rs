//! Application configuration from environment variables

use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("cannot determine a data directory; set REPROFILE_DATA_DIR")]
    NoDataDir,
}

/// Runtime settings shared by the CLI and the report fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Holds the database and `connections.json`
    pub data_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Upper bound for one remote report fetch
    pub fetch_timeout_secs: u64,
}

impl AppConfig {
    /// Path of the `SQLite` database
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("reprofile.db")
    }

    /// Path of the connection registry file
    #[must_use]
    pub fn connections_path(&self) -> PathBuf {
        self.data_dir.join("connections.json")
    }
}

/// Load configuration, reading a `.env` file first if one exists
///
/// # Errors
/// Returns `ConfigError` if a variable holds an invalid value
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from the provided env-var lookup
///
/// Decoupled from the process environment so tests can pass a map.
///
/// # Errors
/// Returns `ConfigError` if a variable holds an invalid value
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let data_dir = match lookup("REPROFILE_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or(ConfigError::NoDataDir)?
            .join(".reprofile"),
    };

    let log_level = lookup("REPROFILE_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

    let fetch_timeout_secs = match lookup("REPROFILE_FETCH_TIMEOUT_SECS") {
        Ok(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "REPROFILE_FETCH_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?;
            if secs == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "REPROFILE_FETCH_TIMEOUT_SECS".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            secs
        }
        Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
    };

    Ok(AppConfig {
        data_dir,
        log_level,
        fetch_timeout_secs,
    })
}
