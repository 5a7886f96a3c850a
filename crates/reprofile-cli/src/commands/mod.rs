//! CLI command handlers
//!
//! Each top-level subcommand has its own module. They share the storage
//! setup below.

pub mod cache;
pub mod connection;
pub mod profile;
pub mod reports;

use anyhow::Context;
use reprofile_core::storage::Database;
use reprofile_core::{AppConfig, ConnectionRegistry, ProfileManager};

/// Load the connection registry
pub fn open_registry(config: &AppConfig) -> anyhow::Result<ConnectionRegistry> {
    let path = config.connections_path();
    ConnectionRegistry::load(&path)
        .with_context(|| format!("Failed to load connections from {}", path.display()))
}

/// Open the database and load every profile
pub fn open_manager(
    config: &AppConfig,
    registry: &ConnectionRegistry,
) -> anyhow::Result<ProfileManager> {
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            config.data_dir.display()
        )
    })?;

    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    Ok(ProfileManager::open(db)?.with_known_connections(registry.names()))
}
