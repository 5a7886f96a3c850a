//! Storage layer (`SQLite`)

pub mod db;
pub mod migrations;
pub mod profiles;
pub mod reports;

pub use db::{Database, DatabaseError};
pub use profiles::ProfileStore;
pub use reports::ReportCacheStore;
