//! Reprofile Core - Execution profiles, report cache and storage
//!
//! This crate provides the execution profile model, name validation,
//! `SQLite` storage for profiles and cached report lists, and the
//! selection logic that ties a profile to its cached report.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod connection;
pub mod manager;
pub mod profile;
pub mod report;
pub mod storage;

pub use config::AppConfig;
pub use connection::{ConnectionConfig, ConnectionRegistry};
pub use manager::{ProfileManager, ProfileSelection};
pub use profile::{ExecutionProfile, InvalidNameReason, ProfileError};
pub use report::{Report, ReportCacheEntry, ReportId};
