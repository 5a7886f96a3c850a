//! Report listing
//!
//! Handles: reprofile reports <connection> [--refresh] [--profile]

use anyhow::{bail, Context};
use reprofile_core::profile::reconcile;
use reprofile_core::{AppConfig, ProfileError};
use reprofile_providers::{refresh_report_cache, FetchOutcome, HttpReportSource};
use std::sync::Arc;
use std::time::Duration;

use super::{open_manager, open_registry};

/// List the cached reports for a connection, refreshing first if asked
pub fn execute(
    connection_name: &str,
    refresh: bool,
    profile_name: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let manager = open_manager(config, &registry)?;

    let selected = match profile_name {
        Some(name) => {
            let profile = manager
                .find_by_name(name)
                .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))?;
            if profile.source_connection_name != connection_name {
                bail!(
                    "Profile '{}' uses connection '{}', not '{connection_name}'",
                    profile.name,
                    profile.source_connection_name
                );
            }
            Some(profile.selected_report_id.clone())
        }
        None => None,
    };

    if refresh {
        let connection = registry
            .get(connection_name)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownConnection(connection_name.to_string()))?;
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        let source = HttpReportSource::new(timeout)?;

        println!("Loading reports. Please wait...");
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let cancel = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match runtime.block_on(refresh_report_cache(
            &manager,
            Arc::new(source),
            connection,
            cancel,
            timeout,
        ))? {
            FetchOutcome::Fetched(reports) => println!("Reports loaded ({}).", reports.len()),
            FetchOutcome::Cancelled => println!("Refresh cancelled; showing cached reports."),
        }
    }

    let entry = manager.cache_entry(connection_name)?;
    match entry {
        Some(entry) if !entry.reports.is_empty() => {
            let selected_index = reconcile(&entry.reports, selected.as_ref());
            println!(
                "Reports for {} (cached {}):",
                entry.connection_name,
                entry.fetched_at.format("%Y-%m-%d %H:%M")
            );
            for (i, report) in entry.reports.iter().enumerate() {
                let marker = if selected_index == Some(i) { '*' } else { ' ' };
                if report.description.is_empty() {
                    println!("{marker} {}  {}", report.id, report.name);
                } else {
                    println!(
                        "{marker} {}  {} - {}",
                        report.id, report.name, report.description
                    );
                }
            }
            if selected.is_some() && selected_index.is_none() {
                println!("\nThe profile's report is not in the cached list.");
            }
        }
        _ => println!(
            "No cached reports for {connection_name}. Run with --refresh to load them."
        ),
    }

    manager.close()?;
    Ok(())
}
