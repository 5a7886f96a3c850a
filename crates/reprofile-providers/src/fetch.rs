//! Cancellable report fetch
//!
//! The caller blocks on this while the fetch runs on its own task. Only a
//! completed fetch yields reports; a cancelled, timed-out or failed fetch
//! yields nothing, so the caller's cached list stays as it was.

use reprofile_core::{ConnectionConfig, ProfileManager, Report};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{FetchError, RemoteFault};
use crate::source::ReportSource;

/// How a fetch ended, short of an error
#[derive(Debug)]
pub enum FetchOutcome {
    /// The source returned this report list
    Fetched(Vec<Report>),
    /// The cancel signal fired first
    Cancelled,
}

/// Fetch reports for `connection`, racing the fetch against `cancel`
///
/// # Errors
/// Returns `FetchError::Remote` if the source fails and
/// `FetchError::TimedOut` if it takes longer than `timeout`
pub async fn fetch_reports_cancellable<C>(
    source: Arc<dyn ReportSource>,
    connection: ConnectionConfig,
    cancel: C,
    timeout: Duration,
) -> Result<FetchOutcome, FetchError>
where
    C: Future<Output = ()>,
{
    let name = connection.name.clone();
    let task = tokio::spawn(async move { source.fetch_reports(&connection).await });
    let abort = task.abort_handle();

    tokio::select! {
        joined = tokio::time::timeout(timeout, task) => match joined {
            Ok(Ok(result)) => Ok(FetchOutcome::Fetched(result?)),
            Ok(Err(join_err)) => Err(RemoteFault::Transport(format!(
                "report fetch task failed: {join_err}"
            ))
            .into()),
            Err(_) => {
                abort.abort();
                tracing::warn!(connection = %name, ?timeout, "report fetch timed out");
                Err(FetchError::TimedOut(timeout))
            }
        },
        () = cancel => {
            abort.abort();
            tracing::info!(connection = %name, "report fetch cancelled");
            Ok(FetchOutcome::Cancelled)
        }
    }
}

/// Fetch reports and make them the cache of record for the connection
///
/// The cache is written only when the fetch completes. Returns the outcome
/// so the caller can tell a refresh from a cancellation.
///
/// # Errors
/// Returns the fetch error, or `FetchError::Storage` if the cache cannot be
/// written; in every error case the previous cache entry is kept
pub async fn refresh_report_cache<C>(
    manager: &ProfileManager,
    source: Arc<dyn ReportSource>,
    connection: ConnectionConfig,
    cancel: C,
    timeout: Duration,
) -> Result<FetchOutcome, FetchError>
where
    C: Future<Output = ()>,
{
    let name = connection.name.clone();
    let outcome = fetch_reports_cancellable(source, connection, cancel, timeout).await?;
    if let FetchOutcome::Fetched(reports) = &outcome {
        manager.refresh_report_cache(&name, reports)?;
    }
    Ok(outcome)
}
