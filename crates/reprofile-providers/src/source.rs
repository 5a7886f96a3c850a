//! Report source trait

use async_trait::async_trait;
use reprofile_core::{ConnectionConfig, Report};

use crate::error::RemoteFault;

/// Something that can list the reports a connection offers
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the current report list for a connection, in service order
    async fn fetch_reports(&self, connection: &ConnectionConfig) -> Result<Vec<Report>, RemoteFault>;
}
