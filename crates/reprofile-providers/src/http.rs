//! HTTP/JSON report source
//!
//! Lists reports with `GET {url}/reports`. The body is either a JSON array
//! of reports or an OData-style `{"value": [...]}` envelope.

use async_trait::async_trait;
use reprofile_core::{ConnectionConfig, Report, ReportId};
use serde::Deserialize;
use std::time::Duration;

use crate::error::RemoteFault;
use crate::source::ReportSource;

/// Report source backed by a JSON web service
#[derive(Debug, Clone)]
pub struct HttpReportSource {
    client: reqwest::Client,
}

impl HttpReportSource {
    /// Create a source whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self, RemoteFault> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reprofile/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteFault::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a source from an existing client
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_reports(&self, connection: &ConnectionConfig) -> Result<Vec<Report>, RemoteFault> {
        let url = reports_url(&connection.url)?;
        let mut request = self.client.get(&url);

        if let Some(var) = &connection.token_env {
            let token = std::env::var(var).map_err(|_| {
                RemoteFault::Configuration(format!(
                    "connection '{}' needs a token in ${var}, which is not set",
                    connection.name
                ))
            })?;
            request = request.bearer_auth(token);
        }

        tracing::debug!(connection = %connection.name, url = %url, "fetching reports");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        connection = %connection.name,
                        status = status.as_u16(),
                        error = %e,
                        "failed to read error response body"
                    );
                    String::new()
                }
            };
            return Err(RemoteFault::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: WireBody =
            serde_json::from_slice(&bytes).map_err(|e| RemoteFault::Decode(e.to_string()))?;

        let reports: Vec<Report> = body.into_reports().into_iter().map(Report::from).collect();
        tracing::debug!(connection = %connection.name, count = reports.len(), "fetched reports");
        Ok(reports)
    }
}

fn reports_url(base: &str) -> Result<String, RemoteFault> {
    let base = base.trim().trim_end_matches('/');
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(RemoteFault::Configuration(format!(
            "connection URL must start with http:// or https://, got '{base}'"
        )));
    }
    Ok(format!("{base}/reports"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBody {
    List(Vec<WireReport>),
    Envelope { value: Vec<WireReport> },
}

impl WireBody {
    fn into_reports(self) -> Vec<WireReport> {
        match self {
            Self::List(reports) | Self::Envelope { value: reports } => reports,
        }
    }
}

#[derive(Deserialize)]
struct WireReport {
    id: WireId,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// Services hand out ids as GUID strings or plain numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireReport> for Report {
    fn from(wire: WireReport) -> Self {
        let id = match wire.id {
            WireId::Text(text) => ReportId::new(text),
            WireId::Number(n) => ReportId::new(n.to_string()),
        };
        Report {
            id,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_url() {
        assert_eq!(
            reports_url("https://crm.example.com/").unwrap(),
            "https://crm.example.com/reports"
        );
        assert_eq!(
            reports_url("http://localhost:8080/api").unwrap(),
            "http://localhost:8080/api/reports"
        );
        assert!(matches!(
            reports_url("crm.example.com"),
            Err(RemoteFault::Configuration(_))
        ));
    }

    #[test]
    fn test_decode_list_with_numeric_ids() {
        let body: WireBody = serde_json::from_str(
            r#"[{"id": 1, "name": "Sales"}, {"id": "2", "name": "Ops", "description": null}]"#,
        )
        .unwrap();
        let reports: Vec<Report> = body.into_reports().into_iter().map(Report::from).collect();
        assert_eq!(reports, vec![Report::new("1", "Sales"), Report::new("2", "Ops")]);
    }

    #[test]
    fn test_decode_envelope() {
        let body: WireBody = serde_json::from_str(
            r#"{"value": [{"id": "a1", "name": "Sales", "description": "By region"}]}"#,
        )
        .unwrap();
        let reports: Vec<Report> = body.into_reports().into_iter().map(Report::from).collect();
        assert_eq!(reports[0].description, "By region");
    }
}
