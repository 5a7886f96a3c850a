//! Report cache refresh tests
//!
//! A refresh only replaces the cache when the fetch completes.

use reprofile_core::storage::Database;
use reprofile_core::{ConnectionConfig, ProfileManager, Report};
use reprofile_providers::{refresh_report_cache, FetchError, FetchOutcome, HttpReportSource};
use std::future::pending;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seeded_manager() -> ProfileManager {
    let manager = ProfileManager::open(Database::in_memory().unwrap()).unwrap();
    manager
        .refresh_report_cache("Prod", &[Report::new("1", "Sales"), Report::new("2", "Ops")])
        .unwrap();
    manager
}

fn connection(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig {
        name: "Prod".to_string(),
        url: server.uri(),
        token_env: None,
    }
}

fn source() -> Arc<HttpReportSource> {
    Arc::new(HttpReportSource::new(Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_completed_fetch_replaces_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 3, "name": "Finance"}])),
        )
        .mount(&server)
        .await;

    let manager = seeded_manager();
    let outcome = refresh_report_cache(
        &manager,
        source(),
        connection(&server),
        pending::<()>(),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, FetchOutcome::Fetched(_)));
    assert_eq!(
        manager.cached_reports("Prod").unwrap(),
        vec![Report::new("3", "Finance")]
    );
}

#[tokio::test]
async fn test_cancelled_fetch_keeps_previous_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let manager = seeded_manager();
    let outcome = refresh_report_cache(
        &manager,
        source(),
        connection(&server),
        tokio::time::sleep(Duration::from_millis(50)),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, FetchOutcome::Cancelled));
    assert_eq!(manager.cached_reports("Prod").unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let manager = seeded_manager();
    let err = refresh_report_cache(
        &manager,
        source(),
        connection(&server),
        pending::<()>(),
        Duration::from_secs(5),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, FetchError::Remote(_)));
    assert_eq!(
        manager.cached_reports("Prod").unwrap(),
        vec![Report::new("1", "Sales"), Report::new("2", "Ops")]
    );
}
