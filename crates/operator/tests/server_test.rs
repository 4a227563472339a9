use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use remedy_operator::{
    config::RemediationConfig,
    lifecycle::{LifecycleClient, LifecycleError, WorkloadRef},
    remediate::RemediationController,
    server::Server,
    sources::WebhookHandler,
};

/// Records every restart so tests can assert exactly which workloads were
/// touched. `missing` simulates a target the runtime does not know.
struct RecordingLifecycle {
    restarts: Mutex<Vec<String>>,
    missing: bool,
}

impl RecordingLifecycle {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            restarts: Mutex::new(Vec::new()),
            missing: false,
        })
    }

    fn missing() -> Arc<Self> {
        Arc::new(Self {
            restarts: Mutex::new(Vec::new()),
            missing: true,
        })
    }

    fn restarts(&self) -> Vec<String> {
        self.restarts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LifecycleClient for RecordingLifecycle {
    async fn get(&self, name: &str) -> Result<WorkloadRef, LifecycleError> {
        if self.missing {
            return Err(LifecycleError::NotFound(name.to_string()));
        }
        Ok(WorkloadRef {
            name: name.to_string(),
            ready_replicas: 1,
        })
    }

    async fn restart(&self, name: &str) -> Result<(), LifecycleError> {
        self.restarts.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

fn remediation_config(cooldown_secs: u64) -> RemediationConfig {
    RemediationConfig {
        default_target: "sample-service".to_string(),
        target_label: Some("workload".to_string()),
        cooldown_secs,
        lifecycle_timeout_secs: 5,
    }
}

fn build_server(lifecycle: Arc<RecordingLifecycle>, cooldown_secs: u64) -> TestServer {
    let controller = Arc::new(RemediationController::new(
        &remediation_config(cooldown_secs),
        lifecycle,
    ));
    let webhook = Arc::new(WebhookHandler::new(controller));
    let app = Server::new(webhook).build_router();
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let client = build_server(RecordingLifecycle::new(), 60);

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_firing_alert_restarts_default_target() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "alertname": "HighCPUUsage" } }
        ]
    });

    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Alert processed");

    assert_eq!(lifecycle.restarts(), vec!["sample-service".to_string()]);
}

#[tokio::test]
async fn test_resolved_alerts_take_no_action() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            { "status": "resolved", "labels": { "alertname": "HighCPUUsage" } },
            { "status": "resolved", "labels": { "alertname": "ContainerDown" } }
        ]
    });

    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(lifecycle.restarts().is_empty());
}

#[tokio::test]
async fn test_unknown_alert_name_is_acknowledged_without_action() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "alertname": "UnknownAlert" } }
        ]
    });

    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert!(lifecycle.restarts().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_rejected_without_lifecycle_calls() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let response = client.post("/alert").text("{not json").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(!body["message"].as_str().unwrap().is_empty());

    assert!(lifecycle.restarts().is_empty());
}

#[tokio::test]
async fn test_missing_alerts_key_is_an_empty_batch() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let response = client.post("/alert").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert!(lifecycle.restarts().is_empty());
}

#[tokio::test]
async fn test_bad_element_does_not_abort_the_batch() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    // First element has no alertname, second is valid and firing.
    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "severity": "critical" } },
            { "status": "firing", "labels": { "alertname": "ContainerDown" } }
        ]
    });

    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(lifecycle.restarts(), vec!["sample-service".to_string()]);
}

#[tokio::test]
async fn test_missing_workload_is_still_acknowledged() {
    let lifecycle = RecordingLifecycle::missing();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "alertname": "ContainerDown" } }
        ]
    });

    // Remediation fails with NotFound, but the alert itself was processed.
    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert!(lifecycle.restarts().is_empty());
}

#[tokio::test]
async fn test_target_label_overrides_default() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            {
                "status": "firing",
                "labels": { "alertname": "HighMemoryUsage", "workload": "payments-api" }
            }
        ]
    });

    let response = client.post("/alert").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(lifecycle.restarts(), vec!["payments-api".to_string()]);
}

#[tokio::test]
async fn test_repeated_firing_is_suppressed_by_cooldown() {
    let lifecycle = RecordingLifecycle::new();
    let client = build_server(lifecycle.clone(), 60);

    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "alertname": "HighCPUUsage" } }
        ]
    });

    for _ in 0..3 {
        let response = client.post("/alert").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    // One restart went through; the re-fires were short-circuited.
    assert_eq!(lifecycle.restarts().len(), 1);
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    let client = build_server(RecordingLifecycle::new(), 60);

    let payload = json!({
        "alerts": [
            { "status": "firing", "labels": { "alertname": "HighCPUUsage" } }
        ]
    });
    client.post("/alert").json(&payload).await;

    let response = client.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("remedy_alerts_received_total"));
    assert!(body.contains("remedy_remediations_total"));
}
