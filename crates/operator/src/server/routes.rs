use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use super::Server;

pub async fn health() -> impl IntoResponse {
    // No dependency checks; the probe only says the process is serving.
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics() -> String {
    crate::metrics::gather_metrics()
}

/// Alertmanager webhook entry point. Remediation failures are acknowledged
/// with a 200: the alert was processed, and the failure lives in logs and
/// metrics rather than in the notifier's retry loop.
pub async fn alert(State(server): State<Arc<Server>>, body: Bytes) -> Response {
    match server.webhook.handle_alertmanager_webhook(&body).await {
        Ok(result) => {
            info!(
                "Processed {} alerts ({} skipped, {} actions)",
                result.processed,
                result.errors.len(),
                result.outcomes.len()
            );
            (
                StatusCode::OK,
                Json(json!({ "status": "success", "message": "Alert processed" })),
            )
                .into_response()
        }
        Err(err) => {
            error!("Error processing alert: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": err.to_string() })),
            )
                .into_response()
        }
    }
}
