use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    metrics::ALERTS_RECEIVED_TOTAL,
    remediate::{ErrorKind, RemediationController, RemediationOutcome},
    Result,
};

/// Alertmanager-style notification payload. Everything beyond the alert
/// list is ignored; a payload without an `alerts` key is an empty batch,
/// not an error.
#[derive(Debug, Deserialize, Serialize)]
pub struct AlertBatch {
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

/// One reported condition. Extracted per element so a bad entry cannot
/// poison the rest of the batch.
#[derive(Debug, Deserialize, Serialize)]
pub struct AlertRecord {
    pub status: AlertStatus,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl AlertRecord {
    pub fn alert_name(&self) -> Option<&str> {
        self.labels.get("alertname").map(String::as_str)
    }
}

/// What happened to one notification: how many elements were extracted,
/// which indices were skipped, and the outcome of every action taken.
#[derive(Debug, Default)]
pub struct HandlingResult {
    pub processed: usize,
    pub errors: Vec<(usize, ErrorKind)>,
    pub outcomes: Vec<RemediationOutcome>,
}

pub struct WebhookHandler {
    controller: Arc<RemediationController>,
}

impl WebhookHandler {
    pub fn new(controller: Arc<RemediationController>) -> Self {
        Self { controller }
    }

    /// Decodes one notification and forwards each qualifying firing record
    /// to the controller before returning. A non-decodable payload is the
    /// only fatal case; downstream state is untouched when it occurs.
    pub async fn handle_alertmanager_webhook(&self, body: &[u8]) -> Result<HandlingResult> {
        let payload: serde_json::Value = serde_json::from_slice(body)?;
        info!("Received alert notification: {}", payload);
        ALERTS_RECEIVED_TOTAL.inc();

        let batch: AlertBatch = serde_json::from_value(payload)?;

        let mut result = HandlingResult::default();

        for (index, raw) in batch.alerts.into_iter().enumerate() {
            let record: AlertRecord = match serde_json::from_value(raw) {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping malformed alert at index {}: {}", index, err);
                    result.errors.push((index, ErrorKind::MalformedPayload));
                    continue;
                }
            };

            let Some(alert_name) = record.alert_name().map(str::to_string) else {
                warn!("Skipping alert at index {}: missing alertname label", index);
                result.errors.push((index, ErrorKind::MalformedPayload));
                continue;
            };

            result.processed += 1;

            if record.status != AlertStatus::Firing {
                continue;
            }

            let target = self.controller.resolve_target(&record.labels);
            // An alert name outside the trigger table yields None, which is
            // deliberately not counted as an error.
            if let Some(outcome) = self.controller.remediate(&alert_name, &target).await {
                result.outcomes.push(outcome);
            }
        }

        Ok(result)
    }
}
