use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::{timeout, Instant};
use tracing::{error, info, warn};

use crate::{
    config::RemediationConfig,
    lifecycle::{LifecycleClient, LifecycleError},
    metrics::REMEDIATIONS_TOTAL,
};

use super::{ErrorKind, RemediationAction, RemediationOutcome, RemediationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Restart,
}

/// Fixed mapping from alert name to corrective action. Alert names outside
/// the table are not remediated at all.
#[derive(Debug, Clone)]
pub struct TriggerTable {
    triggers: HashMap<String, ActionKind>,
}

impl TriggerTable {
    pub fn lookup(&self, alert_name: &str) -> Option<ActionKind> {
        self.triggers.get(alert_name).copied()
    }
}

impl Default for TriggerTable {
    fn default() -> Self {
        let mut triggers = HashMap::new();
        for name in ["HighCPUUsage", "HighMemoryUsage", "ContainerDown"] {
            triggers.insert(name.to_string(), ActionKind::Restart);
        }
        Self { triggers }
    }
}

pub struct RemediationController {
    client: Arc<dyn LifecycleClient>,
    triggers: TriggerTable,
    default_target: String,
    target_label: Option<String>,
    cooldown: Duration,
    lifecycle_timeout: Duration,
    // Last successful remediation per target, guarding against restart
    // storms when the evaluator keeps re-firing the same alert.
    last_remediated: Mutex<HashMap<String, Instant>>,
}

impl RemediationController {
    pub fn new(config: &RemediationConfig, client: Arc<dyn LifecycleClient>) -> Self {
        Self {
            client,
            triggers: TriggerTable::default(),
            default_target: config.default_target.clone(),
            target_label: config.target_label.clone(),
            cooldown: Duration::from_secs(config.cooldown_secs),
            lifecycle_timeout: Duration::from_secs(config.lifecycle_timeout_secs),
            last_remediated: Mutex::new(HashMap::new()),
        }
    }

    /// The configured default target, unless the alert labels name one and
    /// label overrides are enabled.
    pub fn resolve_target(&self, labels: &HashMap<String, String>) -> String {
        self.target_label
            .as_ref()
            .and_then(|key| labels.get(key))
            .cloned()
            .unwrap_or_else(|| self.default_target.clone())
    }

    /// Maps one firing alert to at most one restart attempt. Returns `None`
    /// for alert names outside the trigger table; callers must not treat
    /// that as an error.
    pub async fn remediate(&self, alert_name: &str, target: &str) -> Option<RemediationOutcome> {
        let action_kind = self.triggers.lookup(alert_name)?;

        let action = RemediationAction {
            target_workload: target.to_string(),
            reason: alert_name.to_string(),
            requested_at: Utc::now(),
        };

        let status = match action_kind {
            ActionKind::Restart => self.execute_restart(&action).await,
        };

        let outcome = RemediationOutcome {
            target_workload: action.target_workload,
            reason: action.reason,
            status,
        };

        REMEDIATIONS_TOTAL
            .with_label_values(&[outcome.result_label()])
            .inc();

        Some(outcome)
    }

    async fn execute_restart(&self, action: &RemediationAction) -> RemediationStatus {
        if !self.claim_cooldown(&action.target_workload).await {
            warn!(
                "Suppressing restart of {} (alert {}): within cooldown",
                action.target_workload, action.reason
            );
            return RemediationStatus::Suppressed;
        }

        info!(
            "Attempting to restart workload {} (alert {})",
            action.target_workload, action.reason
        );

        let status = match timeout(
            self.lifecycle_timeout,
            self.restart_once(&action.target_workload),
        )
        .await
        {
            Ok(Ok(())) => {
                info!("Successfully restarted workload {}", action.target_workload);
                RemediationStatus::Succeeded
            }
            Ok(Err(LifecycleError::NotFound(name))) => {
                error!("Workload {} not found", name);
                RemediationStatus::Failed(ErrorKind::NotFound)
            }
            Ok(Err(LifecycleError::Failed(err))) => {
                error!(
                    "Error restarting workload {}: {}",
                    action.target_workload, err
                );
                RemediationStatus::Failed(ErrorKind::LifecycleError)
            }
            Err(_) => {
                error!(
                    "Restart of workload {} timed out after {:?}",
                    action.target_workload, self.lifecycle_timeout
                );
                RemediationStatus::Failed(ErrorKind::LifecycleError)
            }
        };

        // A failed attempt does not hold the cooldown slot; a re-fired
        // alert may retry immediately.
        if status != RemediationStatus::Succeeded {
            self.release_cooldown(&action.target_workload).await;
        }

        status
    }

    async fn restart_once(&self, target: &str) -> std::result::Result<(), LifecycleError> {
        let workload = self.client.get(target).await?;
        self.client.restart(&workload.name).await
    }

    // Claims the cooldown slot before touching the runtime so two
    // concurrent alerts for the same target cannot both issue a restart.
    async fn claim_cooldown(&self, target: &str) -> bool {
        let mut last = self.last_remediated.lock().await;
        if let Some(at) = last.get(target) {
            if at.elapsed() < self.cooldown {
                return false;
            }
        }
        last.insert(target.to_string(), Instant::now());
        true
    }

    async fn release_cooldown(&self, target: &str) {
        self.last_remediated.lock().await.remove(target);
    }
}
