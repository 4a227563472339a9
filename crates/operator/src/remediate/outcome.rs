use chrono::{DateTime, Utc};

/// Classification of handling failures, shared between the intake (per
/// element extraction) and the controller (lifecycle results).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedPayload,
    NotFound,
    LifecycleError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedPayload => "malformed_payload",
            ErrorKind::NotFound => "not_found",
            ErrorKind::LifecycleError => "lifecycle_error",
        }
    }
}

/// A restart decision derived from a single firing alert. Lives only for
/// the duration of one notification.
#[derive(Debug, Clone)]
pub struct RemediationAction {
    pub target_workload: String,
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationStatus {
    Succeeded,
    /// Accepted but short-circuited by the per-target cooldown.
    Suppressed,
    Failed(ErrorKind),
}

/// Terminal result of one remediation attempt. The controller never
/// retries; re-firing alerts are the retry mechanism.
#[derive(Debug, Clone)]
pub struct RemediationOutcome {
    pub target_workload: String,
    pub reason: String,
    pub status: RemediationStatus,
}

impl RemediationOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == RemediationStatus::Succeeded
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.status {
            RemediationStatus::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn result_label(&self) -> &'static str {
        match self.status {
            RemediationStatus::Succeeded => "succeeded",
            RemediationStatus::Suppressed => "suppressed",
            RemediationStatus::Failed(kind) => kind.as_str(),
        }
    }
}
