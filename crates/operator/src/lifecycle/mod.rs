mod kube;

pub use self::kube::KubeLifecycleClient;

use async_trait::async_trait;
use thiserror::Error;

/// Failure modes a runtime may report when acting on a workload. Nothing
/// else crosses the client boundary.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("workload {0} not found")]
    NotFound(String),
    #[error("lifecycle operation failed: {0}")]
    Failed(String),
}

/// Reference to a live workload as reported by the runtime.
#[derive(Debug, Clone)]
pub struct WorkloadRef {
    pub name: String,
    pub ready_replicas: i32,
}

/// Abstraction over whatever runtime manages the monitored unit. Any
/// process manager or orchestrator API exposing get/restart semantics can
/// stand in, including fakes in tests.
#[async_trait]
pub trait LifecycleClient: Send + Sync {
    async fn get(&self, name: &str) -> std::result::Result<WorkloadRef, LifecycleError>;
    async fn restart(&self, name: &str) -> std::result::Result<(), LifecycleError>;
}
