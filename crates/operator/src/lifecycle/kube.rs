use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    api::{Api, Patch, PatchParams},
    Client,
};
use tracing::info;

use super::{LifecycleClient, LifecycleError, WorkloadRef};

/// Lifecycle client backed by a namespaced Deployment API. Restart is the
/// rollout-restart annotation patch, so the workload is recycled through
/// its own update strategy rather than deleted outright.
pub struct KubeLifecycleClient {
    deployments: Api<Deployment>,
}

impl KubeLifecycleClient {
    pub async fn new(namespace: &str) -> crate::Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| crate::Error::Kubernetes(e.to_string()))?;

        Ok(Self {
            deployments: Api::namespaced(client, namespace),
        })
    }

    fn map_error(name: &str, err: kube::Error) -> LifecycleError {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => LifecycleError::NotFound(name.to_string()),
            other => LifecycleError::Failed(other.to_string()),
        }
    }
}

#[async_trait]
impl LifecycleClient for KubeLifecycleClient {
    async fn get(&self, name: &str) -> std::result::Result<WorkloadRef, LifecycleError> {
        let deployment = self
            .deployments
            .get(name)
            .await
            .map_err(|e| Self::map_error(name, e))?;

        let ready_replicas = deployment
            .status
            .as_ref()
            .and_then(|status| status.ready_replicas)
            .unwrap_or(0);

        Ok(WorkloadRef {
            name: name.to_string(),
            ready_replicas,
        })
    }

    async fn restart(&self, name: &str) -> std::result::Result<(), LifecycleError> {
        let patch = serde_json::json!({
            "spec": {
                "template": {
                    "metadata": {
                        "annotations": {
                            "kubectl.kubernetes.io/restartedAt": Utc::now().to_rfc3339(),
                        }
                    }
                }
            }
        });

        self.deployments
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| Self::map_error(name, e))?;

        info!("Issued rollout restart for deployment {}", name);
        Ok(())
    }
}
