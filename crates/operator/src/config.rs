use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub kube: KubeConfig,
    pub remediation: RemediationConfig,
    pub workload: WorkloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubeConfig {
    pub namespace: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationConfig {
    /// Workload restarted when an alert carries no target of its own.
    pub default_target: String,
    /// Alert label key allowed to override the default target. `None`
    /// means labels are ignored and the default always wins.
    pub target_label: Option<String>,
    pub cooldown_secs: u64,
    pub lifecycle_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub addr: String,
    pub simulate_high_load: bool,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR")
                    .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            },
            kube: KubeConfig {
                namespace: std::env::var("KUBE_NAMESPACE")
                    .unwrap_or_else(|_| "default".to_string()),
            },
            remediation: RemediationConfig {
                default_target: std::env::var("DEFAULT_TARGET_WORKLOAD")
                    .unwrap_or_else(|_| "sample-service".to_string()),
                target_label: match std::env::var("TARGET_LABEL") {
                    Ok(value) if value.is_empty() => None,
                    Ok(value) => Some(value),
                    Err(_) => Some("workload".to_string()),
                },
                cooldown_secs: parse_secs("REMEDIATION_COOLDOWN_SECS", 60)?,
                lifecycle_timeout_secs: parse_secs("LIFECYCLE_TIMEOUT_SECS", 5)?,
            },
            workload: WorkloadConfig {
                addr: std::env::var("WORKLOAD_ADDR")
                    .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
                simulate_high_load: std::env::var("SIMULATE_HIGH_LOAD")
                    .map(|value| value.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        };

        if config.remediation.default_target.is_empty() {
            return Err(crate::Error::Config(
                "DEFAULT_TARGET_WORKLOAD must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_secs(name: &str, default: u64) -> crate::Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            crate::Error::Config(format!("{} must be a number of seconds, got {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: "0.0.0.0:8080".to_string(),
            },
            kube: KubeConfig {
                namespace: "default".to_string(),
            },
            remediation: RemediationConfig {
                default_target: "sample-service".to_string(),
                target_label: Some("workload".to_string()),
                cooldown_secs: 60,
                lifecycle_timeout_secs: 5,
            },
            workload: WorkloadConfig {
                addr: "0.0.0.0:5000".to_string(),
                simulate_high_load: false,
            },
        }
    }
}
