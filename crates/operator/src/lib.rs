pub mod config;
pub mod lifecycle;
pub mod metrics;
pub mod remediate;
pub mod server;
pub mod simulator;
pub mod sources;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed alert payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Kubernetes error: {0}")]
    Kubernetes(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
