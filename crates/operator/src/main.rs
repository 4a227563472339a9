use std::sync::Arc;
use tracing::info;

use remedy_operator::{
    config::Config,
    lifecycle::KubeLifecycleClient,
    remediate::RemediationController,
    server::Server,
    sources::WebhookHandler,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load()?;
    info!("Loaded configuration: {:?}", config);

    // Initialize the workload lifecycle client
    let lifecycle = Arc::new(KubeLifecycleClient::new(&config.kube.namespace).await?);

    // Initialize the remediation controller
    let controller = Arc::new(RemediationController::new(&config.remediation, lifecycle));

    // Initialize the alert intake
    let webhook = Arc::new(WebhookHandler::new(controller));

    // Start server
    let server = Server::new(webhook);
    info!("Starting webhook receiver on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
