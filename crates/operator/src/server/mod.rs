mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::sources::WebhookHandler;

pub struct Server {
    webhook: Arc<WebhookHandler>,
}

impl Server {
    pub fn new(webhook: Arc<WebhookHandler>) -> Self {
        Self { webhook }
    }

    pub fn build_router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/alert", post(routes::alert))
            .route("/health", get(routes::health))
            .route("/metrics", get(routes::metrics))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    pub async fn start(self, addr: &str) -> crate::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}
