use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use remedy_operator::{
    config::Config,
    metrics::{
        self, SAMPLE_CPU_USAGE, SAMPLE_MEMORY_USAGE, SAMPLE_REQUEST_COUNT, SAMPLE_REQUEST_LATENCY,
    },
    simulator::LoadSimulator,
    Result,
};

async fn index() -> Json<serde_json::Value> {
    SAMPLE_REQUEST_COUNT.inc();
    let _timer = SAMPLE_REQUEST_LATENCY.start_timer();
    Json(json!({
        "status": "running",
        "memory": SAMPLE_MEMORY_USAGE.get(),
        "cpu": SAMPLE_CPU_USAGE.get(),
    }))
}

// Endpoint to trigger a memory spike for testing
async fn memory_spike() -> Json<serde_json::Value> {
    SAMPLE_MEMORY_USAGE.set(95);
    warn!("Memory spike triggered");
    Json(json!({ "status": "memory spike triggered", "memory": 95 }))
}

// Endpoint to trigger a CPU spike for testing
async fn cpu_spike() -> Json<serde_json::Value> {
    SAMPLE_CPU_USAGE.set(95);
    warn!("CPU spike triggered");
    Json(json!({ "status": "cpu spike triggered", "cpu": 95 }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;

    // Nominal starting point before the simulator takes over
    SAMPLE_MEMORY_USAGE.set(50);
    SAMPLE_CPU_USAGE.set(20);
    LoadSimulator::new(config.workload.simulate_high_load).spawn();
    info!("Load simulation started");

    let app = Router::new()
        .route("/", get(index))
        .route("/memory-spike", get(memory_spike))
        .route("/cpu-spike", get(cpu_spike))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http());

    info!("Starting sample workload on {}", config.workload.addr);
    let listener = tokio::net::TcpListener::bind(&config.workload.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
