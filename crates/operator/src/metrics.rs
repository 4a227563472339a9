use lazy_static::lazy_static;
use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, Histogram,
    IntCounter, IntCounterVec, IntGauge, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref ALERTS_RECEIVED_TOTAL: IntCounter = register_int_counter_with_registry!(
        "remedy_alerts_received_total",
        "Total number of alert notifications received.",
        REGISTRY
    )
    .unwrap();

    pub static ref REMEDIATIONS_TOTAL: IntCounterVec = register_int_counter_vec_with_registry!(
        "remedy_remediations_total",
        "Remediation attempts by result.",
        &["result"],
        REGISTRY
    )
    .unwrap();

    // Synthetic gauges exposed by the sample workload.
    pub static ref SAMPLE_MEMORY_USAGE: IntGauge = register_int_gauge_with_registry!(
        "sample_memory_usage",
        "Memory Usage Simulation",
        REGISTRY
    )
    .unwrap();

    pub static ref SAMPLE_CPU_USAGE: IntGauge = register_int_gauge_with_registry!(
        "sample_cpu_usage",
        "CPU Usage Simulation",
        REGISTRY
    )
    .unwrap();

    pub static ref SAMPLE_REQUEST_COUNT: IntCounter = register_int_counter_with_registry!(
        "sample_request_count",
        "App Request Count",
        REGISTRY
    )
    .unwrap();

    pub static ref SAMPLE_REQUEST_LATENCY: Histogram = register_histogram_with_registry!(
        "sample_request_latency_seconds",
        "Request latency in seconds",
        REGISTRY
    )
    .unwrap();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> String {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}
