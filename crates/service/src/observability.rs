use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static BACKEND_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "spa_admin_backend_requests_total",
        "Backend REST calls by method and response status",
        &["method", "status"]
    )
    .expect("register backend_requests_total")
});

pub static BACKEND_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "spa_admin_backend_request_duration_seconds",
        "Backend REST call duration in seconds",
        &["method"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register backend_request_duration")
});

pub static BACKEND_NETWORK_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "spa_admin_backend_network_errors_total",
        "Backend calls that failed before a response arrived"
    )
    .expect("register backend_network_errors_total")
});

pub static REGISTRATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "spa_admin_registrations_total",
        "Provider registration steps reached",
        &["step"]
    )
    .expect("register registrations_total")
});

pub static IMAGE_UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "spa_admin_image_uploads_total",
        "Image uploads by outcome",
        &["outcome"]
    )
    .expect("register image_uploads_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_output() {
        BACKEND_REQUESTS_TOTAL.with_label_values(&["GET", "200"]).inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("spa_admin_backend_requests_total"));
    }
}
