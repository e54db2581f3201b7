//! Prometheus metrics for pizza-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec, HistogramVec,
    IntCounter, TextEncoder,
};
use std::sync::OnceLock;

/// Recorder handle for the `metrics` facade used by the shared HTTP middleware.
static HTTP_METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "pizza_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Restaurant pizza rows created through the API.
pub static RESTAURANT_PIZZAS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pizza_restaurant_pizzas_created_total",
        "Total number of restaurant pizzas created"
    )
    .expect("Failed to register restaurant_pizzas_created")
});

/// Restaurants removed through the API.
pub static RESTAURANTS_DELETED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pizza_restaurants_deleted_total",
        "Total number of restaurants deleted"
    )
    .expect("Failed to register restaurants_deleted")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pizza_errors_total",
        "Total number of errors by type",
        &["error_type"] // validation_error, not_found, db_error
    )
    .expect("Failed to register errors_total")
});

/// Initialize all metrics (forces lazy initialization).
///
/// Safe to call more than once; only the first call installs the HTTP recorder.
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&RESTAURANT_PIZZAS_CREATED);
    Lazy::force(&RESTAURANTS_DELETED);
    Lazy::force(&ERRORS_TOTAL);

    if HTTP_METRICS_HANDLE.get().is_none() {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = HTTP_METRICS_HANDLE.set(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
        }
    }
}

/// Count an error by type.
pub fn record_error(error_type: &str) {
    ERRORS_TOTAL.with_label_values(&[error_type]).inc();
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = HTTP_METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    output.push_str(&encoder.encode_to_string(&metric_families).unwrap_or_default());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_errors_appear_in_output() {
        init_metrics();
        record_error("validation_error");

        let output = get_metrics();
        assert!(output.contains("pizza_errors_total"));
        assert!(output.contains("validation_error"));
    }
}
