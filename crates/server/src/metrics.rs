//! Prometheus metrics for the OPN server.
//!
//! Counters track visit recording and document validation. The `/metrics`
//! endpoint is unauthenticated; restrict it at the network level.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{self, Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static PROFILES_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "opn_profiles_created_total",
        "Total number of profiles created on first visit",
    )
    .expect("metric creation failed")
});

pub static VISITS_RECORDED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "opn_visits_recorded_total",
        "Total number of profile visits recorded",
    )
    .expect("metric creation failed")
});

pub static PROFILES_DEACTIVATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "opn_profiles_deactivated_total",
        "Total number of profiles marked inactive",
    )
    .expect("metric creation failed")
});

pub static DOCUMENT_VALIDATION_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "opn_document_validation_failures_total",
        "Total number of profile documents rejected by validation",
    )
    .expect("metric creation failed")
});

/// Guard to ensure metrics are only registered once.
static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// Idempotent, so tests and embedded routers can call it freely.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(PROFILES_CREATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(VISITS_RECORDED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(PROFILES_DEACTIVATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(DOCUMENT_VALIDATION_FAILURES.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}
