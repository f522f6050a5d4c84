//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the verse journey server:
//! - HTTP request metrics (latency, counts, in flight), labelled by route
//!   template so journey ids and verse references stay out of the labels
//! - Journey metrics (active journeys, wizard actions)
//! - Favorites (collected dynamically)
//!
//! Core metrics (resolution outcomes, recommend latency, external calls)
//! are registered from `verse_core::metrics`.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "verse_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("verse_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "verse_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Journey Metrics
// =============================================================================

/// Journeys currently held by the server.
pub static JOURNEYS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("verse_journeys_active", "Number of journeys in memory").unwrap()
});

/// Journeys started total.
pub static JOURNEYS_STARTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "verse_journeys_started_total",
        "Total journeys started since startup",
    )
    .unwrap()
});

/// Wizard actions by kind.
pub static JOURNEY_ACTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("verse_journey_actions_total", "Wizard actions taken"),
        &["action"], // "select", "skip", "skip_all", "retry", "exit"
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics (collected dynamically)
// =============================================================================

/// Saved verses.
pub static FAVORITES_SAVED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("verse_favorites_saved", "Number of saved favorite verses").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let server_metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // HTTP
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        // Journeys
        Box::new(JOURNEYS_ACTIVE.clone()),
        Box::new(JOURNEYS_STARTED_TOTAL.clone()),
        Box::new(JOURNEY_ACTIONS.clone()),
        // Favorites
        Box::new(FAVORITES_SAVED.clone()),
    ];

    // Core metrics (resolution, recommendation, external services)
    for metric in server_metrics
        .into_iter()
        .chain(verse_core::metrics::all_metrics())
    {
        if let Err(e) = registry.register(metric) {
            warn!("Failed to register metric: {}", e);
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    JOURNEYS_ACTIVE.set(state.journey_count().await as i64);

    if let Ok(favorites) = state.favorites().list() {
        FAVORITES_SAVED.set(favorites.len() as i64);
    }
}

/// Label used for requests that hit the fallback (unknown paths).
const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template for a request, e.g. `/api/v1/journeys/{id}/select`.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Middleware recording latency, count and in-flight gauge per
/// method, route template and status.
pub async fn track_http_metrics(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let response = next.run(request).await;
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let status = response.status().as_u16().to_string();
    let labels = [method.as_str(), route.as_str(), status.as_str()];
    HTTP_REQUEST_DURATION
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();

    response
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    use super::*;

    async fn request_through_middleware(path: &str) -> StatusCode {
        let router: Router = Router::new()
            .route("/metrics-test/journeys/{id}/select", post(|| async { "ok" }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(axum::middleware::from_fn(track_http_metrics));
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        router.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_requests_labelled_by_route_template() {
        let labels = ["POST", "/metrics-test/journeys/{id}/select", "200"];
        let before = HTTP_REQUESTS_TOTAL.with_label_values(&labels).get();

        for id in [
            "550e8400-e29b-41d4-a716-446655440000",
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        ] {
            let path = format!("/metrics-test/journeys/{}/select", id);
            assert_eq!(request_through_middleware(&path).await, StatusCode::OK);
        }

        assert_eq!(HTTP_REQUESTS_TOTAL.with_label_values(&labels).get(), before + 2);
        assert_eq!(
            HTTP_REQUEST_DURATION
                .with_label_values(&labels)
                .get_sample_count(),
            before + 2
        );
    }

    #[tokio::test]
    async fn test_unknown_paths_share_one_label() {
        let labels = ["POST", UNMATCHED_ROUTE, "404"];
        let before = HTTP_REQUESTS_TOTAL.with_label_values(&labels).get();

        for path in ["/metrics-test/nowhere/1", "/metrics-test/nowhere/2"] {
            assert_eq!(request_through_middleware(path).await, StatusCode::NOT_FOUND);
        }

        assert!(HTTP_REQUESTS_TOTAL.with_label_values(&labels).get() >= before + 2);
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("verse_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        JOURNEYS_ACTIVE.set(0);
        JOURNEYS_STARTED_TOTAL.inc();
        verse_core::metrics::RESOLUTIONS
            .with_label_values(&["success"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("verse_journeys_active"));
        assert!(output.contains("verse_journeys_started_total"));
        assert!(output.contains("verse_resolutions_total"));
    }
}
