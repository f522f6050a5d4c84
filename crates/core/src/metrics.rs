//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Resolution outcomes and text degradations
//! - Recommendation stage latency, corpus widening, and fallbacks
//! - External service calls (recommendation endpoint, text source)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Resolution Metrics
// =============================================================================

/// Resolutions total by outcome.
pub static RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("verse_resolutions_total", "Total resolution attempts"),
        &["outcome"], // "success", "partial_success", "failure"
    )
    .unwrap()
});

/// Resolution failures by kind.
pub static RESOLUTION_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "verse_resolution_failures_total",
            "Terminal resolution failures by kind",
        ),
        &["kind"],
    )
    .unwrap()
});

/// Text parts replaced by placeholders.
pub static TEXT_DEGRADATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "verse_text_degradations_total",
            "Text fetches that degraded to a placeholder",
        ),
        &["part"], // "arabic", "translation"
    )
    .unwrap()
});

// =============================================================================
// Recommendation Metrics
// =============================================================================

/// Recommend stage duration in seconds.
pub static RECOMMEND_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "verse_recommend_duration_seconds",
            "Duration of the recommend stage",
        )
        .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["result"], // "ok", "error", "timeout"
    )
    .unwrap()
});

/// Empty corpus filters widened to the full corpus.
pub static CORPUS_WIDENED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "verse_corpus_widened_total",
        "Corpus recommendations widened to the full corpus after an empty filter",
    )
    .unwrap()
});

/// Recommendations answered by the fallback recommender.
pub static RECOMMENDER_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "verse_recommender_fallbacks_total",
        "Recommendations served by the fallback after the primary was unavailable",
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "verse_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "verse_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record one external call's duration and status.
pub(crate) fn observe_external_call(
    service: &str,
    operation: &str,
    seconds: f64,
    success: bool,
) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(seconds);
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, if success { "success" } else { "error" }])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Resolution
        Box::new(RESOLUTIONS.clone()),
        Box::new(RESOLUTION_FAILURES.clone()),
        Box::new(TEXT_DEGRADATIONS.clone()),
        // Recommendation
        Box::new(RECOMMEND_DURATION.clone()),
        Box::new(CORPUS_WIDENED.clone()),
        Box::new(RECOMMENDER_FALLBACKS.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
