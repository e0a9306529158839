use crate::http::handlers::{make_request_id, with_request_id};
use crate::telemetry::metrics::percentile_ns;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt::Write as _;
use std::sync::atomic::Ordering;
use std::time::Instant;

const METRIC_SUBSYSTEM: &str = "audit_pack";
const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let mut body = String::new();

    let session_metrics = &state.sessions.metrics;
    for (name, value) in [
        (
            "audit_sessions_created_total",
            session_metrics.sessions_created.load(Ordering::Relaxed),
        ),
        (
            "audit_sessions_evicted_total",
            session_metrics.sessions_evicted.load(Ordering::Relaxed),
        ),
        (
            "audit_sessions_active",
            session_metrics.active_sessions.load(Ordering::Relaxed),
        ),
        (
            "audit_uploads_completed_total",
            session_metrics.uploads_completed.load(Ordering::Relaxed),
        ),
        (
            "audit_uploads_not_found_total",
            session_metrics.uploads_not_found.load(Ordering::Relaxed),
        ),
    ] {
        let _ = writeln!(
            body,
            "{name}{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\"}} {value}"
        );
    }

    for ((route, status), count) in state.metrics.counts_snapshot().await {
        let _ = writeln!(
            body,
            "audit_requests_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",status=\"{status}\"}} {count}"
        );
    }

    for (route, samples) in state.metrics.latency_snapshot().await {
        for (quantile, pct) in [("0.5", 0.5), ("0.95", 0.95), ("0.99", 0.99)] {
            let _ = writeln!(
                body,
                "audit_request_latency_ns{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",quantile=\"{quantile}\"}} {}",
                percentile_ns(&samples, pct)
            );
        }
    }

    let resp = (StatusCode::OK, body).into_response();
    state
        .metrics
        .observe_request("/metrics", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}
