use crate::AppState;
use audit_pack_api::{ApiError, ApiErrorCode, API_VERSION};
use audit_pack_model::SessionId;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    (status, Json(json!({"error": err}))).into_response()
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

pub(crate) fn with_session_id(mut response: Response, session: &SessionId) -> Response {
    if let Ok(v) = HeaderValue::from_str(session.as_str()) {
        response.headers_mut().insert("x-session-id", v);
    }
    response
}

/// The session carried by the `x-session-id` header when present and valid;
/// a freshly minted one otherwise. The handler echoes the id back so one
/// browser keeps one checklist.
pub(crate) fn resolve_session_id(headers: &HeaderMap, state: &AppState) -> SessionId {
    if let Some(raw) = headers.get("x-session-id").and_then(|v| v.to_str().ok()) {
        if let Ok(id) = SessionId::parse(raw) {
            return id;
        }
    }
    SessionId::minted(state.session_id_seed.fetch_add(1, Ordering::Relaxed))
}

pub(crate) fn is_draining(state: &AppState) -> bool {
    !state.accepting_requests.load(Ordering::Relaxed)
}

pub(crate) fn draining_error() -> ApiError {
    ApiError::new(
        ApiErrorCode::ServiceUnavailable,
        "server draining; refusing new requests",
        json!({}),
    )
}

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

pub(crate) fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = (StatusCode::OK, "ok").into_response();
    state
        .metrics
        .observe_request("/healthz", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    if state.ready.load(Ordering::Relaxed) && !is_draining(&state) {
        let resp = (StatusCode::OK, "ready").into_response();
        state
            .metrics
            .observe_request("/readyz", StatusCode::OK, started.elapsed())
            .await;
        with_request_id(resp, &request_id)
    } else {
        let resp = (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response();
        state
            .metrics
            .observe_request("/readyz", StatusCode::SERVICE_UNAVAILABLE, started.elapsed())
            .await;
        with_request_id(resp, &request_id)
    }
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let payload = json!({
        "server": {
            "crate": crate::CRATE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "api_version": API_VERSION,
            "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
        }
    });
    let mut response = Json(payload).into_response();
    if let Ok(value) = HeaderValue::from_str("public, max-age=30") {
        response.headers_mut().insert("cache-control", value);
    }
    state
        .metrics
        .observe_request("/v1/version", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(response, &request_id)
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    crate::telemetry::metrics_endpoint::metrics_handler(State(state)).await
}

pub(crate) async fn debug_sessions_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    if !state.api.enable_debug_sessions {
        let resp = api_error_response(
            StatusCode::NOT_FOUND,
            ApiError::new(
                ApiErrorCode::InvalidRequestParameter,
                "debug endpoint disabled",
                json!({}),
            ),
        );
        state
            .metrics
            .observe_request("/debug/sessions", StatusCode::NOT_FOUND, started.elapsed())
            .await;
        return with_request_id(resp, &request_id);
    }
    let session_metrics = &state.sessions.metrics;
    let resp = Json(json!({
        "sessions": state.sessions.session_ids().await,
        "session_stats": {
            "created": session_metrics.sessions_created.load(Ordering::Relaxed),
            "evicted": session_metrics.sessions_evicted.load(Ordering::Relaxed),
            "active": session_metrics.active_sessions.load(Ordering::Relaxed),
        }
    }))
    .into_response();
    state
        .metrics
        .observe_request("/debug/sessions", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}
