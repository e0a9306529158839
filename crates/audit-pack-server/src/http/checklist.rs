use crate::http::handlers::{
    api_error_response, draining_error, if_none_match, is_draining, propagated_request_id,
    put_cache_headers, resolve_session_id, sha256_hex, unix_millis, with_request_id,
    with_session_id,
};
use crate::AppState;
use audit_pack_api::{json_envelope, ApiError, ApiErrorCode, UploadRequestDto};
use audit_pack_model::{Department, DocumentName};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{info, warn};

pub(crate) async fn departments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if is_draining(&state) {
        let resp = api_error_response(StatusCode::SERVICE_UNAVAILABLE, draining_error());
        state
            .metrics
            .observe_request(
                "/v1/departments",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let session_id = resolve_session_id(&headers, &state);
    let checklist = state.sessions.checklist_for(&session_id).await;
    let departments = checklist.lock().await.departments();
    let payload = json_envelope(
        Some(json!(session_id)),
        json!({ "departments": departments }),
    );
    let etag = format!(
        "\"{}\"",
        sha256_hex(&serde_json::to_vec(&payload).unwrap_or_default())
    );
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(resp.headers_mut(), state.api.discovery_ttl, &etag);
        state
            .metrics
            .observe_request(
                "/v1/departments",
                StatusCode::NOT_MODIFIED,
                started.elapsed(),
            )
            .await;
        return with_session_id(with_request_id(resp, &request_id), &session_id);
    }
    let mut response = Json(payload).into_response();
    put_cache_headers(response.headers_mut(), state.api.discovery_ttl, &etag);
    state
        .metrics
        .observe_request("/v1/departments", StatusCode::OK, started.elapsed())
        .await;
    with_session_id(with_request_id(response, &request_id), &session_id)
}

pub(crate) async fn documents_handler(
    State(state): State<AppState>,
    Path(department): Path<String>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if is_draining(&state) {
        let resp = api_error_response(StatusCode::SERVICE_UNAVAILABLE, draining_error());
        state
            .metrics
            .observe_request(
                "/v1/departments/{department}/documents",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let department = match Department::parse(&department) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(
                StatusCode::BAD_REQUEST,
                ApiError::invalid_param("department", &e.to_string()),
            );
            state
                .metrics
                .observe_request(
                    "/v1/departments/{department}/documents",
                    StatusCode::BAD_REQUEST,
                    started.elapsed(),
                )
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let session_id = resolve_session_id(&headers, &state);
    let checklist = state.sessions.checklist_for(&session_id).await;
    // Unknown departments yield an empty list, not an error; the selector
    // only ever offers known names.
    let documents = checklist.lock().await.documents(&department);
    let payload = json_envelope(
        Some(json!(session_id)),
        json!({ "department": department, "documents": documents }),
    );
    let resp = Json(payload).into_response();
    state
        .metrics
        .observe_request(
            "/v1/departments/{department}/documents",
            StatusCode::OK,
            started.elapsed(),
        )
        .await;
    with_session_id(with_request_id(resp, &request_id), &session_id)
}

pub(crate) async fn checklist_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if is_draining(&state) {
        let resp = api_error_response(StatusCode::SERVICE_UNAVAILABLE, draining_error());
        state
            .metrics
            .observe_request(
                "/v1/checklist",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let session_id = resolve_session_id(&headers, &state);
    let checklist = state.sessions.checklist_for(&session_id).await;
    let items = checklist.lock().await.items().to_vec();
    let payload = json_envelope(Some(json!(session_id)), json!({ "items": items }));
    let resp = Json(payload).into_response();
    state
        .metrics
        .observe_request("/v1/checklist", StatusCode::OK, started.elapsed())
        .await;
    with_session_id(with_request_id(resp, &request_id), &session_id)
}

pub(crate) async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if is_draining(&state) {
        let resp = api_error_response(StatusCode::SERVICE_UNAVAILABLE, draining_error());
        state
            .metrics
            .observe_request(
                "/v1/dashboard",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let session_id = resolve_session_id(&headers, &state);
    let checklist = state.sessions.checklist_for(&session_id).await;
    let (summary, ratio) = {
        let store = checklist.lock().await;
        (store.summary(), store.completion_ratio())
    };
    let payload = json_envelope(
        Some(json!(session_id)),
        json!({ "summary": summary, "completion_ratio": ratio }),
    );
    let resp = Json(payload).into_response();
    state
        .metrics
        .observe_request("/v1/dashboard", StatusCode::OK, started.elapsed())
        .await;
    with_session_id(with_request_id(resp, &request_id), &session_id)
}

pub(crate) async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if is_draining(&state) {
        let resp = api_error_response(StatusCode::SERVICE_UNAVAILABLE, draining_error());
        state
            .metrics
            .observe_request(
                "/v1/uploads",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let req: UploadRequestDto = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(
                StatusCode::BAD_REQUEST,
                ApiError::new(
                    ApiErrorCode::InvalidRequestParameter,
                    "invalid upload request body",
                    json!({"message": e.to_string()}),
                ),
            );
            state
                .metrics
                .observe_request("/v1/uploads", StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let (department, document) =
        match (
            Department::parse(&req.department),
            DocumentName::parse(&req.document),
        ) {
            (Ok(department), Ok(document)) => (department, document),
            (Err(e), _) | (_, Err(e)) => {
                let resp = api_error_response(
                    StatusCode::BAD_REQUEST,
                    ApiError::validation_failed(json!([{"reason": e.to_string()}])),
                );
                state
                    .metrics
                    .observe_request("/v1/uploads", StatusCode::BAD_REQUEST, started.elapsed())
                    .await;
                return with_request_id(resp, &request_id);
            }
        };

    let session_id = resolve_session_id(&headers, &state);
    let checklist = state.sessions.checklist_for(&session_id).await;
    let mut store = checklist.lock().await;
    match store.mark_completed(&department, &document, unix_millis()) {
        Ok(item) => {
            let item = item.clone();
            drop(store);
            info!(
                request_id = %request_id,
                session = %session_id,
                department = %department,
                document = %document,
                file_name = req.file_name.as_deref().unwrap_or(""),
                file_size_bytes = req.file_size_bytes.unwrap_or(0),
                "upload recorded"
            );
            state
                .sessions
                .metrics
                .uploads_completed
                .fetch_add(1, Ordering::Relaxed);
            let payload = json_envelope(Some(json!(session_id)), json!({ "item": item }));
            let resp = Json(payload).into_response();
            state
                .metrics
                .observe_request("/v1/uploads", StatusCode::OK, started.elapsed())
                .await;
            with_session_id(with_request_id(resp, &request_id), &session_id)
        }
        Err(e) => {
            drop(store);
            warn!(
                request_id = %request_id,
                session = %session_id,
                department = %department,
                document = %document,
                "upload against unknown checklist key: {e}"
            );
            state
                .sessions
                .metrics
                .uploads_not_found
                .fetch_add(1, Ordering::Relaxed);
            let resp = api_error_response(
                StatusCode::NOT_FOUND,
                ApiError::item_not_found(department.as_str(), document.as_str()),
            );
            state
                .metrics
                .observe_request("/v1/uploads", StatusCode::NOT_FOUND, started.elapsed())
                .await;
            with_session_id(with_request_id(resp, &request_id), &session_id)
        }
    }
}
