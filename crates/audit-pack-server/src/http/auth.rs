use crate::http::handlers::{
    api_error_response, draining_error, is_draining, propagated_request_id, with_request_id,
};
use crate::AppState;
use audit_pack_api::{
    json_envelope, validate_signup, ApiError, ApiErrorCode, SignUpRequestDto, SignUpResponseDto,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::time::Instant;

/// Sign-up is a pure validation surface: no account is created and nothing
/// is stored; mismatches are reported straight back to the caller.
pub(crate) async fn signup_handler(
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
                "/v1/auth/signup",
                StatusCode::SERVICE_UNAVAILABLE,
                started.elapsed(),
            )
            .await;
        return with_request_id(resp, &request_id);
    }
    let req: SignUpRequestDto = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(
                StatusCode::BAD_REQUEST,
                ApiError::new(
                    ApiErrorCode::InvalidRequestParameter,
                    "invalid sign-up request body",
                    json!({"message": e.to_string()}),
                ),
            );
            state
                .metrics
                .observe_request(
                    "/v1/auth/signup",
                    StatusCode::BAD_REQUEST,
                    started.elapsed(),
                )
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    match validate_signup(&req) {
        Ok(()) => {
            let payload = json_envelope(None, json!(SignUpResponseDto { accepted: true }));
            let resp = Json(payload).into_response();
            state
                .metrics
                .observe_request("/v1/auth/signup", StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => {
            let status = match err.code {
                ApiErrorCode::CredentialMismatch => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            };
            let resp = api_error_response(status, err);
            state
                .metrics
                .observe_request("/v1/auth/signup", status, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
    }
}
