#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod sessions;
mod telemetry;

pub use config::{validate_startup_config, ApiConfig, SessionConfig, CONFIG_SCHEMA_VERSION};
pub use sessions::{SessionMetrics, SessionRegistry};

pub const CRATE_NAME: &str = "audit-pack-server";

use telemetry::metrics::RequestMetrics;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub accepting_requests: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
    pub(crate) session_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self::with_config(sessions, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(sessions: Arc<SessionRegistry>, api: ApiConfig) -> Self {
        Self {
            sessions,
            api,
            ready: Arc::new(AtomicBool::new(true)),
            accepting_requests: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            session_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route("/v1/departments", get(http::checklist::departments_handler))
        .route(
            "/v1/departments/:department/documents",
            get(http::checklist::documents_handler),
        )
        .route("/v1/checklist", get(http::checklist::checklist_handler))
        .route("/v1/dashboard", get(http::checklist::dashboard_handler))
        .route("/v1/uploads", post(http::checklist::upload_handler))
        .route("/v1/auth/signup", post(http::auth::signup_handler))
        .route(
            "/debug/sessions",
            get(http::handlers::debug_sessions_handler),
        )
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
