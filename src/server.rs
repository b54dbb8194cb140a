//! HTTP surface of the proxy
//!
//! Builds the axum router serving `/criticalSubjects` and maps upstream
//! failures to gateway error responses. A failed request never takes the
//! server down.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::aggregator::Aggregator;
use crate::data::{Subjects, WaniKaniError};

/// Shared state handed to every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }
}

/// Errors returned to callers of the proxy
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not carry an API token
    #[error("missing APIToken query parameter")]
    MissingToken,

    /// The query string could not be decoded
    #[error("invalid query string: {0}")]
    BadQuery(String),

    /// WaniKani could not be queried or answered with something unusable
    #[error("upstream request failed: {0}")]
    Upstream(#[from] WaniKaniError),
}

impl ApiError {
    /// HTTP status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(WaniKaniError::Status { status, .. })
                if *status == StatusCode::UNAUTHORIZED =>
            {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Query string of `/criticalSubjects`
#[derive(Debug, Deserialize)]
pub struct CriticalSubjectsQuery {
    #[serde(rename = "APIToken", default)]
    pub api_token: Option<String>,
}

/// Health report
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub cached_subjects: usize,
}

/// Builds the application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/criticalSubjects", get(critical_subjects))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn critical_subjects(
    State(state): State<AppState>,
    query: Result<Query<CriticalSubjectsQuery>, QueryRejection>,
) -> Result<Json<Subjects>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadQuery(rejection.body_text()))?;
    let token = query
        .api_token
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::MissingToken)?;

    let data = state.aggregator.critical_subjects(&token).await?;
    tracing::info!(subjects = data.len(), "Served critical subjects");
    Ok(Json(Subjects { data }))
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        cached_subjects: state.aggregator.cache().len(),
    })
}
