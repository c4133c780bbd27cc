//! API error types, the status mapping table, and the error envelope.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use common::ErrorKind;
use domain::DomainError;
use notify::NotifyError;
use serde::Serialize;

use crate::config::ErrorStatusMode;
use crate::state::AppState;

/// API-level error type. Rendered into the error envelope by [`error_envelope`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Domain logic error.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Notification dispatch error.
    #[error(transparent)]
    Notify(#[from] NotifyError),
    /// Missing or malformed request input caught before the domain.
    #[error("{0}")]
    BadRequest(String),
    /// No route matched.
    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Domain(err) => err.kind(),
            ApiError::Notify(err) => err.kind(),
            ApiError::BadRequest(_) => ErrorKind::BadRequest,
            ApiError::RouteNotFound => ErrorKind::RouteNotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Failure details carried from a handler to [`error_envelope`].
#[derive(Debug, Clone)]
struct Failure {
    kind: ErrorKind,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let mut response = StatusMapping::default().status_for(kind).into_response();
        response.extensions_mut().insert(Failure {
            kind,
            message: self.to_string(),
        });
        response
    }
}

/// Lookup table from error kind to HTTP status.
///
/// Kinds missing from the table map to 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    table: HashMap<ErrorKind, StatusCode>,
}

impl StatusMapping {
    /// Request-shape problems are 4xx; every domain error is 500.
    pub fn legacy() -> Self {
        Self {
            table: HashMap::new(),
        }
        .with(ErrorKind::BadRequest, StatusCode::BAD_REQUEST)
        .with(ErrorKind::RouteNotFound, StatusCode::NOT_FOUND)
    }

    /// Every domain error kind gets a distinct client error code.
    pub fn strict() -> Self {
        Self::legacy()
            .with(ErrorKind::Validation, StatusCode::BAD_REQUEST)
            .with(ErrorKind::Conflict, StatusCode::CONFLICT)
            .with(ErrorKind::NotFound, StatusCode::NOT_FOUND)
            .with(ErrorKind::NoSender, StatusCode::UNPROCESSABLE_ENTITY)
    }

    pub fn for_mode(mode: ErrorStatusMode) -> Self {
        match mode {
            ErrorStatusMode::Legacy => Self::legacy(),
            ErrorStatusMode::Strict => Self::strict(),
        }
    }

    /// Overrides the status for one kind.
    pub fn with(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.table.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.table
            .get(&kind)
            .copied()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Default for StatusMapping {
    fn default() -> Self {
        Self::legacy()
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    status_code: u16,
    timestamp: DateTime<Utc>,
    path: String,
    method: String,
}

/// Middleware that renders every [`ApiError`] as the JSON error envelope,
/// with the status taken from the configured [`StatusMapping`].
pub async fn error_envelope(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let Some(failure) = response.extensions_mut().remove::<Failure>() else {
        return response;
    };

    let status = state.status_mapping.status_for(failure.kind);
    metrics::counter!("http_errors_total", "status" => status.as_u16().to_string()).increment(1);
    if status.is_server_error() {
        tracing::error!(%method, %path, kind = ?failure.kind, error = %failure.message, "request failed");
    } else {
        tracing::warn!(%method, %path, kind = ?failure.kind, error = %failure.message, "request rejected");
    }

    let body = ErrorEnvelope {
        error: ErrorBody {
            message: failure.message,
            status_code: status.as_u16(),
            timestamp: Utc::now(),
            path,
            method,
        },
    };
    (status, Json(body)).into_response()
}
