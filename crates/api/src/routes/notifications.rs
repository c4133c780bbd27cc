//! Notification dispatch endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use notify::{BulkReport, Delivery};
use serde::Deserialize;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub message: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkSendRequest {
    pub message: Option<String>,
    pub addresses: Option<Vec<String>>,
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

/// POST /api/notifications
#[tracing::instrument(skip(state, body))]
pub async fn send(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<Envelope<Delivery>>, ApiError> {
    let Json(request) = body?;
    let message = required(request.message, "message")?;
    let address = required(request.address, "address")?;

    let delivery = state.notifications.dispatch(&message, &address).await?;
    Ok(Json(Envelope::data(delivery)))
}

/// POST /api/notifications/bulk
#[tracing::instrument(skip(state, body))]
pub async fn send_bulk(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BulkSendRequest>, JsonRejection>,
) -> Result<Json<Envelope<BulkReport>>, ApiError> {
    let Json(request) = body?;
    let message = required(request.message, "message")?;
    let addresses = request
        .addresses
        .ok_or_else(|| ApiError::BadRequest("addresses is required".to_string()))?;

    let report = state.notifications.dispatch_bulk(&message, &addresses).await;
    Ok(Json(Envelope::data(report)))
}
