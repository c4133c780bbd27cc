//! User CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{CreateUser, UpdateUser, User};
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// POST /api/users
#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<User>>), ApiError> {
    let Json(input) = body?;
    let user = state.users.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(user))))
}

/// GET /api/users
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<User>>> {
    Json(Envelope::list(state.users.get_all_users().await))
}

/// GET /api/users/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let id = parse_id("User", &id)?;
    let user = state.users.get_user_by_id(&id).await?;
    Ok(Json(Envelope::data(user)))
}

/// GET /api/users/email?email=
#[tracing::instrument(skip(state, query))]
pub async fn get_by_email(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let Query(query) = query?;
    let email = query
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email query parameter is required".to_string()))?;

    let user = state.users.get_user_by_email(&email).await?;
    Ok(Json(Envelope::data(user)))
}

/// PUT /api/users/{id}
#[tracing::instrument(skip(state, body))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let id = parse_id("User", &id)?;
    let Json(input) = body?;
    let user = state.users.update_user(&id, input).await?;
    Ok(Json(Envelope::data(user)))
}

/// DELETE /api/users/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id("User", &id)?;
    state.users.delete_user(&id).await?;
    Ok(Json(Envelope::message("User deleted successfully")))
}
