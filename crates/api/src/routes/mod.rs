//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod notifications;
pub mod products;
pub mod users;

use common::EntityId;
use domain::DomainError;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Parses a path identifier. An id that cannot exist is reported as not found.
fn parse_id(entity: &'static str, raw: &str) -> Result<EntityId, ApiError> {
    EntityId::parse(raw).ok_or_else(|| DomainError::not_found(entity, raw).into())
}
