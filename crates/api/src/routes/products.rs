//! Product CRUD and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{Category, CreateProduct, Product, UpdateProduct};
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// POST /api/products
#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Product>>), ApiError> {
    let Json(input) = body?;
    let product = state.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(product))))
}

/// GET /api/products
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<Product>>> {
    Json(Envelope::list(state.products.get_all_products().await))
}

/// GET /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let id = parse_id("Product", &id)?;
    let product = state.products.get_product_by_id(&id).await?;
    Ok(Json(Envelope::data(product)))
}

/// PUT /api/products/{id}
#[tracing::instrument(skip(state, body))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProduct>, JsonRejection>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let id = parse_id("Product", &id)?;
    let Json(input) = body?;
    let product = state.products.update_product(&id, input).await?;
    Ok(Json(Envelope::data(product)))
}

/// DELETE /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id("Product", &id)?;
    state.products.delete_product(&id).await?;
    Ok(Json(Envelope::message("Product deleted successfully")))
}

/// GET /api/products/search?q=
///
/// A missing `q` is a bad request; an empty one matches everything.
#[tracing::instrument(skip(state, query))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let Query(query) = query?;
    let q = query
        .q
        .ok_or_else(|| ApiError::BadRequest("Search query parameter q is required".to_string()))?;
    Ok(Json(Envelope::list(state.products.search(&q).await)))
}

/// GET /api/products/category/{category}
#[tracing::instrument(skip(state))]
pub async fn by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let category: Category = category.parse().map_err(|_| {
        let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        ApiError::BadRequest(format!(
            "Invalid category: {category}. Must be one of: {}",
            allowed.join(", ")
        ))
    })?;
    Ok(Json(Envelope::list(
        state.products.find_by_category(category).await,
    )))
}

/// GET /api/products/in-stock
pub async fn in_stock(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<Product>>> {
    Json(Envelope::list(state.products.find_in_stock().await))
}
