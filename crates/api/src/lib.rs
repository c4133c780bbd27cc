//! HTTP API server for users, products and notifications.
//!
//! Every failure surfaces as the same JSON error envelope, with the status
//! code taken from a configurable [`error::StatusMapping`]. Structured logging
//! comes from `tracing` and counters are exported for Prometheus.

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use domain::{EventKind, ProductService, UserService};
use events::{EventPublisher, LoggingHandler};
use metrics_exporter_prometheus::PrometheusHandle;
use notify::NotificationDispatcher;
use repository::InMemoryRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::StatusMapping;
use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::scrape))
        .with_state(metrics_handle);

    let api = Router::new()
        .route("/health", get(routes::health::check))
        .route("/users", post(routes::users::create).get(routes::users::list))
        .route("/users/email", get(routes::users::get_by_email))
        .route(
            "/users/{id}",
            get(routes::users::get)
                .put(routes::users::update)
                .delete(routes::users::delete),
        )
        .route(
            "/products",
            post(routes::products::create).get(routes::products::list),
        )
        .route("/products/search", get(routes::products::search))
        .route("/products/in-stock", get(routes::products::in_stock))
        .route(
            "/products/category/{category}",
            get(routes::products::by_category),
        )
        .route(
            "/products/{id}",
            get(routes::products::get)
                .put(routes::products::update)
                .delete(routes::products::delete),
        )
        .route("/notifications", post(routes::notifications::send))
        .route("/notifications/bulk", post(routes::notifications::send_bulk))
        // A known path with the wrong method is treated like an unknown route.
        .method_not_allowed_fallback(routes::not_found);

    Router::new()
        .nest("/api", api)
        .fallback(routes::not_found)
        .with_state(state.clone())
        .merge(metrics_router)
        .layer(middleware::from_fn_with_state(state, error::error_envelope))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: in-memory repositories, a
/// publisher with the logging handler on every event kind, and the default
/// notification senders.
pub async fn create_default_state(config: &Config) -> Arc<AppState> {
    let publisher = Arc::new(EventPublisher::new());
    let logger = Arc::new(LoggingHandler::new());
    for kind in EventKind::ALL {
        publisher.subscribe(kind.as_str(), logger.clone()).await;
    }

    let users = UserService::new(InMemoryRepository::new(), publisher.clone())
        .with_uniqueness(config.email_uniqueness);
    let products = ProductService::new(InMemoryRepository::new(), publisher.clone());

    Arc::new(AppState {
        users,
        products,
        notifications: NotificationDispatcher::with_default_senders(),
        publisher,
        status_mapping: StatusMapping::for_mode(config.error_status_mode),
    })
}
