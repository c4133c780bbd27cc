//! Shared application state.

use std::sync::Arc;

use domain::{Product, ProductService, User, UserService};
use events::EventPublisher;
use notify::NotificationDispatcher;
use repository::InMemoryRepository;

use crate::error::StatusMapping;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub users: UserService<InMemoryRepository<User>>,
    pub products: ProductService<InMemoryRepository<Product>>,
    pub notifications: NotificationDispatcher,
    pub publisher: Arc<EventPublisher>,
    pub status_mapping: StatusMapping,
}
