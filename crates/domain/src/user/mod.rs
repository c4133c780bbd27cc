//! User record, input validation, storage capability and service.

mod factory;
mod model;
mod repository;
mod service;

pub use factory::{CreateUser, UpdateUser, UserFactory};
pub use model::{NewUser, User, UserChanges};
pub use self::repository::UserRepository;
pub use service::{EmailUniqueness, UserService};
