//! User-specific repository queries.

use async_trait::async_trait;
use repository::{InMemoryRepository, Repository, RepositoryExt};

use crate::fields::normalize_email;

use super::User;

/// Storage capability needed by the user service.
///
/// The default body scans with [`RepositoryExt::find_first`]; backends with
/// an email index can override it.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Finds the user whose canonical email equals the canonical form of `email`.
    async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.find_first(&|user: &User| user.email() == email).await
    }
}

impl UserRepository for InMemoryRepository<User> {}
