//! User service: validation, the email uniqueness rule, and lifecycle events.

use std::str::FromStr;
use std::sync::Arc;

use common::EntityId;
use events::EventPublisher;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::DomainError;
use crate::lifecycle::{EventKind, emit};

use super::{CreateUser, UpdateUser, User, UserFactory, UserRepository};

/// How the email uniqueness check is coordinated with the write that follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailUniqueness {
    /// Check and write run independently. Two concurrent writes with the
    /// same email can both pass the check.
    #[default]
    Unguarded,
    /// Every user create and update holds one lock from the check until the
    /// write has landed, so concurrent duplicates are rejected.
    Serialized,
}

impl FromStr for EmailUniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unguarded" => Ok(Self::Unguarded),
            "serialized" => Ok(Self::Serialized),
            other => Err(format!("unknown email uniqueness mode: {other}")),
        }
    }
}

/// Service for managing users.
///
/// Every successful mutation publishes exactly one event, after the
/// repository write has completed.
pub struct UserService<R: UserRepository> {
    repository: R,
    publisher: Arc<EventPublisher>,
    uniqueness: EmailUniqueness,
    write_lock: Mutex<()>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service with [`EmailUniqueness::Unguarded`].
    pub fn new(repository: R, publisher: Arc<EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
            uniqueness: EmailUniqueness::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Selects how the uniqueness check is coordinated.
    pub fn with_uniqueness(mut self, uniqueness: EmailUniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn uniqueness(&self) -> EmailUniqueness {
        self.uniqueness
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match self.uniqueness {
            EmailUniqueness::Unguarded => None,
            EmailUniqueness::Serialized => Some(self.write_lock.lock().await),
        }
    }

    /// Validates the input, checks the email is free, stores the user and
    /// publishes `user.created`.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> Result<User, DomainError> {
        let draft = UserFactory::draft(&input)?;

        let guard = self.write_guard().await;
        if self.repository.find_by_email(draft.email()).await.is_some() {
            return Err(email_taken(draft.email()));
        }
        let user = self.repository.create(draft).await;
        drop(guard);

        metrics::counter!("users_created_total").increment(1);
        tracing::info!(user_id = %user.id(), "user created");

        emit(
            &self.publisher,
            EventKind::UserCreated,
            user.id(),
            &user,
            user.created_at(),
        )
        .await?;
        Ok(user)
    }

    /// Applies a partial update and publishes `user.updated`.
    ///
    /// The email is re-checked only when the update changes it.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_user(&self, id: &EntityId, input: UpdateUser) -> Result<User, DomainError> {
        let guard = self.write_guard().await;

        let existing = self
            .repository
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let changes = UserFactory::changes(&input)?;

        if let Some(email) = changes.email() {
            if email != existing.email() {
                if let Some(holder) = self.repository.find_by_email(email).await {
                    if holder.id() != existing.id() {
                        return Err(email_taken(email));
                    }
                }
            }
        }

        let user = self
            .repository
            .update(id, changes)
            .await
            .ok_or_else(|| DomainError::not_found("User", id))?;
        drop(guard);

        metrics::counter!("users_updated_total").increment(1);
        tracing::info!(user_id = %user.id(), "user updated");

        emit(
            &self.publisher,
            EventKind::UserUpdated,
            user.id(),
            &user,
            user.updated_at(),
        )
        .await?;
        Ok(user)
    }

    /// Removes a user and publishes `user.deleted` carrying the snapshot as
    /// it was before removal. Returns that snapshot.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: &EntityId) -> Result<User, DomainError> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if !self.repository.delete(id).await {
            return Err(DomainError::not_found("User", id));
        }

        metrics::counter!("users_deleted_total").increment(1);
        tracing::info!(user_id = %id, "user deleted");

        emit(
            &self.publisher,
            EventKind::UserDeleted,
            id,
            &user,
            common::clock::now(),
        )
        .await?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: &EntityId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Looks a user up by email, ignoring case and surrounding whitespace.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.repository
            .find_by_email(email)
            .await
            .ok_or_else(|| DomainError::not_found("User", email.trim()))
    }

    /// Returns every user, oldest first. Never fails.
    pub async fn get_all_users(&self) -> Vec<User> {
        self.repository.find_all().await
    }
}

fn email_taken(email: &str) -> DomainError {
    metrics::counter!("domain_conflicts_total", "entity" => "User").increment(1);
    tracing::info!(%email, "email already in use");
    DomainError::conflict("User", "email", email)
}
