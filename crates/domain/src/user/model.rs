//! User record.

use chrono::{DateTime, Utc};
use common::EntityId;
use repository::Entity;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a stored user.
///
/// The email is always in canonical (lower-cased, trimmed) form; no two
/// stored users share one unless the service runs unguarded under
/// concurrent writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: EntityId,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated fields for a user that does not exist yet.
///
/// Only the factory builds these, so holding one means the fields passed
/// validation and are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub(crate) email: String,
    pub(crate) name: String,
}

impl NewUser {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated partial update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub(crate) email: Option<String>,
    pub(crate) name: Option<String>,
}

impl UserChanges {
    /// New canonical email, if the update sets one.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// New name, if the update sets one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Entity for User {
    type Id = EntityId;
    type Draft = NewUser;
    type Changes = UserChanges;

    const KIND: &'static str = "User";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_draft(id: EntityId, draft: NewUser, at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: draft.email,
            name: draft.name,
            created_at: at,
            updated_at: at,
        }
    }

    fn merge(&self, changes: UserChanges) -> Self {
        Self {
            id: self.id,
            email: changes.email.unwrap_or_else(|| self.email.clone()),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            created_at: self.created_at,
            updated_at: common::clock::tick_after(self.updated_at),
        }
    }
}
