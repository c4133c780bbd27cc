//! User input types and the factory that validates them.

use chrono::{DateTime, Utc};
use common::EntityId;
use repository::Entity;
use serde::Deserialize;

use crate::error::{ValidationError, Violations};
use crate::fields::{char_len_within, is_email_shaped, normalize_email};

use super::{NewUser, User, UserChanges};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;

/// Raw fields for creating a user, as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl CreateUser {
    /// Creates input with both fields set.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }
}

/// Raw partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UpdateUser {
    /// Update that only changes the name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update that only changes the email.
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// Validates and normalizes raw user fields.
///
/// Pure: no I/O, and the only clock read is the timestamp stamped by
/// [`UserFactory::create`] and [`UserFactory::merge`].
pub struct UserFactory;

impl UserFactory {
    /// Checks every field of a new user.
    pub fn draft(input: &CreateUser) -> Result<NewUser, ValidationError> {
        let mut violations = Violations::default();

        let email = match input.email.as_deref().map(normalize_email) {
            None => {
                violations.push("email", "Email is required");
                String::new()
            }
            Some(email) if email.is_empty() => {
                violations.push("email", "Email is required");
                email
            }
            Some(email) => {
                check_email(&email, &mut violations);
                email
            }
        };

        let name = match input.name.as_deref().map(str::trim) {
            None => {
                violations.push("name", "Name is required");
                String::new()
            }
            Some(name) => {
                check_name(name, &mut violations);
                name.to_string()
            }
        };

        violations.finish(NewUser { email, name })
    }

    /// Checks only the fields present in `input`.
    pub fn changes(input: &UpdateUser) -> Result<UserChanges, ValidationError> {
        let mut violations = Violations::default();

        let email = input.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            check_email(email, &mut violations);
        }

        let name = input.name.as_deref().map(|n| n.trim().to_string());
        if let Some(name) = &name {
            check_name(name, &mut violations);
        }

        violations.finish(UserChanges { email, name })
    }

    /// Builds a complete user snapshot from raw fields.
    pub fn create(id: EntityId, input: &CreateUser, at: DateTime<Utc>) -> Result<User, ValidationError> {
        Ok(User::from_draft(id, Self::draft(input)?, at))
    }

    /// Applies a raw partial update to an existing snapshot.
    pub fn merge(existing: &User, input: &UpdateUser) -> Result<User, ValidationError> {
        Ok(existing.merge(Self::changes(input)?))
    }
}

fn check_email(email: &str, violations: &mut Violations) {
    if !is_email_shaped(email) {
        violations.push("email", "Email must be a valid email address");
    }
}

fn check_name(name: &str, violations: &mut Violations) {
    if !char_len_within(name, NAME_MIN, NAME_MAX) {
        violations.push(
            "name",
            format!("Name must be between {NAME_MIN} and {NAME_MAX} characters"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_normalizes_fields() {
        let draft = UserFactory::draft(&CreateUser::new("  Test@Example.com ", " Ann ")).unwrap();
        assert_eq!(draft.email(), "test@example.com");
        assert_eq!(draft.name(), "Ann");
    }

    #[test]
    fn draft_reports_all_missing_fields() {
        let err = UserFactory::draft(&CreateUser::default()).unwrap_err();
        assert!(err.has_field("email"));
        assert!(err.has_field("name"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn draft_rejects_blank_email_as_missing() {
        let err = UserFactory::draft(&CreateUser::new("   ", "Ann")).unwrap_err();
        assert_eq!(err.violations()[0].message, "Email is required");
    }

    #[test]
    fn draft_rejects_malformed_email() {
        let err = UserFactory::draft(&CreateUser::new("not-an-email", "Ann")).unwrap_err();
        assert!(err.has_field("email"));
        assert!(!err.has_field("name"));
    }

    #[test]
    fn name_length_is_measured_after_trimming() {
        assert!(UserFactory::draft(&CreateUser::new("a@b.com", "  A  ")).is_err());
        assert!(UserFactory::draft(&CreateUser::new("a@b.com", "Al")).is_ok());
        assert!(UserFactory::draft(&CreateUser::new("a@b.com", "x".repeat(100))).is_ok());
        assert!(UserFactory::draft(&CreateUser::new("a@b.com", "x".repeat(101))).is_err());
    }

    #[test]
    fn changes_only_validate_present_fields() {
        let changes = UserFactory::changes(&UpdateUser::name(" Bo ")).unwrap();
        assert_eq!(changes.name(), Some("Bo"));
        assert_eq!(changes.email(), None);

        let err = UserFactory::changes(&UpdateUser::email("broken")).unwrap_err();
        assert!(err.has_field("email"));
        assert!(!err.has_field("name"));
    }

    #[test]
    fn empty_update_is_valid() {
        assert_eq!(
            UserFactory::changes(&UpdateUser::default()).unwrap(),
            UserChanges::default()
        );
    }

    #[test]
    fn create_and_merge_produce_snapshots() {
        let at = common::clock::now();
        let user = UserFactory::create(EntityId::new(), &CreateUser::new("A@B.com", "Ann"), at).unwrap();
        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.created_at(), at);

        let merged = UserFactory::merge(&user, &UpdateUser::email("NEW@b.com")).unwrap();
        assert_eq!(merged.email(), "new@b.com");
        assert_eq!(merged.name(), "Ann");
        assert!(merged.updated_at() > user.updated_at());

        assert!(UserFactory::merge(&user, &UpdateUser::name("x")).is_err());
    }
}
