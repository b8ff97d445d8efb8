//! User and principal records.

use crate::model::validation::{check_required, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage identifier of a user row.
pub type UserId = i64;

/// Upper bound for usernames, matching the usual web framework default.
pub const USERNAME_MAX_CHARS: usize = 150;

/// Registered account able to own catalog records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Authenticated identity on whose behalf an operation executes.
///
/// Only obtainable from a resolved [`User`], so holding one implies the
/// authentication collaborator already accepted the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Principal {
    user_id: UserId,
    username: String,
}

impl Principal {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}

/// Trims and validates a username for registration or lookup.
pub fn normalize_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();
    check_required("username", username, USERNAME_MAX_CHARS)?;
    Ok(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_username, Principal, User};
    use crate::model::validation::ValidationError;

    #[test]
    fn principal_is_derived_from_user() {
        let principal = Principal::from(User {
            id: 7,
            username: "tiny".to_string(),
            created_at: 0,
        });
        assert_eq!(principal.user_id(), 7);
        assert_eq!(principal.username(), "tiny");
    }

    #[test]
    fn username_is_trimmed_and_required() {
        assert_eq!(normalize_username("  tiny ").unwrap(), "tiny");
        assert!(matches!(
            normalize_username("   "),
            Err(ValidationError::Blank { field: "username" })
        ));
    }
}
