//! User profile use-case service.
//!
//! # Responsibility
//! - Validate and persist the single profile record.
//!
//! # Invariants
//! - The email must match a minimal `local@domain.tld` shape.
//! - Saving is an upsert: the first save creates the row, later saves
//!   update it in place.

use crate::model::user::User;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::non_empty;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Service error for profile use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    /// Email does not look like an address.
    InvalidEmail(String),
    /// Username is empty after trimming.
    EmptyUsername,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for saving the profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists the profile, creating it on first save.
    pub fn save_profile(&self, input: ProfileInput) -> Result<User, UserServiceError> {
        let email = input.email.trim().to_string();
        if !EMAIL_RE.is_match(&email) {
            return Err(UserServiceError::InvalidEmail(email));
        }
        let username = non_empty(&input.username).ok_or(UserServiceError::EmptyUsername)?;
        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();

        match self.repo.get_profile()? {
            Some(mut user) => {
                user.email = email;
                user.username = username;
                user.first_name = first_name;
                user.last_name = last_name;
                self.repo.update_user(&user)?;
                Ok(user)
            }
            None => {
                let user = User::new(email, username, first_name, last_name);
                self.repo.create_user(&user)?;
                Ok(user)
            }
        }
    }

    /// Gets the profile, if one was ever saved.
    pub fn get_profile(&self) -> RepoResult<Option<User>> {
        self.repo.get_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::EMAIL_RE;

    #[test]
    fn email_shape_accepts_common_addresses() {
        for value in ["a@b.co", "first.last@sub.domain.org", "x+tag@y.io"] {
            assert!(EMAIL_RE.is_match(value), "should accept {value}");
        }
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        for value in ["", "plain", "no@tld", "two@@at.com", "spa ce@x.com"] {
            assert!(!EMAIL_RE.is_match(value), "should reject {value}");
        }
    }
}
