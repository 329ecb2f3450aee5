//! User profile domain model.
//!
//! A single-user tracker keeps exactly one profile row; jobs and documents
//! are top-level collections and are not owned by the profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for the profile record.
pub type UserId = Uuid;

/// The tracker owner's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
