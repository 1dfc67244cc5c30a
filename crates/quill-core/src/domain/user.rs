use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents an author in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    /// `m`, `f` or `x` by convention.
    pub gender: String,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamp.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            gender: "x".to_string(),
            bio: String::new(),
            avatar: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Public-safe projection of a user.
///
/// This is the ONLY author shape allowed out of the safe read path;
/// email and password hash must never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub bio: String,
    pub avatar: String,
}
