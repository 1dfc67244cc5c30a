//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's own account information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub bio: String,
    pub avatar: String,
}

/// Public-safe author shape attached to a post detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub bio: String,
    pub avatar: String,
}

/// A single decorated post: HTML content, redacted author, derived counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub author: AuthorDto,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_at_text: String,
    pub pv: i64,
    pub comments_count: u64,
}

/// A decorated list item; authors stay bare ids in list reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryDto {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_at_text: String,
    pub pv: i64,
    pub comments_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub post_id: i64,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /api/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostDto,
    pub comments: Vec<CommentDto>,
}

/// Body of `GET /api/posts/{id}/raw` - raw markdown for edit flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPostResponse {
    pub id: i64,
    pub author: UserResponse,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub pv: i64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Request to update a post; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request to add a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}
