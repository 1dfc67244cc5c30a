use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{AuthorProfile, User};

/// Post entity as persisted - `content` is always markdown source.
///
/// Ids are assigned by the store and monotonically increasing, so
/// descending id order doubles as recency order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Page-view counter.
    pub pv: i64,
}

/// A post about to be inserted; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Partial update applied by the owning author.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Fully decorated single-post read model.
///
/// `content` here is rendered HTML and `author` is the redacted profile;
/// neither form is ever written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub author: AuthorProfile,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_at_text: String,
    pub pv: i64,
    pub comments_count: u64,
}

/// List-item read model - author stays a bare id, as list reads
/// do not populate the author document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_at_text: String,
    pub pv: i64,
    pub comments_count: u64,
}

/// Undecorated post with its full author document - edit flows only.
#[derive(Debug, Clone)]
pub struct RawPost {
    pub post: Post,
    pub author: User,
}
