use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, NewComment, NewPost, Post, PostPatch, User};
use crate::error::RepoError;

/// Post repository - sole mutator of post rows.
///
/// Authorization lives above this trait: `update` and `delete` act on a
/// bare id and trust the service to have checked ownership first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post; the store assigns id and creation timestamp.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Fetch one post by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// List posts sorted by id descending, optionally filtered by author.
    async fn list(&self, author_id: Option<Uuid>) -> Result<Vec<Post>, RepoError>;

    /// Atomically increment the page-view counter by 1.
    async fn inc_pv(&self, id: i64) -> Result<(), RepoError>;

    /// Apply a patch to an existing post and return the updated row.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete one post by id.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Comment store accessor - sole mutator of comment rows.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment; the store assigns id and creation timestamp.
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// All comments for a post, sorted by id ascending.
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;

    /// Number of comments attached to a post.
    async fn count_by_post_id(&self, post_id: i64) -> Result<u64, RepoError>;

    /// Delete all comments for a post; returns the number removed.
    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Save a user (create or update).
    async fn save(&self, user: User) -> Result<User, RepoError>;
}
