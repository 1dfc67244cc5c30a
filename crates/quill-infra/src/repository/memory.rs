//! HashMap-backed repositories behind async RwLocks.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, NewComment, NewPost, Post, PostPatch, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

/// In-memory post store. Ids are handed out from a counter, so they are
/// monotonically increasing exactly like the real store's.
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = Post {
            id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            created_at: Utc::now(),
            pv: 0,
        };
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn list(&self, author_id: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        let mut posts: Vec<Post> = rows
            .values()
            .filter(|p| author_id.is_none_or(|a| p.author_id == a))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(posts)
    }

    async fn inc_pv(&self, id: i64) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.pv += 1;
        Ok(())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

/// In-memory comment store.
pub struct InMemoryCommentRepository {
    rows: RwLock<HashMap<i64, Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = Comment {
            id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            content: comment.content,
            created_at: Utc::now(),
        };
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let rows = self.rows.read().await;
        let mut comments: Vec<Comment> = rows
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }

    async fn count_by_post_id(&self, post_id: i64) -> Result<u64, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.values().filter(|c| c.post_id == post_id).count() as u64)
    }

    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let doomed: Vec<i64> = rows
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.id)
            .collect();
        for id in &doomed {
            rows.remove(id);
        }
        Ok(doomed.len() as u64)
    }
}

/// In-memory user store.
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }
}
