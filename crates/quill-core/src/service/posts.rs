//! Post service - CRUD plus read-time decoration.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Comment, NewComment, NewPost, Post, PostDetail, PostPatch, PostSummary, RawPost,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, MarkdownRenderer, PostRepository, UserRepository};

use super::decorate;

/// Orchestrates post CRUD over the repository ports and applies the
/// decoration pipeline to everything leaving through a read path.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    renderer: Arc<dyn MarkdownRenderer>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        renderer: Arc<dyn MarkdownRenderer>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
            renderer,
        }
    }

    /// Create a post. Title and content are required.
    pub async fn create(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let post = self
            .posts
            .insert(NewPost {
                author_id,
                title,
                content,
            })
            .await?;
        Ok(post)
    }

    /// Safe single-post read.
    ///
    /// Pipeline order is fixed: populate author, redact, format timestamp,
    /// render markdown, count comments.
    pub async fn get_post_by_id(&self, id: i64) -> Result<Option<PostDetail>, DomainError> {
        let Some(post) = self.posts.find_by_id(id).await? else {
            return Ok(None);
        };

        // populate
        let author = self
            .users
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "post {} references missing author {}",
                    post.id, post.author_id
                ))
            })?;

        // redact
        let author = decorate::redact_author(&author);
        // format
        let created_at_text = decorate::format_created_at(&post.created_at);
        // render
        let content = self.renderer.render(&post.content);
        // count
        let comments_count = self.comments.count_by_post_id(post.id).await?;

        Ok(Some(PostDetail {
            id: post.id,
            author,
            title: post.title,
            content,
            created_at: post.created_at,
            created_at_text,
            pv: post.pv,
            comments_count,
        }))
    }

    /// List posts, newest first, optionally restricted to one author.
    ///
    /// Comment counts are one lookup per post. An aggregate join would
    /// avoid the fan-out; at this scale it is not worth the coupling.
    pub async fn get_posts(
        &self,
        author_id: Option<Uuid>,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let posts = self.posts.list(author_id).await?;

        let mut summaries = Vec::with_capacity(posts.len());
        for post in posts {
            let comments_count = self.comments.count_by_post_id(post.id).await?;
            summaries.push(PostSummary {
                id: post.id,
                author_id: post.author_id,
                title: post.title,
                created_at_text: decorate::format_created_at(&post.created_at),
                content: self.renderer.render(&post.content),
                created_at: post.created_at,
                pv: post.pv,
                comments_count,
            });
        }
        Ok(summaries)
    }

    /// Increment the page-view counter.
    pub async fn inc_pv(&self, id: i64) -> Result<(), DomainError> {
        match self.posts.inc_pv(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::not_found("post", id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Undecorated read for edit flows: raw markdown, full author document.
    pub async fn get_raw_post_by_id(&self, id: i64) -> Result<Option<RawPost>, DomainError> {
        let Some(post) = self.posts.find_by_id(id).await? else {
            return Ok(None);
        };

        let author = self
            .users
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "post {} references missing author {}",
                    post.id, post.author_id
                ))
            })?;

        Ok(Some(RawPost { post, author }))
    }

    /// Update a post owned by `author_id`.
    ///
    /// Ownership is checked explicitly: a missing post is NotFound, a
    /// mismatched author is Forbidden. Folding the author into the query
    /// filter would silently update zero rows instead.
    pub async fn update_post_by_id(
        &self,
        id: i64,
        author_id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if matches!(&patch.content, Some(c) if c.trim().is_empty()) {
            return Err(DomainError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;
        if post.author_id != author_id {
            return Err(DomainError::Forbidden);
        }

        if patch.is_empty() {
            return Ok(post);
        }

        let updated = self.posts.update(id, patch).await?;
        Ok(updated)
    }

    /// Delete a post owned by `author_id` and cascade its comments.
    ///
    /// The cascade runs only after a successful post delete, so a
    /// Forbidden mutation leaves the comments intact.
    pub async fn del_post_by_id(&self, id: i64, author_id: Uuid) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;
        if post.author_id != author_id {
            return Err(DomainError::Forbidden);
        }

        self.posts.delete(id).await?;
        self.comments.delete_by_post_id(id).await?;
        Ok(())
    }

    /// Attach a comment to an existing post.
    pub async fn add_comment(
        &self,
        post_id: i64,
        author_id: Uuid,
        content: String,
    ) -> Result<Comment, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "comment must not be empty".to_string(),
            ));
        }
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("post", post_id));
        }

        let comment = self
            .comments
            .insert(NewComment {
                post_id,
                author_id,
                content,
            })
            .await?;
        Ok(comment)
    }

    /// All comments for a post, oldest first.
    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.find_by_post_id(post_id).await?;
        Ok(comments)
    }
}
