//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use quill_core::domain::{Comment, NewComment, NewPost, Post, PostPatch, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: NotSet,
            author_id: Set(new.author_id),
            title: Set(new.title),
            content: Set(new.content),
            created_at: Set(Utc::now().into()),
            pv: Set(0),
        }
        .insert(&self.db)
        .await
        .map_err(query_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, author_id: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(author_id) = author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }

        let result = query
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn inc_pv(&self, id: i64) -> Result<(), RepoError> {
        // Single-statement increment; the store serializes concurrent bumps.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Pv, Expr::col(post::Column::Pv).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError> {
        let mut model = post::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = patch.title {
            model.title = Set(title);
        }
        if let Some(content) = patch.content {
            model.content = Set(content);
        }

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_err(other),
        })?;

        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, new: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel {
            id: NotSet,
            post_id: Set(new.post_id),
            author_id: Set(new.author_id),
            content: Set(new.content),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(query_err)?;

        Ok(model.into())
    }

    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post_id(&self, post_id: i64) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn delete_by_post_id(&self, post_id: i64) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs. Take the first
        // character, not the first byte: local parts may be multi-byte.
        let masked = match email.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            },
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, usr: User) -> Result<User, RepoError> {
        let exists = UserEntity::find_by_id(usr.id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .is_some();

        let model: user::ActiveModel = usr.into();
        let saved = if exists {
            model.update(&self.db).await
        } else {
            model.insert(&self.db).await
        }
        .map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("email already registered".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(saved.into())
    }
}
