//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::{Comment, PostDetail, PostPatch, PostSummary, RawPost};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthorDto, CommentDto, CreatePostRequest, PostDetailResponse, PostDto, PostSummaryDto,
    RawPostResponse, UpdatePostRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn comment_dto(comment: Comment) -> CommentDto {
    CommentDto {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        content: comment.content,
        created_at: comment.created_at,
    }
}

fn post_dto(detail: PostDetail) -> PostDto {
    PostDto {
        id: detail.id,
        author: AuthorDto {
            id: detail.author.id,
            name: detail.author.name,
            gender: detail.author.gender,
            bio: detail.author.bio,
            avatar: detail.author.avatar,
        },
        title: detail.title,
        content: detail.content,
        created_at: detail.created_at,
        created_at_text: detail.created_at_text,
        pv: detail.pv,
        comments_count: detail.comments_count,
    }
}

fn summary_dto(summary: PostSummary) -> PostSummaryDto {
    PostSummaryDto {
        id: summary.id,
        author_id: summary.author_id,
        title: summary.title,
        content: summary.content,
        created_at: summary.created_at,
        created_at_text: summary.created_at_text,
        pv: summary.pv,
        comments_count: summary.comments_count,
    }
}

fn raw_post_response(raw: RawPost) -> RawPostResponse {
    RawPostResponse {
        id: raw.post.id,
        author: UserResponse {
            id: raw.author.id,
            email: raw.author.email,
            name: raw.author.name,
            gender: raw.author.gender,
            bio: raw.author.bio,
            avatar: raw.author.avatar,
        },
        title: raw.post.title,
        content: raw.post.content,
        created_at: raw.post.created_at,
        pv: raw.post.pv,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub author: Option<Uuid>,
}

/// GET /api/posts?author=<uuid>
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.get_posts(query.author).await?;
    let posts: Vec<PostSummaryDto> = posts.into_iter().map(summary_dto).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(identity.user_id, req.title, req.content)
        .await?;

    tracing::info!(post_id = post.id, author = %identity.user_id, "post created");

    let detail = state
        .posts
        .get_post_by_id(post.id)
        .await?
        .ok_or_else(|| AppError::Internal("created post vanished".to_string()))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_dto(detail))))
}

/// GET /api/posts/{id}
///
/// Every read counts as a page view, so the counter is bumped before the
/// post is fetched.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.inc_pv(id).await?;

    let detail = state
        .posts
        .get_post_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;
    let comments = state.posts.comments_for_post(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: post_dto(detail),
        comments: comments.into_iter().map(comment_dto).collect(),
    })))
}

/// GET /api/posts/{id}/raw - owner-only edit view, no decoration.
pub async fn get_raw_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let raw = state
        .posts
        .get_raw_post_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    if raw.post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(raw_post_response(raw))))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let updated = state
        .posts
        .update_post_by_id(
            id,
            identity.user_id,
            PostPatch {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    tracing::info!(post_id = id, author = %identity.user_id, "post updated");

    let detail = state
        .posts
        .get_post_by_id(updated.id)
        .await?
        .ok_or_else(|| AppError::Internal("updated post vanished".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_dto(detail))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.del_post_by_id(id, identity.user_id).await?;

    tracing::info!(post_id = id, author = %identity.user_id, "post deleted");

    Ok(HttpResponse::NoContent().finish())
}
