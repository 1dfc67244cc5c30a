//! Comment handlers.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::CreateCommentRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::posts::comment_dto;

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let comment = state
        .posts
        .add_comment(post_id, identity.user_id, req.content)
        .await?;

    tracing::info!(post_id, comment_id = comment.id, "comment added");

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_dto(comment))))
}
