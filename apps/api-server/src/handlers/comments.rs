//! Comment handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use filmme_core::domain::{Category, Comment};
use filmme_shared::dto::{CommentRequest, CommentResponse, PageQuery};

use super::community::{PostPath, paginated};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentPath {
    category: String,
    id: Uuid,
    comment_id: Uuid,
}

/// GET /communities/{category}/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .community
        .list_comments(path.category()?, path.id(), query.page, query.page_size)
        .await?;

    Ok(HttpResponse::Ok().json(paginated(page, comment_response)))
}

/// POST /communities/{category}/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostPath>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .community
        .add_comment(
            identity.user_id,
            path.category()?,
            path.id(),
            body.into_inner().content,
        )
        .await?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// PUT|PATCH /communities/{category}/{id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<CommentPath>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let category: Category = path.category.parse()?;

    let comment = state
        .community
        .update_comment(
            identity.user_id,
            category,
            path.id,
            path.comment_id,
            body.into_inner().content,
        )
        .await?;

    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

/// DELETE /communities/{category}/{id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<CommentPath>,
) -> AppResult<HttpResponse> {
    let category: Category = path.category.parse()?;

    state
        .community
        .delete_comment(identity.user_id, category, path.id, path.comment_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        writer_id: comment.user_id,
        content: comment.content,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}
