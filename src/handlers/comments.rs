//! Comment handlers, nested under articles and standalone under /api/comments.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{NewComment, VoteDelta};
use crate::response::{created, ok};
use crate::service::{CommentService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// GET /api/articles/:article_id/comments
pub async fn list_for_article(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article_id = RequestValidator::parse_id(&id_str)?;
    let comments = CommentService::list_for_article(state.db.as_ref(), article_id).await?;
    Ok(ok("comments", comments))
}

/// POST /api/articles/:article_id/comments
pub async fn create(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<NewComment>,
) -> Result<impl IntoResponse, AppError> {
    let article_id = RequestValidator::parse_id(&id_str)?;
    let comment = CommentService::create(state.db.as_ref(), article_id, &body).await?;
    Ok(created("comment", comment))
}

pub async fn update_votes(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<VoteDelta>,
) -> Result<impl IntoResponse, AppError> {
    let comment_id = RequestValidator::parse_id(&id_str)?;
    let comment = CommentService::adjust_votes(state.db.as_ref(), comment_id, body.inc_votes).await?;
    Ok(ok("comment", comment))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comment_id = RequestValidator::parse_id(&id_str)?;
    CommentService::delete(state.db.as_ref(), comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
