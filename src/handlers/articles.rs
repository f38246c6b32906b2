//! /api/articles handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{NewArticle, VoteDelta};
use crate::response::{created, ok};
use crate::service::{ArticleService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

/// GET /api/articles?topic=&sort_by=&order=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query.map_err(|_| AppError::bad_request())?;
    let listing = RequestValidator::article_listing(&params)?;
    let articles = ArticleService::list(state.db.as_ref(), &listing).await?;
    Ok(ok("articles", articles))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewArticle>,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::create(state.db.as_ref(), &body).await?;
    Ok(created("article", article))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article_id = RequestValidator::parse_id(&id_str)?;
    let article = ArticleService::get(state.db.as_ref(), article_id).await?;
    Ok(ok("article", article))
}

pub async fn update_votes(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<VoteDelta>,
) -> Result<impl IntoResponse, AppError> {
    let article_id = RequestValidator::parse_id(&id_str)?;
    let article = ArticleService::adjust_votes(state.db.as_ref(), article_id, body.inc_votes).await?;
    Ok(ok("article", article))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article_id = RequestValidator::parse_id(&id_str)?;
    ArticleService::delete(state.db.as_ref(), article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
