use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::NewTopic;
use crate::response::{created, ok};
use crate::service::TopicService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let topics = TopicService::list(state.db.as_ref()).await?;
    Ok(ok("topics", topics))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewTopic>,
) -> Result<impl IntoResponse, AppError> {
    let topic = TopicService::create(state.db.as_ref(), &body).await?;
    Ok(created("topic", topic))
}
