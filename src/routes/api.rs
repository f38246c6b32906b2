//! The `/api` surface. A known path with an unsupported method answers like an unknown path.

use crate::classify::path_not_found;
use crate::handlers::{articles, comments, endpoints, topics, users};
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(endpoints::describe).fallback(path_not_found))
        .route(
            "/api/topics",
            get(topics::list).post(topics::create).fallback(path_not_found),
        )
        .route("/api/users", get(users::list).fallback(path_not_found))
        .route("/api/users/:username", get(users::read).fallback(path_not_found))
        .route(
            "/api/articles",
            get(articles::list).post(articles::create).fallback(path_not_found),
        )
        .route(
            "/api/articles/:article_id",
            get(articles::read)
                .patch(articles::update_votes)
                .delete(articles::delete)
                .fallback(path_not_found),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(comments::list_for_article)
                .post(comments::create)
                .fallback(path_not_found),
        )
        .route(
            "/api/comments/:comment_id",
            patch(comments::update_votes)
                .delete(comments::delete)
                .fallback(path_not_found),
        )
        .with_state(state)
}
