//! Ordered error classifiers. Each one either produces the final reply or passes the
//! error on; the first match wins and the last one always matches.

use crate::error::{
    AppError, DataError, ARTICLE_NOT_FOUND, BAD_REQUEST, TOPIC_NOT_FOUND, USER_NOT_FOUND,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const PATH_NOT_FOUND: &str = "Path not found";
pub const SERVER_ERROR: &str = "Server error";
pub const ALREADY_EXISTS: &str = "Already exists";

const INVALID_TEXT_REPRESENTATION: &str = "22P02";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
const NOT_NULL_VIOLATION: &str = "23502";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const UNDEFINED_COLUMN: &str = "42703";

/// Status plus the `{msg}` body sent to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReply {
    pub status: StatusCode,
    pub msg: String,
}

#[derive(Serialize)]
struct MsgBody<'a> {
    msg: &'a str,
}

impl ErrorReply {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        ErrorReply {
            status,
            msg: msg.into(),
        }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        (self.status, Json(MsgBody { msg: &self.msg })).into_response()
    }
}

pub type Classifier = fn(&AppError) -> Option<ErrorReply>;

/// Evaluated in order after route dispatch; unmatched routes are answered by [`path_not_found`].
pub const CHAIN: [Classifier; 3] = [data_errors, app_errors, server_errors];

pub fn classify(err: &AppError) -> ErrorReply {
    CHAIN
        .iter()
        .find_map(|classifier| classifier(err))
        .unwrap_or_else(|| ErrorReply::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR))
}

/// Router fallback for requests no route matched.
pub async fn path_not_found() -> ErrorReply {
    ErrorReply::new(StatusCode::NOT_FOUND, PATH_NOT_FOUND)
}

/// Driver errors keyed by SQLSTATE.
pub fn data_errors(err: &AppError) -> Option<ErrorReply> {
    let AppError::Data(data) = err else {
        return None;
    };
    match data.code.as_str() {
        INVALID_TEXT_REPRESENTATION | NUMERIC_VALUE_OUT_OF_RANGE | UNDEFINED_COLUMN
        | NOT_NULL_VIOLATION => Some(ErrorReply::new(StatusCode::BAD_REQUEST, BAD_REQUEST)),
        FOREIGN_KEY_VIOLATION => missing_parent(data).map(|msg| ErrorReply::new(StatusCode::NOT_FOUND, msg)),
        UNIQUE_VIOLATION => Some(ErrorReply::new(StatusCode::CONFLICT, ALREADY_EXISTS)),
        _ => None,
    }
}

/// Errors raised deliberately with an explicit status and message.
pub fn app_errors(err: &AppError) -> Option<ErrorReply> {
    match err {
        AppError::BadRequest(msg) => Some(ErrorReply::new(StatusCode::BAD_REQUEST, msg.as_str())),
        AppError::NotFound(msg) | AppError::Referential(msg) => {
            Some(ErrorReply::new(StatusCode::NOT_FOUND, msg.as_str()))
        }
        _ => None,
    }
}

/// Last resort: log everything, expose nothing.
pub fn server_errors(err: &AppError) -> Option<ErrorReply> {
    tracing::error!(error = %err, details = ?err, "unhandled error");
    Some(ErrorReply::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR))
}

/// Which parent a foreign-key violation points at. Postgres names the referenced table in
/// the detail (`Key (author)=(x) is not present in table "users".`); the constraint name is
/// the fallback when no detail is available.
fn missing_parent(data: &DataError) -> Option<&'static str> {
    if let Some(detail) = data.detail.as_deref() {
        let (_, table) = detail.split_once("is not present in table ")?;
        return match table.trim_end_matches('.').trim_matches('"') {
            "articles" => Some(ARTICLE_NOT_FOUND),
            "users" => Some(USER_NOT_FOUND),
            "topics" => Some(TOPIC_NOT_FOUND),
            _ => None,
        };
    }
    let constraint = data.constraint.as_deref()?;
    if constraint.ends_with("article_id_fkey") {
        Some(ARTICLE_NOT_FOUND)
    } else if constraint.ends_with("author_fkey") {
        Some(USER_NOT_FOUND)
    } else if constraint.ends_with("topic_fkey") {
        Some(TOPIC_NOT_FOUND)
    } else {
        None
    }
}
