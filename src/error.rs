//! Typed errors. Mapping to HTTP responses goes through the classifier chain in `classify`.

use axum::response::{IntoResponse, Response};
use std::fmt;
use thiserror::Error;

pub const BAD_REQUEST: &str = "Bad request";
pub const ARTICLE_NOT_FOUND: &str = "Article not found";
pub const COMMENT_NOT_FOUND: &str = "Comment not found";
pub const TOPIC_NOT_FOUND: &str = "Topic not found";
pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Error reported by the database server, reduced to the fields the classifier inspects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataError {
    /// SQLSTATE, e.g. `23503`.
    pub code: String,
    pub message: String,
    pub detail: Option<String>,
    pub table: Option<String>,
    pub constraint: Option<String>,
}

impl DataError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        DataError {
            code: code.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Malformed input: bad query value, body shape or identifier format.
    #[error("{0}")]
    BadRequest(String),
    /// Well-formed reference to an entity that does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Write that references a missing parent entity.
    #[error("{0}")]
    Referential(String),
    #[error("database: {0}")]
    Data(DataError),
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("row decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    pub fn bad_request() -> Self {
        AppError::BadRequest(BAD_REQUEST.into())
    }

    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let sqlx::Error::Database(db) = &e else {
            return AppError::Db(e);
        };
        let mut data = DataError::new(
            db.code().map(|c| c.into_owned()).unwrap_or_default(),
            db.message(),
        );
        data.table = db.table().map(String::from);
        data.constraint = db.constraint().map(String::from);
        if let Some(pg) = db.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
            data.detail = pg.detail().map(String::from);
        }
        AppError::Data(data)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        crate::classify::classify(&self).into_response()
    }
}
