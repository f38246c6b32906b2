//! nc-news: REST backend for topics, articles, comments and users on PostgreSQL.

pub mod classify;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use classify::{classify, ErrorReply};
pub use config::ServerConfig;
pub use error::{AppError, ConfigError, DataError};
pub use migration::apply_schema;
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, Executor, PgExecutor, QueryOutcome};
