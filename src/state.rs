//! Shared application state for all routes.

use crate::error::AppError;
use crate::store::Executor;
use serde_json::Value;
use std::sync::Arc;

/// Description of every endpoint, served verbatim on `GET /api`.
pub const ENDPOINTS_JSON: &str = include_str!("endpoints.json");

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Executor>,
    pub endpoints: Arc<Value>,
}

impl AppState {
    pub fn new(db: Arc<dyn Executor>) -> Result<Self, AppError> {
        let endpoints: Value = serde_json::from_str(ENDPOINTS_JSON)?;
        Ok(AppState {
            db,
            endpoints: Arc::new(endpoints),
        })
    }
}
