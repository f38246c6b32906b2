//! Request validation: listing query parameters, path identifiers and body fields.

use crate::error::{AppError, TOPIC_NOT_FOUND};
use crate::service::TopicService;
use crate::sql::{ArticleListing, SortBy, SortOrder};
use crate::store::Executor;

pub struct RequestValidator;

impl RequestValidator {
    /// Parse `topic`, `sort_by` and `order`. Each may appear at most once; other keys are
    /// ignored. Sort and order are fully checked here, the topic still needs
    /// [`RequestValidator::ensure_topic_exists`].
    pub fn article_listing(params: &[(String, String)]) -> Result<ArticleListing, AppError> {
        let sort_by = single(params, "sort_by")?
            .map(str::parse::<SortBy>)
            .transpose()?
            .unwrap_or_default();
        let order = single(params, "order")?
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        let topic = single(params, "topic")?.map(String::from);
        Ok(ArticleListing {
            topic,
            sort_by,
            order,
        })
    }

    pub async fn ensure_topic_exists(db: &dyn Executor, topic: &str) -> Result<(), AppError> {
        if TopicService::get(db, topic).await?.is_none() {
            return Err(AppError::Referential(TOPIC_NOT_FOUND.into()));
        }
        Ok(())
    }

    /// Path identifiers are positive 32-bit integers.
    pub fn parse_id(id_str: &str) -> Result<i32, AppError> {
        match id_str.parse::<i32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::bad_request()),
        }
    }

    /// Required text fields must not be blank.
    pub fn require_text(fields: &[&str]) -> Result<(), AppError> {
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::bad_request());
        }
        Ok(())
    }
}

fn single<'a>(params: &'a [(String, String)], key: &str) -> Result<Option<&'a str>, AppError> {
    let mut values = params.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    let first = values.next();
    if values.next().is_some() {
        return Err(AppError::bad_request());
    }
    Ok(first)
}
