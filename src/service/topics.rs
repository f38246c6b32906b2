use crate::error::AppError;
use crate::models::{NewTopic, Topic};
use crate::service::RequestValidator;
use crate::sql::{insert_topic, select_topic, select_topics};
use crate::store::Executor;

pub struct TopicService;

impl TopicService {
    pub async fn list(db: &dyn Executor) -> Result<Vec<Topic>, AppError> {
        db.execute(&select_topics()).await?.into_all()
    }

    pub async fn get(db: &dyn Executor, slug: &str) -> Result<Option<Topic>, AppError> {
        db.execute(&select_topic(slug)).await?.into_first()
    }

    /// Duplicate slugs surface as a unique violation from the store.
    pub async fn create(db: &dyn Executor, new: &NewTopic) -> Result<Topic, AppError> {
        RequestValidator::require_text(&[new.slug.as_str(), new.description.as_str()])?;
        db.execute(&insert_topic(&new.slug, &new.description))
            .await?
            .into_first()?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }
}
