use crate::error::{AppError, ARTICLE_NOT_FOUND};
use crate::models::{Article, ArticleSummary, NewArticle};
use crate::service::RequestValidator;
use crate::sql::{
    delete_article, delete_comments_for_article, insert_article, select_article_by_id,
    select_articles, update_article_votes, ArticleListing,
};
use crate::store::Executor;

pub struct ArticleService;

impl ArticleService {
    /// Listing with optional topic filter. The topic must exist; an existing topic with no
    /// articles yields an empty list.
    pub async fn list(
        db: &dyn Executor,
        listing: &ArticleListing,
    ) -> Result<Vec<ArticleSummary>, AppError> {
        if let Some(topic) = &listing.topic {
            RequestValidator::ensure_topic_exists(db, topic).await?;
        }
        tracing::debug!(%listing, "listing articles");
        db.execute(&select_articles(listing)).await?.into_all()
    }

    pub async fn get(db: &dyn Executor, article_id: i32) -> Result<Article, AppError> {
        db.execute(&select_article_by_id(article_id))
            .await?
            .into_first()?
            .ok_or_else(|| AppError::not_found(ARTICLE_NOT_FOUND))
    }

    /// Unknown author or topic comes back from the store as a foreign-key violation.
    pub async fn create(db: &dyn Executor, new: &NewArticle) -> Result<Article, AppError> {
        RequestValidator::require_text(&[
            new.author.as_str(),
            new.title.as_str(),
            new.body.as_str(),
            new.topic.as_str(),
        ])?;
        let q = insert_article(
            &new.author,
            &new.title,
            &new.body,
            &new.topic,
            new.article_img_url.as_deref(),
        );
        db.execute(&q)
            .await?
            .into_first()?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn adjust_votes(
        db: &dyn Executor,
        article_id: i32,
        inc_votes: i64,
    ) -> Result<Article, AppError> {
        db.execute(&update_article_votes(article_id, inc_votes))
            .await?
            .into_first()?
            .ok_or_else(|| AppError::not_found(ARTICLE_NOT_FOUND))
    }

    /// Comments first, then the article, in one transaction. A missing article commits no
    /// change and is reported as 404.
    pub async fn delete(db: &dyn Executor, article_id: i32) -> Result<(), AppError> {
        let outcomes = db
            .transaction(&[
                delete_comments_for_article(article_id),
                delete_article(article_id),
            ])
            .await?;
        let removed = outcomes.last().map(|o| o.row_count).unwrap_or(0);
        if removed == 0 {
            return Err(AppError::not_found(ARTICLE_NOT_FOUND));
        }
        tracing::info!(article_id, comments = outcomes[0].row_count, "article deleted");
        Ok(())
    }
}
