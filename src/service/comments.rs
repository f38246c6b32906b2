use crate::error::{AppError, ARTICLE_NOT_FOUND, COMMENT_NOT_FOUND};
use crate::models::{Comment, NewComment};
use crate::service::{ArticleService, RequestValidator};
use crate::sql::{delete_comment, insert_comment, select_comments_for_article, update_comment_votes};
use crate::store::Executor;

pub struct CommentService;

impl CommentService {
    /// Comments of an existing article, newest first. Unknown article is 404, not an empty list.
    pub async fn list_for_article(db: &dyn Executor, article_id: i32) -> Result<Vec<Comment>, AppError> {
        ArticleService::get(db, article_id).await?;
        db.execute(&select_comments_for_article(article_id)).await?.into_all()
    }

    /// The parent article is looked up first; an unknown author is reported by the
    /// store's foreign key on comments.author.
    pub async fn create(
        db: &dyn Executor,
        article_id: i32,
        new: &NewComment,
    ) -> Result<Comment, AppError> {
        RequestValidator::require_text(&[new.author.as_str(), new.body.as_str()])?;
        ArticleService::get(db, article_id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::Referential(ARTICLE_NOT_FOUND.into()),
            other => other,
        })?;
        db.execute(&insert_comment(article_id, &new.author, &new.body))
            .await?
            .into_first()?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn adjust_votes(
        db: &dyn Executor,
        comment_id: i32,
        inc_votes: i64,
    ) -> Result<Comment, AppError> {
        db.execute(&update_comment_votes(comment_id, inc_votes))
            .await?
            .into_first()?
            .ok_or_else(|| AppError::not_found(COMMENT_NOT_FOUND))
    }

    pub async fn delete(db: &dyn Executor, comment_id: i32) -> Result<(), AppError> {
        if db.execute(&delete_comment(comment_id)).await?.is_empty() {
            return Err(AppError::not_found(COMMENT_NOT_FOUND));
        }
        Ok(())
    }
}
