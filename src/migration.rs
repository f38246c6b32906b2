//! Table DDL. Order follows foreign-key dependencies; every statement is idempotent.

use crate::error::AppError;
use sqlx::PgPool;

const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

fn schema_statements() -> Vec<String> {
    vec![
        "CREATE TABLE IF NOT EXISTS topics (
            slug VARCHAR PRIMARY KEY,
            description VARCHAR NOT NULL
        )"
        .to_string(),
        "CREATE TABLE IF NOT EXISTS users (
            username VARCHAR PRIMARY KEY,
            name VARCHAR NOT NULL,
            avatar_url VARCHAR
        )"
        .to_string(),
        format!(
            "CREATE TABLE IF NOT EXISTS articles (
                article_id SERIAL PRIMARY KEY,
                title VARCHAR NOT NULL,
                topic VARCHAR NOT NULL REFERENCES topics(slug),
                author VARCHAR NOT NULL REFERENCES users(username),
                body VARCHAR NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                votes INT NOT NULL DEFAULT 0,
                article_img_url VARCHAR NOT NULL DEFAULT '{}'
            )",
            DEFAULT_ARTICLE_IMG_URL
        ),
        "CREATE TABLE IF NOT EXISTS comments (
            comment_id SERIAL PRIMARY KEY,
            body VARCHAR NOT NULL,
            article_id INT NOT NULL REFERENCES articles(article_id),
            author VARCHAR NOT NULL REFERENCES users(username),
            votes INT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"
        .to_string(),
        "CREATE INDEX IF NOT EXISTS comments_article_id_idx ON comments (article_id)".to_string(),
    ]
}

/// Create topics, users, articles and comments when missing. Existing tables are left alone.
pub async fn apply_schema(pool: &PgPool) -> Result<(), AppError> {
    for sql in schema_statements() {
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}
