//! Builds parameterized statements. Identifiers are literals from this module only;
//! every caller-supplied value becomes a `$n` parameter.

use crate::error::AppError;
use crate::sql::SqlParam;
use std::fmt;
use std::str::FromStr;

const ARTICLE_SUMMARY_COLUMNS: &str = "articles.author, articles.title, articles.article_id, \
     articles.topic, articles.created_at, articles.votes, articles.article_img_url";

const COMMENT_COLUMNS: &str = "comment_id, votes, created_at, author, body, article_id";

/// Columns returned by article writes, comment_count included so the row has the full article shape.
const ARTICLE_RETURNING: &str = "author, title, article_id, body, topic, created_at, votes, \
     article_img_url, (SELECT CAST(COUNT(comments.comment_id) AS INT) FROM comments \
     WHERE comments.article_id = articles.article_id) AS comment_count";

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Statement with no parameters.
    pub fn raw(sql: &str) -> Self {
        QueryBuf {
            sql: sql.to_string(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

/// Sortable article columns. The only path from a `sort_by` value to statement text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    Author,
    Title,
    ArticleId,
    Votes,
    CommentCount,
    #[default]
    CreatedAt,
}

impl SortBy {
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Author => "articles.author",
            SortBy::Title => "articles.title",
            SortBy::ArticleId => "articles.article_id",
            SortBy::Votes => "articles.votes",
            SortBy::CommentCount => "comment_count",
            SortBy::CreatedAt => "articles.created_at",
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(SortBy::Author),
            "title" => Ok(SortBy::Title),
            "article_id" => Ok(SortBy::ArticleId),
            "votes" => Ok(SortBy::Votes),
            "comment_count" => Ok(SortBy::CommentCount),
            "created_at" => Ok(SortBy::CreatedAt),
            _ => Err(AppError::bad_request()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(AppError::bad_request()),
        }
    }
}

/// Validated inputs of the article listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleListing {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl fmt::Display for ArticleListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "topic={} sort_by={} order={}",
            self.topic.as_deref().unwrap_or("*"),
            self.sort_by.column(),
            self.order.keyword()
        )
    }
}

/// Article summaries with derived comment_count. The outer join keeps articles without
/// comments (count 0). Ties on the sort column keep database order.
pub fn select_articles(listing: &ArticleListing) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match &listing.topic {
        Some(topic) => {
            let n = q.push_param(topic.as_str());
            format!(" WHERE articles.topic = ${}", n)
        }
        None => String::new(),
    };
    q.sql = format!(
        "SELECT {}, CAST(COUNT(comments.comment_id) AS INT) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id{} \
         GROUP BY articles.article_id ORDER BY {} {}",
        ARTICLE_SUMMARY_COLUMNS,
        where_clause,
        listing.sort_by.column(),
        listing.order.keyword()
    );
    q
}

pub fn select_article_by_id(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {}, articles.body, CAST(COUNT(comments.comment_id) AS INT) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id \
         WHERE articles.article_id = ${} GROUP BY articles.article_id",
        ARTICLE_SUMMARY_COLUMNS, n
    );
    q
}

/// INSERT article. article_img_url is omitted when absent so the column default applies.
pub fn insert_article(
    author: &str,
    title: &str,
    body: &str,
    topic: &str,
    article_img_url: Option<&str>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = vec!["author", "title", "body", "topic"];
    let mut placeholders = Vec::new();
    for v in [author, title, body, topic] {
        placeholders.push(format!("${}", q.push_param(v)));
    }
    if let Some(url) = article_img_url {
        cols.push("article_img_url");
        placeholders.push(format!("${}", q.push_param(url)));
    }
    q.sql = format!(
        "INSERT INTO articles ({}) VALUES ({}) RETURNING {}",
        cols.join(", "),
        placeholders.join(", "),
        ARTICLE_RETURNING
    );
    q
}

pub fn update_article_votes(article_id: i32, inc_votes: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let inc = q.push_param(inc_votes);
    let id = q.push_param(article_id);
    q.sql = format!(
        "UPDATE articles SET votes = votes + ${} WHERE article_id = ${} RETURNING {}",
        inc, id, ARTICLE_RETURNING
    );
    q
}

pub fn delete_comments_for_article(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!("DELETE FROM comments WHERE article_id = ${} RETURNING comment_id", n);
    q
}

pub fn delete_article(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!("DELETE FROM articles WHERE article_id = ${} RETURNING article_id", n);
    q
}

/// Comments of one article, newest first.
pub fn select_comments_for_article(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {} FROM comments WHERE article_id = ${} ORDER BY created_at DESC",
        COMMENT_COLUMNS, n
    );
    q
}

pub fn insert_comment(article_id: i32, author: &str, body: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let a = q.push_param(article_id);
    let u = q.push_param(author);
    let b = q.push_param(body);
    q.sql = format!(
        "INSERT INTO comments (article_id, author, body) VALUES (${}, ${}, ${}) RETURNING {}",
        a, u, b, COMMENT_COLUMNS
    );
    q
}

pub fn update_comment_votes(comment_id: i32, inc_votes: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let inc = q.push_param(inc_votes);
    let id = q.push_param(comment_id);
    q.sql = format!(
        "UPDATE comments SET votes = votes + ${} WHERE comment_id = ${} RETURNING {}",
        inc, id, COMMENT_COLUMNS
    );
    q
}

pub fn delete_comment(comment_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(comment_id);
    q.sql = format!("DELETE FROM comments WHERE comment_id = ${} RETURNING comment_id", n);
    q
}

pub fn select_topics() -> QueryBuf {
    QueryBuf::raw("SELECT slug, description FROM topics ORDER BY slug")
}

pub fn select_topic(slug: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(slug);
    q.sql = format!("SELECT slug, description FROM topics WHERE slug = ${}", n);
    q
}

pub fn insert_topic(slug: &str, description: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let s = q.push_param(slug);
    let d = q.push_param(description);
    q.sql = format!(
        "INSERT INTO topics (slug, description) VALUES (${}, ${}) RETURNING slug, description",
        s, d
    );
    q
}

pub fn select_users() -> QueryBuf {
    QueryBuf::raw("SELECT username, name, avatar_url FROM users ORDER BY username")
}

pub fn select_user(username: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(username);
    q.sql = format!("SELECT username, name, avatar_url FROM users WHERE username = ${}", n);
    q
}
