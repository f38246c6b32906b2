//! Row and request-body types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Listing shape: an article without its body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub author: String,
    pub title: String,
    pub article_id: i32,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    /// Derived per query, never stored.
    pub comment_count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub author: String,
    pub title: String,
    pub article_id: i32,
    pub body: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i32,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub body: String,
    pub article_id: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTopic {
    pub slug: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewComment {
    #[serde(alias = "username")]
    pub author: String,
    pub body: String,
}

/// Signed delta added to a votes counter.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct VoteDelta {
    pub inc_votes: i64,
}
