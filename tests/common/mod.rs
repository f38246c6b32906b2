//! In-memory stand-in for the row store plus request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nc_news::sql::{QueryBuf, SqlParam};
use nc_news::{AppError, AppState, DataError, Executor, QueryOutcome};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Responder = Box<dyn Fn(&QueryBuf) -> Result<QueryOutcome, AppError> + Send + Sync>;

/// Records every statement and answers with `respond`.
pub struct FakeDb {
    log: Mutex<Vec<QueryBuf>>,
    respond: Responder,
}

impl FakeDb {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&QueryBuf) -> Result<QueryOutcome, AppError> + Send + Sync + 'static,
    {
        Arc::new(FakeDb {
            log: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    /// Answers from a fresh copy of the seeded [`Dataset`]; deletes persist across requests.
    pub fn seeded() -> Arc<Self> {
        let data = Mutex::new(Dataset::default());
        Self::new(move |q| data.lock().unwrap().answer(q))
    }

    pub fn statements(&self) -> Vec<QueryBuf> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for FakeDb {
    async fn execute(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError> {
        self.log.lock().unwrap().push(q.clone());
        (self.respond)(q)
    }

    async fn transaction(&self, statements: &[QueryBuf]) -> Result<Vec<QueryOutcome>, AppError> {
        let mut out = Vec::new();
        for q in statements {
            out.push(self.execute(q).await?);
        }
        Ok(out)
    }
}

pub fn router(db: Arc<FakeDb>) -> Router {
    let exec: Arc<dyn Executor> = db;
    nc_news::app(AppState::new(exec).unwrap(), 64 * 1024)
}

pub async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(v) => send_raw(router, method, uri, &v.to_string()).await,
        None => {
            let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            read(router, req).await
        }
    }
}

pub async fn send_raw(router: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    read(router, req).await
}

async fn read(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

const TOPICS: [(&str, &str); 3] = [
    ("mitch", "The man, the Mitch, the legend"),
    ("cats", "Not dogs"),
    ("paper", "what books are made of"),
];

const USERS: [&str; 2] = ["butter_bridge", "icellusedkars"];

#[derive(Clone, Copy)]
struct SeedArticle {
    article_id: i32,
    topic: &'static str,
    votes: i32,
    created_at: &'static str,
}

/// (comment_id, article_id)
type SeedComment = (i32, i32);

/// Rows the fake answers from. Article 1 has 11 comments, article 3 has 2, article 2 none.
pub struct Dataset {
    articles: Vec<SeedArticle>,
    comments: Vec<SeedComment>,
}

impl Default for Dataset {
    fn default() -> Self {
        let article = |article_id, topic, votes, created_at| SeedArticle {
            article_id,
            topic,
            votes,
            created_at,
        };
        Dataset {
            articles: vec![
                article(3, "mitch", 12, "2020-11-03T09:12:00+00:00"),
                article(1, "mitch", 100, "2020-07-09T20:11:00+00:00"),
                article(2, "cats", 5, "2020-06-06T09:10:00+00:00"),
            ],
            comments: (1..=11).map(|n| (n, 1)).chain([(12, 3), (13, 3)]).collect(),
        }
    }
}

pub fn comment_row(comment_id: i32, article_id: i32, author: &str, votes: i64) -> Value {
    json!({
        "comment_id": comment_id,
        "votes": votes,
        "created_at": "2020-04-06T12:17:00+00:00",
        "author": author,
        "body": "Oh, I've got compassion running out of my nose, pal!",
        "article_id": article_id,
    })
}

pub fn fk_violation(column: &str, value: &str, table: &str) -> AppError {
    AppError::Data(
        DataError::new("23503", "insert or update on table violates foreign key constraint")
            .with_detail(format!("Key ({})=({}) is not present in table \"{}\".", column, value, table)),
    )
}

fn text(q: &QueryBuf, i: usize) -> &str {
    q.params[i].as_text().unwrap()
}

fn int(q: &QueryBuf, i: usize) -> i64 {
    q.params[i].as_int().unwrap()
}

fn rows(rows: Vec<Value>) -> Result<QueryOutcome, AppError> {
    Ok(QueryOutcome::from_rows(rows))
}

/// Sorts listing rows by the `ORDER BY <column> <ASC|DESC>` tail of the statement.
fn order_rows(sql: &str, rows: &mut [Value]) {
    let Some((_, clause)) = sql.rsplit_once("ORDER BY ") else {
        return;
    };
    let mut parts = clause.split_whitespace();
    let column = parts.next().unwrap().trim_start_matches("articles.");
    let descending = parts.next() == Some("DESC");
    rows.sort_by(|a, b| {
        let ord = match (&a[column], &b[column]) {
            (Value::Number(x), Value::Number(y)) => x.as_i64().cmp(&y.as_i64()),
            (x, y) => x.as_str().cmp(&y.as_str()),
        };
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

impl Dataset {
    fn comment_count(&self, article_id: i32) -> usize {
        self.comments.iter().filter(|c| c.1 == article_id).count()
    }

    fn article_row(&self, id: i32, with_body: bool) -> Option<Value> {
        let a = self.articles.iter().find(|a| a.article_id == id)?;
        let mut row = json!({
            "author": "butter_bridge",
            "title": format!("Article {}", a.article_id),
            "article_id": a.article_id,
            "topic": a.topic,
            "created_at": a.created_at,
            "votes": a.votes,
            "article_img_url": "https://images.pexels.com/photos/158651/news.jpeg?w=700&h=700",
            "comment_count": self.comment_count(a.article_id),
        });
        if with_body {
            row["body"] = json!("I find this existence challenging");
        }
        Some(row)
    }

    /// Answers a statement the way the database would.
    pub fn answer(&mut self, q: &QueryBuf) -> Result<QueryOutcome, AppError> {
        let sql = q.sql.as_str();
        if sql == "SELECT 1" {
            return rows(vec![json!({ "?column?": 1 })]);
        }
        if sql.starts_with("SELECT slug, description FROM topics WHERE") {
            let slug = text(q, 0);
            return rows(
                TOPICS
                    .iter()
                    .filter(|t| t.0 == slug)
                    .map(|(s, d)| json!({ "slug": s, "description": d }))
                    .collect(),
            );
        }
        if sql.starts_with("SELECT slug, description FROM topics") {
            return rows(TOPICS.iter().map(|(s, d)| json!({ "slug": s, "description": d })).collect());
        }
        if sql.starts_with("INSERT INTO topics") {
            let slug = text(q, 0);
            if TOPICS.iter().any(|t| t.0 == slug) {
                return Err(AppError::Data(DataError::new("23505", "duplicate key value")));
            }
            return rows(vec![json!({ "slug": slug, "description": text(q, 1) })]);
        }
        if sql.starts_with("SELECT username, name, avatar_url FROM users WHERE") {
            let name = text(q, 0);
            return rows(
                USERS
                    .iter()
                    .filter(|u| **u == name)
                    .map(|u| json!({ "username": u, "name": "jonny", "avatar_url": null }))
                    .collect(),
            );
        }
        if sql.starts_with("SELECT username, name, avatar_url FROM users") {
            return rows(
                USERS
                    .iter()
                    .map(|u| json!({ "username": u, "name": "jonny", "avatar_url": "https://a" }))
                    .collect(),
            );
        }
        if sql.starts_with("SELECT articles.author") && sql.contains("WHERE articles.article_id") {
            return rows(self.article_row(int(q, 0) as i32, true).into_iter().collect());
        }
        if sql.starts_with("SELECT articles.author") {
            let topic = q.params.first().and_then(SqlParam::as_text);
            let mut listing: Vec<Value> = self
                .articles
                .iter()
                .filter(|a| topic.map_or(true, |t| a.topic == t))
                .filter_map(|a| self.article_row(a.article_id, false))
                .collect();
            order_rows(sql, &mut listing);
            return rows(listing);
        }
        if sql.starts_with("INSERT INTO articles") {
            let (author, topic) = (text(q, 0), text(q, 3));
            if !USERS.contains(&author) {
                return Err(fk_violation("author", author, "users"));
            }
            if !TOPICS.iter().any(|t| t.0 == topic) {
                return Err(fk_violation("topic", topic, "topics"));
            }
            return rows(vec![json!({
                "author": author,
                "title": text(q, 1),
                "article_id": 4,
                "body": text(q, 2),
                "topic": topic,
                "created_at": "2024-01-01T00:00:00+00:00",
                "votes": 0,
                "article_img_url": q.params.get(4).and_then(SqlParam::as_text).unwrap_or("https://default"),
                "comment_count": 0,
            })]);
        }
        if sql.starts_with("UPDATE articles") {
            let (inc, id) = (int(q, 0), int(q, 1) as i32);
            return rows(
                self.article_row(id, true)
                    .map(|mut row| {
                        let votes = row["votes"].as_i64().unwrap() + inc;
                        row["votes"] = json!(votes);
                        row
                    })
                    .into_iter()
                    .collect(),
            );
        }
        if sql.starts_with("DELETE FROM comments WHERE article_id") {
            let id = int(q, 0) as i32;
            let (gone, kept): (Vec<SeedComment>, Vec<SeedComment>) =
                std::mem::take(&mut self.comments).into_iter().partition(|c| c.1 == id);
            self.comments = kept;
            return rows(gone.iter().map(|c| json!({ "comment_id": c.0 })).collect());
        }
        if sql.starts_with("DELETE FROM articles") {
            let id = int(q, 0) as i32;
            if self.comment_count(id) > 0 {
                return Err(AppError::Data(
                    DataError::new("23503", "update or delete violates foreign key constraint")
                        .with_detail(format!("Key (article_id)=({}) is still referenced from table \"comments\".", id)),
                ));
            }
            let before = self.articles.len();
            self.articles.retain(|a| a.article_id != id);
            let removed = if self.articles.len() < before {
                vec![json!({ "article_id": id })]
            } else {
                vec![]
            };
            return rows(removed);
        }
        if sql.starts_with("SELECT comment_id") {
            let id = int(q, 0) as i32;
            return rows(
                self.comments
                    .iter()
                    .filter(|c| c.1 == id)
                    .map(|c| comment_row(c.0, id, "icellusedkars", 0))
                    .collect(),
            );
        }
        if sql.starts_with("INSERT INTO comments") {
            let (article_id, author) = (int(q, 0) as i32, text(q, 1));
            if !USERS.contains(&author) {
                return Err(fk_violation("author", author, "users"));
            }
            let comment_id = self.comments.iter().map(|c| c.0).max().unwrap_or(0) + 1;
            self.comments.push((comment_id, article_id));
            return rows(vec![comment_row(comment_id, article_id, author, 0)]);
        }
        if sql.starts_with("UPDATE comments") {
            let (inc, id) = (int(q, 0), int(q, 1) as i32);
            return rows(
                self.comments
                    .iter()
                    .find(|c| c.0 == id)
                    .map(|c| comment_row(c.0, c.1, "icellusedkars", 16 + inc))
                    .into_iter()
                    .collect(),
            );
        }
        if sql.starts_with("DELETE FROM comments WHERE comment_id") {
            let id = int(q, 0) as i32;
            let before = self.comments.len();
            self.comments.retain(|c| c.0 != id);
            let removed = if self.comments.len() < before {
                vec![json!({ "comment_id": id })]
            } else {
                vec![]
            };
            return rows(removed);
        }
        panic!("unexpected statement: {}", sql);
    }
}
