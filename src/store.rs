//! Data-access capability: run parameterized statements, get rows back as JSON.

use crate::error::{AppError, ConfigError};
use crate::sql::QueryBuf;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::ConnectOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Rows produced by one statement. Statements that need an affected-row count use
/// `RETURNING`, so `row_count` is the number of rows returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOutcome {
    pub rows: Vec<Value>,
    pub row_count: u64,
}

impl QueryOutcome {
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let row_count = rows.len() as u64;
        QueryOutcome { rows, row_count }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn into_all<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppError::from))
            .collect()
    }

    pub fn into_first<T: DeserializeOwned>(self) -> Result<Option<T>, AppError> {
        match self.rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }
}

/// Injected into handlers through `AppState`; tests substitute an in-memory fake.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError>;

    /// Run all statements in one transaction; any error rolls every statement back.
    async fn transaction(&self, statements: &[QueryBuf]) -> Result<Vec<QueryOutcome>, AppError>;
}

#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        PgExecutor { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn prepare(q: &QueryBuf) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    q.params
        .iter()
        .fold(sqlx::query(&q.sql), |query, p| p.bind(query))
}

#[async_trait]
impl Executor for PgExecutor {
    async fn execute(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = prepare(q).fetch_all(&self.pool).await?;
        Ok(QueryOutcome::from_rows(rows.iter().map(row_to_json).collect()))
    }

    async fn transaction(&self, statements: &[QueryBuf]) -> Result<Vec<QueryOutcome>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut out = Vec::with_capacity(statements.len());
        for q in statements {
            tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
            let rows = prepare(q).fetch_all(&mut *tx).await?;
            out.push(QueryOutcome::from_rows(rows.iter().map(row_to_json).collect()));
        }
        tx.commit().await?;
        Ok(out)
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.and_utc().to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` maintenance database on the same server to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_target(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connect options for the maintenance database, plus the target database name when it
/// is one that may need creating.
fn admin_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = opts
        .get_database()
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(String::from);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
