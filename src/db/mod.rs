mod render;
mod schema;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::{debug, info};

pub use render::render_table;
pub use schema::{render_schema, ColumnInfo};

use crate::config::ConnectionConfig;
use crate::errors::Error;

/// Supplies a fresh textual snapshot of the connected database's schema.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn schema_text(&self) -> Result<String, Error>;
}

/// Executes one SQL statement against the live connection and renders the
/// result set as text.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run(&self, sql: &str) -> Result<String, Error>;
}

/// A long-lived MySQL connection, reused across chat cycles.
#[derive(Clone, Debug)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Connects to the database described by `config`. One connection is
    /// enough: at most one query is in flight per session.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
        let url = config.url()?;
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        info!(
            "Connected to {}:{}/{}",
            config.host,
            config.port,
            config.database.as_deref().unwrap_or_default()
        );
        Ok(Database { pool })
    }
}

/// Maps transport-level failures to connection errors and statement-level
/// failures to execution errors.
fn map_query_error(e: sqlx::Error) -> Error {
    match e {
        sqlx::Error::Database(db) => Error::Execution(db.message().to_string()),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => Error::Connection(e.to_string()),
        other => Error::Execution(other.to_string()),
    }
}

#[async_trait]
impl SchemaProvider for Database {
    /// Renders all tables and columns visible on the active connection.
    /// Fetched fresh on every call so schema changes show up immediately.
    async fn schema_text(&self) -> Result<String, Error> {
        let rows = sqlx::query(
            "SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
             COLUMN_TYPE AS column_type, IS_NULLABLE AS is_nullable, COLUMN_KEY AS column_key \
             FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() \
             ORDER BY TABLE_NAME, ORDINAL_POSITION",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Connection(e.to_string()))?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(ColumnInfo {
                table: row.try_get("table_name").map_err(map_query_error)?,
                name: row.try_get("column_name").map_err(map_query_error)?,
                column_type: row.try_get("column_type").map_err(map_query_error)?,
                nullable: row
                    .try_get::<String, _>("is_nullable")
                    .map_err(map_query_error)?
                    == "YES",
                key: row.try_get("column_key").map_err(map_query_error)?,
            });
        }
        debug!("schema snapshot covers {} columns", columns.len());
        Ok(render_schema(&columns))
    }
}

#[async_trait]
impl QueryExecutor for Database {
    async fn run(&self, sql: &str) -> Result<String, Error> {
        debug!("executing: {}", sql);
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_error)?;

        let columns: Vec<String> = rows
            .first()
            .map(|row| {
                use sqlx::Column;
                row.columns().iter().map(|c| c.name().to_string()).collect()
            })
            .unwrap_or_default();

        let mut values = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut rendered = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                rendered.push(render::decode_value(row, idx));
            }
            values.push(rendered);
        }

        Ok(render_table(&columns, &values))
    }
}
