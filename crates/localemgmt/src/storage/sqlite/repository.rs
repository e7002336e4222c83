//! SQLite repository implementation.
//!
//! Implements `LocaleRepository` from `localemgmt_core::storage` on top of a
//! single `tokio_rusqlite::Connection`, which runs every call on its own
//! thread in submission order.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, params_from_iter};
use tokio_rusqlite::Connection;

use localemgmt_core::locale::{
    FilterField, LocaleFilter, LocaleItem, UpsertReport, WhereClause, LOCALE_ITEMS_TABLE,
};
use localemgmt_core::storage::{LocaleRepository, RepositoryError, Result};

use super::conversions::{row_to_item, ITEM_COLUMNS};
use super::error::{map_tokio_rusqlite_error, Operation};
use super::scripts::SqlScripts;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns a connection string into a database path.
///
/// A leading `sqlite://` is dropped; `:memory:` opens a private in-memory
/// database.
pub fn database_path(database_url: &str) -> Result<&str> {
    let trimmed = database_url.trim();
    let path = trimmed.strip_prefix("sqlite://").unwrap_or(trimmed);

    if path.is_empty() {
        return Err(RepositoryError::Connection(
            "empty database connection string".to_string(),
        ));
    }

    Ok(path)
}

/// Runs a prepared select and collects its rows.
///
/// Returns `None` when the statement has no result columns.
fn select_items(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[String],
) -> rusqlite::Result<Option<Vec<LocaleItem>>> {
    let mut stmt = conn.prepare(sql)?;
    if stmt.column_count() == 0 {
        return Ok(None);
    }

    let items = stmt
        .query_map(params_from_iter(params.iter()), row_to_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(items))
}

/// SQLite-based locale item repository.
pub struct SqliteRepository {
    conn: Connection,
    upsert_sql: Arc<str>,
}

impl SqliteRepository {
    /// Opens the database, checks it answers and applies the init script.
    ///
    /// # Errors
    ///
    /// - `Connection` if the connection string is empty or the database
    ///   cannot be opened
    /// - `Schema` if the init script fails
    pub async fn connect(database_url: &str, scripts: SqlScripts) -> Result<Self> {
        let path = database_path(database_url)?;

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Connect))?;

        let repo = Self {
            conn,
            upsert_sql: Arc::from(scripts.upsert),
        };

        repo.ping().await?;
        repo.init_schema(scripts.init).await?;

        tracing::info!(database = %path, "SQLite repository ready");

        Ok(repo)
    }

    /// Creates a new repository with an in-memory database and the bundled
    /// scripts.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        Self::connect(":memory:", SqlScripts::bundled()).await
    }

    async fn init_schema(&self, init_sql: String) -> Result<()> {
        self.conn
            .call(move |conn| conn.execute_batch(&init_sql).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Schema))
    }

    async fn list_distinct(&self, field: FilterField) -> Result<Vec<String>> {
        let column = field.column();
        let query = format!(
            "SELECT DISTINCT {column} FROM {LOCALE_ITEMS_TABLE} ORDER BY {column} ASC"
        );

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&query).map_err(wrap_err)?;
                let values = stmt
                    .query_map([], |row| row.get::<_, String>(0))
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;
                Ok(values)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Query))
    }
}

#[async_trait]
impl LocaleRepository for SqliteRepository {
    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map(|_| ())
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Connect))
    }

    async fn upsert_item(&self, item: &LocaleItem) -> Result<LocaleItem> {
        item.validate()
            .map_err(|e| RepositoryError::Write(e.to_string()))?;

        let sql = Arc::clone(&self.upsert_sql);
        let stored = item.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    &sql,
                    params![stored.key, stored.bundle, stored.lang, stored.content],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Write))?;

        tracing::debug!(id, key = %item.key, bundle = %item.bundle, lang = %item.lang, "Upserted locale item");

        Ok(item.clone().with_id(id))
    }

    async fn upsert_items(&self, items: &[LocaleItem]) -> Result<UpsertReport> {
        let mut valid = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            if item.is_valid() {
                valid.push(item.clone());
            } else {
                skipped.push(idx);
            }
        }

        if !skipped.is_empty() {
            tracing::warn!(count = skipped.len(), "Skipping invalid locale items");
        }

        let sql = Arc::clone(&self.upsert_sql);

        let written = self
            .conn
            .call(move |conn| {
                // Any early return drops `tx`, which rolls the whole batch back.
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut written = 0u64;
                {
                    let mut stmt = tx.prepare(&sql).map_err(wrap_err)?;
                    for item in &valid {
                        stmt.query_row(
                            params![item.key, item.bundle, item.lang, item.content],
                            |row| row.get::<_, i64>(0),
                        )
                        .map_err(wrap_err)?;
                        written += 1;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(written)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Write))?;

        tracing::info!(written, skipped = skipped.len(), "Bulk upsert committed");

        Ok(UpsertReport { written, skipped })
    }

    async fn query_items(&self, filter: &LocaleFilter) -> Result<Vec<LocaleItem>> {
        let WhereClause { sql, params } = filter.to_where_clause();
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM {LOCALE_ITEMS_TABLE}{sql} ORDER BY {LOCALE_ITEMS_TABLE}.id ASC"
        );

        let items = self
            .conn
            .call(move |conn| select_items(conn, &query, &params).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Query))?;

        match items {
            None => Err(RepositoryError::no_result_set()),
            Some(items) if items.is_empty() => Err(RepositoryError::no_rows()),
            Some(items) => Ok(items),
        }
    }

    async fn delete_items(&self, filter: &LocaleFilter) -> Result<u64> {
        let WhereClause { sql, params } = filter.to_where_clause();
        let query = format!("DELETE FROM {LOCALE_ITEMS_TABLE}{sql}");

        let deleted = self
            .conn
            .call(move |conn| {
                conn.execute(&query, params_from_iter(params.iter()))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Operation::Query))?;

        tracing::info!(deleted, "Deleted locale items");

        Ok(deleted as u64)
    }

    async fn list_langs(&self) -> Result<Vec<String>> {
        self.list_distinct(FilterField::Lang).await
    }

    async fn list_bundles(&self) -> Result<Vec<String>> {
        self.list_distinct(FilterField::Bundle).await
    }
}
