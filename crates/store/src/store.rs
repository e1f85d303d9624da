use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use drivenest_core::ThumbnailRecord;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::migrations;

/// SQLite-backed store for thumbnail metadata.
///
/// Each operation is a single self-contained statement on a pooled
/// connection; there are no multi-request transaction spans. The unique
/// constraint on `filename` and the autoincrementing `id` are enforced by
/// the schema (see [`migrations`]).
pub struct ThumbnailStore {
    pool: SqlitePool,
    config: StoreConfig,
}

impl ThumbnailStore {
    /// Create a new `ThumbnailStore` from the provided configuration.
    ///
    /// Opens the database, builds the connection pool, and runs migrations
    /// to ensure the thumbnails table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or pool
    /// creation fails, or [`StoreError::Backend`] if migrations fail.
    pub async fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let options: SqliteConnectOptions = config
            .url
            .parse()
            .map_err(|e: sqlx::Error| StoreError::Connection(e.to_string()))?;
        let options = options.create_if_missing(config.create_if_missing);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool, config })
    }

    /// Insert a new record for a stored filename and return it with its
    /// freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the filename is already
    /// recorded. Generated storage names make this practically
    /// unreachable, but the constraint is still mapped explicitly.
    pub async fn insert(&self, filename: &str) -> Result<ThumbnailRecord, StoreError> {
        let table = self.config.thumbnails_table();
        let query = format!("INSERT INTO {table} (filename) VALUES (?) RETURNING id, filename");

        let (id, filename): (i64, String) = sqlx::query_as(&query)
            .bind(filename)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::Duplicate(filename.to_owned())
                }
                _ => StoreError::Backend(e.to_string()),
            })?;

        Ok(ThumbnailRecord { id, filename })
    }

    /// Return every record, ordered by id.
    ///
    /// An empty table yields an empty vec, not an error; callers decide
    /// what an empty listing means.
    pub async fn list(&self) -> Result<Vec<ThumbnailRecord>, StoreError> {
        let table = self.config.thumbnails_table();
        let query = format!("SELECT id, filename FROM {table} ORDER BY id");

        let rows: Vec<(i64, String)> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, filename)| ThumbnailRecord { id, filename })
            .collect())
    }

    /// Fetch one record by id. Returns `None` if no such row exists.
    pub async fn get(&self, id: i64) -> Result<Option<ThumbnailRecord>, StoreError> {
        let table = self.config.thumbnails_table();
        let query = format!("SELECT id, filename FROM {table} WHERE id = ?");

        let row: Option<(i64, String)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(row.map(|(id, filename)| ThumbnailRecord { id, filename }))
    }

    /// Delete one record by id. Returns `true` if a row existed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let table = self.config.thumbnails_table();
        let query = format!("DELETE FROM {table} WHERE id = ?");

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
