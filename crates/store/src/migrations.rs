use sqlx::SqlitePool;

use crate::config::StoreConfig;

/// Run database migrations, creating the thumbnails table if it does not
/// exist.
///
/// `AUTOINCREMENT` keeps ids monotonically increasing and prevents SQLite
/// from reusing the id of a deleted row. The `image_data` column is a
/// reserved blob slot carried in the schema; nothing reads or writes it.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if the DDL statement fails.
pub async fn run_migrations(pool: &SqlitePool, config: &StoreConfig) -> Result<(), sqlx::Error> {
    let table = config.thumbnails_table();

    let create_thumbnails = format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL UNIQUE,
            image_data BLOB
        )"
    );

    sqlx::query(&create_thumbnails).execute(pool).await?;

    Ok(())
}
