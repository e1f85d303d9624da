use serde::Deserialize;

/// Configuration for the SQLite metadata store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// SQLite connection URL (e.g. `sqlite://drivenest.db`).
    #[serde(default = "default_url")]
    pub url: String,

    /// Maximum number of connections in the `sqlx` connection pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Prefix applied to table names to avoid collisions.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Create the database file if it does not exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            pool_size: default_pool_size(),
            table_prefix: default_table_prefix(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

impl StoreConfig {
    /// Return the thumbnails table name (`{prefix}thumbnails`).
    pub(crate) fn thumbnails_table(&self) -> String {
        format!("{}thumbnails", self.table_prefix)
    }
}

fn default_url() -> String {
    String::from("sqlite://drivenest.db")
}

fn default_pool_size() -> u32 {
    5
}

fn default_table_prefix() -> String {
    String::from("drivenest_")
}

fn default_create_if_missing() -> bool {
    true
}
