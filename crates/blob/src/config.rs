use std::path::PathBuf;

/// Configuration for the filesystem blob store.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Directory blobs are written to. Created on startup if absent.
    pub root: PathBuf,

    /// Base public URL returned links are built from
    /// (e.g. `http://localhost:8000`).
    pub public_url: String,

    /// URL path prefix the storage root is served under. Must start with
    /// a slash.
    pub url_prefix: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            public_url: String::from("http://localhost:8000"),
            url_prefix: String::from("/media"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = BlobConfig::default();
        assert_eq!(cfg.root, PathBuf::from("media"));
        assert_eq!(cfg.public_url, "http://localhost:8000");
        assert_eq!(cfg.url_prefix, "/media");
    }
}
