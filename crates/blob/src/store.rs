use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::config::BlobConfig;
use crate::error::BlobError;

/// Flat-file blob store for uploaded media.
///
/// Stored names are `{uuid-v4}{extension}`, where the extension is taken
/// from the client's original filename. The v4 identifier makes collisions
/// negligible; the write path still opens with `create_new` so a collision
/// would surface as an error rather than an overwrite.
pub struct BlobStore {
    config: BlobConfig,
}

impl BlobStore {
    /// Create a blob store, creating the storage root directory if absent.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::Io`] if the directory cannot be created.
    pub fn new(config: BlobConfig) -> Result<Self, BlobError> {
        std::fs::create_dir_all(&config.root)?;
        Ok(Self { config })
    }

    /// Write an uploaded byte stream under a freshly generated name and
    /// return the stored name.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::Io`] if the filesystem write fails; the caller
    /// must not record metadata for an unwritten blob.
    pub async fn write(&self, original_name: &str, data: &[u8]) -> Result<String, BlobError> {
        let stored = format!("{}{}", Uuid::new_v4(), extension(original_name));
        let path = self.path_of(&stored)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        debug!(stored = %stored, bytes = data.len(), "blob written");
        Ok(stored)
    }

    /// Remove a stored blob. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::InvalidName`] for names with path components,
    /// or [`BlobError::Io`] for any filesystem failure other than the file
    /// being absent.
    pub async fn remove(&self, stored_name: &str) -> Result<(), BlobError> {
        let path = self.path_of(stored_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlobError::Io(e)),
        }
    }

    /// Build the public URL a stored blob is served from.
    pub fn url_for(&self, stored_name: &str) -> String {
        format!(
            "{}{}/{stored_name}",
            self.config.public_url.trim_end_matches('/'),
            self.config.url_prefix.trim_end_matches('/'),
        )
    }

    fn path_of(&self, stored_name: &str) -> Result<PathBuf, BlobError> {
        if stored_name.is_empty()
            || stored_name.contains('/')
            || stored_name.contains('\\')
            || stored_name.contains("..")
        {
            return Err(BlobError::InvalidName(stored_name.to_owned()));
        }
        Ok(self.config.root.join(stored_name))
    }
}

/// Extension of a client filename: the suffix after the last `.`, dot
/// included. Empty when there is no extension, when the name is a bare
/// dotfile, or when the candidate suffix crosses a path separator.
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => {
            let ext = &name[i..];
            if ext.contains('/') || ext.contains('\\') {
                ""
            } else {
                ext
            }
        }
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> BlobStore {
        BlobStore::new(BlobConfig {
            root: dir.path().to_path_buf(),
            ..BlobConfig::default()
        })
        .expect("store root should be creatable")
    }

    #[test]
    fn extension_rules() {
        assert_eq!(extension("photo.jpg"), ".jpg");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("README"), "");
        assert_eq!(extension(".bashrc"), "");
        assert_eq!(extension("name."), "");
        assert_eq!(extension("photo.JPG"), ".JPG");
    }

    #[tokio::test]
    async fn write_stores_bytes_under_generated_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.write("photo.jpg", b"0123456789").await.unwrap();
        assert!(stored.ends_with(".jpg"));
        assert_ne!(stored, "photo.jpg");

        let on_disk = std::fs::read(dir.path().join(&stored)).unwrap();
        assert_eq!(on_disk, b"0123456789");
    }

    #[tokio::test]
    async fn same_original_name_gets_distinct_stored_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.write("photo.jpg", b"aa").await.unwrap();
        let b = store.write("photo.jpg", b"bb").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.write("x.png", b"x").await.unwrap();
        store.remove(&stored).await.unwrap();
        assert!(!dir.path().join(&stored).exists());
        store.remove(&stored).await.unwrap();
    }

    #[tokio::test]
    async fn remove_rejects_path_components() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = store.remove("../escape.jpg").await.unwrap_err();
        assert!(matches!(err, BlobError::InvalidName(_)));
    }

    #[test]
    fn url_for_joins_base_prefix_and_name() {
        let store = BlobStore::new(BlobConfig {
            root: std::env::temp_dir(),
            public_url: "http://localhost:8000/".into(),
            url_prefix: "/media".into(),
        })
        .unwrap();
        assert_eq!(
            store.url_for("abc.jpg"),
            "http://localhost:8000/media/abc.jpg"
        );
    }
}
