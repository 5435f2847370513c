//! Document storage
//!
//! Uploaded vendor documents are written under a single upload root with a
//! generated unique name and served back via the static `/uploads` route.
//! Record updates reference the returned URL; the write itself is
//! independent of any database state.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Public URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid filename")]
    InvalidFilename,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A stored document: where it lives on disk and the URL clients use.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub url: String,
}

/// Filesystem-backed document store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist a document under a collision-free name, preserving the
    /// original extension when one is present.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<StoredFile, StorageError> {
        let storage_name = storage_name(original_filename);
        let path = self.root.join(&storage_name);

        // The generated name contains no separators, but keep the guard:
        // nothing may be written outside the upload root.
        if !path.starts_with(&self.root) {
            return Err(StorageError::InvalidFilename);
        }

        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;

        Ok(StoredFile {
            path,
            url: format!("{}/{}", PUBLIC_PREFIX, storage_name),
        })
    }
}

/// Build the on-disk name: a fresh UUID plus the sanitized original
/// extension, e.g. `3f2a9b1c-....pdf`.
fn storage_name(original_filename: &str) -> String {
    let id = Uuid::new_v4();
    match extension(original_filename) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

/// Extract a safe extension from a client-supplied filename. Directory
/// components are stripped first; anything but alphanumerics is dropped.
fn extension(filename: &str) -> Option<String> {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    Path::new(basename)
        .extension()
        .map(|ext| {
            ext.to_string_lossy()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("vendor-uploads-{}", Uuid::new_v4()));
        FileStore::new(dir)
    }

    #[test]
    fn extension_is_preserved_and_lowercased() {
        assert_eq!(extension("license.PDF"), Some("pdf".to_string()));
        assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension("noext"), None);
    }

    #[test]
    fn traversal_components_are_stripped() {
        assert_eq!(extension("../../etc/passwd"), None);
        assert_eq!(extension("..\\..\\scan.jpg"), Some("jpg".to_string()));
    }

    #[tokio::test]
    async fn stored_file_lands_under_root_with_public_url() {
        let store = temp_store();
        let stored = store.store(b"%PDF-1.4", "w9 form.pdf").await.unwrap();

        assert!(stored.path.starts_with(&store.root));
        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.url.ends_with(".pdf"));

        let written = fs::read(&stored.path).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");

        fs::remove_dir_all(&store.root).await.unwrap();
    }

    #[tokio::test]
    async fn names_are_unique_per_store() {
        let store = temp_store();
        let a = store.store(b"a", "doc.pdf").await.unwrap();
        let b = store.store(b"b", "doc.pdf").await.unwrap();
        assert_ne!(a.url, b.url);

        fs::remove_dir_all(&store.root).await.unwrap();
    }
}
