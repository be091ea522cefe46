//! File-backed home of the site document.
//!
//! The normalized document lives in memory; every change is applied to a
//! copy, written to disk with a temp-file-and-rename, and only then made
//! current. Writers within the process are serialised. Separate processes
//! writing the same file still race, last write wins.
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::document::model::Document;
use crate::document::seed::seed_document;
use crate::error::StorageError;
use crate::migrate::normalize;

#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    current: RwLock<Document>,
    writer: Mutex<()>,
}

impl DocumentStore {
    /// Load and normalize the document at `path`, writing the seed document
    /// there first if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let document = match fs::metadata(&path).await {
            Ok(_) => load(&path).await?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no data file, writing seed document");
                let seed = seed_document();
                persist(&path, &seed).await?;
                seed
            }
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        info!(
            path = %path.display(),
            users = document.users.len(),
            categories = document.categories.len(),
            products = document.products.len(),
            "document loaded"
        );
        Ok(Self {
            path,
            current: RwLock::new(document),
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A copy of the current document.
    pub async fn snapshot(&self) -> Document {
        self.current.read().await.clone()
    }

    pub async fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&*self.current.read().await)
    }

    /// Apply `f` to a copy of the document and persist it. If `f` or the
    /// write fails, the current document is left as it was.
    pub async fn update<T, E>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let _guard = self.writer.lock().await;
        let mut draft = self.current.read().await.clone();
        let out = f(&mut draft)?;
        persist(&self.path, &draft).await?;
        *self.current.write().await = draft;
        Ok(out)
    }

    /// Swap in a whole new document.
    pub async fn replace(&self, document: Document) -> Result<(), StorageError> {
        self.update(move |doc| {
            *doc = document;
            Ok::<_, StorageError>(())
        })
        .await
    }

    /// Check that the data file is still reachable.
    pub async fn probe(&self) -> Result<(), StorageError> {
        fs::metadata(&self.path)
            .await
            .map(|_| ())
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

async fn load(path: &Path) -> Result<Document, StorageError> {
    let bytes = fs::read(path).await.map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(&raw))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn persist(path: &Path, document: &Document) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(document).map_err(StorageError::Serialize)?;
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp).await.map_err(write_err)?;
    file.write_all(&bytes).await.map_err(write_err)?;
    file.sync_all().await.map_err(write_err)?;
    drop(file);
    fs::rename(&tmp, path).await.map_err(write_err)?;

    debug!(path = %path.display(), bytes = bytes.len(), "document persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OperationError, ValidationError};
    use serde_json::json;
    use tempfile::TempDir;

    async fn open_in(dir: &TempDir) -> DocumentStore {
        DocumentStore::open(dir.path().join("data.json")).await.unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_seeded() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        assert!(store.path().exists());
        assert_eq!(store.snapshot().await, seed_document());
    }

    #[tokio::test]
    async fn legacy_file_is_normalized_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            json!({"company": {"name": "Gourmet"}, "footer": {"socials": {"instagram": "A"}}})
                .to_string(),
        )
        .unwrap();

        let store = DocumentStore::open(&path).await.unwrap();
        let doc = store.snapshot().await;

        assert_eq!(doc.company.name.en, "Gourmet");
        assert_eq!(doc.footer.socials.len(), 1);
        assert_eq!(doc.users.len(), 3);
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = DocumentStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[tokio::test]
    async fn update_persists_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        store
            .update(|doc| {
                doc.settings.currency = "EUR".into();
                Ok::<_, StorageError>(())
            })
            .await
            .unwrap();

        let reopened = open_in(&dir).await;
        assert_eq!(reopened.snapshot().await.settings.currency, "EUR");
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_edit_keeps_current_document() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        let before = store.snapshot().await;

        let result: Result<(), OperationError> = store
            .update(|doc| {
                doc.products.clear();
                Err(ValidationError::ReorderMismatch.into())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn failed_write_keeps_current_document() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path().join("nested").join("data.json"))
            .await
            .unwrap();
        let before = store.snapshot().await;
        std::fs::remove_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested"), b"file in the way").unwrap();

        let err = store
            .update(|doc| {
                doc.categories.clear();
                Ok::<_, StorageError>(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(store.snapshot().await, before);
        assert!(store.probe().await.is_err());
    }

    #[tokio::test]
    async fn replace_swaps_whole_document() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        let replacement = normalize(&json!({"users": []}));

        store.replace(replacement.clone()).await.unwrap();

        assert_eq!(store.snapshot().await, replacement);
        assert_eq!(store.read(|doc| doc.users.len()).await, 0);
    }
}
