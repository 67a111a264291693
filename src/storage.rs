//! Blob storage for uploaded media. A write puts bytes under a key; the key is
//! then resolved to the URL that gets stored in form state.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::AppError;

#[derive(Clone)]
pub enum BlobStore {
    Local(LocalBlobStore),
    Memory(MemoryBlobStore),
}

impl BlobStore {
    pub async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        check_key(key)?;
        match self {
            BlobStore::Local(s) => s.put(key, bytes).await,
            BlobStore::Memory(s) => {
                s.put(key, bytes).await;
                Ok(())
            }
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        let base = match self {
            BlobStore::Local(s) => &s.public_base,
            BlobStore::Memory(s) => &s.public_base,
        };
        format!("{}/{}", base.trim_end_matches('/'), key)
    }
}

/// Keys must be relative paths without `..`.
fn check_key(key: &str) -> Result<(), AppError> {
    let path = Path::new(key);
    let ok = !key.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(AppError::Storage(format!("Invalid blob key {key:?}")))
    }
}

/// Files under a directory, served by the app at `public_base`.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self { root: root.into(), public_base: public_base.into() }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", path.display())))?;
        log::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Process-local blobs for tests. Nothing is served from it.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    public_base: String,
}

impl MemoryBlobStore {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self { objects: Arc::default(), public_base: public_base.into() }
    }

    async fn put(&self, key: &str, bytes: &[u8]) {
        self.objects.write().await.insert(key.to_string(), bytes.to_vec());
    }

    /// Test helper: the stored bytes for `key`.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }

    /// Test helper: how many objects have been written.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}
