//! Byte sources for page content
//! Uses Apache Arrow object_store crate

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{ObjectStore, local::LocalFileSystem, memory::InMemory, path::Path as StoragePath};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{SourceConfig, SourceProvider};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Read failed for '{name}': {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: object_store::Error,
    },

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),
}

/// Source result type
pub type Result<T> = std::result::Result<T, SourceError>;

/// Read-only lookup of named byte resources.
///
/// A missing resource is not an error: it resolves to empty bytes.
#[async_trait]
pub trait ByteSource: Send + Sync {
    async fn read(&self, name: &str) -> Result<Bytes>;
}

/// Byte source wrapping object_store
#[derive(Clone)]
pub struct StoreByteSource {
    store: Arc<dyn ObjectStore>,
}

impl StoreByteSource {
    /// Create source with any object_store backend
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Files under `root` on the local filesystem
    pub fn local(root: impl AsRef<Path>) -> Result<Self> {
        let store = LocalFileSystem::new_with_prefix(root)?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Create in-memory source for testing/embedding
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    /// Store `data` under `name`
    pub async fn insert(&self, name: &str, data: impl Into<Bytes>) -> Result<()> {
        let path = StoragePath::from(name);
        let data: Bytes = data.into();
        let size = data.len();

        self.store.put(&path, data.into()).await?;

        tracing::debug!(name, size, "Stored page content");
        Ok(())
    }
}

#[async_trait]
impl ByteSource for StoreByteSource {
    async fn read(&self, name: &str) -> Result<Bytes> {
        let path = StoragePath::from(name);

        let result = match self.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                tracing::error!(name, "File not found");
                return Ok(Bytes::new());
            }
            Err(source) => {
                return Err(SourceError::ReadFailed {
                    name: name.to_string(),
                    source,
                });
            }
        };

        let bytes = result.bytes().await?;

        tracing::debug!(name, size = bytes.len(), "Read page content");

        Ok(bytes)
    }
}

/// Build the configured byte source
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn ByteSource>> {
    let source = match config.provider {
        SourceProvider::Local => StoreByteSource::local(&config.root)?,
        SourceProvider::Memory => StoreByteSource::in_memory(),
    };
    Ok(Arc::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_read() {
        let source = StoreByteSource::in_memory();
        source.insert("authorization.html", "<p>ok</p>").await.unwrap();

        let bytes = source.read("authorization.html").await.unwrap();
        assert_eq!(&bytes[..], b"<p>ok</p>");
    }

    #[tokio::test]
    async fn test_missing_resource_is_empty() {
        let source = StoreByteSource::in_memory();
        let bytes = source.read("not_found.html").await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_local_filesystem_source() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("not_found.html"), "<h1>404</h1>").unwrap();

        let source = StoreByteSource::local(temp_dir.path()).unwrap();
        assert_eq!(&source.read("not_found.html").await.unwrap()[..], b"<h1>404</h1>");
        assert!(source.read("missing.html").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_memory_provider() {
        let config = SourceConfig {
            provider: SourceProvider::Memory,
            root: "unused".into(),
        };

        let source = from_config(&config).unwrap();
        assert!(source.read("anything.html").await.unwrap().is_empty());
    }
}
