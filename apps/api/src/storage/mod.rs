//! Storage Publisher: pushes rendered files to an object store and hands back
//! public URLs.

#[cfg(test)]
pub mod memory;
pub mod s3;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read local file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("upload to '{key}' failed: {message}")]
    Upload { key: String, message: String },

    #[error("removal of '{key}' failed: {message}")]
    Remove { key: String, message: String },
}

/// Minimal object store surface used by the publisher.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    async fn upload(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<(), StorageError>;

    fn public_url(&self, key: &str) -> String;
}

/// Overwrite-then-link publisher around an [`ObjectStore`].
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn ObjectStore>,
}

impl Publisher {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Uploads `local_path` to `key`, replacing whatever was there, and returns
    /// its public URL.
    ///
    /// Removal of the previous object is best effort: the object usually does
    /// not exist. Upload failures propagate and are not retried.
    pub async fn publish(&self, local_path: &Path, key: &str) -> Result<String, StorageError> {
        if let Err(e) = self.store.remove(key).await {
            debug!("Ignoring failed removal of '{key}': {e}");
        }

        let body = tokio::fs::read(local_path)
            .await
            .map_err(|source| StorageError::Read {
                path: local_path.display().to_string(),
                source,
            })?;
        let size = body.len();

        self.store
            .upload(key, Bytes::from(body), PDF_CONTENT_TYPE)
            .await?;

        let url = self.store.public_url(key);
        info!("Published {} ({size} bytes) to {url}", local_path.display());
        Ok(url)
    }
}
