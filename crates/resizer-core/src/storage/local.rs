//! Filesystem storage backend: `<root>/<bucket>/<key>`.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

use super::{content_etag, guess_content_type, ObjectStore, PutRequest, StoredObject, WriteReceipt};
use crate::error::StorageError;

/// Stores each bucket as a directory under `root`.
///
/// Content types are not persisted; reads infer them from the extension.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a bucket/key pair to a path, rejecting anything that could escape
    /// the bucket directory.
    pub fn path_for(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket == "." || bucket == ".." {
            return Err(StorageError::InvalidKey(format!("bucket {bucket:?}")));
        }
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(bucket).join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let path = self.path_for(bucket, key)?;
        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(StoredObject {
            body: Bytes::from(body),
            content_type: guess_content_type(key),
        })
    }

    async fn put(&self, request: PutRequest) -> Result<WriteReceipt, StorageError> {
        let path = self.path_for(&request.bucket, &request.key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &request.body).await?;
        tracing::trace!("  Wrote {} ({} bytes)", path.display(), request.body.len());
        Ok(WriteReceipt {
            etag: content_etag(&request.body),
        })
    }
}
