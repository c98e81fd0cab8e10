//! In-memory storage backend.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{content_etag, ObjectStore, PutRequest, StoredObject, WriteReceipt};
use crate::error::StorageError;

/// In-memory object store keyed by (bucket, key).
///
/// Thread-safe via `RwLock`. Not persistent.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing `put`.
    pub fn insert(
        &self,
        bucket: &str,
        key: &str,
        body: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut objects = self.write_lock()?;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    /// Look up an object without going through the async API.
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .ok()?
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All keys in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let Ok(objects) = self.objects.read() else {
            return Vec::new();
        };
        let mut keys: Vec<String> = objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<(String, String), StoredObject>>, StorageError>
    {
        self.objects
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".into()))
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StorageError::Backend("lock poisoned".into()))?;

        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(&self, request: PutRequest) -> Result<WriteReceipt, StorageError> {
        let etag = content_etag(&request.body);
        let mut objects = self.write_lock()?;
        objects.insert(
            (request.bucket, request.key),
            StoredObject {
                body: request.body,
                content_type: Some(request.content_type),
            },
        );
        Ok(WriteReceipt { etag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        let receipt = store
            .put(PutRequest {
                bucket: "media".into(),
                key: "resize/s/article/a.jpg".into(),
                body: Bytes::from_static(b"jpeg"),
                content_type: "image/jpeg".into(),
            })
            .await
            .unwrap();
        assert_eq!(receipt.etag, content_etag(b"jpeg"));
        assert_eq!(store.name(), "memory");

        let object = store.get("media", "resize/s/article/a.jpg").await.unwrap();
        assert_eq!(object.body, Bytes::from_static(b"jpeg"));
        assert_eq!(object.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        store.insert("other", "k", &b"x"[..], None).unwrap();
        let err = store.get("media", "k").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_keys_are_scoped_and_sorted() {
        let store = MemoryStore::new();
        store.insert("media", "b", &b"1"[..], None).unwrap();
        store.insert("media", "a", &b"2"[..], None).unwrap();
        store.insert("other", "c", &b"3"[..], None).unwrap();
        assert_eq!(store.keys("media"), vec!["a".to_string(), "b".to_string()]);
    }
}
