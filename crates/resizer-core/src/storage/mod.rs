//! Object storage abstraction.
//!
//! The pipeline reads one source object and writes one object per rendition.
//! Backends implement [`ObjectStore`]; two are bundled:
//! - [`MemoryStore`]: in-process map, used by tests and embedders
//! - [`LocalStore`]: one directory per bucket under a root, used by the CLI

mod local;
mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use bytes::Bytes;
use image::ImageFormat;

use crate::error::StorageError;

/// An object as returned by a backend.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    /// Content type recorded with (or inferred for) the object
    pub content_type: Option<String>,
}

/// A write of one rendition.
#[derive(Debug, Clone)]
pub struct PutRequest {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

/// Acknowledgement of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    /// Backend content tag for the written body
    pub etag: String,
}

/// Storage backend trait.
///
/// Uses `async_trait` so the orchestrator can hold an `Arc<dyn ObjectStore>`
/// and move clones of it into spawned write tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Read an entire object.
    ///
    /// Returns `StorageError::NotFound` if the object doesn't exist.
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError>;

    /// Write an object, replacing any existing one.
    async fn put(&self, request: PutRequest) -> Result<WriteReceipt, StorageError>;
}

/// Content tag used by the bundled backends: BLAKE3 hex digest of the body.
pub fn content_etag(body: &[u8]) -> String {
    blake3::hash(body).to_hex().to_string()
}

/// Guess an image content type from a key's file extension.
pub fn guess_content_type(key: &str) -> Option<String> {
    ImageFormat::from_path(key)
        .ok()
        .map(|f| f.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_etag_is_stable() {
        assert_eq!(content_etag(b"abc"), content_etag(b"abc"));
        assert_ne!(content_etag(b"abc"), content_etag(b"abd"));
        assert_eq!(content_etag(b"").len(), 64);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type("origin/article/photo.jpg").as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            guess_content_type("origin/profile/avatar.PNG").as_deref(),
            Some("image/png")
        );
        assert_eq!(guess_content_type("origin/message/notes.txt"), None);
        assert_eq!(guess_content_type("origin/message/noext"), None);
    }
}
