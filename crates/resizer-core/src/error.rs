//! Error types for the Resizer pipeline.
//!
//! Pipeline errors are organized by stage so callers can branch on the kind of
//! failure (routing, fetch, transform, write) instead of inspecting messages.

use thiserror::Error;

/// Top-level error type for Resizer operations.
#[derive(Error, Debug)]
pub enum ResizerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// The stage a pipeline error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Routing,
    Fetch,
    Transform,
    Write,
}

/// Pipeline errors, one variant per stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The key could not be routed (unknown category under a strict policy,
    /// missing `origin/` segment, undecodable event key)
    #[error("Routing error for {key}: {message}")]
    Routing { key: String, message: String },

    /// The source object (or a watermark overlay) could not be read
    #[error("Fetch failed for {bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },

    /// Decode, geometry or encode failure while producing a rendition
    #[error("Transform failed for {key} (rendition {label}): {message}")]
    Transform {
        key: String,
        label: String,
        message: String,
    },

    /// A rendition could not be written to its destination
    #[error("Write failed for {bucket}/{key}: {message}")]
    Write {
        bucket: String,
        key: String,
        message: String,
    },
}

impl PipelineError {
    /// Which stage produced this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Routing { .. } => ErrorKind::Routing,
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Transform { .. } => ErrorKind::Transform,
            Self::Write { .. } => ErrorKind::Write,
        }
    }
}

/// Errors reported by an object storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No object exists at the given location
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// The key cannot be mapped onto the backend
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Filesystem failure in a local backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Convenience type alias for Resizer results.
pub type Result<T> = std::result::Result<T, ResizerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = PipelineError::Transform {
            key: "origin/article/a.jpg".into(),
            label: "m".into(),
            message: "bad data".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Transform);

        let err = PipelineError::Write {
            bucket: "b".into(),
            key: "resize/s/a.jpg".into(),
            message: "denied".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[test]
    fn test_pipeline_error_wraps_into_top_level() {
        let err: ResizerError = PipelineError::Routing {
            key: "x".into(),
            message: "no origin/ segment".into(),
        }
        .into();
        assert!(err.to_string().contains("no origin/ segment"));
    }
}
