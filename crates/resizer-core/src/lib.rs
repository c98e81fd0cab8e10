//! Resizer Core - derivative-image generation for storage uploads.
//!
//! An object landing under `origin/` in a bucket is classified by its second
//! path segment, fetched once, rendered into every size its category calls
//! for, and written back under `resize/<label>/`.
//!
//! # Architecture
//!
//! ```text
//! Event → Route (category, destination keys) → Fetch → Render ×N → Write ×N → Report
//! ```
//!
//! Rendering and writing fan out in parallel; the first error fails the
//! invocation. Unknown categories succeed with no output unless
//! `routing.reject_unknown` is set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resizer_core::{Config, LocalStore, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> resizer_core::Result<()> {
//!     let config = Config::load()?;
//!     let store = Arc::new(LocalStore::new(config.storage_root()));
//!     let orchestrator = Orchestrator::new(&config, store);
//!
//!     let report = orchestrator.process("media", "origin/article/photo.jpg").await?;
//!     println!("Wrote {} renditions", report.renditions.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod output;
pub mod pipeline;
pub mod storage;
pub mod types;
pub mod watermark;

// Re-exports for convenient access
pub use catalog::{KeyRouter, ProfileCatalog};
pub use config::Config;
pub use error::{
    ConfigError, ErrorKind, PipelineError, PipelineResult, ResizerError, Result, StorageError,
};
pub use event::StorageEvent;
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{ImageRenderer, Orchestrator, RenditionRenderer};
pub use storage::{LocalStore, MemoryStore, ObjectStore};
pub use types::{Category, InvocationReport, RenderSpec, ResizeMode, WrittenRendition};
pub use watermark::{WatermarkAsset, WatermarkSelector};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
