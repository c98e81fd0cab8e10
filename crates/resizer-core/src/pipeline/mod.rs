//! Image processing pipeline components.
//!
//! - **decode**: Decode source bytes and encode renditions
//! - **orient**: EXIF orientation
//! - **geometry**: Ratio (fit) and crop (fill) sizing rules
//! - **render**: Produce one rendition from a source and a render spec
//! - **orchestrator**: Route, fetch, render and write for one source object

pub mod decode;
pub mod geometry;
pub mod orchestrator;
pub mod orient;
pub mod render;

// Re-exports for convenient access
pub use decode::DecodedImage;
pub use geometry::{CropRect, ResizePlan};
pub use orchestrator::Orchestrator;
pub use render::{ImageRenderer, RenderJob, RenditionRenderer};
