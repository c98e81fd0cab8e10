//! Core data types for the Resizer pipeline.
//!
//! These types describe the rendition plan for a category and the values that
//! flow between the fetch, render and write stages.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a source key; selects which render specs apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Article,
    Profile,
    Message,
    Unknown,
}

impl Category {
    /// Map a path segment to its category. Anything unrecognized is `Unknown`.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "article" => Self::Article,
            "profile" => Self::Profile,
            "message" => Self::Message,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Profile => "profile",
            Self::Message => "message",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rendition is fitted to its target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Shrink-only, aspect-preserving fit within a target × target box
    Ratio,
    /// Cover a target × target square, then center-crop to it
    Crop,
}

/// Declarative description of one output variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSpec {
    /// Path label inserted into the destination key ("s", "m", "l")
    pub label: String,

    /// Resize mode
    pub mode: ResizeMode,

    /// Encode quality, 1-100
    pub quality: u8,

    /// Target edge length in pixels
    pub target_size: u32,

    /// Whether a watermark overlay should be composited (when enabled)
    #[serde(default)]
    pub watermark: bool,
}

impl RenderSpec {
    pub fn ratio(label: &str, quality: u8, target_size: u32) -> Self {
        Self {
            label: label.to_string(),
            mode: ResizeMode::Ratio,
            quality,
            target_size,
            watermark: false,
        }
    }

    pub fn crop(label: &str, quality: u8, target_size: u32) -> Self {
        Self {
            label: label.to_string(),
            mode: ResizeMode::Crop,
            quality,
            target_size,
            watermark: false,
        }
    }

    /// Mark this spec as watermarked.
    pub fn watermarked(mut self) -> Self {
        self.watermark = true;
        self
    }
}

/// The fetched original, shared read-only by every render task.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub bytes: Bytes,
    pub content_type: String,
    pub source_key: String,
}

/// One resized and encoded derivative of a source image.
#[derive(Debug, Clone)]
pub struct Rendition {
    pub destination_key: String,
    pub bytes: Bytes,
    pub content_type: String,
    pub spec: RenderSpec,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationReport {
    pub bucket: String,
    pub source_key: String,
    pub category: Category,
    /// Written renditions, in catalog order
    pub renditions: Vec<WrittenRendition>,
}

/// Descriptor of a rendition that was written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenRendition {
    pub label: String,
    pub key: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
    /// Content tag reported by the storage backend
    pub etag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_segment() {
        assert_eq!(Category::from_segment("article"), Category::Article);
        assert_eq!(Category::from_segment("profile"), Category::Profile);
        assert_eq!(Category::from_segment("message"), Category::Message);
        assert_eq!(Category::from_segment("Article"), Category::Unknown);
        assert_eq!(Category::from_segment(""), Category::Unknown);
    }

    #[test]
    fn test_render_spec_toml_shape() {
        let spec: RenderSpec =
            toml::from_str("label = \"s\"\nmode = \"crop\"\nquality = 90\ntarget_size = 140\n")
                .unwrap();
        assert_eq!(spec, RenderSpec::crop("s", 90, 140));
        assert!(!spec.watermark);
    }

    #[test]
    fn test_report_serializes_category_lowercase() {
        let report = InvocationReport {
            bucket: "media".into(),
            source_key: "origin/profile/a.png".into(),
            category: Category::Profile,
            renditions: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"category\":\"profile\""));
    }
}
