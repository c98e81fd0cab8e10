//! Sub-configuration structs with defaults matching the production rendition table.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::RenderSpec;

/// Rendition plans per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Article images: three watermarkable ratio sizes
    pub article: Vec<RenderSpec>,

    /// Profile images: one square avatar
    pub profile: Vec<RenderSpec>,

    /// Message attachments: one large ratio size
    pub message: Vec<RenderSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            article: vec![
                RenderSpec::ratio("s", 90, 640).watermarked(),
                RenderSpec::ratio("m", 90, 960).watermarked(),
                RenderSpec::ratio("l", 90, 1280).watermarked(),
            ],
            profile: vec![RenderSpec::crop("s", 90, 140)],
            message: vec![RenderSpec::ratio("l", 90, 1280)],
        }
    }
}

/// One row of the watermark threshold table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkTier {
    /// Smallest target size this overlay applies to
    pub min_size: u32,

    /// Object key of the overlay image (same bucket as the source)
    pub asset: String,
}

/// Watermark compositing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Composite overlays onto specs flagged `watermark = true`
    pub enabled: bool,

    /// Threshold table; order does not matter, largest threshold wins
    pub tiers: Vec<WatermarkTier>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tiers: vec![
                WatermarkTier {
                    min_size: 1280,
                    asset: "stamp/watermark_1280.png".to_string(),
                },
                WatermarkTier {
                    min_size: 960,
                    asset: "stamp/watermark_960.png".to_string(),
                },
                WatermarkTier {
                    min_size: 640,
                    asset: "stamp/watermark_640.png".to_string(),
                },
            ],
        }
    }
}

/// Routing policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Fail keys of an unknown category instead of succeeding with no output
    pub reject_unknown: bool,
}

/// Local storage backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one subdirectory per bucket
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("~/.resizer/buckets"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
