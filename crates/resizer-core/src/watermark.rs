//! Size-to-overlay lookup for watermarked renditions.

use crate::config::{WatermarkConfig, WatermarkTier};

/// Reference to an overlay image stored alongside the sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatermarkAsset {
    pub key: String,
}

/// Picks the overlay for a target size from a threshold table.
#[derive(Debug, Clone)]
pub struct WatermarkSelector {
    /// (min_size, asset), largest threshold first
    tiers: Vec<(u32, WatermarkAsset)>,
}

impl WatermarkSelector {
    pub fn new(tiers: &[WatermarkTier]) -> Self {
        let mut tiers: Vec<_> = tiers
            .iter()
            .map(|t| {
                (
                    t.min_size,
                    WatermarkAsset {
                        key: t.asset.clone(),
                    },
                )
            })
            .collect();
        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Self { tiers }
    }

    pub fn from_config(config: &WatermarkConfig) -> Self {
        Self::new(&config.tiers)
    }

    /// Overlay for the largest threshold not exceeding `target_size`.
    pub fn select(&self, target_size: u32) -> Option<&WatermarkAsset> {
        self.tiers
            .iter()
            .find(|(min_size, _)| target_size >= *min_size)
            .map(|(_, asset)| asset)
    }
}

impl Default for WatermarkSelector {
    fn default() -> Self {
        Self::from_config(&WatermarkConfig::default())
    }
}
