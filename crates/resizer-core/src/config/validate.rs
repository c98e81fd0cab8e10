//! Configuration validation with range checks.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::types::RenderSpec;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        validate_specs("catalog.article", &self.catalog.article)?;
        validate_specs("catalog.profile", &self.catalog.profile)?;
        validate_specs("catalog.message", &self.catalog.message)?;

        for tier in &self.watermark.tiers {
            if tier.min_size == 0 {
                return Err(ConfigError::ValidationError(
                    "watermark.tiers[].min_size must be > 0".into(),
                ));
            }
            if tier.asset.is_empty() {
                return Err(ConfigError::ValidationError(
                    "watermark.tiers[].asset must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

fn validate_specs(section: &str, specs: &[RenderSpec]) -> Result<(), ConfigError> {
    let mut labels = HashSet::new();
    for spec in specs {
        if spec.label.is_empty() || spec.label.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "{section}: label {:?} must be non-empty and contain no '/'",
                spec.label
            )));
        }
        if !labels.insert(spec.label.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "{section}: duplicate label {:?}",
                spec.label
            )));
        }
        if !(1..=100).contains(&spec.quality) {
            return Err(ConfigError::ValidationError(format!(
                "{section}: quality must be between 1 and 100 (label {:?})",
                spec.label
            )));
        }
        if spec.target_size == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}: target_size must be > 0 (label {:?})",
                spec.label
            )));
        }
    }
    Ok(())
}
