//! Rendition plans per category and source-key classification.

use crate::config::CatalogConfig;
use crate::types::{Category, RenderSpec};

/// Read-only table mapping each category to its ordered render specs.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    article: Vec<RenderSpec>,
    profile: Vec<RenderSpec>,
    message: Vec<RenderSpec>,
}

impl ProfileCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            article: config.article.clone(),
            profile: config.profile.clone(),
            message: config.message.clone(),
        }
    }

    /// Ordered specs for a category. `Unknown` has none.
    pub fn specs_for(&self, category: Category) -> &[RenderSpec] {
        match category {
            Category::Article => &self.article,
            Category::Profile => &self.profile,
            Category::Message => &self.message,
            Category::Unknown => &[],
        }
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

/// Classifies source keys and resolves their rendition plan.
#[derive(Debug, Clone, Copy)]
pub struct KeyRouter<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> KeyRouter<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Category of a key, taken from its second `/`-separated segment.
    ///
    /// Total: keys with fewer than two segments are `Unknown`.
    pub fn classify(key: &str) -> Category {
        key.split('/')
            .nth(1)
            .map(Category::from_segment)
            .unwrap_or(Category::Unknown)
    }

    /// Classify a key and look up its specs.
    pub fn route(&self, key: &str) -> (Category, &'a [RenderSpec]) {
        let category = Self::classify(key);
        (category, self.catalog.specs_for(category))
    }
}
