//! Pipeline orchestration: route → fetch → render fan-out → write fan-out.
//!
//! Each invocation is independent. Rendering and writing each fan out one
//! task per render spec and join with "wait for all, fail on first error".
//! Sibling tasks are detached rather than cancelled when one fails; their
//! results are discarded. Nothing is retried or rolled back.

use futures_util::future::try_join_all;
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{KeyRouter, ProfileCatalog};
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::event::StorageEvent;
use crate::keys::destination_key;
use crate::storage::{guess_content_type, ObjectStore, PutRequest};
use crate::types::{Category, InvocationReport, Rendition, SourceImage, WrittenRendition};
use crate::watermark::WatermarkSelector;

use super::render::{ImageRenderer, RenderJob, RenditionRenderer};

/// Drives one source object through the full pipeline.
pub struct Orchestrator {
    store: Arc<dyn ObjectStore>,
    renderer: Arc<dyn RenditionRenderer>,
    catalog: ProfileCatalog,
    /// `None` when watermarking is disabled
    watermarks: Option<WatermarkSelector>,
    reject_unknown: bool,
}

impl Orchestrator {
    /// Build an orchestrator from configuration and a storage backend.
    pub fn new(config: &Config, store: Arc<dyn ObjectStore>) -> Self {
        let watermarks = config
            .watermark
            .enabled
            .then(|| WatermarkSelector::from_config(&config.watermark));
        Self {
            store,
            renderer: Arc::new(ImageRenderer::default()),
            catalog: ProfileCatalog::new(&config.catalog),
            watermarks,
            reject_unknown: config.routing.reject_unknown,
        }
    }

    /// Replace the renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn RenditionRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Run the pipeline for every record of a storage event, in order.
    ///
    /// Keys are decoded before use. The first failing record aborts the event.
    pub async fn handle_event(
        &self,
        event: &StorageEvent,
    ) -> PipelineResult<Vec<InvocationReport>> {
        if event.records.is_empty() {
            return Err(PipelineError::Routing {
                key: String::new(),
                message: "event contains no records".to_string(),
            });
        }

        let mut reports = Vec::with_capacity(event.records.len());
        for record in &event.records {
            let key = record.object_key()?;
            reports.push(self.process(record.bucket(), &key).await?);
        }
        Ok(reports)
    }

    /// Run the pipeline for one (already decoded) source key.
    pub async fn process(&self, bucket: &str, key: &str) -> PipelineResult<InvocationReport> {
        let start = Instant::now();
        tracing::debug!("Processing: {}/{} ({})", bucket, key, self.store.name());

        // Route
        let (category, mut jobs) = self.route(key)?;
        if jobs.is_empty() {
            if category == Category::Unknown {
                tracing::warn!("No rendition plan for {}/{}, skipping", bucket, key);
            }
            return Ok(InvocationReport {
                bucket: bucket.to_string(),
                source_key: key.to_string(),
                category,
                renditions: Vec::new(),
            });
        }
        tracing::debug!("  Route: {} ({} renditions)", category, jobs.len());

        // Fetch
        let fetch_start = Instant::now();
        let source = self.fetch_source(bucket, key).await?;
        self.attach_overlays(bucket, &mut jobs).await?;
        tracing::debug!(
            "  Fetch: {:?} ({} bytes, {})",
            fetch_start.elapsed(),
            source.bytes.len(),
            source.content_type
        );

        // Render
        let render_start = Instant::now();
        let renditions = self.render_all(source, jobs).await?;
        tracing::debug!("  Render: {:?}", render_start.elapsed());

        // Write
        let write_start = Instant::now();
        let written = self.write_all(bucket, renditions).await?;
        tracing::debug!("  Write: {:?}", write_start.elapsed());

        tracing::info!(
            "Processed {}/{} ({}) -> {} renditions in {:?}",
            bucket,
            key,
            category,
            written.len(),
            start.elapsed()
        );

        Ok(InvocationReport {
            bucket: bucket.to_string(),
            source_key: key.to_string(),
            category,
            renditions: written,
        })
    }

    /// Classify the key and derive every destination key up front, so a
    /// malformed key fails before anything is fetched.
    fn route(&self, key: &str) -> PipelineResult<(Category, Vec<RenderJob>)> {
        let (category, specs) = KeyRouter::new(&self.catalog).route(key);
        if category == Category::Unknown && self.reject_unknown {
            return Err(PipelineError::Routing {
                key: key.to_string(),
                message: "no rendition plan for this category".to_string(),
            });
        }

        let jobs = specs
            .iter()
            .map(|spec| {
                Ok(RenderJob {
                    destination_key: destination_key(key, &spec.label)?,
                    spec: spec.clone(),
                    overlay: None,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;
        Ok((category, jobs))
    }

    async fn fetch_source(&self, bucket: &str, key: &str) -> PipelineResult<Arc<SourceImage>> {
        let object = self
            .store
            .get(bucket, key)
            .await
            .map_err(|e| PipelineError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let content_type = object
            .content_type
            .or_else(|| guess_content_type(key))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(Arc::new(SourceImage {
            bytes: object.body,
            content_type,
            source_key: key.to_string(),
        }))
    }

    /// Resolve and load the overlay for every watermarked job. Each distinct
    /// asset is fetched once.
    async fn attach_overlays(&self, bucket: &str, jobs: &mut [RenderJob]) -> PipelineResult<()> {
        let Some(selector) = &self.watermarks else {
            return Ok(());
        };

        let mut loaded: HashMap<String, Arc<DynamicImage>> = HashMap::new();
        for job in jobs.iter_mut().filter(|job| job.spec.watermark) {
            let Some(asset) = selector.select(job.spec.target_size) else {
                continue;
            };
            let overlay = match loaded.get(&asset.key).cloned() {
                Some(overlay) => overlay,
                None => {
                    let overlay = Arc::new(self.fetch_overlay(bucket, &asset.key).await?);
                    loaded.insert(asset.key.clone(), Arc::clone(&overlay));
                    overlay
                }
            };
            job.overlay = Some(overlay);
        }
        Ok(())
    }

    async fn fetch_overlay(&self, bucket: &str, key: &str) -> PipelineResult<DynamicImage> {
        let fetch_error = |message: String| PipelineError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };
        let object = self
            .store
            .get(bucket, key)
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        image::load_from_memory(&object.body)
            .map_err(|e| fetch_error(format!("Watermark is not a decodable image: {}", e)))
    }

    /// Render every job concurrently on the blocking pool.
    async fn render_all(
        &self,
        source: Arc<SourceImage>,
        jobs: Vec<RenderJob>,
    ) -> PipelineResult<Vec<Rendition>> {
        let tasks = jobs.into_iter().map(|job| {
            let key = source.source_key.clone();
            let label = job.spec.label.clone();
            let renderer = Arc::clone(&self.renderer);
            let source = Arc::clone(&source);
            let handle = tokio::task::spawn_blocking(move || renderer.render(&source, &job));
            async move {
                match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(PipelineError::Transform {
                        key,
                        label,
                        message: format!("Render task failed: {}", e),
                    }),
                }
            }
        });
        try_join_all(tasks).await
    }

    /// Write every rendition concurrently.
    async fn write_all(
        &self,
        bucket: &str,
        renditions: Vec<Rendition>,
    ) -> PipelineResult<Vec<WrittenRendition>> {
        let tasks = renditions.into_iter().map(|rendition| {
            let store = Arc::clone(&self.store);
            let request = PutRequest {
                bucket: bucket.to_string(),
                key: rendition.destination_key.clone(),
                body: rendition.bytes.clone(),
                content_type: rendition.content_type.clone(),
            };
            let bucket = bucket.to_string();
            let handle = tokio::spawn(async move { store.put(request).await });
            async move {
                let write_error = |message: String| PipelineError::Write {
                    bucket,
                    key: rendition.destination_key.clone(),
                    message,
                };
                let receipt = match handle.await {
                    Ok(Ok(receipt)) => receipt,
                    Ok(Err(e)) => return Err(write_error(e.to_string())),
                    Err(e) => return Err(write_error(format!("Write task failed: {}", e))),
                };
                Ok(WrittenRendition {
                    size_bytes: rendition.bytes.len() as u64,
                    label: rendition.spec.label,
                    key: rendition.destination_key,
                    content_type: rendition.content_type,
                    width: rendition.width,
                    height: rendition.height,
                    etag: receipt.etag,
                })
            }
        });
        try_join_all(tasks).await
    }
}
