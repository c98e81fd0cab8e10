//! Rendition rendering: orient, resize/crop, watermark, encode.

use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView};
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{RenderSpec, Rendition, SourceImage};

use super::decode::{decode_bytes, encode};
use super::geometry::ResizePlan;
use super::orient::{apply_orientation, read_orientation};

/// One unit of render work: a spec, where its output goes, and an optional
/// overlay to composite.
#[derive(Clone)]
pub struct RenderJob {
    pub spec: RenderSpec,
    pub destination_key: String,
    pub overlay: Option<Arc<DynamicImage>>,
}

/// Produces one rendition from a source image.
///
/// Called on the blocking pool, once per job, concurrently for the same
/// source.
pub trait RenditionRenderer: Send + Sync + 'static {
    fn render(&self, source: &SourceImage, job: &RenderJob) -> PipelineResult<Rendition>;
}

/// Renderer backed by the `image` crate.
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    filter: FilterType,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl ImageRenderer {
    /// Apply orientation and geometry to a decoded image.
    pub fn transform(
        &self,
        image: DynamicImage,
        orientation: u32,
        spec: &RenderSpec,
    ) -> DynamicImage {
        let image = apply_orientation(image, orientation);
        let (width, height) = image.dimensions();
        let plan = ResizePlan::for_mode(spec.mode, width, height, spec.target_size);

        let image = match plan.crop {
            Some(rect) => image.crop_imm(rect.x, rect.y, rect.width, rect.height),
            None => image,
        };
        match plan.resize_to {
            Some((w, h)) => image.resize_exact(w, h, self.filter),
            None => image,
        }
    }
}

impl RenditionRenderer for ImageRenderer {
    fn render(&self, source: &SourceImage, job: &RenderJob) -> PipelineResult<Rendition> {
        let spec = &job.spec;
        let decoded = decode_bytes(
            &source.bytes,
            &source.content_type,
            &source.source_key,
            &spec.label,
        )?;
        let orientation = read_orientation(&source.bytes);

        let mut image = self.transform(decoded.image, orientation, spec);
        if let Some(overlay) = &job.overlay {
            composite_bottom_right(&mut image, overlay);
        }
        let (width, height) = image.dimensions();

        let bytes =
            encode(&image, decoded.format, spec.quality).map_err(|e| PipelineError::Transform {
                key: source.source_key.clone(),
                label: spec.label.clone(),
                message: format!("Encode failed: {}", e),
            })?;

        tracing::trace!(
            "  Rendered {} -> {} ({}x{} -> {}x{}, {} bytes)",
            spec.label,
            job.destination_key,
            decoded.width,
            decoded.height,
            width,
            height,
            bytes.len()
        );

        Ok(Rendition {
            destination_key: job.destination_key.clone(),
            bytes: Bytes::from(bytes),
            content_type: source.content_type.clone(),
            spec: spec.clone(),
            width,
            height,
        })
    }
}

/// Alpha-blend `overlay` onto the bottom-right corner of `base`.
///
/// Overlays larger than the base are clipped at the top/left.
pub fn composite_bottom_right(base: &mut DynamicImage, overlay: &DynamicImage) {
    let (bw, bh) = base.dimensions();
    let (ow, oh) = overlay.dimensions();
    let x = i64::from(bw) - i64::from(ow);
    let y = i64::from(bh) - i64::from(oh);
    imageops::overlay(base, overlay, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        DynamicImage::ImageRgb8(img)
    }

    fn source(width: u32, height: u32, format: ImageFormat, content_type: &str) -> SourceImage {
        SourceImage {
            bytes: Bytes::from(encode(&gradient(width, height), format, 90).unwrap()),
            content_type: content_type.to_string(),
            source_key: "origin/article/photo.jpg".to_string(),
        }
    }

    fn job(spec: RenderSpec) -> RenderJob {
        RenderJob {
            destination_key: format!("resize/{}/article/photo.jpg", spec.label),
            spec,
            overlay: None,
        }
    }

    #[test]
    fn test_ratio_shrinks_to_target() {
        let src = source(1600, 900, ImageFormat::Jpeg, "image/jpeg");
        let out = ImageRenderer::default()
            .render(&src, &job(RenderSpec::ratio("s", 90, 640)))
            .unwrap();

        assert_eq!((out.width, out.height), (640, 360));
        let decoded = decode_bytes(&out.bytes, &out.content_type, "k", "s").unwrap();
        assert_eq!((decoded.width, decoded.height), (640, 360));
        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!(out.content_type, "image/jpeg");
    }

    #[test]
    fn test_ratio_never_enlarges() {
        let src = source(300, 200, ImageFormat::Png, "image/png");
        let out = ImageRenderer::default()
            .render(&src, &job(RenderSpec::ratio("l", 90, 1280)))
            .unwrap();
        assert_eq!((out.width, out.height), (300, 200));
    }

    #[test]
    fn test_crop_is_exact_square() {
        for (w, h) in [(1000, 500), (90, 300), (140, 140), (64, 64)] {
            let src = source(w, h, ImageFormat::Png, "image/png");
            let out = ImageRenderer::default()
                .render(&src, &job(RenderSpec::crop("s", 90, 140)))
                .unwrap();
            let decoded = decode_bytes(&out.bytes, "image/png", "k", "s").unwrap();
            assert_eq!((decoded.width, decoded.height), (140, 140), "{w}x{h}");
        }
    }

    #[test]
    fn test_crop_of_thin_strip() {
        let renderer = ImageRenderer::default();
        let spec = RenderSpec::crop("s", 90, 140);
        let out = renderer.transform(gradient(1, 100_000), 1, &spec);
        assert_eq!(out.dimensions(), (140, 140));

        let src = source(1, 20_000, ImageFormat::Png, "image/png");
        let out = renderer.render(&src, &job(spec)).unwrap();
        assert_eq!((out.width, out.height), (140, 140));
    }

    #[test]
    fn test_orientation_applied_before_geometry() {
        let renderer = ImageRenderer::default();
        let spec = RenderSpec::ratio("s", 90, 640);
        // Orientation 6 turns a landscape source into portrait
        let out = renderer.transform(gradient(1600, 900), 6, &spec);
        assert_eq!(out.dimensions(), (360, 640));
    }

    #[test]
    fn test_output_is_deterministic() {
        let src = source(1200, 800, ImageFormat::Jpeg, "image/jpeg");
        let renderer = ImageRenderer::default();
        let spec = job(RenderSpec::ratio("m", 90, 960));
        let a = renderer.render(&src, &spec).unwrap();
        let b = renderer.render(&src, &spec).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_watermark_composited_bottom_right() {
        let mut mark = RgbaImage::new(10, 10);
        for p in mark.pixels_mut() {
            *p = Rgba([255, 0, 0, 255]);
        }
        let src = source(800, 600, ImageFormat::Png, "image/png");
        let mut watermarked = job(RenderSpec::ratio("s", 90, 640).watermarked());
        watermarked.overlay = Some(Arc::new(DynamicImage::ImageRgba8(mark)));

        let out = ImageRenderer::default().render(&src, &watermarked).unwrap();
        let decoded = decode_bytes(&out.bytes, "image/png", "k", "s").unwrap();
        let (w, h) = (decoded.width, decoded.height);
        assert_eq!(decoded.image.get_pixel(w - 1, h - 1), Rgba([255, 0, 0, 255]));
        assert_ne!(decoded.image.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_corrupt_source_reports_label() {
        let src = SourceImage {
            bytes: Bytes::from_static(b"\xFF\xD8\xFFtruncated"),
            content_type: "image/jpeg".into(),
            source_key: "origin/article/photo.jpg".into(),
        };
        let err = ImageRenderer::default()
            .render(&src, &job(RenderSpec::ratio("m", 90, 960)))
            .unwrap_err();
        match err {
            PipelineError::Transform { label, .. } => assert_eq!(label, "m"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
