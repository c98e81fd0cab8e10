//! Benchmarks for the Resizer pipeline.
//!
//! Run with: cargo bench -p resizer-core

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use resizer_core::pipeline::decode::encode;
use resizer_core::pipeline::{ImageRenderer, RenderJob, RenditionRenderer, ResizePlan};
use resizer_core::types::{RenderSpec, ResizeMode, SourceImage};

fn source(width: u32, height: u32) -> SourceImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Rgb([(x % 256) as u8, (y % 256) as u8, 64]);
    }
    let bytes = encode(&DynamicImage::ImageRgb8(img), ImageFormat::Jpeg, 90).unwrap();
    SourceImage {
        bytes: Bytes::from(bytes),
        content_type: "image/jpeg".to_string(),
        source_key: "origin/article/bench.jpg".to_string(),
    }
}

fn benchmark_geometry(c: &mut Criterion) {
    c.bench_function("plan_ratio_and_crop", |b| {
        b.iter(|| {
            let _ = ResizePlan::for_mode(ResizeMode::Ratio, black_box(4032), black_box(3024), 1280);
            let _ = ResizePlan::for_mode(ResizeMode::Crop, black_box(4032), black_box(3024), 140);
        })
    });
}

fn benchmark_render(c: &mut Criterion) {
    let src = source(2048, 1536);
    let renderer = ImageRenderer::default();
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    for spec in [
        RenderSpec::ratio("s", 90, 640),
        RenderSpec::ratio("l", 90, 1280),
        RenderSpec::crop("s", 90, 140),
    ] {
        let name = format!("{:?}_{}", spec.mode, spec.target_size);
        let job = RenderJob {
            destination_key: format!("resize/{}/article/bench.jpg", spec.label),
            spec,
            overlay: None,
        };
        group.bench_function(name, |b| {
            b.iter(|| renderer.render(black_box(&src), &job).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_geometry, benchmark_render);
criterion_main!(benches);
