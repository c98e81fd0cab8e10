//! Resize and crop geometry for the two render modes.
//!
//! Pure integer arithmetic; no pixel operations.

use crate::types::ResizeMode;

/// A crop window in oriented source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// What to do to an oriented image of a given size.
///
/// The crop is taken from the source pixels first, so resampling never
/// produces an image larger than the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Crop applied to the source before resampling
    pub crop: Option<CropRect>,
    /// Resample to these dimensions, or `None` to keep the (cropped) pixels
    pub resize_to: Option<(u32, u32)>,
}

impl ResizePlan {
    /// Final output dimensions.
    pub fn output_size(&self, source: (u32, u32)) -> (u32, u32) {
        match (self.resize_to, self.crop) {
            (Some(size), _) => size,
            (None, Some(crop)) => (crop.width, crop.height),
            (None, None) => source,
        }
    }

    /// Plan the geometry for `mode` on a `width` × `height` image.
    pub fn for_mode(mode: ResizeMode, width: u32, height: u32, target: u32) -> Self {
        match mode {
            ResizeMode::Ratio => {
                let fitted = fit_within(width, height, target);
                Self {
                    crop: None,
                    resize_to: (fitted != (width, height)).then_some(fitted),
                }
            }
            ResizeMode::Crop => {
                let square = center_square(width, height);
                let side = square.width;
                Self {
                    crop: (width != height).then_some(square),
                    resize_to: (side != target).then_some((target, target)),
                }
            }
        }
    }
}

/// Shrink-only fit of `width` × `height` inside a `target` × `target` box.
///
/// Images already within the box are returned unchanged. Otherwise the
/// longer edge becomes `target` and the shorter edge is scaled and rounded,
/// never below 1.
pub fn fit_within(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width <= target && height <= target {
        return (width, height);
    }
    if width >= height {
        (target, scale_edge(height, target, width).clamp(1, target))
    } else {
        (scale_edge(width, target, height).clamp(1, target), target)
    }
}

/// The largest centered square inside a `width` × `height` image.
///
/// Scaling this square to `target` × `target` gives the same pixels as
/// covering the target and center-cropping the result.
pub fn center_square(width: u32, height: u32) -> CropRect {
    let side = width.min(height).max(1);
    CropRect {
        x: width.saturating_sub(side) / 2,
        y: height.saturating_sub(side) / 2,
        width: side,
        height: side,
    }
}

/// `edge * numerator / denominator`, rounded to nearest.
fn scale_edge(edge: u32, numerator: u32, denominator: u32) -> u32 {
    let denominator = u64::from(denominator.max(1));
    let scaled = (u64::from(edge) * u64::from(numerator) + denominator / 2) / denominator;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
