//! Image decoding and encoding with format detection.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageResult};
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// Decode an in-memory image for the rendition `label`.
///
/// The format is detected from the content; the declared content type is
/// only used when the magic bytes are not recognized.
pub fn decode_bytes(
    bytes: &[u8],
    content_type: &str,
    key: &str,
    label: &str,
) -> PipelineResult<DecodedImage> {
    let transform_error = |message: String| PipelineError::Transform {
        key: key.to_string(),
        label: label.to_string(),
        message,
    };

    let mut reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| transform_error(format!("Cannot detect image format: {}", e)))?;
    let format = reader
        .format()
        .or_else(|| ImageFormat::from_mime_type(content_type))
        .ok_or_else(|| {
            transform_error(format!("Unsupported format (content type {content_type:?})"))
        })?;
    reader.set_format(format);

    let image = reader.decode().map_err(|e| transform_error(e.to_string()))?;

    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        image,
        format,
        width,
        height,
    })
}

/// Encode an image in `format`; `quality` applies to lossy formats.
pub fn encode(image: &DynamicImage, format: ImageFormat, quality: u8) -> ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let converted;
            let target = match image {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
                _ => {
                    converted = DynamicImage::ImageRgb8(image.to_rgb8());
                    &converted
                }
            };
            target.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))?;
        }
        ImageFormat::Gif | ImageFormat::WebP => {
            DynamicImage::ImageRgba8(image.to_rgba8()).write_to(&mut buffer, format)?;
        }
        other => image.write_to(&mut buffer, other)?,
    }
    Ok(buffer.into_inner())
}
