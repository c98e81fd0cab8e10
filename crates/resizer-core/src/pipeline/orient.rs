//! EXIF orientation handling.

use exif::{In, Reader, Tag, Value};
use image::DynamicImage;
use std::io::Cursor;

/// Read the EXIF `Orientation` tag from an encoded image.
///
/// Returns 1 (upright) when the container has no EXIF block or the tag is
/// missing or out of range.
pub fn read_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Short(v) => v.first().map(|&x| u32::from(x)),
            Value::Long(v) => v.first().copied(),
            _ => None,
        })
        .filter(|o| (1..=8).contains(o))
        .unwrap_or(1)
}

/// Rotate/flip an image so it displays upright for the given orientation.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    /// 3x2 image with a red pixel in the top-left corner.
    fn marked() -> DynamicImage {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        DynamicImage::ImageRgb8(img)
    }

    fn red_at(img: &DynamicImage) -> (u32, u32) {
        img.pixels()
            .find(|(_, _, p)| p.0[0] == 255)
            .map(|(x, y, _)| (x, y))
            .unwrap()
    }

    #[test]
    fn test_no_exif_is_upright() {
        assert_eq!(read_orientation(b"not an image"), 1);
        assert_eq!(read_orientation(&[]), 1);
    }

    #[test]
    fn test_upright_is_identity() {
        let img = apply_orientation(marked(), 1);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(red_at(&img), (0, 0));
    }

    #[test]
    fn test_quarter_turns_swap_dimensions() {
        for orientation in 5..=8 {
            let img = apply_orientation(marked(), orientation);
            assert_eq!(img.dimensions(), (2, 3), "orientation {orientation}");
        }
        for orientation in 2..=4 {
            let img = apply_orientation(marked(), orientation);
            assert_eq!(img.dimensions(), (3, 2), "orientation {orientation}");
        }
    }

    #[test]
    fn test_orientation_moves_corner() {
        assert_eq!(red_at(&apply_orientation(marked(), 2)), (2, 0));
        assert_eq!(red_at(&apply_orientation(marked(), 3)), (2, 1));
        assert_eq!(red_at(&apply_orientation(marked(), 4)), (0, 1));
        // Transpose keeps the top-left corner in place
        assert_eq!(red_at(&apply_orientation(marked(), 5)), (0, 0));
        assert_eq!(red_at(&apply_orientation(marked(), 6)), (1, 0));
        assert_eq!(red_at(&apply_orientation(marked(), 7)), (1, 2));
        assert_eq!(red_at(&apply_orientation(marked(), 8)), (0, 2));
    }
}
