//! # ASCII-Art Renderer
//!
//! Converts an image to luminance, resamples it onto a fixed 100x50 canvas with a
//! bilinear filter, and maps each sample onto a ten-glyph ramp from darkest
//! (`'@'`) to lightest (`' '`). Output is 50 lines of 100 glyphs, each line
//! terminated by `'\n'`.

use image::imageops::{self, FilterType};

use super::image::ImageHandle;

pub const CANVAS_WIDTH: u32 = 100;
pub const CANVAS_HEIGHT: u32 = 50;

/// Darkest to lightest.
const GLYPH_RAMP: [char; 10] = ['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Luminance values per glyph bucket. Values 250..=255 fall past the last full
/// bucket and are clamped onto the lightest glyph.
const BUCKET_WIDTH: u8 = 25;

pub fn glyph_for(luminance: u8) -> char {
    let index = usize::from(luminance / BUCKET_WIDTH).min(GLYPH_RAMP.len() - 1);
    GLYPH_RAMP[index]
}

pub fn render(handle: &ImageHandle) -> String {
    let luma = handle.image().to_luma8();
    let canvas = imageops::resize(&luma, CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle);

    let mut art = String::with_capacity(((CANVAS_WIDTH + 1) * CANVAS_HEIGHT) as usize);
    for row in canvas.rows() {
        art.extend(row.map(|pixel| glyph_for(pixel.0[0])));
        art.push('\n');
    }
    art
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::image::ImageContainer;
    use image::{DynamicImage, GrayImage, Luma, RgbImage};

    fn handle(image: DynamicImage) -> ImageHandle {
        ImageHandle::from_dynamic(image, ImageContainer::Png)
    }

    #[test]
    fn test_glyph_buckets() {
        assert_eq!(glyph_for(0), '@');
        assert_eq!(glyph_for(24), '@');
        assert_eq!(glyph_for(25), '%');
        assert_eq!(glyph_for(224), '.');
        assert_eq!(glyph_for(225), ' ');
        assert_eq!(glyph_for(249), ' ');
        assert_eq!(glyph_for(250), ' ');
        assert_eq!(glyph_for(255), ' ');
    }

    #[test]
    fn test_canvas_shape_independent_of_source_size() {
        for (w, h) in [(1, 1), (7, 300), (640, 480)] {
            let art = render(&handle(DynamicImage::ImageRgb8(RgbImage::new(w, h))));
            let lines: Vec<&str> = art.lines().collect();

            assert_eq!(lines.len(), CANVAS_HEIGHT as usize);
            assert!(lines.iter().all(|line| line.chars().count() == CANVAS_WIDTH as usize));
            assert!(art.ends_with('\n'));
        }
    }

    #[test]
    fn test_white_image_is_blank() {
        let white = GrayImage::from_pixel(20, 20, Luma([255]));
        let art = render(&handle(DynamicImage::ImageLuma8(white)));
        assert!(art.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_black_image_is_solid() {
        let black = GrayImage::from_pixel(20, 20, Luma([0]));
        let art = render(&handle(DynamicImage::ImageLuma8(black)));
        assert!(art.chars().all(|c| c == '@' || c == '\n'));
    }
}
