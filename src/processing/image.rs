//! # Image Handle
//!
//! Wraps the `image` crate as the black-box image codec: raw file bytes go in,
//! a decoded pixel grid plus its container format comes out. Also holds the
//! upload filename allowlist and the rendered-image payload returned to callers.

use base64::{engine::general_purpose, Engine as _};
use image::io::{Limits, Reader};
use image::{DynamicImage, GenericImageView, ImageFormat};
use log::debug;
use std::io::Cursor;

use crate::common::config::LimitsConfig;
use crate::error::{Result, TranscodeError};

/// Image container formats accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageContainer {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
    WebP,
}

impl ImageContainer {
    /// File extensions an upload may carry, lowercase.
    pub const EXTENSIONS: [&'static str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

    pub fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Tiff => Some(Self::Tiff),
            ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Tiff => "image/tiff",
            Self::WebP => "image/webp",
        }
    }
}

/// Check an upload's filename against the extension allowlist.
///
/// Only the last extension counts and matching is case-insensitive, so
/// `"photo.final.PNG"` passes and `"archive.png.zip"` does not.
pub fn check_filename(filename: &str) -> Result<()> {
    let allowed = filename
        .rsplit_once('.')
        .map(|(_, ext)| ImageContainer::EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    if allowed {
        Ok(())
    } else {
        Err(TranscodeError::UnsupportedFileType(
            "Unsupported or missing image file.".to_string(),
        ))
    }
}

/// A decoded image owned by a single operation.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: DynamicImage,
    container: ImageContainer,
}

impl ImageHandle {
    /// Decode raw file bytes, honoring the configured dimension and allocation bounds.
    ///
    /// # Errors
    /// - `InvalidImage`: the bytes are not a decodable image, or exceed the bounds
    /// - `UnsupportedFileType`: the image decodes but its container is not accepted
    pub fn decode(bytes: &[u8], limits: &LimitsConfig) -> Result<Self> {
        let mut reader = Reader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| TranscodeError::InvalidImage(format!("Invalid image file: {}", e)))?;

        let format = reader
            .format()
            .ok_or_else(|| TranscodeError::InvalidImage("Invalid image file.".to_string()))?;

        let container = ImageContainer::from_format(format).ok_or_else(|| {
            TranscodeError::UnsupportedFileType(format!("Unsupported image format {:?}.", format))
        })?;

        let mut decode_limits = Limits::default();
        decode_limits.max_image_width = Some(limits.max_image_width);
        decode_limits.max_image_height = Some(limits.max_image_height);
        decode_limits.max_alloc = Some(limits.max_decode_alloc);
        reader.limits(decode_limits);

        let image = reader
            .decode()
            .map_err(|e| TranscodeError::InvalidImage(format!("Invalid image file: {}", e)))?;

        debug!(
            "Decoded {:?} image {}x{} ({:?})",
            container,
            image.width(),
            image.height(),
            image.color()
        );

        Ok(Self { image, container })
    }

    pub fn from_dynamic(image: DynamicImage, container: ImageContainer) -> Self {
        Self { image, container }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn container(&self) -> ImageContainer {
        self.container
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Serialize any image to PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .map_err(|e| TranscodeError::Unexpected(format!("PNG encoding failed: {}", e)))?;
    Ok(output_bytes)
}

/// Image bytes attached to a successful result, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub container: ImageContainer,
}

impl RenderedImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            container: ImageContainer::Png,
        }
    }

    /// Self-describing `data:` URL with a base64 payload.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.container.mime_type(),
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn test_filename_allowlist() {
        assert!(check_filename("cat.png").is_ok());
        assert!(check_filename("CAT.JPEG").is_ok());
        assert!(check_filename("scan.final.tiff").is_ok());
        assert!(check_filename("notes.txt").is_err());
        assert!(check_filename("png").is_err());
        assert!(check_filename("").is_err());
    }

    #[test]
    fn test_decode_png() {
        let handle = ImageHandle::decode(&png_bytes(4, 3), &LimitsConfig::default()).unwrap();
        assert_eq!(handle.dimensions(), (4, 3));
        assert_eq!(handle.container(), ImageContainer::Png);
    }

    #[test]
    fn test_decode_garbage_is_invalid_image() {
        let err = ImageHandle::decode(b"definitely not an image", &LimitsConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidImage);
    }

    #[test]
    fn test_decode_respects_dimension_limits() {
        let limits = LimitsConfig {
            max_image_width: 2,
            ..LimitsConfig::default()
        };
        let err = ImageHandle::decode(&png_bytes(4, 3), &limits).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidImage);
    }

    #[test]
    fn test_data_url_prefix() {
        let rendered = RenderedImage::png(vec![1, 2, 3]);
        assert_eq!(rendered.data_url(), "data:image/png;base64,AQID");
    }
}
