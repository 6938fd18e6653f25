//! QR code generation from a text payload, rasterized to a grayscale PNG.

use image::{DynamicImage, GrayImage, Luma};
use log::debug;
use qrcode::types::QrError;
use qrcode::{Color, QrCode};

use super::image::encode_png;
use crate::common::config::QrConfig;
use crate::error::{Result, TranscodeError};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Build the QR symbol for `payload` and rasterize it with a light quiet zone.
pub fn render(payload: &str, config: &QrConfig) -> Result<GrayImage> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| match e {
        QrError::DataTooLong => {
            TranscodeError::PayloadTooLarge(format!("QR payload of {} bytes is too long.", payload.len()))
        }
        other => TranscodeError::Unexpected(format!("QR generation failed: {}", other)),
    })?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let scale = config.module_size.max(1);
    let side = config
        .border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(modules))
        .and_then(|span| span.checked_mul(scale))
        .filter(|&side| side <= config.max_side)
        .ok_or_else(|| {
            TranscodeError::InputTooLarge(format!(
                "QR raster for {} modules with module_size {} and border {} exceeds {}px.",
                modules, config.module_size, config.border, config.max_side
            ))
        })?;

    debug!("QR symbol {}x{} modules, raster {}px", modules, modules, side);

    Ok(GrayImage::from_fn(side, side, |px, py| {
        let mx = (px / scale).checked_sub(config.border);
        let my = (py / scale).checked_sub(config.border);
        match (mx, my) {
            (Some(x), Some(y)) if x < modules && y < modules => {
                match colors[(y * modules + x) as usize] {
                    Color::Dark => DARK,
                    Color::Light => LIGHT,
                }
            }
            _ => LIGHT,
        }
    }))
}

pub fn render_png(payload: &str, config: &QrConfig) -> Result<Vec<u8>> {
    encode_png(&DynamicImage::ImageLuma8(render(payload, config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_size_includes_border() {
        let config = QrConfig {
            module_size: 2,
            border: 4,
            ..QrConfig::default()
        };
        let img = render("cat.png", &config).unwrap();

        // Version 1 symbol: 21 modules.
        assert_eq!(img.width(), (21 + 8) * 2);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn test_quiet_zone_is_light_and_finder_is_dark() {
        let config = QrConfig::default();
        let img = render("photo.jpg", &config).unwrap();
        let offset = config.border * config.module_size;

        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        assert_eq!(*img.get_pixel(offset, offset), DARK);
    }

    #[test]
    fn test_deterministic() {
        let config = QrConfig::default();
        assert_eq!(
            render_png("same.png", &config).unwrap(),
            render_png("same.png", &config).unwrap()
        );
    }

    #[test]
    fn test_huge_module_size_rejected() {
        let config = QrConfig {
            module_size: 200_000_000,
            ..QrConfig::default()
        };
        let err = render("a.png", &config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InputTooLarge);
    }

    #[test]
    fn test_huge_border_rejected() {
        let config = QrConfig {
            border: u32::MAX,
            ..QrConfig::default()
        };
        let err = render("a.png", &config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InputTooLarge);
    }

    #[test]
    fn test_raster_over_max_side_rejected() {
        let config = QrConfig {
            module_size: 10,
            border: 4,
            max_side: 100,
        };
        assert!(render("a.png", &config).is_err());
    }

    #[test]
    fn test_oversized_payload() {
        let payload = "x".repeat(8000);
        let err = render(&payload, &QrConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::PayloadTooLarge);
    }
}
