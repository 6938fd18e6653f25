//! # Configuration
//!
//! Tunable bounds and rendering options for the [`Transcoder`](crate::transcoder::Transcoder).
//! Every field has a default, so an empty TOML file (or no file at all) yields a
//! working configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: TranscodeConfig = load_config("config/transcode.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration handed to `Transcoder::new`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    pub limits: LimitsConfig,
    pub qr: QrConfig,
}

/// Input size bounds.
///
/// Byte and text bounds are checked before any codec runs. Dimension and
/// allocation bounds are enforced by the image decoder itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum size of uploaded image bytes and of text submitted for decoding
    pub max_input_bytes: usize,
    /// Maximum size of the text hidden by the steganographic codec
    pub max_hidden_text_bytes: usize,
    pub max_image_width: u32,
    pub max_image_height: u32,
    /// Upper bound on memory the image decoder may allocate (bytes)
    pub max_decode_alloc: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 32 * 1024 * 1024,
            max_hidden_text_bytes: 1024 * 1024,
            max_image_width: 16_384,
            max_image_height: 16_384,
            max_decode_alloc: 512 * 1024 * 1024,
        }
    }
}

/// QR raster rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Pixels per QR module
    pub module_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Largest raster side length (pixels) a QR render may produce
    pub max_side: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 4,
            max_side: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TranscodeConfig = toml::from_str("").unwrap();
        assert_eq!(config, TranscodeConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: TranscodeConfig = toml::from_str(
            r#"
            [limits]
            max_input_bytes = 1024

            [qr]
            border = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.limits.max_input_bytes, 1024);
        assert_eq!(config.limits.max_image_width, 16_384);
        assert_eq!(config.qr.border, 2);
        assert_eq!(config.qr.module_size, 10);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[qr]\nmodule_size = 3").unwrap();

        let config: TranscodeConfig = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.qr.module_size, 3);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result: Result<TranscodeConfig> = load_config("/nonexistent/transcode.toml");
        assert!(result.is_err());
    }
}
