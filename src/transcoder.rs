//! # Transcode Dispatcher
//!
//! Routes a [`TranscodeRequest`] to exactly one codec and applies the input
//! policy around it:
//! 1. Reject illegal `direction x codec` pairs (digests and visual encoders
//!    have no decode) before touching the payload
//! 2. Check the payload is present and within the configured bounds
//! 3. Decode the uploaded image where the codec needs one
//! 4. Run the codec
//! 5. For text decodes, verify the recovered bytes form an image before
//!    returning them
//!
//! Every failure comes back as a [`TranscodeError`]; a success is never
//! partially populated.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::common::config::TranscodeConfig;
use crate::common::messages::{CodecSelector, Direction, TranscodeRequest, TranscodeResponse};
use crate::error::{Result, TranscodeError};
use crate::processing::image::{check_filename, RenderedImage};
use crate::processing::{ascii, bytes, digest, qr, steganography, ImageHandle};

pub const QR_RESULT: &str = "QR code generated from filename.";
pub const STEGANO_HIDDEN_RESULT: &str = "Text hidden in image successfully.";
pub const NO_HIDDEN_MESSAGE: &str = "No hidden message found.";
pub const DECODED_RESULT: &str = "success";

/// Successful outcome of a transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutput {
    pub text: String,
    pub rendered_image: Option<RenderedImage>,
}

impl TranscodeOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rendered_image: None,
        }
    }

    pub fn with_image(text: impl Into<String>, image: RenderedImage) -> Self {
        Self {
            text: text.into(),
            rendered_image: Some(image),
        }
    }
}

/// Stateless dispatcher over the codec set.
///
/// Cheap to clone; clones share the same immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: Arc<TranscodeConfig>,
}

impl Transcoder {
    pub fn new(config: TranscodeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run one request synchronously.
    pub fn transcode(&self, request: &TranscodeRequest) -> Result<TranscodeOutput> {
        debug!("Transcoding: {} {}", request.direction, request.selector);
        match request.direction {
            Direction::Encode => self.encode(request),
            Direction::Decode => self.decode(request),
        }
    }

    /// Run one request and shape the outcome for the transport layer.
    pub fn respond(&self, request: &TranscodeRequest) -> TranscodeResponse {
        let result = self.transcode(request);
        log_outcome(request, &result);
        TranscodeResponse::from(result)
    }

    /// Run one request on the blocking thread pool.
    ///
    /// Codecs are CPU-bound, so they never run on the async runtime's workers.
    /// A panicked or cancelled worker is reported as `Unexpected`.
    pub async fn run(&self, request: TranscodeRequest) -> Result<TranscodeOutput> {
        let transcoder = self.clone();
        let direction = request.direction;
        let selector = request.selector;

        tokio::task::spawn_blocking(move || {
            let result = transcoder.transcode(&request);
            log_outcome(&request, &result);
            result
        })
        .await
        .unwrap_or_else(|e| {
            warn!("❌ {} {} worker failed: {}", direction, selector, e);
            Err(TranscodeError::Unexpected(e.to_string()))
        })
    }

    /// [`run`](Self::run), shaped for the transport layer.
    pub async fn process(&self, request: TranscodeRequest) -> TranscodeResponse {
        TranscodeResponse::from(self.run(request).await)
    }

    // ========== ENCODE ==========

    fn encode(&self, request: &TranscodeRequest) -> Result<TranscodeOutput> {
        let image_bytes = self.uploaded_image(request)?.ok_or_else(|| {
            TranscodeError::InvalidImage("Missing image file.".to_string())
        })?;
        let handle = ImageHandle::decode(image_bytes, &self.config.limits)?;

        match request.selector {
            CodecSelector::Base64 => Ok(TranscodeOutput::text(bytes::base64_encode(image_bytes))),
            CodecSelector::Hex => Ok(TranscodeOutput::text(bytes::hex_encode(image_bytes))),
            CodecSelector::Binary => Ok(TranscodeOutput::text(bytes::binary_encode(image_bytes))),
            CodecSelector::Url => Ok(TranscodeOutput::text(bytes::url_encode(image_bytes))),
            CodecSelector::Ascii => Ok(TranscodeOutput::text(ascii::render(&handle))),
            CodecSelector::Md5 => Ok(TranscodeOutput::text(digest::md5_hex(image_bytes))),
            CodecSelector::Sha256 => Ok(TranscodeOutput::text(digest::sha256_hex(image_bytes))),
            CodecSelector::Qr => {
                let filename = request
                    .filename
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        TranscodeError::MissingInput("A filename is required for QR generation.".to_string())
                    })?;
                let png = qr::render_png(filename, &self.config.qr)?;
                Ok(TranscodeOutput::with_image(QR_RESULT, RenderedImage::png(png)))
            }
            CodecSelector::Stegano => {
                let hidden_text = request.hidden_text.as_deref().unwrap_or_default();
                let max = self.config.limits.max_hidden_text_bytes;
                if hidden_text.len() > max {
                    return Err(TranscodeError::InputTooLarge(format!(
                        "Text to hide is {} bytes; the limit is {}.",
                        hidden_text.len(),
                        max
                    )));
                }
                let png = steganography::embed_text(&handle, hidden_text)?;
                Ok(TranscodeOutput::with_image(STEGANO_HIDDEN_RESULT, RenderedImage::png(png)))
            }
        }
    }

    // ========== DECODE ==========

    fn decode(&self, request: &TranscodeRequest) -> Result<TranscodeOutput> {
        let codec: fn(&str) -> Result<Vec<u8>> = match request.selector {
            CodecSelector::Md5 | CodecSelector::Sha256 => {
                return Err(TranscodeError::UnsupportedOperation(format!(
                    "Cannot decode hash function {}.",
                    request.selector.as_str().to_uppercase()
                )));
            }
            CodecSelector::Ascii | CodecSelector::Qr => {
                return Err(TranscodeError::UnsupportedOperation(format!(
                    "{} encoding is encode-only.",
                    request.selector.as_str().to_uppercase()
                )));
            }
            CodecSelector::Stegano => return self.reveal(request),
            CodecSelector::Base64 => bytes::base64_decode,
            CodecSelector::Hex => bytes::hex_decode,
            CodecSelector::Binary => bytes::binary_decode,
            CodecSelector::Url => bytes::url_decode,
        };

        let text = request.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(TranscodeError::MissingInput(
                "Please provide encoded text to decode.".to_string(),
            ));
        }
        self.check_input_size(text.len(), "Encoded text")?;

        let decoded = codec(text)?;

        let handle = ImageHandle::decode(&decoded, &self.config.limits).map_err(|e| {
            debug!("Decoded {} bytes rejected: {}", decoded.len(), e);
            TranscodeError::InvalidDecodedImage("Decoded data does not form a valid image.".to_string())
        })?;

        let container = handle.container();
        Ok(TranscodeOutput::with_image(
            DECODED_RESULT,
            RenderedImage {
                bytes: decoded,
                container,
            },
        ))
    }

    fn reveal(&self, request: &TranscodeRequest) -> Result<TranscodeOutput> {
        let image_bytes = self.uploaded_image(request)?.ok_or_else(|| {
            TranscodeError::MissingInput("Image required for steganography decoding.".to_string())
        })?;
        let handle = ImageHandle::decode(image_bytes, &self.config.limits)?;

        let hidden = steganography::extract_text(&handle)?;
        Ok(TranscodeOutput::text(
            hidden.unwrap_or_else(|| NO_HIDDEN_MESSAGE.to_string()),
        ))
    }

    // ========== INPUT POLICY ==========

    /// Uploaded image bytes, if any, after the filename and size checks.
    fn uploaded_image<'a>(&self, request: &'a TranscodeRequest) -> Result<Option<&'a [u8]>> {
        if let Some(filename) = request.filename.as_deref() {
            check_filename(filename)?;
        }

        match request.image_bytes.as_deref() {
            Some(bytes) if !bytes.is_empty() => {
                self.check_input_size(bytes.len(), "Image")?;
                Ok(Some(bytes))
            }
            _ => Ok(None),
        }
    }

    fn check_input_size(&self, len: usize, what: &str) -> Result<()> {
        let max = self.config.limits.max_input_bytes;
        if len > max {
            return Err(TranscodeError::InputTooLarge(format!(
                "{} is {} bytes; the limit is {}.",
                what, len, max
            )));
        }
        Ok(())
    }
}

fn log_outcome(request: &TranscodeRequest, result: &Result<TranscodeOutput>) {
    match result {
        Ok(output) => info!(
            "✅ {} {} completed ({} chars{})",
            request.direction,
            request.selector,
            output.text.len(),
            if output.rendered_image.is_some() { ", with image" } else { "" }
        ),
        Err(e) => warn!(
            "❌ {} {} rejected [{:?}]: {}",
            request.direction,
            request.selector,
            e.kind(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_digest_decode_rejected_before_payload_checks() {
        let transcoder = Transcoder::default();
        for selector in [CodecSelector::Md5, CodecSelector::Sha256] {
            let request = TranscodeRequest::decode_text(selector, "");
            let err = transcoder.transcode(&request).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        }
    }

    #[test]
    fn test_digest_decode_message() {
        let request = TranscodeRequest::decode_text(CodecSelector::Md5, "abc");
        let err = Transcoder::default().transcode(&request).unwrap_err();
        assert_eq!(err.to_string(), "Cannot decode hash function MD5.");
    }

    #[test]
    fn test_visual_codecs_are_encode_only() {
        let transcoder = Transcoder::default();
        for selector in [CodecSelector::Ascii, CodecSelector::Qr] {
            let err = transcoder
                .transcode(&TranscodeRequest::decode_text(selector, "anything"))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        }
    }

    #[test]
    fn test_whitespace_text_is_missing_input() {
        let request = TranscodeRequest::decode_text(CodecSelector::Hex, "  \n ");
        let err = Transcoder::default().transcode(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn test_oversized_text_rejected() {
        let mut config = TranscodeConfig::default();
        config.limits.max_input_bytes = 4;
        let request = TranscodeRequest::decode_text(CodecSelector::Hex, "0011223344");

        let err = Transcoder::new(config).transcode(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputTooLarge);
    }

    #[test]
    fn test_encode_without_image_is_invalid_image() {
        let mut request = TranscodeRequest::encode(CodecSelector::Base64, Vec::new(), "a.png");
        request.image_bytes = None;

        let err = Transcoder::default().transcode(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidImage);
    }

    #[test]
    fn test_stegano_decode_without_image_is_missing_input() {
        let request = TranscodeRequest::decode_text(CodecSelector::Stegano, "");
        let err = Transcoder::default().transcode(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }
}
