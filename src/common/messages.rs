//! # Request and Response Shapes
//!
//! Defines the values exchanged with whatever transport sits in front of the
//! [`Transcoder`](crate::transcoder::Transcoder):
//! - [`TranscodeRequest`]: direction, codec selector and the optional payload fields
//! - [`TranscodeResponse`]: either a result (with optional image data URL) or an error
//!
//! Both derive serde so a transport can pass them through as JSON unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, TranscodeError};
use crate::transcoder::TranscodeOutput;

// ============================================================================
// SELECTORS
// ============================================================================

/// Whether the request produces an encoding or reverses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encode,
    Decode,
}

/// The closed set of codecs. Adding a codec means adding a variant here and a
/// match arm in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecSelector {
    Base64,
    Hex,
    Binary,
    Url,
    Ascii,
    Md5,
    Sha256,
    Qr,
    Stegano,
}

impl CodecSelector {
    pub const ALL: [CodecSelector; 9] = [
        Self::Base64,
        Self::Hex,
        Self::Binary,
        Self::Url,
        Self::Ascii,
        Self::Md5,
        Self::Sha256,
        Self::Qr,
        Self::Stegano,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Hex => "hex",
            Self::Binary => "binary",
            Self::Url => "url",
            Self::Ascii => "ascii",
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Qr => "qr",
            Self::Stegano => "stegano",
        }
    }
}

impl fmt::Display for CodecSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodecSelector {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|codec| codec.as_str() == name)
            .ok_or_else(|| TranscodeError::UnsupportedOperation(format!("Unknown encoding '{}'.", s)))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

impl FromStr for Direction {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encode" => Ok(Self::Encode),
            "decode" => Ok(Self::Decode),
            _ => Err(TranscodeError::UnsupportedOperation(format!("Unknown action '{}'.", s))),
        }
    }
}

// ============================================================================
// REQUEST
// ============================================================================

/// One transcode operation as received from the transport layer.
///
/// Which optional fields are required depends on `direction` and `selector`;
/// the dispatcher reports a missing one as `MissingInput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeRequest {
    pub direction: Direction,
    pub selector: CodecSelector,
    /// Raw bytes of the uploaded image file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_bytes: Option<Vec<u8>>,
    /// Name of the uploaded file (payload for QR generation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Encoded text to decode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text to hide with the steganographic codec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_text: Option<String>,
}

impl TranscodeRequest {
    /// Encode request for an uploaded image.
    pub fn encode(selector: CodecSelector, image_bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            direction: Direction::Encode,
            selector,
            image_bytes: Some(image_bytes),
            filename: Some(filename.into()),
            text: None,
            hidden_text: None,
        }
    }

    /// Decode request for previously encoded text.
    pub fn decode_text(selector: CodecSelector, text: impl Into<String>) -> Self {
        Self {
            direction: Direction::Decode,
            selector,
            image_bytes: None,
            filename: None,
            text: Some(text.into()),
            hidden_text: None,
        }
    }

    pub fn with_hidden_text(mut self, hidden_text: impl Into<String>) -> Self {
        self.hidden_text = Some(hidden_text.into());
        self
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Wire shape returned to the transport layer: exactly one of the two variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranscodeResponse {
    Success {
        result: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_data_url: Option<String>,
    },
    Failure {
        error: String,
        kind: ErrorKind,
    },
}

impl TranscodeResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<TranscodeOutput, TranscodeError>> for TranscodeResponse {
    fn from(result: Result<TranscodeOutput, TranscodeError>) -> Self {
        match result {
            Ok(output) => Self::Success {
                image_data_url: output.rendered_image.as_ref().map(|image| image.data_url()),
                result: output.text,
            },
            Err(error) => Self::Failure {
                kind: error.kind(),
                error: error.to_string(),
            },
        }
    }
}
