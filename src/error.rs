//! # Error Model
//!
//! Every failure a transcode can hit is one variant of [`TranscodeError`].
//! Codecs return it directly and the [`Transcoder`](crate::transcoder::Transcoder)
//! surfaces it to the caller as a structured error response, so nothing below
//! the dispatcher needs to catch or translate errors ad hoc.

use serde::{Deserialize, Serialize};

/// Fieldless classification of a [`TranscodeError`], stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedFileType,
    InvalidImage,
    MissingInput,
    UnsupportedOperation,
    MalformedEncoding,
    InvalidLength,
    InvalidDecodedImage,
    PayloadTooLarge,
    InputTooLarge,
    Unexpected,
}

/// Unified error type for all codec and dispatch failures.
///
/// The `Display` output is the human-readable message sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscodeError {
    #[error("{0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    InvalidImage(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    MalformedEncoding(String),

    #[error("{0}")]
    InvalidLength(String),

    #[error("{0}")]
    InvalidDecodedImage(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    InputTooLarge(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl TranscodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFileType(_) => ErrorKind::UnsupportedFileType,
            Self::InvalidImage(_) => ErrorKind::InvalidImage,
            Self::MissingInput(_) => ErrorKind::MissingInput,
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            Self::MalformedEncoding(_) => ErrorKind::MalformedEncoding,
            Self::InvalidLength(_) => ErrorKind::InvalidLength,
            Self::InvalidDecodedImage(_) => ErrorKind::InvalidDecodedImage,
            Self::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            Self::InputTooLarge(_) => ErrorKind::InputTooLarge,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Shorthand used by every codec module.
pub type Result<T> = std::result::Result<T, TranscodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = TranscodeError::InvalidLength("bad".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
        assert_eq!(err.to_string(), "bad");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidDecodedImage).unwrap();
        assert_eq!(json, "\"invalid_decoded_image\"");
    }

    #[test]
    fn test_unexpected_message_prefix() {
        let err = TranscodeError::Unexpected("boom".to_string());
        assert_eq!(err.to_string(), "An unexpected error occurred: boom");
    }
}
