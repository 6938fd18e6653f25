//! # Image Transcoder
//!
//! Turns raw image bytes into textual or visual encodings (base64, hex, binary
//! string, URL percent-encoding, ASCII art, MD5/SHA-256 digests, QR code, LSB
//! steganography) and turns the reversible ones back into validated image bytes.
//!
//! ## Modules
//!
//! - [`transcoder`]: the dispatcher every request goes through
//! - [`processing`]: the codecs themselves
//! - [`common`]: configuration and request/response shapes
//! - [`error`]: the error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use image_transcoder::{CodecSelector, TranscodeRequest, Transcoder};
//!
//! let transcoder = Transcoder::default();
//! let image = std::fs::read("photo.png")?;
//! let request = TranscodeRequest::encode(CodecSelector::Sha256, image, "photo.png");
//! let response = transcoder.respond(&request);
//! println!("{}", serde_json::to_string(&response)?);
//! ```

pub mod common;
pub mod error;
pub mod processing;
pub mod transcoder;

pub use common::config::TranscodeConfig;
pub use common::messages::{CodecSelector, Direction, TranscodeRequest, TranscodeResponse};
pub use error::{ErrorKind, TranscodeError};
pub use transcoder::{TranscodeOutput, Transcoder};
