//! # Codecs
//!
//! Each module implements one family of transforms as plain functions; none of
//! them hold state. The [`Transcoder`](crate::transcoder::Transcoder) decides which
//! one runs.
//!
//! - [`image`]: decoding raw bytes into an [`ImageHandle`], PNG output, data URLs
//! - [`bytes`]: base64, hex, binary-string and URL percent-encoding
//! - [`digest`]: MD5 and SHA-256
//! - [`ascii`]: ASCII-art rendering
//! - [`qr`]: QR code generation
//! - [`steganography`]: LSB text embedding and extraction

pub mod ascii;
pub mod bytes;
pub mod digest;
pub mod image;
pub mod qr;
pub mod steganography;

pub use image::{ImageContainer, ImageHandle, RenderedImage};
