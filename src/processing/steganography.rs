//! # LSB Steganography Implementation
//!
//! Hides text in the least significant bit of each color channel (R, G, B) of an
//! image's pixels, and reads it back.
//!
//! ## Layout
//!
//! ```text
//! [4 bytes magic "LSB1"][4 bytes payload length, big-endian][payload, UTF-8]
//! ```
//!
//! Bits are written MSB first, pixels are visited row by row, channels in R, G, B
//! order. Alpha is never touched.
//!
//! ## Capacity
//! An image carries `width * height * 3` bits, i.e. roughly `(width * height * 3) / 8 - 8`
//! payload bytes once the header is accounted for.
//!
//! Example: An 800x600 image can store ~180 KB of text.
//!
//! The carrier must be saved losslessly; the encoder always emits PNG.

use image::{DynamicImage, RgbaImage};
use log::debug;

use super::image::{encode_png, ImageHandle};
use crate::error::{Result, TranscodeError};

const MAGIC: [u8; 4] = *b"LSB1";
const HEADER_LEN: usize = MAGIC.len() + 4;

/// Number of bits the image can carry.
pub fn capacity_bits(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Iterator over the embeddable channel values in traversal order.
fn channels_mut(img: &mut RgbaImage) -> impl Iterator<Item = &mut u8> {
    img.pixels_mut().flat_map(|pixel| pixel.0.iter_mut().take(3))
}

fn channels(img: &RgbaImage) -> impl Iterator<Item = u8> + '_ {
    img.pixels().flat_map(|pixel| pixel.0.into_iter().take(3))
}

/// Embed `text` into the image and return the carrier as PNG bytes.
///
/// # Errors
/// - `MissingInput`: `text` is empty
/// - `PayloadTooLarge`: the image cannot hold header plus text
pub fn embed_text(handle: &ImageHandle, text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(TranscodeError::MissingInput(
            "Please provide text to hide for steganography.".to_string(),
        ));
    }

    let text_bytes = text.as_bytes();
    let length = u32::try_from(text_bytes.len())
        .map_err(|_| TranscodeError::PayloadTooLarge("Hidden text is too long.".to_string()))?;

    // Prepare data to embed: [magic][length][text bytes]
    let mut data_to_embed = Vec::with_capacity(HEADER_LEN + text_bytes.len());
    data_to_embed.extend_from_slice(&MAGIC);
    data_to_embed.extend_from_slice(&length.to_be_bytes());
    data_to_embed.extend_from_slice(text_bytes);

    let (width, height) = handle.dimensions();
    let available_bits = capacity_bits(width, height);
    let required_bits = data_to_embed.len() * 8;

    if required_bits > available_bits {
        return Err(TranscodeError::PayloadTooLarge(format!(
            "Image too small for this text: need {} bits but only have {} bits available.",
            required_bits, available_bits
        )));
    }

    let mut img = handle.image().to_rgba8();
    let bits = data_to_embed
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1));

    for (channel, bit) in channels_mut(&mut img).zip(bits) {
        *channel = (*channel & 0xFE) | bit;
    }

    debug!(
        "Embedded {} bytes into {}x{} image ({} of {} bits used)",
        text_bytes.len(),
        width,
        height,
        required_bits,
        available_bits
    );

    encode_png(&DynamicImage::ImageRgba8(img))
}

/// Extract text previously embedded with [`embed_text`].
///
/// Returns `Ok(None)` when the image carries no message: the header is missing,
/// the declared length is zero, or it runs past the image's capacity.
///
/// # Errors
/// - `MalformedEncoding`: a valid header is present but the payload is not UTF-8
pub fn extract_text(handle: &ImageHandle) -> Result<Option<String>> {
    let img = handle.image().to_rgba8();
    let (width, height) = img.dimensions();
    let available_bytes = capacity_bits(width, height) / 8;

    if available_bytes < HEADER_LEN {
        return Ok(None);
    }

    let mut bits = channels(&img).map(|channel| channel & 1);
    let mut next_byte = || (0..8).try_fold(0u8, |acc, _| bits.next().map(|bit| (acc << 1) | bit));

    let mut header = [0u8; HEADER_LEN];
    for slot in header.iter_mut() {
        match next_byte() {
            Some(byte) => *slot = byte,
            None => return Ok(None),
        }
    }
    if header[..MAGIC.len()] != MAGIC {
        return Ok(None);
    }

    let mut length_bytes = [0u8; 4];
    length_bytes.copy_from_slice(&header[MAGIC.len()..]);
    let length = u32::from_be_bytes(length_bytes) as usize;

    if length == 0 || length > available_bytes - HEADER_LEN {
        return Ok(None);
    }

    let text_bytes = match (0..length).map(|_| next_byte()).collect::<Option<Vec<u8>>>() {
        Some(bytes) => bytes,
        None => return Ok(None),
    };
    debug!("Extracted {} hidden bytes from {}x{} image", length, width, height);

    String::from_utf8(text_bytes).map(Some).map_err(|_| {
        TranscodeError::MalformedEncoding("Hidden message is not valid UTF-8 text.".to_string())
    })
}
