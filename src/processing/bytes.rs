//! # Byte Codecs
//!
//! Reversible byte <-> text transforms. Every encoder is total; every decoder
//! validates the text's structure and reports `MalformedEncoding` or
//! `InvalidLength` instead of guessing.
//!
//! For all four codecs `decode(encode(b)) == b`, including empty input and
//! embedded null bytes.

use base64::{engine::general_purpose, Engine as _};
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Result, TranscodeError};

/// Everything except the RFC 3986 unreserved characters gets escaped.
const URL_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

// ========== BASE64 ==========

pub fn base64_encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(text)
        .map_err(|e| TranscodeError::MalformedEncoding(format!("Invalid BASE64 format: {}", e)))
}

// ========== HEX ==========

pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Accepts upper- and lowercase digits.
pub fn hex_decode(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| TranscodeError::MalformedEncoding(format!("Invalid HEX format: {}", e)))
}

// ========== BINARY STRING ==========

/// Each byte becomes eight `'0'`/`'1'` characters, MSB first, no separators.
pub fn binary_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        out.push_str(&format!("{:08b}", byte));
    }
    out
}

/// Characters are validated before the length, so any text containing something
/// other than `'0'`/`'1'` is `MalformedEncoding` whatever its length.
pub fn binary_decode(text: &str) -> Result<Vec<u8>> {
    if let Some(bad) = text.chars().find(|c| !matches!(c, '0' | '1')) {
        return Err(TranscodeError::MalformedEncoding(format!(
            "Invalid BINARY format: unexpected character {:?}.",
            bad
        )));
    }

    if text.len() % 8 != 0 {
        return Err(TranscodeError::InvalidLength(
            "Binary string length must be multiple of 8.".to_string(),
        ));
    }

    Ok(text
        .as_bytes()
        .chunks(8)
        .map(|group| group.iter().fold(0u8, |acc, &c| (acc << 1) | (c - b'0')))
        .collect())
}

// ========== URL PERCENT-ENCODING ==========

pub fn url_encode(bytes: &[u8]) -> String {
    percent_encode(bytes, URL_ESCAPE_SET).to_string()
}

/// Unescapes `%XX` over raw bytes. A `%` not followed by two hex digits is rejected.
pub fn url_decode(text: &str) -> Result<Vec<u8>> {
    let raw = text.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let valid = raw
                .get(i + 1..i + 3)
                .map(|pair| pair.iter().all(u8::is_ascii_hexdigit))
                .unwrap_or(false);
            if !valid {
                return Err(TranscodeError::MalformedEncoding(format!(
                    "Invalid URL format: bad percent-escape at offset {}.",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(percent_decode_str(text).collect())
}
