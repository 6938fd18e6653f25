//! One-way content digests, rendered as lowercase hex.

use md5::{Digest, Md5};
use sha2::Sha256;

pub fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_constants() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic_and_distinct() {
        assert_eq!(sha256_hex(b"image"), sha256_hex(b"image"));
        assert_ne!(sha256_hex(b"image-a"), sha256_hex(b"image-b"));
        assert_ne!(md5_hex(b"image-a"), md5_hex(b"image-b"));
        assert_eq!(md5_hex(b"x").len(), 32);
        assert_eq!(sha256_hex(b"x").len(), 64);
    }
}
