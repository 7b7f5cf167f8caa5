//! SHA-256 digest helpers for tree construction.
//!
//! Every digest is computed with its own accumulator; no hasher state ever
//! spans two computations. Output is always the lowercase-hex encoding of
//! the raw digest, two characters per byte.

use sha2::{Digest, Sha256};
use std::io::Read;

/// Digests everything a reader yields, in fixed-size chunks.
///
/// The result depends only on the byte sequence, not on how the reader
/// splits it across `read` calls.
pub fn digest_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Digests a string's UTF-8 bytes in one pass.
///
/// Equivalent to [`digest_reader`] over the same bytes.
pub fn digest_str(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
