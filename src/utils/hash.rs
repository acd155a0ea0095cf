//! MD5 content hashing.
//!
//! Hashed filenames must stay stable across tool versions, so the digest is
//! MD5 rendered as lowercase hex and cut to the requested length.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let hex = hash::compute(b"body{}");        // -> 32 hex chars
//! let fp = hash::fingerprint(b"body{}", 8);  // -> "a1b2c3d4"
//! ```

use md5::{Digest, Md5};
use std::io::{self, Read};

/// Shortest fingerprint ever produced.
pub const MIN_LEN: usize = 8;

/// Length of a full MD5 digest in hex.
pub const MAX_LEN: usize = 32;

/// Effective fingerprint length for a configured length.
///
/// Never shorter than [`MIN_LEN`]; asking for more than a full digest yields
/// the full digest.
#[inline]
pub const fn effective_len(configured: usize) -> usize {
    let len = if configured < MIN_LEN { MIN_LEN } else { configured };
    if len > MAX_LEN { MAX_LEN } else { len }
}

/// Compute the full MD5 digest of byte data as hex.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    hex::encode(Md5::digest(data.as_ref()))
}

/// Compute the full MD5 digest from a reader (streaming, for large files).
pub fn compute_reader(mut reader: impl Read) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute the digest and cut it to `effective_len(len)` hex chars.
///
/// Useful for cache-busting filenames (e.g. `style.a1b2c3d4.css`).
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T, len: usize) -> String {
    truncate(compute(value), len)
}

/// Cut a full hex digest to `effective_len(len)` chars.
#[inline]
pub fn truncate(mut digest: String, len: usize) -> String {
    digest.truncate(effective_len(len).min(digest.len()));
    digest
}
