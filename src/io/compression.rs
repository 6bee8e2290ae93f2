//! Gzip support for group payloads and compressed uploads.
//!
//! Payload compression must be reproducible: the same CSV bytes always gzip to the same output.
//! The gzip header's modification time is pinned to zero and no file name or comment is
//! recorded, so the only input to the compressed stream is the payload itself.
//!
//! Delimited uploads are sniffed by magic bytes; a gzip stream is inflated before it reaches the
//! CSV parser. Workbooks are never inflated.

use std::borrow::Cow;
#[cfg(feature = "compression-gzip")]
use std::io::{Read, Write};

use crate::error::{Result, SplitError};

/// Leading bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` if `bytes` begins with the gzip signature.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Gzip-compress `bytes` with default settings and a fixed header.
///
/// # Errors
/// Returns [`SplitError::FeatureDisabled`] when built without `compression-gzip`, or an I/O error
/// from the encoder.
#[cfg(feature = "compression-gzip")]
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    use flate2::{Compression, GzBuilder};

    let mut enc = GzBuilder::new()
        .mtime(0)
        .write(Vec::with_capacity(bytes.len() / 2 + 32), Compression::default());
    enc.write_all(bytes)?;
    Ok(enc.finish()?)
}

#[cfg(not(feature = "compression-gzip"))]
pub fn gzip(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(SplitError::FeatureDisabled {
        feature: "compression-gzip",
    })
}

/// Inflate a gzip stream.
///
/// # Errors
/// Returns [`SplitError::Parse`] if the stream is not valid gzip.
#[cfg(feature = "compression-gzip")]
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;

    let mut out = Vec::with_capacity(bytes.len() * 4);
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| SplitError::parse("gzip", e))?;
    Ok(out)
}

#[cfg(not(feature = "compression-gzip"))]
pub fn gunzip(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(SplitError::FeatureDisabled {
        feature: "compression-gzip",
    })
}

/// Pass plain bytes through untouched and inflate gzip-compressed ones.
///
/// # Errors
/// See [`gunzip`].
pub fn decompress_if_gzip(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if is_gzip(bytes) {
        tracing::debug!(compressed_bytes = bytes.len(), "inflating gzip input");
        Ok(Cow::Owned(gunzip(bytes)?))
    } else {
        Ok(Cow::Borrowed(bytes))
    }
}
