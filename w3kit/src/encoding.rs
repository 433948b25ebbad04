//! BOM-aware text loading for string-table files.
//!
//! Decoded tables come out of the external tool as UTF-8, but hand-edited
//! files routinely arrive as UTF-16 with a byte-order mark. Detection looks
//! at the leading bytes only; anything without a known signature is read as
//! plain UTF-8.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::error::Result;

/// Encoding indicated by the leading byte-order mark, falling back to UTF-8.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .unwrap_or(UTF_8)
}

/// Reads a file into a `String`, honoring UTF-16 LE/BE and UTF-8 signatures.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let encoding = detect(&bytes);
    if encoding != UTF_8 {
        debug!(path = %path.display(), encoding = encoding.name(), "detected byte-order mark");
    }
    // decode() strips the BOM itself and falls back to UTF-8 when none matches.
    let (text, _, _) = UTF_8.decode(&bytes);
    Ok(text.into_owned())
}
