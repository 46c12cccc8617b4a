//! File format detection.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::IoResult;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Image file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Detects the format of an existing file, magic bytes first, extension second.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let header = read_header(File::open(path)?)?;
        let format = Self::from_magic_bytes(&header);
        if format != Format::Unknown {
            return Ok(format);
        }
        Ok(Self::from_extension(path))
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes(header: &[u8]) -> Self {
        if header.starts_with(&PNG_MAGIC) {
            Format::Png
        } else {
            Format::Unknown
        }
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            _ => Format::Unknown,
        }
    }
}

/// Reads up to the first 8 bytes, retrying short reads.
fn read_header<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut header = Vec::with_capacity(PNG_MAGIC.len());
    reader.take(PNG_MAGIC.len() as u64).read_to_end(&mut header)?;
    Ok(header)
}
