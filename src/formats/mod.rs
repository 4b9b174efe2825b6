//! Per-format header parsers.
//!
//! Each parser is entered with the two magic bytes already consumed by the
//! dispatcher, so every offset below is relative to byte 2 of the file.

pub mod bmp;
pub mod gif;
pub mod jpeg;
pub mod png;
pub mod psd;

use crate::error::Result;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

pub use bmp::BmpProbe;
pub use gif::GifProbe;
pub use jpeg::JpegProbe;
pub use png::PngProbe;
pub use psd::PsdProbe;

/// A header parser for one image format.
pub trait FormatProbe: Send + Sync {
    /// The format this parser commits on success.
    fn format(&self) -> ImageFormat;

    /// The two leading bytes that route a stream to this parser.
    fn magic(&self) -> [u8; 2];

    /// Reads the rest of the header and fills `meta`.
    ///
    /// Returns an error when the stream is not (or not enough of) this
    /// format. Fields may already be written when that happens.
    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()>;
}

/// Dispatch table, in the order prefixes are checked.
pub static PROBES: [&dyn FormatProbe; 5] = [&GifProbe, &PngProbe, &JpegProbe, &BmpProbe, &PsdProbe];

/// Finds the parser registered for a two-byte prefix.
pub fn probe_for_magic(magic: [u8; 2]) -> Option<&'static dyn FormatProbe> {
    PROBES.iter().copied().find(|p| p.magic() == magic)
}
