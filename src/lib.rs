//! Image format detection from the first few bytes of a stream.
//!
//! [`probe`] reads a two-byte magic prefix, hands the stream to the BMP, GIF,
//! JPEG, PNG or PSD header parser, and reports dimensions, bit depth and the
//! other header fields without decoding any pixels.

pub mod binary;
mod error;
pub mod formats;
pub mod io;
mod probe;
pub mod resource;
pub mod types;

pub use error::{ProbeError, Result};
pub use formats::FormatProbe;
pub use io::{ByteSource, BytesSource, StreamSource};
pub use probe::{ProbeOutcome, probe};
pub use resource::ImageResource;
pub use types::{ColorType, ImageFormat, ImageMetadata};

/// Probes an in-memory buffer.
pub fn probe_bytes(data: &[u8]) -> ProbeOutcome {
    let mut source = BytesSource::new(data.to_vec());
    probe(&mut source)
}
