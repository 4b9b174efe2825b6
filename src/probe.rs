use serde::Serialize;
use tracing::debug;

use crate::error::{ProbeError, Result};
use crate::formats::probe_for_magic;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

/// Result of one [`probe`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// Whether a parser accepted the stream.
    pub recognized: bool,
    pub metadata: ImageMetadata,
    /// Bytes consumed from the source, magic prefix included.
    pub bytes_read: u64,
}

/// Sniffs the two-byte magic prefix and runs the matching header parser.
///
/// Never fails: short streams, bad signatures and malformed headers all come
/// back as `recognized == false`, with whatever fields the parser had filled
/// in before giving up.
pub fn probe(source: &mut dyn ByteSource) -> ProbeOutcome {
    let mut metadata = ImageMetadata::new();
    let start = source.position();

    let recognized = match detect(source, &mut metadata) {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "image not recognized");
            false
        }
    };

    ProbeOutcome {
        recognized,
        metadata,
        bytes_read: source.position() - start,
    }
}

fn detect(source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
    let prefix = source.read_exact(2)?;
    let magic = [prefix[0], prefix[1]];

    let Some(parser) = probe_for_magic(magic) else {
        debug!(?magic, "no parser for magic prefix");
        return Err(ProbeError::MagicMismatch(ImageFormat::Unknown));
    };

    debug!(format = %parser.format(), "routing to parser");
    parser.parse(source, meta)
}
