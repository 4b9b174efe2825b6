use std::io;

use thiserror::Error;

use crate::types::ImageFormat;

/// Reasons a candidate format was rejected.
///
/// The dispatcher collapses every variant into "not recognized"; the kind is
/// only kept around for logging.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Short read: requested {requested} bytes, got {available}")]
    ShortRead { requested: usize, available: usize },

    #[error("Signature mismatch for {0}")]
    MagicMismatch(ImageFormat),

    #[error("Malformed {format}: {reason}")]
    Structural {
        format: ImageFormat,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ProbeError {
    pub(crate) fn structural(format: ImageFormat, reason: &'static str) -> Self {
        Self::Structural { format, reason }
    }

    /// True when the stream simply ran out before the parser was done.
    pub fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
