//! Caller-side wrapper that owns the byte stream for the length of a probe.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{debug, warn};

use crate::io::StreamSource;
use crate::probe::probe;
use crate::types::ImageMetadata;

pub const ERR_BAD_SIZE: &str = "Bad image size";
pub const ERR_UNRECOGNIZED: &str = "Unrecognized image format";

/// A probed image together with what is known about where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResource {
    pub uri: String,
    /// File stem of `uri`, for display.
    pub name: String,
    /// Total length when the origin reported one, otherwise 0.
    pub size: u64,
    pub mime_type: Option<&'static str>,
    /// Short format code, e.g. `jpg`.
    pub extension: Option<&'static str>,
    pub recognized: bool,
    pub bytes_read: u64,
    pub metadata: ImageMetadata,
}

impl ImageResource {
    /// Opens a local file, probes it and closes it again.
    ///
    /// Failures are recorded in `metadata.error` instead of being returned.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let uri = path.display().to_string();

        match acquire(path) {
            Ok((file, len)) => Self::from_reader(uri, BufReader::new(file), len),
            Err(e) => {
                warn!(uri = %uri, error = %e, "cannot open image");
                Self::failed(uri, 0, format!("{e:#}"))
            }
        }
    }

    /// Probes any reader. The reader is dropped before this returns.
    ///
    /// `known_len` is bookkeeping only; `Some(0)` is rejected up front.
    pub fn from_reader<R: Read>(uri: impl Into<String>, reader: R, known_len: Option<u64>) -> Self {
        let uri = uri.into();
        let size = known_len.unwrap_or(0);

        if known_len == Some(0) {
            return Self::failed(uri, size, ERR_BAD_SIZE.to_string());
        }

        let outcome = {
            let mut source = StreamSource::new(reader);
            probe(&mut source)
        };

        let mut metadata = outcome.metadata;
        if !outcome.recognized {
            metadata.error = Some(ERR_UNRECOGNIZED.to_string());
        }
        debug!(uri = %uri, format = %metadata.format, bytes_read = outcome.bytes_read, "probed");

        Self {
            name: display_name(&uri),
            uri,
            size,
            mime_type: metadata.mime_type(),
            extension: metadata.format.extension(),
            recognized: outcome.recognized,
            bytes_read: outcome.bytes_read,
            metadata,
        }
    }

    fn failed(uri: String, size: u64, error: String) -> Self {
        let metadata = ImageMetadata {
            error: Some(error),
            ..ImageMetadata::default()
        };

        Self {
            name: display_name(&uri),
            uri,
            size,
            mime_type: None,
            extension: None,
            recognized: false,
            bytes_read: 0,
            metadata,
        }
    }

    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.metadata.error.as_deref()
    }
}

/// Opens `path`; the length is only trusted for regular files, since pipes
/// and character devices report 0.
fn acquire(path: &Path) -> anyhow::Result<(File, Option<u64>)> {
    let file =
        File::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    let meta = file
        .metadata()
        .with_context(|| format!("Failed to stat image: {}", path.display()))?;

    if meta.is_dir() {
        bail!("Not a file: {}", path.display());
    }

    let len = meta.is_file().then(|| meta.len());
    Ok((file, len))
}

fn display_name(uri: &str) -> String {
    Path::new(uri)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
