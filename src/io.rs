//! Forward-only byte cursors the format parsers read from.
//!
//! Sources never seek backwards and never need to know their total length,
//! so a half-downloaded HTTP body and a local file look the same to the
//! parsers.

use std::io::{self, Read};

use bytes::{Buf, Bytes};

use crate::error::{ProbeError, Result};

/// Sequential byte cursor over an image payload.
pub trait ByteSource {
    /// Reads exactly `n` bytes.
    ///
    /// Fails with [`ProbeError::ShortRead`] if the source ends first; the
    /// bytes that were available are consumed either way.
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Advances the cursor by `n` bytes without returning them.
    fn skip(&mut self, n: u64) -> Result<()>;

    /// Number of bytes consumed so far.
    fn position(&self) -> u64;

    /// Reads a single byte, `Ok(None)` at end of stream.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.read_exact(1) {
            Ok(bytes) => Ok(bytes.first().copied()),
            Err(ProbeError::ShortRead { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

const SKIP_CHUNK: usize = 8 * 1024;

/// [`ByteSource`] over any [`Read`]; skips are discard-reads.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    position: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let mut filled = 0;

        while filled < n {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(k) => filled += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position += filled as u64;
                    return Err(e.into());
                }
            }
        }

        self.position += filled as u64;

        if filled < n {
            return Err(ProbeError::ShortRead {
                requested: n,
                available: filled,
            });
        }

        Ok(buf)
    }

    fn skip(&mut self, n: u64) -> Result<()> {
        let mut scratch = [0u8; SKIP_CHUNK];
        let mut skipped = 0u64;

        while skipped < n {
            let want = (n - skipped).min(SKIP_CHUNK as u64) as usize;
            match self.inner.read(&mut scratch[..want]) {
                Ok(0) => break,
                Ok(k) => {
                    skipped += k as u64;
                    self.position += k as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if skipped < n {
            return Err(ProbeError::ShortRead {
                requested: n as usize,
                available: skipped as usize,
            });
        }

        Ok(())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}

/// In-memory [`ByteSource`], used for already-buffered payloads.
#[derive(Debug, Clone)]
pub struct BytesSource {
    buf: Bytes,
    position: u64,
}

impl BytesSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            buf: data.into(),
            position: 0,
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn drain(&mut self, n: usize) -> usize {
        let take = n.min(self.buf.remaining());
        self.buf.advance(take);
        self.position += take as u64;
        take
    }
}

impl From<&'static [u8]> for BytesSource {
    fn from(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl ByteSource for BytesSource {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.buf.remaining() < n {
            let available = self.drain(n);
            return Err(ProbeError::ShortRead {
                requested: n,
                available,
            });
        }

        let chunk = self.buf.copy_to_bytes(n);
        self.position += n as u64;
        Ok(chunk.to_vec())
    }

    fn skip(&mut self, n: u64) -> Result<()> {
        let want = usize::try_from(n).unwrap_or(usize::MAX);
        let skipped = self.drain(want);

        if skipped < want {
            return Err(ProbeError::ShortRead {
                requested: want,
                available: skipped,
            });
        }

        Ok(())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}
