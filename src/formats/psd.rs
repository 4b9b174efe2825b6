use tracing::trace;

use crate::binary::{bytes_equal, u16_be, u32_be};
use crate::error::{ProbeError, Result};
use crate::formats::FormatProbe;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

pub const PSD_MAGIC: [u8; 2] = *b"8B";

/// "PS", the second half of the "8BPS" signature.
const PSD_SIGNATURE_TAIL: [u8; 2] = *b"PS";

const PSD_HEADER_LEN: usize = 24;
const MAX_BITS_PER_PIXEL: u32 = 64;

pub struct PsdProbe;

impl FormatProbe for PsdProbe {
    fn format(&self) -> ImageFormat {
        ImageFormat::Psd
    }

    fn magic(&self) -> [u8; 2] {
        PSD_MAGIC
    }

    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
        let bytes = source.read_exact(PSD_HEADER_LEN)?;

        if !bytes_equal(&bytes, 0, &PSD_SIGNATURE_TAIL, 0, 2) {
            return Err(ProbeError::MagicMismatch(ImageFormat::Psd));
        }

        let channels = u32::from(u16_be(&bytes, 10));
        let depth = u32::from(u16_be(&bytes, 20));
        let width = u32_be(&bytes, 16);
        let height = u32_be(&bytes, 12);
        let bpp = channels * depth;
        trace!(channels, depth, width, height, "PSD header");

        meta.width = Some(width);
        meta.height = Some(height);
        meta.bits_per_pixel = Some(bpp);

        if width < 1 || height < 1 {
            return Err(malformed("non-positive dimensions"));
        }

        if bpp == 0 || bpp > MAX_BITS_PER_PIXEL {
            return Err(malformed("bits per pixel out of range"));
        }

        meta.format = ImageFormat::Psd;
        Ok(())
    }
}

fn malformed(reason: &'static str) -> ProbeError {
    ProbeError::structural(ImageFormat::Psd, reason)
}
