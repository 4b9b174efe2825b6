use tracing::trace;

use crate::binary::{i32_le, u16_le};
use crate::error::{ProbeError, Result};
use crate::formats::FormatProbe;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

pub const BMP_MAGIC: [u8; 2] = *b"BM";

/// Rest of the 14-byte file header plus the start of the DIB header.
const BMP_HEADER_LEN: usize = 44;

const VALID_BIT_DEPTHS: [u32; 6] = [1, 4, 8, 16, 24, 32];

pub struct BmpProbe;

impl FormatProbe for BmpProbe {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn magic(&self) -> [u8; 2] {
        BMP_MAGIC
    }

    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
        let bytes = source.read_exact(BMP_HEADER_LEN)?;

        // Top-down bitmaps store a negative height and are rejected here.
        let width = i32_le(&bytes, 16);
        let height = i32_le(&bytes, 20);
        trace!(width, height, "BMP DIB dimensions");

        if width < 1 || height < 1 {
            return Err(malformed("non-positive dimensions"));
        }

        meta.width = Some(width as u32);
        meta.height = Some(height as u32);

        let bpp = u32::from(u16_le(&bytes, 26));
        meta.bits_per_pixel = Some(bpp);

        if !VALID_BIT_DEPTHS.contains(&bpp) {
            return Err(malformed("unsupported bit depth"));
        }

        meta.format = ImageFormat::Bmp;
        Ok(())
    }
}

fn malformed(reason: &'static str) -> ProbeError {
    ProbeError::structural(ImageFormat::Bmp, reason)
}
