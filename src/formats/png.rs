use crate::binary::{bytes_equal, u32_be};
use crate::error::{ProbeError, Result};
use crate::formats::FormatProbe;
use crate::io::ByteSource;
use crate::types::{ColorType, ImageFormat, ImageMetadata};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature bytes left after the dispatcher consumed the first two.
const PNG_SIGNATURE_TAIL: [u8; 6] = [0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature tail, IHDR length and type, and the 13 IHDR data bytes.
const PNG_HEADER_LEN: usize = 27;

pub struct PngProbe;

impl FormatProbe for PngProbe {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn magic(&self) -> [u8; 2] {
        [PNG_SIGNATURE[0], PNG_SIGNATURE[1]]
    }

    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
        let bytes = source.read_exact(PNG_HEADER_LEN)?;

        if !bytes_equal(&bytes, 0, &PNG_SIGNATURE_TAIL, 0, PNG_SIGNATURE_TAIL.len()) {
            return Err(ProbeError::MagicMismatch(ImageFormat::Png));
        }

        let color_type = ColorType::from_png_byte(bytes[23]);

        meta.format = ImageFormat::Png;
        meta.width = Some(u32_be(&bytes, 14));
        meta.height = Some(u32_be(&bytes, 18));
        meta.bits_per_pixel = Some(u32::from(bytes[22]) * color_type.samples_per_pixel());
        meta.color_type = color_type;
        meta.progressive = bytes[26] != 0;

        Ok(())
    }
}
