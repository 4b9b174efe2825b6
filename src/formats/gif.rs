use tracing::{debug, trace};

use crate::binary::{bytes_equal, u16_le};
use crate::error::{ProbeError, Result};
use crate::formats::FormatProbe;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

pub const GIF_MAGIC: [u8; 2] = *b"GI";

/// Signature tails following "GI".
pub const GIF87A_TAIL: [u8; 4] = *b"F87a";
pub const GIF89A_TAIL: [u8; 4] = *b"F89a";

/// Signature tail plus the 7-byte logical screen descriptor.
const GIF_HEADER_LEN: usize = 11;

const FLAGS_OFFSET: usize = 8;
const COLOR_TABLE_FLAG: u8 = 0x80;
const INTERLACE_FLAG: u8 = 0x02;

const IMAGE_SEPARATOR: u8 = 0x2C;
const EXTENSION_INTRODUCER: u8 = 0x21;
const TRAILER: u8 = 0x3B;

pub struct GifProbe;

impl FormatProbe for GifProbe {
    fn format(&self) -> ImageFormat {
        ImageFormat::Gif
    }

    fn magic(&self) -> [u8; 2] {
        GIF_MAGIC
    }

    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
        let bytes = source.read_exact(GIF_HEADER_LEN)?;

        if !bytes_equal(&bytes, 0, &GIF89A_TAIL, 0, 4)
            && !bytes_equal(&bytes, 0, &GIF87A_TAIL, 0, 4)
        {
            return Err(ProbeError::MagicMismatch(ImageFormat::Gif));
        }

        meta.width = Some(u32::from(u16_le(&bytes, 4)));
        meta.height = Some(u32::from(u16_le(&bytes, 6)));

        let flags = bytes[FLAGS_OFFSET];
        meta.bits_per_pixel = Some(u32::from((flags >> 4) & 0x07) + 1);
        meta.progressive = flags & INTERLACE_FLAG != 0;

        if flags & COLOR_TABLE_FLAG != 0 {
            source.skip(color_table_len(u32::from(flags & 0x07) + 1))?;
        }

        meta.number_of_images = 0;

        loop {
            let Some(block) = source.read_byte()? else {
                return Err(ProbeError::ShortRead {
                    requested: 1,
                    available: 0,
                });
            };

            match block {
                IMAGE_SEPARATOR => {
                    // Known quirk: the local descriptor is not read. Its color
                    // table size comes from the logical screen flags instead.
                    let local_bpp = u32::from(flags & 0x07) + 1;
                    if meta.bits_per_pixel.is_none_or(|bpp| local_bpp > bpp) {
                        meta.bits_per_pixel = Some(local_bpp);
                    }
                    if flags & COLOR_TABLE_FLAG != 0 {
                        source.skip(color_table_len(local_bpp))?;
                    }

                    // LZW minimum code size
                    source.skip(1)?;
                    skip_sub_blocks(source)?;

                    meta.number_of_images += 1;
                    trace!(frame = meta.number_of_images, "GIF image block");
                }
                EXTENSION_INTRODUCER => skip_sub_blocks(source)?,
                TRAILER => break,
                other => {
                    debug!(block = other, "unexpected GIF block type");
                    return Err(malformed("unknown block type"));
                }
            }
        }

        meta.format = ImageFormat::Gif;
        Ok(())
    }
}

/// Size in bytes of a color table with `2^bits` RGB entries.
#[inline]
fn color_table_len(bits: u32) -> u64 {
    (1u64 << bits) * 3
}

/// Skips a chain of length-prefixed sub-blocks up to its zero terminator.
fn skip_sub_blocks(source: &mut dyn ByteSource) -> Result<()> {
    loop {
        match source.read_byte()? {
            Some(0) => return Ok(()),
            Some(len) => source.skip(u64::from(len))?,
            None => {
                return Err(ProbeError::ShortRead {
                    requested: 1,
                    available: 0,
                });
            }
        }
    }
}

fn malformed(reason: &'static str) -> ProbeError {
    ProbeError::structural(ImageFormat::Gif, reason)
}
