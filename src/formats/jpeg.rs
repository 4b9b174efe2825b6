//! JPEG segment walker.
//!
//! Walks marker segments from just after SOI and stops at the first frame
//! header, so only the bytes in front of the SOF segment are ever read.

use tracing::{debug, trace};

use crate::binary::{bytes_equal, u16_be};
use crate::error::{ProbeError, Result};
use crate::formats::FormatProbe;
use crate::io::ByteSource;
use crate::types::{ImageFormat, ImageMetadata};

pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

pub const APP0: u16 = 0xFFE0;
pub const APP1: u16 = 0xFFE1;
pub const COM: u16 = 0xFFFE;
pub const DHT: u16 = 0xFFC4;
pub const JPG: u16 = 0xFFC8;

const JFIF_ID: [u8; 5] = *b"JFIF\0";

/// Smallest APP0 length that can hold a JFIF header.
const APP0_MIN_LEN: u16 = 14;
const JFIF_HEADER_LEN: usize = 12;

const UNITS_DPI: u8 = 1;
const UNITS_DPCM: u8 = 2;
const CM_PER_INCH: f64 = 2.54;

/// Precision, height, width and component count of a frame header.
const SOF_HEADER_LEN: usize = 6;

/// SOF markers whose scans are progressive or arithmetic coded.
const PROGRESSIVE_SOF: [u16; 4] = [0xFFC2, 0xFFC6, 0xFFCA, 0xFFCE];

#[inline]
pub fn is_sof_marker(marker: u16) -> bool {
    (0xFFC0..=0xFFCF).contains(&marker) && marker != DHT && marker != JPG
}

#[inline]
pub fn is_progressive_sof(marker: u16) -> bool {
    PROGRESSIVE_SOF.contains(&marker)
}

pub struct JpegProbe;

impl FormatProbe for JpegProbe {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn magic(&self) -> [u8; 2] {
        JPEG_SOI
    }

    fn parse(&self, source: &mut dyn ByteSource, meta: &mut ImageMetadata) -> Result<()> {
        loop {
            let header = source.read_exact(4)?;
            let marker = u16_be(&header, 0);
            let length = u16_be(&header, 2);

            if marker & 0xFF00 != 0xFF00 {
                debug!(marker, "JPEG marker out of sync");
                return Err(malformed("segment does not start with 0xFF"));
            }

            trace!(marker, length, "JPEG segment");

            if marker == APP0 {
                if length < APP0_MIN_LEN {
                    return Err(malformed("APP0 segment too short"));
                }

                let jfif = source.read_exact(JFIF_HEADER_LEN)?;
                if bytes_equal(&JFIF_ID, 0, &jfif, 0, JFIF_ID.len()) {
                    read_jfif_density(&jfif, meta);
                }

                source.skip(u64::from(length - APP0_MIN_LEN))?;
            } else if (marker == APP1 || marker == COM) && length > 2 {
                let text = source.read_exact(usize::from(length - 2))?;
                meta.comments.push(trim_comment(&text));
            } else if is_sof_marker(marker) {
                let frame = source.read_exact(SOF_HEADER_LEN)?;

                meta.bits_per_pixel = Some(u32::from(frame[0]) * u32::from(frame[5]));
                meta.progressive = is_progressive_sof(marker);
                meta.width = Some(u32::from(u16_be(&frame, 3)));
                meta.height = Some(u32::from(u16_be(&frame, 1)));
                meta.format = ImageFormat::Jpeg;

                return Ok(());
            } else {
                if length < 2 {
                    return Err(malformed("segment length below 2"));
                }
                source.skip(u64::from(length - 2))?;
            }
        }
    }
}

/// Reads the X/Y density fields of a JFIF APP0 header.
fn read_jfif_density(jfif: &[u8], meta: &mut ImageMetadata) {
    let x = u16_be(jfif, 8);
    let y = u16_be(jfif, 10);

    match jfif[7] {
        UNITS_DPI => {
            set_physical_width_dpi(meta, u32::from(x));
            set_physical_height_dpi(meta, u32::from(y));
        }
        UNITS_DPCM => {
            set_physical_width_dpi(meta, (f64::from(x) * CM_PER_INCH) as u32);
            set_physical_height_dpi(meta, (f64::from(y) * CM_PER_INCH) as u32);
        }
        _ => {}
    }
}

// Known quirk: these two setters are cross-wired, so X density lands in
// `physical_height_dpi` and Y density in `physical_width_dpi`. Existing
// consumers rely on that mapping.

fn set_physical_width_dpi(meta: &mut ImageMetadata, value: u32) {
    meta.physical_height_dpi = Some(value);
}

fn set_physical_height_dpi(meta: &mut ImageMetadata, value: u32) {
    meta.physical_width_dpi = Some(value);
}

/// Decodes a comment payload, dropping surrounding blanks and NUL padding.
fn trim_comment(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .to_string()
}

fn malformed(reason: &'static str) -> ProbeError {
    ProbeError::structural(ImageFormat::Jpeg, reason)
}
