//! Hand-built image headers shared by the integration tests.
#![allow(dead_code)]

pub fn bmp(width: i32, height: i32, bpp: u16) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&1078u32.to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&54u32.to_le_bytes());
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&bpp.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&1024u32.to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&[0; 8]);
    data
}

/// Bytes the BMP parser needs: magic plus 44.
pub const BMP_REQUIRED_LEN: usize = 46;

pub fn gif_header(version: &[u8; 6], width: u16, height: u16, flags: u8) -> Vec<u8> {
    let mut data = version.to_vec();
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.push(flags);
    data.push(0);
    data.push(0);
    data
}

/// Length-prefixed sub-blocks followed by the zero terminator.
pub fn sub_blocks(payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    for chunk in payload.chunks(255) {
        data.push(chunk.len() as u8);
        data.extend_from_slice(chunk);
    }
    data.push(0);
    data
}

/// Image block as the GIF parser walks it: separator, optional color table
/// sized from the screen flags, code size byte, sub-blocks.
pub fn gif_image(color_table_len: usize, pixels: &[u8]) -> Vec<u8> {
    let mut data = vec![0x2C];
    data.extend(std::iter::repeat_n(0x11, color_table_len));
    data.push(0x02);
    data.extend(sub_blocks(pixels));
    data
}

pub fn gif_extension(payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0x21];
    data.extend(sub_blocks(payload));
    data
}

pub fn jpeg_segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, marker];
    data.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(payload);
    data
}

pub fn jfif_app0(units: u8, x_density: u16, y_density: u16) -> Vec<u8> {
    let mut payload = b"JFIF\0".to_vec();
    payload.extend_from_slice(&[1, 1, units]);
    payload.extend_from_slice(&x_density.to_be_bytes());
    payload.extend_from_slice(&y_density.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    jpeg_segment(0xE0, &payload)
}

/// Frame header prefix as read by the parser; per-component entries are omitted
/// so the fixture ends exactly where the parser stops.
pub fn jpeg_sof(marker: u8, precision: u8, width: u16, height: u16, components: u8) -> Vec<u8> {
    let mut data = vec![0xFF, marker];
    data.extend_from_slice(&(8 + 3 * components as u16).to_be_bytes());
    data.push(precision);
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.push(components);
    data
}

pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    for seg in segments {
        data.extend_from_slice(seg);
    }
    data
}

pub fn png(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
    data
}

pub const PNG_REQUIRED_LEN: usize = 29;

pub fn psd(width: u32, height: u32, channels: u16, depth: u16) -> Vec<u8> {
    let mut data = b"8BPS".to_vec();
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&[0; 6]);
    data.extend_from_slice(&channels.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&depth.to_be_bytes());
    data.extend_from_slice(&3u16.to_be_bytes());
    data
}

pub const PSD_REQUIRED_LEN: usize = 26;
