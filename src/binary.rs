//! Fixed-width integer decoding over already-read header buffers.
//!
//! Callers size their reads before indexing, so these take offsets that are
//! known to be in bounds.

#[inline]
pub fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub fn u16_be(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub fn u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
pub fn u32_be(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Signed little-endian 32-bit, as BMP stores its dimensions.
#[inline]
pub fn i32_le(bytes: &[u8], offset: usize) -> i32 {
    u32_le(bytes, offset) as i32
}

/// Compares `count` bytes of `a` at `offset_a` with `b` at `offset_b`.
///
/// Ranges that run off either slice compare unequal.
pub fn bytes_equal(a: &[u8], offset_a: usize, b: &[u8], offset_b: usize, count: usize) -> bool {
    match (
        a.get(offset_a..offset_a.saturating_add(count)),
        b.get(offset_b..offset_b.saturating_add(count)),
    ) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
