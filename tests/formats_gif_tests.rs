mod common;

use common::{gif_extension, gif_header, gif_image, sub_blocks};
use fastimage::{ImageFormat, probe_bytes};

const TRAILER: u8 = 0x3B;

/// Screen flags: color resolution 7, no global table, not interlaced.
const PLAIN_FLAGS: u8 = 0x70;

fn animated(frames: usize) -> Vec<u8> {
    let mut data = gif_header(b"GIF89a", 320, 200, PLAIN_FLAGS);
    data.extend(gif_extension(b"NETSCAPE2.0"));
    for i in 0..frames {
        data.extend(gif_extension(&[0x04, 0x00, 0x0A, 0x00]));
        data.extend(gif_image(0, &vec![i as u8; 300]));
    }
    data.push(TRAILER);
    data
}

#[test]
fn test_gif_single_frame() {
    let outcome = probe_bytes(&animated(1));
    assert!(outcome.recognized);
    let meta = outcome.metadata;
    assert_eq!(meta.format, ImageFormat::Gif);
    assert_eq!(meta.dimensions(), Some((320, 200)));
    assert_eq!(meta.bits_per_pixel, Some(8));
    assert_eq!(meta.number_of_images, 1);
    assert!(!meta.progressive);
}

#[test]
fn test_gif_counts_frames() {
    let outcome = probe_bytes(&animated(3));
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.number_of_images, 3);
}

#[test]
fn test_gif_consumes_through_trailer() {
    let mut data = animated(2);
    let len = data.len() as u64;
    data.extend_from_slice(b"trailing garbage");
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.bytes_read, len);
}

#[test]
fn test_gif87a_accepted() {
    let mut data = gif_header(b"GIF87a", 1, 1, PLAIN_FLAGS);
    data.extend(gif_image(0, &[0]));
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.dimensions(), Some((1, 1)));
}

#[test]
fn test_gif_without_frames() {
    let mut data = gif_header(b"GIF89a", 8, 8, PLAIN_FLAGS);
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.number_of_images, 0);
}

#[test]
fn test_gif_unknown_version_rejected() {
    let mut data = gif_header(b"GIF88a", 8, 8, PLAIN_FLAGS);
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(!outcome.recognized);
    assert_eq!(outcome.metadata.width, None);
}

#[test]
fn test_gif_interlace_flag() {
    let mut data = gif_header(b"GIF89a", 8, 8, PLAIN_FLAGS | 0x02);
    data.push(TRAILER);
    assert!(probe_bytes(&data).metadata.progressive);
}

#[test]
fn test_gif_global_color_table_skipped() {
    // 0xF1: global table of 2^2 entries, color resolution 7
    let mut data = gif_header(b"GIF89a", 4, 4, 0xF1);
    data.extend_from_slice(&[0xEE; 12]);
    data.extend(gif_image(12, &[1, 2, 3]));
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.bits_per_pixel, Some(8));
    assert_eq!(outcome.metadata.number_of_images, 1);
}

#[test]
fn test_gif_image_block_raises_depth_from_screen_flags() {
    // 0x83: global table of 2^4 entries, color resolution 0
    let mut data = gif_header(b"GIF89a", 4, 4, 0x83);
    data.extend_from_slice(&[0xEE; 48]);
    data.extend(gif_image(48, &[1, 2, 3]));
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.bits_per_pixel, Some(4));
}

#[test]
fn test_gif_truncated_sub_block_keeps_screen_fields() {
    let mut data = gif_header(b"GIF89a", 10, 20, PLAIN_FLAGS);
    data.extend_from_slice(&[0x2C, 0x02, 0x05, 0xAA, 0xBB]);
    let outcome = probe_bytes(&data);
    assert!(!outcome.recognized);
    let meta = outcome.metadata;
    assert_eq!(meta.format, ImageFormat::Unknown);
    assert_eq!(meta.dimensions(), Some((10, 20)));
    assert_eq!(meta.bits_per_pixel, Some(8));
}

#[test]
fn test_gif_missing_terminator_rejected() {
    let mut data = gif_header(b"GIF89a", 10, 20, PLAIN_FLAGS);
    data.push(0x21);
    data.extend_from_slice(&[0x03, 1, 2, 3]);
    assert!(!probe_bytes(&data).recognized);
}

#[test]
fn test_gif_missing_trailer_rejected() {
    let mut data = gif_header(b"GIF89a", 10, 20, PLAIN_FLAGS);
    data.extend(gif_image(0, &[9; 10]));
    let outcome = probe_bytes(&data);
    assert!(!outcome.recognized);
    assert_eq!(outcome.metadata.number_of_images, 1);
}

#[test]
fn test_gif_unknown_block_type_rejected() {
    let mut data = gif_header(b"GIF89a", 10, 20, PLAIN_FLAGS);
    data.push(0x00);
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(!outcome.recognized);
    assert_eq!(outcome.metadata.dimensions(), Some((10, 20)));
}

#[test]
fn test_gif_extension_payload_ignored() {
    let mut data = gif_header(b"GIF89a", 2, 2, PLAIN_FLAGS);
    data.push(0x21);
    data.extend(sub_blocks(&[0x2C; 600]));
    data.push(TRAILER);
    let outcome = probe_bytes(&data);
    assert!(outcome.recognized);
    assert_eq!(outcome.metadata.number_of_images, 0);
}

#[test]
fn test_gif_every_prefix_rejected() {
    let data = animated(2);
    for len in 0..data.len() {
        assert!(
            !probe_bytes(&data[..len]).recognized,
            "prefix of {} bytes accepted",
            len
        );
    }
}
