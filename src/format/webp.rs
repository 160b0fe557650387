//! WebP dimension extraction.
//!
//! A WebP file is a RIFF container: `"RIFF"`, a u32 size, `"WEBP"`, then the
//! first chunk's FourCC at offset 12 and its size at 16. The chunk payload
//! starts at 20. Three first-chunk layouts are understood:
//!
//! - `VP8L` (lossless): signature byte `0x2F` at 20, then width-1 and
//!   height-1 packed as two 14-bit little-endian fields starting at 21.
//! - `VP8X` (extended): flags at 20, canvas width-1 and height-1 as 24-bit
//!   little-endian fields at 24 and 27.
//! - anything else is treated as a lossy `VP8` keyframe: start code
//!   `9D 01 2A` at 23, then 14-bit width and height (top two bits are the
//!   scale) as little-endian u16 at 26 and 28. No start code, no dimensions.

use tracing::trace;

use super::descriptor::Dimensions;
use crate::io::{read_u16_le_at, read_u24_le_at, read_u8_at};

const CHUNK_FOURCC_OFFSET: usize = 12;

const VP8L: &[u8; 4] = b"VP8L";
const VP8X: &[u8; 4] = b"VP8X";

/// First byte of every lossless bitstream.
const VP8L_SIGNATURE: u8 = 0x2F;
const VP8L_SIGNATURE_OFFSET: usize = 20;
const VP8L_BITS_OFFSET: usize = 21;

const VP8X_WIDTH_OFFSET: usize = 24;
const VP8X_HEIGHT_OFFSET: usize = 27;

/// Keyframe start code in a lossy VP8 bitstream.
const VP8_START_CODE: [u8; 3] = [0x9D, 0x01, 0x2A];
const VP8_START_CODE_OFFSET: usize = 23;
const VP8_WIDTH_OFFSET: usize = 26;
const VP8_HEIGHT_OFFSET: usize = 28;
const VP8_DIMENSION_MASK: u16 = 0x3FFF;

/// Shortest window that covers every sub-format's size fields.
pub const MIN_DIMENSION_LEN: usize = 30;

/// Read the canvas size from the first chunk (`VP8L`, `VP8X` or `VP8`).
pub fn dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    let fourcc = window.get(CHUNK_FOURCC_OFFSET..CHUNK_FOURCC_OFFSET + 4);
    let size = match fourcc {
        Some(f) if f == VP8L => lossless(window),
        Some(f) if f == VP8X => extended(window),
        _ => lossy(window),
    };

    size.unwrap_or_else(|| {
        trace!(fourcc = ?fourcc, "WebP size fields not found");
        Dimensions::unknown()
    })
}

fn lossless(window: &[u8]) -> Option<Dimensions> {
    if read_u8_at(window, VP8L_SIGNATURE_OFFSET)? != VP8L_SIGNATURE {
        return None;
    }

    let b0 = u32::from(read_u8_at(window, VP8L_BITS_OFFSET)?);
    let b1 = u32::from(read_u8_at(window, VP8L_BITS_OFFSET + 1)?);
    let b2 = u32::from(read_u8_at(window, VP8L_BITS_OFFSET + 2)?);
    let b3 = u32::from(read_u8_at(window, VP8L_BITS_OFFSET + 3)?);

    // 14 bits of width-1, then 14 bits of height-1, LSB first
    let width = 1 + (((b1 & 0x3F) << 8) | b0);
    let height = 1 + (((b3 & 0x0F) << 10) | (b2 << 2) | ((b1 & 0xC0) >> 6));

    Some(Dimensions::new(width, height))
}

fn extended(window: &[u8]) -> Option<Dimensions> {
    let width = read_u24_le_at(window, VP8X_WIDTH_OFFSET)? + 1;
    let height = read_u24_le_at(window, VP8X_HEIGHT_OFFSET)? + 1;
    Some(Dimensions::new(width, height))
}

fn lossy(window: &[u8]) -> Option<Dimensions> {
    let start_code = window.get(VP8_START_CODE_OFFSET..VP8_START_CODE_OFFSET + 3)?;
    if start_code != VP8_START_CODE {
        return None;
    }

    let width = read_u16_le_at(window, VP8_WIDTH_OFFSET)? & VP8_DIMENSION_MASK;
    let height = read_u16_le_at(window, VP8_HEIGHT_OFFSET)? & VP8_DIMENSION_MASK;
    Some(Dimensions::new(u32::from(width), u32::from(height)))
}
