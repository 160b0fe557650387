//! GIF dimension extraction.
//!
//! The 6-byte signature/version ("GIF87a" or "GIF89a") is followed by the
//! Logical Screen Descriptor, which starts with the canvas width and height
//! as little-endian u16.

use super::descriptor::Dimensions;
use crate::io::read_u16_le_at;

const WIDTH_OFFSET: usize = 6;
const HEIGHT_OFFSET: usize = 8;

/// Shortest window that holds both screen size fields.
pub const MIN_DIMENSION_LEN: usize = 10;

/// Read the logical screen size, or zero if the window is too short.
pub fn dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_u16_le_at(window, WIDTH_OFFSET),
        read_u16_le_at(window, HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => Dimensions::new(u32::from(width), u32::from(height)),
        _ => Dimensions::unknown(),
    }
}
