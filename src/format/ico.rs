//! ICO dimension extraction.
//!
//! ```text
//! ICONDIR (6 bytes):       reserved (0), type (1 = icon), image count
//! ICONDIRENTRY (16 bytes): width (1), height (1), colors, reserved, ...
//! ```
//!
//! Only the first directory entry is reported, even when the file carries
//! several sizes. Entry width and height are single bytes where `0` stands
//! for 256.

use super::descriptor::Dimensions;
use crate::io::read_u8_at;

const FIRST_ENTRY_WIDTH_OFFSET: usize = 6;
const FIRST_ENTRY_HEIGHT_OFFSET: usize = 7;

/// Shortest window that holds the first entry's width and height.
pub const MIN_DIMENSION_LEN: usize = 8;

fn entry_size(raw: u8) -> u32 {
    if raw == 0 {
        256
    } else {
        u32::from(raw)
    }
}

/// Read the first directory entry's size. A stored `0` means 256.
pub fn dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_u8_at(window, FIRST_ENTRY_WIDTH_OFFSET),
        read_u8_at(window, FIRST_ENTRY_HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => Dimensions::new(entry_size(width), entry_size(height)),
        _ => Dimensions::unknown(),
    }
}
