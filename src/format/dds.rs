//! DirectDraw Surface dimension extraction.
//!
//! ```text
//! Bytes 0-3:   "DDS " (0x20534444 little-endian)
//! Bytes 4-7:   header size (124)
//! Bytes 8-11:  flags
//! Bytes 12-15: height (little-endian)
//! Bytes 16-19: width (little-endian)
//! ```

use super::descriptor::Dimensions;
use crate::io::read_u32_le_at;

const HEIGHT_OFFSET: usize = 12;
const WIDTH_OFFSET: usize = 16;

/// Shortest window that holds both size fields.
pub const MIN_DIMENSION_LEN: usize = 20;

/// Read the DDS_HEADER height and width fields, or zero if the window is too short.
pub fn dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_u32_le_at(window, WIDTH_OFFSET),
        read_u32_le_at(window, HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => Dimensions::new(width, height),
        _ => Dimensions::unknown(),
    }
}
