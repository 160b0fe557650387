//! PNG dimension extraction.
//!
//! ```text
//! Bytes 0-7:   signature (89 50 4E 47 0D 0A 1A 0A)
//! Bytes 8-11:  IHDR chunk length
//! Bytes 12-15: "IHDR"
//! Bytes 16-19: width (big-endian)
//! Bytes 20-23: height (big-endian)
//! ```
//!
//! IHDR must be the first chunk in a conforming file, so its fields sit at
//! fixed offsets.

use super::descriptor::Dimensions;
use crate::io::read_u32_be_at;

const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;

/// Shortest window that holds both IHDR size fields.
pub const MIN_DIMENSION_LEN: usize = 24;

/// Read width and height from the IHDR chunk, or zero if the window is too short.
pub fn dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_u32_be_at(window, WIDTH_OFFSET),
        read_u32_be_at(window, HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => Dimensions::new(width, height),
        _ => Dimensions::unknown(),
    }
}
