//! Photoshop (PSD/PSB) dimension extraction.
//!
//! ```text
//! Bytes 0-3:   "8BPS"
//! Bytes 4-5:   version
//! Bytes 6-11:  reserved
//! Bytes 12-13: channel count
//! Bytes 14-17: height (big-endian)
//! Bytes 18-21: width (big-endian)
//! ```

use super::descriptor::Dimensions;
use crate::io::read_u32_be_at;

const HEIGHT_OFFSET: usize = 14;
const WIDTH_OFFSET: usize = 18;

/// Shortest window that holds both size fields.
pub const MIN_DIMENSION_LEN: usize = 22;

/// Read the header's height and width fields, or zero if the window is too short.
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
