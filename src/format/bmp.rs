//! BMP dimension extraction.
//!
//! ```text
//! Bytes 0-13:  BITMAPFILEHEADER ("BM", file size, reserved, pixel offset)
//! Bytes 14-17: DIB header size
//! Bytes 18-21: width  (i32 LE; u16 LE in a 12-byte OS/2 core header)
//! Bytes 22-25: height (i32 LE; u16 LE at 20 in a core header)
//! ```
//!
//! A negative height marks a top-down bitmap. Only the magnitude is
//! reported, so a top-down and a bottom-up bitmap of the same size produce
//! the same dimensions.

use super::descriptor::Dimensions;
use crate::io::{read_i32_le_at, read_u16_le_at, read_u32_le_at};

const DIB_HEADER_SIZE_OFFSET: usize = 14;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const CORE_HEIGHT_OFFSET: usize = 20;

/// DIB header size of the OS/2 BITMAPCOREHEADER.
const CORE_HEADER_SIZE: u32 = 12;

/// Shortest window that holds both BITMAPINFOHEADER size fields.
pub const MIN_DIMENSION_LEN: usize = 26;

/// Shortest window that holds both BITMAPCOREHEADER size fields.
const MIN_CORE_DIMENSION_LEN: usize = 22;

/// Read the DIB header size fields. Negative values report their magnitude.
pub fn dimensions(window: &[u8]) -> Dimensions {
    if read_u32_le_at(window, DIB_HEADER_SIZE_OFFSET) == Some(CORE_HEADER_SIZE) {
        return core_dimensions(window);
    }

    if window.len() < MIN_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_i32_le_at(window, WIDTH_OFFSET),
        read_i32_le_at(window, HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => {
            Dimensions::new(width.unsigned_abs(), height.unsigned_abs())
        }
        _ => Dimensions::unknown(),
    }
}

fn core_dimensions(window: &[u8]) -> Dimensions {
    if window.len() < MIN_CORE_DIMENSION_LEN {
        return Dimensions::unknown();
    }

    match (
        read_u16_le_at(window, WIDTH_OFFSET),
        read_u16_le_at(window, CORE_HEIGHT_OFFSET),
    ) {
        (Some(width), Some(height)) => Dimensions::new(u32::from(width), u32::from(height)),
        _ => Dimensions::unknown(),
    }
}
