//! JPEG dimension extraction.
//!
//! A JPEG stream is a sequence of marker segments. Every segment after SOI is
//! `FF xx` followed by a big-endian length that counts itself but not the
//! marker. The frame header (SOF) carries the image size:
//!
//! ```text
//! FF C0 | len (2) | precision (1) | height (2) | width (2) | ...
//! ```
//!
//! We walk segment lengths from the first marker after SOI until we hit a
//! baseline or progressive SOF, or until the next read would leave the window.

use tracing::trace;

use super::descriptor::Dimensions;
use crate::io::{read_u16_be_at, read_u8_at};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Start Of Frame (baseline DCT) marker
pub const SOF0: [u8; 2] = [0xFF, 0xC0];

/// Start Of Frame (progressive DCT) marker
pub const SOF2: [u8; 2] = [0xFF, 0xC2];

/// Offset of the first segment's length field (after SOI and the first marker).
const FIRST_SEGMENT_LENGTH_OFFSET: usize = 4;

/// Shortest window that reaches the first segment length.
pub const MIN_DIMENSION_LEN: usize = 6;

/// SOF segments shorter than this cannot hold precision, height and width.
const MIN_SOF_LENGTH: u16 = 8;

/// Distance from an SOF marker to its height field.
const SOF_HEIGHT_OFFSET: usize = 5;

/// Distance from an SOF marker to its width field.
const SOF_WIDTH_OFFSET: usize = 7;

fn is_frame_marker(marker: [u8; 2]) -> bool {
    marker == SOF0 || marker == SOF2
}

/// Extract dimensions from a JPEG header window.
///
/// Returns zero dimensions if the window ends before an SOF segment, or if a
/// segment length is malformed.
pub fn dimensions(window: &[u8]) -> Dimensions {
    frame_size(window).unwrap_or_else(|| {
        trace!(len = window.len(), "no JPEG frame header inside window");
        Dimensions::unknown()
    })
}

fn frame_size(window: &[u8]) -> Option<Dimensions> {
    if window.len() < MIN_DIMENSION_LEN {
        return None;
    }

    // `pos` always points at a segment's length field
    let mut pos = FIRST_SEGMENT_LENGTH_OFFSET;
    let mut length = read_u16_be_at(window, pos)?;

    loop {
        if length < 2 {
            return None;
        }

        // Jump to the next marker
        let marker_pos = pos.checked_add(usize::from(length))?;
        let marker = [read_u8_at(window, marker_pos)?, read_u8_at(window, marker_pos + 1)?];
        if marker[0] != 0xFF {
            return None;
        }

        pos = marker_pos + 2;
        length = read_u16_be_at(window, pos)?;

        if is_frame_marker(marker) && length >= MIN_SOF_LENGTH {
            let height = read_u16_be_at(window, marker_pos + SOF_HEIGHT_OFFSET)?;
            let width = read_u16_be_at(window, marker_pos + SOF_WIDTH_OFFSET)?;
            return Some(Dimensions::new(u32::from(width), u32::from(height)));
        }
    }
}
