//! TIFF and BigTIFF dimension extraction.
//!
//! The image size lives in the first IFD as the ImageWidth (256) and
//! ImageLength (257) tags. The IFD can sit anywhere in the file; we only
//! look inside the header window and report zero dimensions when either tag
//! is out of reach.

mod ifd;
mod parser;
mod tags;

pub use ifd::{Ifd, IfdEntry};
pub use parser::{ByteOrder, TiffHeader, BIGTIFF_HEADER_SIZE, TIFF_HEADER_SIZE};
pub use tags::{FieldType, TiffTag};

use tracing::trace;

use super::descriptor::Dimensions;
use crate::error::TiffError;

/// Extract dimensions from a TIFF header window.
///
/// Both ImageWidth and ImageLength must be found; a single tag is not
/// reported on its own.
pub fn dimensions(window: &[u8]) -> Dimensions {
    match first_ifd_size(window) {
        Ok(Some(size)) => size,
        Ok(None) => {
            trace!(len = window.len(), "TIFF size tags not inside window");
            Dimensions::unknown()
        }
        Err(e) => {
            trace!(error = %e, "TIFF header not usable");
            Dimensions::unknown()
        }
    }
}

fn first_ifd_size(window: &[u8]) -> Result<Option<Dimensions>, TiffError> {
    let header = TiffHeader::parse(window)?;
    let ifd = Ifd::parse_first(window, &header)?;

    let width = ifd.get_u32(TiffTag::ImageWidth);
    let height = ifd.get_u32(TiffTag::ImageLength);

    Ok(width.zip(height).map(|(w, h)| Dimensions::new(w, h)))
}
