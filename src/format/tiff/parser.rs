//! TIFF header parsing inside a header window.
//!
//! ## Classic TIFF (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! ## BigTIFF (16 bytes)
//! ```text
//! Bytes 0-1: Byte order
//! Bytes 2-3: Version (43 = 0x002B)
//! Bytes 4-5: Offset byte size (must be 8)
//! Bytes 6-7: Reserved
//! Bytes 8-15: Offset to first IFD (8 bytes)
//! ```

use crate::error::TiffError;
use crate::io::{
    read_u16_be_at, read_u16_le_at, read_u32_be_at, read_u32_le_at, read_u64_be_at,
    read_u64_le_at,
};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Version number for BigTIFF
const VERSION_BIGTIFF: u16 = 43;

/// Size of classic TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of BigTIFF header in bytes
pub const BIGTIFF_HEADER_SIZE: usize = 16;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) declared by a TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 at `offset`, or `None` past the end of `bytes`.
    #[inline]
    pub fn read_u16(self, bytes: &[u8], offset: usize) -> Option<u16> {
        match self {
            ByteOrder::LittleEndian => read_u16_le_at(bytes, offset),
            ByteOrder::BigEndian => read_u16_be_at(bytes, offset),
        }
    }

    /// Read a u32 at `offset`, or `None` past the end of `bytes`.
    #[inline]
    pub fn read_u32(self, bytes: &[u8], offset: usize) -> Option<u32> {
        match self {
            ByteOrder::LittleEndian => read_u32_le_at(bytes, offset),
            ByteOrder::BigEndian => read_u32_be_at(bytes, offset),
        }
    }

    /// Read a u64 at `offset`, or `None` past the end of `bytes`.
    #[inline]
    pub fn read_u64(self, bytes: &[u8], offset: usize) -> Option<u64> {
        match self {
            ByteOrder::LittleEndian => read_u64_le_at(bytes, offset),
            ByteOrder::BigEndian => read_u64_be_at(bytes, offset),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the file
    pub byte_order: ByteOrder,

    /// Whether this is a BigTIFF file (64-bit offsets)
    pub is_bigtiff: bool,

    /// Offset to the first IFD in the file
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `window`.
    ///
    /// # Errors
    /// - `WindowTooSmall` if the header itself is cut off
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42 or 43
    /// - `InvalidBigTiffOffsetSize` if BigTIFF offset size is not 8
    pub fn parse(window: &[u8]) -> Result<Self, TiffError> {
        let too_small = |required: usize| TiffError::WindowTooSmall {
            required,
            actual: window.len(),
        };

        if window.len() < TIFF_HEADER_SIZE {
            return Err(too_small(TIFF_HEADER_SIZE));
        }

        // Checked for the literal byte patterns, so endianness is irrelevant here
        let magic = read_u16_le_at(window, 0).ok_or_else(|| too_small(2))?;
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic)),
        };

        let version = byte_order
            .read_u16(window, 2)
            .ok_or_else(|| too_small(4))?;

        match version {
            VERSION_TIFF => {
                let first_ifd_offset = byte_order
                    .read_u32(window, 4)
                    .ok_or_else(|| too_small(TIFF_HEADER_SIZE))?;

                Ok(TiffHeader {
                    byte_order,
                    is_bigtiff: false,
                    first_ifd_offset: u64::from(first_ifd_offset),
                })
            }
            VERSION_BIGTIFF => {
                if window.len() < BIGTIFF_HEADER_SIZE {
                    return Err(too_small(BIGTIFF_HEADER_SIZE));
                }

                let offset_size = byte_order
                    .read_u16(window, 4)
                    .ok_or_else(|| too_small(6))?;
                if offset_size != 8 {
                    return Err(TiffError::InvalidBigTiffOffsetSize(offset_size));
                }

                let first_ifd_offset = byte_order
                    .read_u64(window, 8)
                    .ok_or_else(|| too_small(BIGTIFF_HEADER_SIZE))?;

                Ok(TiffHeader {
                    byte_order,
                    is_bigtiff: true,
                    first_ifd_offset,
                })
            }
            _ => Err(TiffError::InvalidVersion(version)),
        }
    }

    /// Size of an IFD entry in bytes.
    ///
    /// Classic TIFF: 12 bytes (2 tag + 2 type + 4 count + 4 value/offset)
    /// BigTIFF: 20 bytes (2 tag + 2 type + 8 count + 8 value/offset)
    #[inline]
    pub const fn ifd_entry_size(&self) -> usize {
        if self.is_bigtiff {
            20
        } else {
            12
        }
    }

    /// Size of the entry count field at the start of an IFD.
    #[inline]
    pub const fn ifd_count_size(&self) -> usize {
        if self.is_bigtiff {
            8
        } else {
            2
        }
    }

    /// Offset of the value/offset field within an IFD entry.
    #[inline]
    pub const fn entry_value_offset(&self) -> usize {
        if self.is_bigtiff {
            12
        } else {
            8
        }
    }
}
