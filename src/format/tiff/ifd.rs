//! Image File Directory walk bounded by the header window.
//!
//! Only entries that lie completely inside the window are decoded. An IFD
//! whose entry table runs past the window yields the entries that fit.

use super::parser::TiffHeader;
use super::tags::{FieldType, TiffTag};
use crate::error::TiffError;

/// A single IFD entry whose value is stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Raw tag ID
    pub tag: u16,

    /// Field type, or `None` for types that cannot carry a dimension
    pub field_type: Option<FieldType>,

    /// Number of values
    pub count: u64,

    /// First inline value, if the type is understood and fits the entry
    pub value: Option<u64>,
}

impl IfdEntry {
    /// Decode the entry starting at `offset`. Returns `None` if it does not
    /// fit in `window`.
    fn parse(window: &[u8], offset: usize, header: &TiffHeader) -> Option<Self> {
        let order = header.byte_order;
        let tag = order.read_u16(window, offset)?;
        let raw_type = order.read_u16(window, offset + 2)?;
        let count = if header.is_bigtiff {
            order.read_u64(window, offset + 4)?
        } else {
            u64::from(order.read_u32(window, offset + 4)?)
        };

        // Make sure the whole entry is present before trusting it
        if offset + header.ifd_entry_size() > window.len() {
            return None;
        }

        let field_type = FieldType::from_u16(raw_type);
        let value_at = offset + header.entry_value_offset();
        let value = match field_type {
            Some(FieldType::Short) => order.read_u16(window, value_at).map(u64::from),
            Some(FieldType::Long) => order.read_u32(window, value_at).map(u64::from),
            // LONG8 only fits inline in the 8-byte BigTIFF value field
            Some(FieldType::Long8) if header.is_bigtiff => order.read_u64(window, value_at),
            _ => None,
        };

        Some(IfdEntry {
            tag,
            field_type,
            count,
            value,
        })
    }

    /// The entry's value as a `u32`, for single-valued integer entries.
    pub fn value_u32(&self) -> Option<u32> {
        if self.count != 1 {
            return None;
        }
        self.value.and_then(|v| u32::try_from(v).ok())
    }
}

/// The portion of the first IFD that lies inside the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    /// Entry count declared by the IFD
    pub declared_count: u64,

    /// Entries that were fully readable, in file order
    pub entries: Vec<IfdEntry>,
}

impl Ifd {
    /// Read the first IFD named by `header`.
    ///
    /// # Errors
    /// `IfdOutsideWindow` when the IFD's entry count is not inside `window`.
    pub fn parse_first(window: &[u8], header: &TiffHeader) -> Result<Self, TiffError> {
        let outside = || TiffError::IfdOutsideWindow {
            offset: header.first_ifd_offset,
            window: window.len(),
        };

        let start = usize::try_from(header.first_ifd_offset).map_err(|_| outside())?;
        let order = header.byte_order;

        let declared_count = if header.is_bigtiff {
            order.read_u64(window, start)
        } else {
            order.read_u16(window, start).map(u64::from)
        }
        .ok_or_else(outside)?;

        let first_entry = start + header.ifd_count_size();
        let entry_size = header.ifd_entry_size();

        // Bounded by the window so a corrupt count cannot drive the loop
        let fits = window.len().saturating_sub(first_entry) / entry_size;
        let readable = usize::try_from(declared_count).map_or(fits, |n| n.min(fits));

        let entries = (0..readable)
            .filter_map(|i| IfdEntry::parse(window, first_entry + i * entry_size, header))
            .collect();

        Ok(Ifd {
            declared_count,
            entries,
        })
    }

    /// Find an entry by tag.
    pub fn get(&self, tag: TiffTag) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag.as_u16())
    }

    /// Single integer value of `tag`, if present and representable as `u32`.
    pub fn get_u32(&self, tag: TiffTag) -> Option<u32> {
        self.get(tag).and_then(IfdEntry::value_u32)
    }

    /// True when entries past the window were dropped.
    pub fn is_truncated(&self) -> bool {
        (self.entries.len() as u64) < self.declared_count
    }
}
