use async_trait::async_trait;
use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a file, buffer or remote object.
///
/// Reads are positional, so acquiring a header window never moves a cursor
/// and the same source can be probed any number of times. Implementations
/// must be thread-safe.
#[async_trait]
pub trait RangeReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds or if the read fails.
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the resource in bytes.
    fn size(&self) -> u64;

    /// Get a unique identifier for this resource (for logging and cache keys).
    ///
    /// For S3, this would typically be `s3://bucket/key`.
    fn identifier(&self) -> &str;
}

// =============================================================================
// Bounds-Checked Endian Readers
// =============================================================================
//
// Every field read in the format extractors goes through these. Each one
// checks `offset + width` against the slice length and returns `None` instead
// of indexing out of range.

#[inline]
fn field<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    bytes.get(offset..end)?.try_into().ok()
}

/// Read a single byte at `offset`.
#[inline]
pub fn read_u8_at(bytes: &[u8], offset: usize) -> Option<u8> {
    bytes.get(offset).copied()
}

/// Read a little-endian u16 at `offset`.
#[inline]
pub fn read_u16_le_at(bytes: &[u8], offset: usize) -> Option<u16> {
    field(bytes, offset).map(u16::from_le_bytes)
}

/// Read a big-endian u16 at `offset`.
#[inline]
pub fn read_u16_be_at(bytes: &[u8], offset: usize) -> Option<u16> {
    field(bytes, offset).map(u16::from_be_bytes)
}

/// Read a little-endian u24 at `offset`, widened to u32.
#[inline]
pub fn read_u24_le_at(bytes: &[u8], offset: usize) -> Option<u32> {
    field::<3>(bytes, offset).map(|[b0, b1, b2]| u32::from_le_bytes([b0, b1, b2, 0]))
}

/// Read a little-endian u32 at `offset`.
#[inline]
pub fn read_u32_le_at(bytes: &[u8], offset: usize) -> Option<u32> {
    field(bytes, offset).map(u32::from_le_bytes)
}

/// Read a big-endian u32 at `offset`.
#[inline]
pub fn read_u32_be_at(bytes: &[u8], offset: usize) -> Option<u32> {
    field(bytes, offset).map(u32::from_be_bytes)
}

/// Read a little-endian i32 at `offset`.
#[inline]
pub fn read_i32_le_at(bytes: &[u8], offset: usize) -> Option<i32> {
    field(bytes, offset).map(i32::from_le_bytes)
}

/// Read a little-endian u64 at `offset`.
#[inline]
pub fn read_u64_le_at(bytes: &[u8], offset: usize) -> Option<u64> {
    field(bytes, offset).map(u64::from_le_bytes)
}

/// Read a big-endian u64 at `offset`.
#[inline]
pub fn read_u64_be_at(bytes: &[u8], offset: usize) -> Option<u64> {
    field(bytes, offset).map(u64::from_be_bytes)
}
