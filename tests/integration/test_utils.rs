//! Test utilities for integration tests.
//!
//! This module provides a mock object source, real image files produced by
//! the `image` crate's encoders, and builders for the formats it cannot
//! write (TIFF, PSD, DDS).

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat as CodecFormat, RgbImage, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use imgprobe::error::IoError;
use imgprobe::io::BytesRangeReader;
use imgprobe::source::ObjectSource;
use imgprobe::ImageFormat;

// =============================================================================
// Mock Object Source
// =============================================================================

/// A mock object source that serves pre-configured objects from memory.
pub struct MockObjectSource {
    objects: HashMap<String, Vec<u8>>,
    open_count: Arc<AtomicUsize>,
}

impl MockObjectSource {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            open_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_object(mut self, key: impl Into<String>, data: Vec<u8>) -> Self {
        self.objects.insert(key.into(), data);
        self
    }

    /// Shared counter of `open` calls, readable after the source is moved.
    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open_count)
    }
}

impl Default for MockObjectSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectSource for MockObjectSource {
    type Reader = BytesRangeReader;

    async fn open(&self, key: &str) -> Result<Self::Reader, IoError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);

        match self.objects.get(key) {
            Some(data) => Ok(BytesRangeReader::new(data.clone(), format!("mock://{}", key))),
            None => Err(IoError::NotFound(key.to_string())),
        }
    }
}

// =============================================================================
// Real Encoder Output
// =============================================================================

/// Formats the `image` crate can encode for us.
pub const ENCODED_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Ico,
    ImageFormat::Webp,
];

fn codec_format(format: ImageFormat) -> CodecFormat {
    match format {
        ImageFormat::Png => CodecFormat::Png,
        ImageFormat::Jpeg => CodecFormat::Jpeg,
        ImageFormat::Gif => CodecFormat::Gif,
        ImageFormat::Bmp => CodecFormat::Bmp,
        ImageFormat::Ico => CodecFormat::Ico,
        ImageFormat::Webp => CodecFormat::WebP,
        other => panic!("no encoder for {}", other),
    }
}

/// Encode a gradient image of the given size with the `image` crate.
pub fn encode_image(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let image = match format {
        // No alpha channel for these encoders
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Bmp => {
            DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
                image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
            }))
        }
        _ => DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 0x80, 0xFF])
        })),
    };

    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, codec_format(format))
        .expect("encoding test image");
    buf.into_inner()
}

// =============================================================================
// Synthetic Headers
// =============================================================================

/// PSD file header (26 bytes) for an RGB image.
pub fn psd_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"8BPS".to_vec();
    data.extend_from_slice(&1u16.to_be_bytes()); // version
    data.extend_from_slice(&[0; 6]); // reserved
    data.extend_from_slice(&3u16.to_be_bytes()); // channels
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&8u16.to_be_bytes()); // depth
    data.extend_from_slice(&3u16.to_be_bytes()); // RGB
    data
}

/// DDS magic plus the start of a DDS_HEADER.
pub fn dds_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"DDS ".to_vec();
    data.extend_from_slice(&124u32.to_le_bytes()); // header size
    data.extend_from_slice(&0x1007u32.to_le_bytes()); // flags
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&[0; 108]);
    data
}

// =============================================================================
// TIFF Builder
// =============================================================================

#[derive(Clone, Copy)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// Builder for minimal single-IFD TIFF files.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    is_bigtiff: bool,
    padding: usize,
    entries: Vec<(u16, u16, u64)>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            is_bigtiff: false,
            padding: 0,
            entries: Vec::new(),
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn with_bigtiff(mut self, is_bigtiff: bool) -> Self {
        self.is_bigtiff = is_bigtiff;
        self
    }

    /// Place `bytes` of filler between the header and the IFD.
    pub fn with_padding(mut self, bytes: usize) -> Self {
        self.padding = bytes;
        self
    }

    /// Add a single-valued entry. Types: 3 = SHORT, 4 = LONG, 16 = LONG8.
    pub fn entry(mut self, tag: u16, field_type: u16, value: u64) -> Self {
        self.entries.push((tag, field_type, value));
        self
    }

    /// ImageWidth and ImageLength as LONG entries.
    pub fn dimensions(self, width: u32, height: u32) -> Self {
        self.entry(256, 4, u64::from(width))
            .entry(257, 4, u64::from(height))
    }

    fn put(&self, data: &mut Vec<u8>, value: u64, size: usize) {
        let bytes = match self.byte_order {
            ByteOrderType::LittleEndian => value.to_le_bytes()[..size].to_vec(),
            ByteOrderType::BigEndian => value.to_be_bytes()[8 - size..].to_vec(),
        };
        data.extend_from_slice(&bytes);
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = match self.byte_order {
            ByteOrderType::LittleEndian => b"II".to_vec(),
            ByteOrderType::BigEndian => b"MM".to_vec(),
        };

        let (header_size, offset_size, count_size) = if self.is_bigtiff {
            (16, 8, 8)
        } else {
            (8, 4, 2)
        };

        if self.is_bigtiff {
            self.put(&mut data, 43, 2);
            self.put(&mut data, 8, 2);
            self.put(&mut data, 0, 2);
        } else {
            self.put(&mut data, 42, 2);
        }
        self.put(&mut data, (header_size + self.padding) as u64, offset_size);
        data.resize(header_size + self.padding, 0);

        self.put(&mut data, self.entries.len() as u64, count_size);
        for &(tag, field_type, value) in &self.entries {
            self.put(&mut data, u64::from(tag), 2);
            self.put(&mut data, u64::from(field_type), 2);
            self.put(&mut data, 1, offset_size);

            // Inline values are left-justified in the value field
            let value_size = match field_type {
                3 => 2,
                4 => 4,
                _ => 8,
            };
            self.put(&mut data, value, value_size);
            data.extend(std::iter::repeat(0).take(offset_size - value_size.min(offset_size)));
        }
        self.put(&mut data, 0, offset_size); // next IFD
        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}
