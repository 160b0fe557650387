//! # imgprobe
//!
//! Identify an image's format and read its pixel dimensions from a short
//! header window, without decoding the image.
//!
//! Nine formats are recognized: JPEG, PNG, GIF, BMP, WEBP, ICO, PSD, TIFF
//! (including BigTIFF) and DDS. Identification is a fixed, ordered table of
//! magic-byte rules; dimensions are read with bounds-checked offsets inside
//! the window only. When the window ends before the size fields the format is
//! still reported, with width and height `0`.
//!
//! ## Architecture
//!
//! - [`mod@format`] - signature table, descriptor types and per-format extractors
//! - [`probe`](mod@probe) - public probe operations over slices, streams,
//!   buffered readers, paths and range readers
//! - [`io`] - range readers (memory, file, S3) and checked byte readers
//! - [`source`] - object sources that open range readers by key
//! - [`service`] - cached probing of objects in a source
//! - [`server`] - Axum-based HTTP API
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use imgprobe::{probe, ImageFormat, ProbeError};
//!
//! let header = [
//!     0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, // signature
//!     0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R', // IHDR chunk
//!     0x00, 0x00, 0x02, 0x64, // width = 612
//!     0x00, 0x00, 0x01, 0x65, // height = 357
//! ];
//!
//! let desc = probe(&header).unwrap();
//! assert_eq!(desc.format, ImageFormat::Png);
//! assert_eq!(desc.media_type, "image/png");
//! assert_eq!((desc.width, desc.height), (612, 357));
//!
//! assert!(matches!(probe(b"%PDF-1.7"), Err(ProbeError::UnrecognizedFormat)));
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod probe;
pub mod server;
pub mod service;
pub mod source;

// Re-export commonly used types
pub use config::{Cli, Command, ProbeConfig, ServeConfig};
pub use error::{IoError, ProbeError, TiffError};
pub use format::{
    detect, detect_format, Dimensions, ImageDescriptor, ImageFormat, SignatureRule,
    SIGNATURE_RULES,
};
pub use io::{create_s3_client, BytesRangeReader, FileRangeReader, RangeReader, S3RangeReader};
pub use probe::{
    is_image, probe, probe_buffered, probe_buffered_with_window, probe_path,
    probe_path_with_window, probe_reader, probe_reader_with_window, probe_stream,
    probe_stream_with_window, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE,
};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
pub use service::{CacheStats, DescriptorCache, ProbeResponse, ProbeService};
pub use source::{ObjectSource, S3ObjectSource};
