use thiserror::Error;

/// I/O errors raised while acquiring a header window.
///
/// These come from the byte window provider (local file, in-memory buffer or
/// remote object) and are passed through to the caller unchanged.
#[derive(Debug, Error)]
pub enum IoError {
    /// Error from S3 or S3-compatible storage
    #[error("S3 error: {0}")]
    S3(String),

    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Local file or stream error
    #[error("File error: {0}")]
    File(#[from] std::io::Error),
}

/// Errors that terminate a probe call.
///
/// A probe either returns a descriptor with a known format or one of these.
/// Dimension extraction shortfalls are never reported here; they produce a
/// descriptor with zero width and height instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The window is too short for any signature that could still match it
    #[error("Insufficient data: need at least {required} bytes to identify the image, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// No signature rule matched a window of adequate length
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// The byte window provider failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::Io(IoError::File(err))
    }
}

/// Errors that can occur when parsing a TIFF header inside a window.
///
/// These never escape a probe call: TIFF dimension lookup degrades to zero
/// dimensions on any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42 (TIFF) or 43 (BigTIFF), got {0}")]
    InvalidVersion(u16),

    /// Invalid BigTIFF offset byte size (must be 8)
    #[error("Invalid BigTIFF offset byte size: expected 8, got {0}")]
    InvalidBigTiffOffsetSize(u16),

    /// Window is too small to contain the header
    #[error("Window too small: need at least {required} bytes, got {actual}")]
    WindowTooSmall { required: usize, actual: usize },

    /// First IFD lies outside the window
    #[error("IFD offset {offset} is outside the {window}-byte window")]
    IfdOutsideWindow { offset: u64, window: usize },
}
