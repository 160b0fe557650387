//! Public probe operations.
//!
//! Every entry point reduces to [`probe`]: get a header window from somewhere
//! (a slice, a seekable stream, a buffered reader, a file path, a
//! [`RangeReader`]), run the signature table over it, and hand the window to
//! the winning extractor.
//!
//! The window is all that is ever inspected. Nothing past it is read, and the
//! result for a given window is always the same.

use std::fs::File;
use std::io::{BufRead, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::ProbeError;
use crate::format::{detect, ImageDescriptor};
use crate::io::{open_error, RangeReader};

// =============================================================================
// Window Sizes
// =============================================================================

/// Header window read by the stream, path and reader helpers.
///
/// Large enough for every fixed-offset format plus a JPEG APP0 segment and a
/// small TIFF IFD placed right after the header.
pub const DEFAULT_WINDOW_SIZE: usize = 256;

/// Smallest window the helpers will read. Covers every fixed-offset field.
pub const MIN_WINDOW_SIZE: usize = 32;

/// Largest window the helpers will read.
pub const MAX_WINDOW_SIZE: usize = 64 * 1024;

/// Clamp a requested window size to `[MIN_WINDOW_SIZE, MAX_WINDOW_SIZE]`.
pub fn clamp_window_size(window_size: usize) -> usize {
    window_size.clamp(MIN_WINDOW_SIZE, MAX_WINDOW_SIZE)
}

// =============================================================================
// Slice Probe
// =============================================================================

/// Identify the image format of `window` and extract its dimensions.
///
/// # Returns
/// A descriptor whose format is always known. Width and height are `0` when
/// the window ends before the size fields or the header is malformed.
///
/// # Errors
/// * `InsufficientData` - the window is too short to decide
/// * `UnrecognizedFormat` - no signature matches
///
/// # Example
///
/// ```
/// use imgprobe::{probe, ImageFormat};
///
/// let gif = b"GIF89a\x40\x01\xF0\x00";
/// let desc = probe(gif).unwrap();
/// assert_eq!(desc.format, ImageFormat::Gif);
/// assert_eq!((desc.width, desc.height), (320, 240));
/// ```
pub fn probe(window: &[u8]) -> Result<ImageDescriptor, ProbeError> {
    let rule = detect(window)?;
    let dimensions = (rule.extract)(window);

    if dimensions.is_unknown() {
        trace!(format = %rule.format, len = window.len(), "dimensions not inside window");
    }

    Ok(ImageDescriptor::new(rule.format, dimensions))
}

/// True if `window` starts with a recognized image signature.
pub fn is_image(window: &[u8]) -> bool {
    detect(window).is_ok()
}

// =============================================================================
// Stream Probe
// =============================================================================

/// Probe a seekable stream with the default window size.
///
/// See [`probe_stream_with_window`].
pub fn probe_stream<R: Read + Seek>(stream: &mut R) -> Result<ImageDescriptor, ProbeError> {
    probe_stream_with_window(stream, DEFAULT_WINDOW_SIZE)
}

/// Probe a seekable stream, reading at most `window_size` bytes.
///
/// The window starts at the stream's current position. The position is
/// restored before returning, whether the probe succeeded or not, so the
/// caller can go on to decode the image from where it was.
///
/// # Errors
/// `ProbeError::Io` if reading or seeking fails, otherwise as [`probe`].
pub fn probe_stream_with_window<R: Read + Seek>(
    stream: &mut R,
    window_size: usize,
) -> Result<ImageDescriptor, ProbeError> {
    let start = stream.stream_position()?;

    let window = read_window(stream, clamp_window_size(window_size));
    stream.seek(SeekFrom::Start(start))?;

    probe(&window?)
}

/// Read up to `limit` bytes, stopping early at end of stream.
fn read_window<R: Read>(stream: &mut R, limit: usize) -> Result<Vec<u8>, ProbeError> {
    let mut window = Vec::with_capacity(limit);
    stream.take(limit as u64).read_to_end(&mut window)?;
    Ok(window)
}

// =============================================================================
// Buffered Probe
// =============================================================================

/// Probe a buffered reader with the default window size.
///
/// See [`probe_buffered_with_window`].
pub fn probe_buffered<R: BufRead + ?Sized>(
    reader: &mut R,
) -> Result<ImageDescriptor, ProbeError> {
    probe_buffered_with_window(reader, DEFAULT_WINDOW_SIZE)
}

/// Probe the bytes a buffered reader already holds, without consuming them.
///
/// Works on sources that cannot seek (pipes, sockets, stdin). Wrap them in
/// `BufReader::with_capacity(DEFAULT_WINDOW_SIZE, reader)` so one fill can
/// cover the window. The window is the reader's buffer truncated to
/// `window_size`; a short first read on a pipe yields a shorter window.
///
/// Nothing is consumed, so the caller can read the whole stream afterwards,
/// starting with the header bytes that were inspected.
///
/// # Errors
/// `ProbeError::Io` if filling the buffer fails, otherwise as [`probe`].
pub fn probe_buffered_with_window<R: BufRead + ?Sized>(
    reader: &mut R,
    window_size: usize,
) -> Result<ImageDescriptor, ProbeError> {
    let limit = clamp_window_size(window_size);

    let buffered = loop {
        match reader.fill_buf() {
            Ok(buffered) => break buffered,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    };

    let window = &buffered[..buffered.len().min(limit)];
    trace!(len = window.len(), "probing buffered reader");
    probe(window)
}

// =============================================================================
// Path Probe
// =============================================================================

/// Probe the file at `path` with the default window size.
pub fn probe_path(path: impl AsRef<Path>) -> Result<ImageDescriptor, ProbeError> {
    probe_path_with_window(path, DEFAULT_WINDOW_SIZE)
}

/// Probe the file at `path`, reading at most `window_size` bytes from its
/// start. The file is closed before returning.
///
/// # Errors
/// `IoError::NotFound` if there is no such file, `IoError::File` for other
/// open or read failures, otherwise as [`probe`].
pub fn probe_path_with_window(
    path: impl AsRef<Path>,
    window_size: usize,
) -> Result<ImageDescriptor, ProbeError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let window = read_window(&mut file, clamp_window_size(window_size))?;

    debug!(path = %path.display(), len = window.len(), "probing file");
    probe(&window)
}

// =============================================================================
// RangeReader Probe
// =============================================================================

/// Probe a [`RangeReader`] with the default window size.
pub async fn probe_reader<R: RangeReader + ?Sized>(
    reader: &R,
) -> Result<ImageDescriptor, ProbeError> {
    probe_reader_with_window(reader, DEFAULT_WINDOW_SIZE).await
}

/// Probe a [`RangeReader`], fetching `min(size, window_size)` bytes at
/// offset 0 in a single read.
///
/// Empty resources are not read at all; they fail with `InsufficientData`.
pub async fn probe_reader_with_window<R: RangeReader + ?Sized>(
    reader: &R,
    window_size: usize,
) -> Result<ImageDescriptor, ProbeError> {
    let window_size = clamp_window_size(window_size) as u64;
    let len = reader.size().min(window_size) as usize;

    debug!(
        identifier = reader.identifier(),
        size = reader.size(),
        len,
        "probing resource"
    );

    let window = if len == 0 {
        Bytes::new()
    } else {
        reader.read_exact_at(0, len).await?
    };

    probe(&window)
}
