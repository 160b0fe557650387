//! File, stream and range reader entry points.
//!
//! Tests verify:
//! - `probe_path` on real files, missing files and empty files
//! - `probe_stream` leaves the stream where it found it
//! - `probe_buffered` peeks non-seekable readers without consuming them
//! - `probe_reader` over a local file handle

use std::io::{BufReader, Read, Seek, SeekFrom, Write};

use imgprobe::error::IoError;
use imgprobe::{
    probe_buffered, probe_path, probe_path_with_window, probe_reader, probe_stream,
    probe_stream_with_window, Dimensions, FileRangeReader, ImageFormat, ProbeError,
    DEFAULT_WINDOW_SIZE,
};

use super::test_utils::{encode_image, TiffBuilder};

fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// probe_path
// =============================================================================

#[test]
fn test_probe_path_real_files() {
    let dir = tempfile::tempdir().unwrap();

    for (name, format) in [
        ("a.png", ImageFormat::Png),
        ("b.jpg", ImageFormat::Jpeg),
        ("c.gif", ImageFormat::Gif),
        ("d.webp", ImageFormat::Webp),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, encode_image(format, 64, 40)).unwrap();

        let desc = probe_path(&path).unwrap();
        assert_eq!(desc.format, format);
        assert_eq!(desc.dimensions(), Dimensions::new(64, 40));
    }
}

#[test]
fn test_probe_path_ignores_extension() {
    let file = write_temp(&encode_image(ImageFormat::Bmp, 3, 4));
    let path = file.path().with_extension("txt");
    std::fs::copy(file.path(), &path).unwrap();

    let desc = probe_path(&path).unwrap();
    assert_eq!(desc.format, ImageFormat::Bmp);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_probe_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.png");
    let err = probe_path(&path).unwrap_err();

    match err {
        ProbeError::Io(IoError::NotFound(what)) => assert!(what.ends_with("nope.png")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_probe_path_empty_file() {
    let file = write_temp(&[]);
    assert!(matches!(
        probe_path(file.path()),
        Err(ProbeError::InsufficientData {
            required: 2,
            actual: 0
        })
    ));
}

#[test]
fn test_probe_path_larger_window_reaches_far_ifd() {
    let data = TiffBuilder::new()
        .with_padding(1000)
        .dimensions(800, 600)
        .build();
    let file = write_temp(&data);

    let small = probe_path(file.path()).unwrap();
    assert!(small.dimensions().is_unknown());

    let large = probe_path_with_window(file.path(), 4096).unwrap();
    assert_eq!(large.dimensions(), Dimensions::new(800, 600));
}

// =============================================================================
// probe_stream
// =============================================================================

#[test]
fn test_probe_stream_twice_is_non_destructive() {
    let data = encode_image(ImageFormat::Png, 12, 34);
    let mut file = write_temp(&data).reopen().unwrap();

    let first = probe_stream(&mut file).unwrap();
    let second = probe_stream(&mut file).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.dimensions(), Dimensions::new(12, 34));
    assert_eq!(file.stream_position().unwrap(), 0);

    // The stream still yields the whole file
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, data);
}

#[test]
fn test_probe_stream_from_embedded_offset() {
    let mut data = vec![0u8; 100];
    data.extend_from_slice(&encode_image(ImageFormat::Gif, 9, 8));
    let mut file = write_temp(&data).reopen().unwrap();
    file.seek(SeekFrom::Start(100)).unwrap();

    let desc = probe_stream_with_window(&mut file, 64).unwrap();
    assert_eq!(desc.format, ImageFormat::Gif);
    assert_eq!(desc.dimensions(), Dimensions::new(9, 8));
    assert_eq!(file.stream_position().unwrap(), 100);
}

// =============================================================================
// probe_buffered
// =============================================================================

/// Read-only source, like a child's stdout or a socket.
struct Pipe(std::io::Cursor<Vec<u8>>);

impl Read for Pipe {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}

#[test]
fn test_probe_buffered_non_seekable_source() {
    let data = encode_image(ImageFormat::Jpeg, 40, 24);
    let mut reader = BufReader::with_capacity(
        DEFAULT_WINDOW_SIZE,
        Pipe(std::io::Cursor::new(data.clone())),
    );

    let first = probe_buffered(&mut reader).unwrap();
    let second = probe_buffered(&mut reader).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.format, ImageFormat::Jpeg);
    assert_eq!(first.dimensions(), Dimensions::new(40, 24));

    // The inspected header is still at the front of the stream
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, data);

    let decoded = image::load_from_memory(&rest).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 24));
}

#[test]
fn test_probe_buffered_after_partial_read() {
    let mut data = b"HEADER".to_vec();
    data.extend_from_slice(&encode_image(ImageFormat::Gif, 5, 6));
    let mut reader = BufReader::new(Pipe(std::io::Cursor::new(data)));

    let mut prefix = [0u8; 6];
    reader.read_exact(&mut prefix).unwrap();
    assert_eq!(&prefix, b"HEADER");

    let desc = probe_buffered(&mut reader).unwrap();
    assert_eq!(desc.format, ImageFormat::Gif);
    assert_eq!(desc.dimensions(), Dimensions::new(5, 6));

    let mut signature = [0u8; 3];
    reader.read_exact(&mut signature).unwrap();
    assert_eq!(&signature, b"GIF");
}

// =============================================================================
// probe_reader
// =============================================================================

#[tokio::test]
async fn test_probe_reader_over_file() {
    let file = write_temp(&encode_image(ImageFormat::Jpeg, 33, 17));
    let reader = FileRangeReader::open(file.path()).await.unwrap();

    let desc = probe_reader(&reader).await.unwrap();
    assert_eq!(desc.format, ImageFormat::Jpeg);
    assert_eq!(desc.media_type, "image/jpeg");
    assert_eq!(desc.dimensions(), Dimensions::new(33, 17));
}

#[tokio::test]
async fn test_probe_reader_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileRangeReader::open(dir.path().join("gone.gif"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, IoError::NotFound(_)));
}
