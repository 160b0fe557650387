//! Probe tests over complete files and truncated windows.
//!
//! Tests verify:
//! - Real encoder output is identified with the right dimensions
//! - Every prefix of a file either identifies the same format or asks for
//!   more data, and never reports wrong dimensions
//! - TIFF and BigTIFF in both byte orders, including IFDs past the window
//! - Unrecognized input and the insufficient-data boundary

use imgprobe::{probe, Dimensions, ImageFormat, ProbeError, DEFAULT_WINDOW_SIZE};

use super::test_utils::{
    dds_header, encode_image, psd_header, ByteOrderType, TiffBuilder, ENCODED_FORMATS,
};

// =============================================================================
// Real Encoder Output
// =============================================================================

#[test]
fn test_encoded_images_report_format_and_size() {
    for format in ENCODED_FORMATS {
        let data = encode_image(format, 48, 32);
        let window = &data[..data.len().min(DEFAULT_WINDOW_SIZE)];

        let desc = probe(window).unwrap_or_else(|e| panic!("{}: {}", format, e));
        assert_eq!(desc.format, format);
        assert_eq!(desc.media_type, format.media_type());
        assert_eq!(desc.dimensions(), Dimensions::new(48, 32), "{}", format);
    }
}

#[test]
fn test_every_prefix_is_consistent() {
    for format in ENCODED_FORMATS {
        let data = encode_image(format, 20, 10);
        let full = Dimensions::new(20, 10);

        for len in 0..=data.len().min(DEFAULT_WINDOW_SIZE) {
            match probe(&data[..len]) {
                Ok(desc) => {
                    assert_eq!(desc.format, format, "{} prefix {}", format, len);
                    let dims = desc.dimensions();
                    assert!(
                        dims.is_unknown() || dims == full,
                        "{} prefix {} gave {:?}",
                        format,
                        len,
                        dims
                    );
                }
                Err(ProbeError::InsufficientData { required, actual }) => {
                    assert_eq!(actual, len);
                    assert!(required > len);
                }
                Err(e) => panic!("{} prefix {}: {}", format, len, e),
            }
        }
    }
}

#[test]
fn test_encoded_signature_only() {
    let png = encode_image(ImageFormat::Png, 5, 5);
    let desc = probe(&png[..8]).unwrap();
    assert_eq!(desc.format, ImageFormat::Png);
    assert!(desc.dimensions().is_unknown());
}

#[test]
fn test_probe_is_idempotent() {
    let data = encode_image(ImageFormat::Gif, 7, 9);
    let first = probe(&data).unwrap();
    let second = probe(&data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_ico_256_pixels_encoded_as_zero() {
    let data = encode_image(ImageFormat::Ico, 256, 256);
    let desc = probe(&data[..DEFAULT_WINDOW_SIZE]).unwrap();
    assert_eq!(desc.format, ImageFormat::Ico);
    assert_eq!(desc.dimensions(), Dimensions::new(256, 256));
}

// =============================================================================
// Synthetic Formats
// =============================================================================

#[test]
fn test_psd() {
    let desc = probe(&psd_header(1920, 1080)).unwrap();
    assert_eq!(desc.format, ImageFormat::Psd);
    assert_eq!(desc.media_type, "image/vnd.adobe.photoshop");
    assert_eq!(desc.dimensions(), Dimensions::new(1920, 1080));
}

#[test]
fn test_dds() {
    let desc = probe(&dds_header(512, 256)).unwrap();
    assert_eq!(desc.format, ImageFormat::Dds);
    assert_eq!(desc.dimensions(), Dimensions::new(512, 256));
}

#[test]
fn test_tiff_little_endian() {
    let data = TiffBuilder::new().dimensions(3000, 2000).build();
    let desc = probe(&data).unwrap();
    assert_eq!(desc.format, ImageFormat::Tiff);
    assert_eq!(desc.media_type, "image/tiff");
    assert_eq!(desc.dimensions(), Dimensions::new(3000, 2000));
}

#[test]
fn test_tiff_big_endian_short_values() {
    let data = TiffBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .entry(254, 4, 0)
        .entry(256, 3, 640)
        .entry(257, 3, 427)
        .entry(258, 3, 8)
        .build();
    let desc = probe(&data).unwrap();
    assert_eq!(desc.dimensions(), Dimensions::new(640, 427));
}

#[test]
fn test_bigtiff_both_byte_orders() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let data = TiffBuilder::new()
            .with_byte_order(order)
            .with_bigtiff(true)
            .entry(256, 16, 100_000)
            .entry(257, 4, 80_000)
            .build();
        let desc = probe(&data).unwrap();
        assert_eq!(desc.format, ImageFormat::Tiff);
        assert_eq!(desc.dimensions(), Dimensions::new(100_000, 80_000));
    }
}

#[test]
fn test_tiff_ifd_past_window() {
    let data = TiffBuilder::new()
        .with_padding(4096)
        .dimensions(3000, 2000)
        .build();

    let desc = probe(&data[..DEFAULT_WINDOW_SIZE]).unwrap();
    assert_eq!(desc.format, ImageFormat::Tiff);
    assert!(desc.dimensions().is_unknown());

    // The whole file reaches the IFD
    assert_eq!(probe(&data).unwrap().dimensions(), Dimensions::new(3000, 2000));
}

#[test]
fn test_tiff_missing_height_tag() {
    let data = TiffBuilder::new().entry(256, 4, 3000).build();
    let desc = probe(&data).unwrap();
    assert_eq!(desc.format, ImageFormat::Tiff);
    assert!(desc.dimensions().is_unknown());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unrecognized_content() {
    for data in [
        b"%PDF-1.7\n%\xE2\xE3\xCF\xD3".as_slice(),
        b"<?xml version=\"1.0\"?><svg/>".as_slice(),
        b"PK\x03\x04\x14\x00\x00\x00".as_slice(),
        b"RIFF\x24\x00\x00\x00WAVEfmt ".as_slice(),
    ] {
        assert!(
            matches!(probe(data), Err(ProbeError::UnrecognizedFormat)),
            "{:?}",
            data
        );
    }
}

#[test]
fn test_empty_and_single_byte_windows() {
    assert!(matches!(
        probe(&[]),
        Err(ProbeError::InsufficientData {
            required: 2,
            actual: 0
        })
    ));
    assert!(matches!(
        probe(&[0xFF]),
        Err(ProbeError::InsufficientData {
            required: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_bmp_two_bytes_is_enough() {
    let desc = probe(b"BM").unwrap();
    assert_eq!(desc.format, ImageFormat::Bmp);
    assert!(desc.dimensions().is_unknown());
}

#[test]
fn test_riff_needs_twelve_bytes() {
    assert!(matches!(
        probe(b"RIFF\0\0\0\0WEB"),
        Err(ProbeError::InsufficientData {
            required: 12,
            actual: 11
        })
    ));
}
