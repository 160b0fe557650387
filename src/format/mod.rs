//! Format identification and dimension extraction.
//!
//! Every supported format has a small module with a `dimensions` function
//! that reads width and height from a header window using bounds-checked
//! reads. [`detect`] holds the ordered signature table that ties the
//! formats together.
//!
//! # Supported Formats
//!
//! | Format | Signature | Size fields |
//! |--------|-----------|-------------|
//! | BMP | `BM` | DIB header at 18 |
//! | JPEG | `FF D8 FF` | first SOF0/SOF2 segment |
//! | GIF | `GIF` | logical screen at 6 |
//! | PNG | `89 PNG` | IHDR at 16 |
//! | ICO | `00 00 01 00` | first directory entry |
//! | PSD | `8BPS` | header at 14 |
//! | DDS | `DDS ` | header at 12 |
//! | TIFF | `II*\0`, `MM\0*`, BigTIFF | first IFD |
//! | WEBP | `RIFF` + `WEBP` | first chunk |

pub mod bmp;
pub mod dds;
pub mod descriptor;
pub mod detect;
pub mod gif;
pub mod ico;
pub mod jpeg;
pub mod png;
pub mod psd;
pub mod tiff;
pub mod webp;

pub use descriptor::{Dimensions, ImageDescriptor, ImageFormat};
pub use detect::{detect, detect_format, SignatureRule, MIN_SIGNATURE_LEN, SIGNATURE_RULES};
