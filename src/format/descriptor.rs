//! Result model: format tags, MIME types and the image descriptor.

use std::fmt;

use serde::Serialize;

// =============================================================================
// ImageFormat
// =============================================================================

/// Closed set of image formats the probe can identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Ico,
    Psd,
    Tiff,
    Dds,
}

impl ImageFormat {
    /// Every supported format, in no particular order.
    pub const ALL: [ImageFormat; 9] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::Webp,
        ImageFormat::Ico,
        ImageFormat::Psd,
        ImageFormat::Tiff,
        ImageFormat::Dds,
    ];

    /// Short lowercase tag, e.g. `"jpeg"`.
    pub const fn tag(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
            ImageFormat::Ico => "ico",
            ImageFormat::Psd => "psd",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Dds => "dds",
        }
    }

    /// Canonical MIME type. One per format, never derived from file content.
    pub const fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Ico => "image/x-icon",
            ImageFormat::Psd => "image/vnd.adobe.photoshop",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Dds => "image/vnd-ms.dds",
        }
    }

    /// Typical file extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Tiff => "tif",
            other => other.tag(),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Pixel dimensions read from a header. `0` means "not extracted".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero dimensions, used when the window does not reach the size fields.
    pub const fn unknown() -> Self {
        Self::new(0, 0)
    }

    /// True when neither side was extracted.
    pub const fn is_unknown(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

// =============================================================================
// ImageDescriptor
// =============================================================================

/// The result of a successful probe.
///
/// A descriptor always carries a recognized format; `media_type` is derived
/// from it on construction. Width and height are best-effort and may be `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageDescriptor {
    pub format: ImageFormat,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub fn new(format: ImageFormat, dimensions: Dimensions) -> Self {
        Self {
            format,
            media_type: format.media_type(),
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}x{}",
            self.format, self.media_type, self.width, self.height
        )
    }
}
