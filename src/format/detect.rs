//! Signature dispatch for image header windows.
//!
//! Formats are identified by an ordered table of magic-byte rules. Each rule
//! names the minimum window length needed to evaluate it, one or more
//! `(offset, pattern)` fields that must all match, and the extractor that
//! reads dimensions once the rule wins.
//!
//! Dispatch is first-match-wins. A rule whose minimum length exceeds the
//! window is skipped outright: it is never compared against bytes the window
//! does not have. Adding a format means adding a row to [`SIGNATURE_RULES`].

use tracing::trace;

use crate::error::ProbeError;

use super::descriptor::{Dimensions, ImageFormat};
use super::{bmp, dds, gif, ico, jpeg, png, psd, tiff, webp};

// =============================================================================
// SignatureRule
// =============================================================================

/// One row of the signature table.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRule {
    /// Format reported when this rule matches
    pub format: ImageFormat,

    /// Window length required before the rule is evaluated at all
    pub min_len: usize,

    /// `(offset, pattern)` pairs that must all match
    pub fields: &'static [(usize, &'static [u8])],

    /// Dimension extractor for this format
    pub extract: fn(&[u8]) -> Dimensions,
}

impl SignatureRule {
    /// Evaluate the rule against `window`.
    ///
    /// Returns `false` without touching the window when it is shorter than
    /// `min_len`.
    pub fn matches(&self, window: &[u8]) -> bool {
        if window.len() < self.min_len {
            return false;
        }

        self.fields.iter().all(|(offset, pattern)| {
            window
                .get(*offset..offset + pattern.len())
                .is_some_and(|bytes| bytes == *pattern)
        })
    }

    /// True when the window is too short for this rule but every pattern byte
    /// that does fall inside the window agrees with it, so a longer window
    /// from the same source could still match.
    pub fn could_match_with_more_data(&self, window: &[u8]) -> bool {
        if window.len() >= self.min_len {
            return false;
        }

        self.fields.iter().all(|(offset, pattern)| {
            pattern
                .iter()
                .enumerate()
                .all(|(i, expected)| window.get(offset + i).map_or(true, |b| b == expected))
        })
    }
}

// =============================================================================
// Signature Table
// =============================================================================

/// Shortest window that any rule can be evaluated against.
pub const MIN_SIGNATURE_LEN: usize = 2;

/// Ordered signature table. Earlier rows win.
pub const SIGNATURE_RULES: &[SignatureRule] = &[
    SignatureRule {
        format: ImageFormat::Bmp,
        min_len: 2,
        fields: &[(0, b"BM")],
        extract: bmp::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Jpeg,
        min_len: 3,
        fields: &[(0, &[0xFF, 0xD8, 0xFF])],
        extract: jpeg::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Gif,
        min_len: 3,
        fields: &[(0, b"GIF")],
        extract: gif::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Png,
        min_len: 4,
        fields: &[(0, &[0x89, b'P', b'N', b'G'])],
        extract: png::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Ico,
        min_len: 4,
        fields: &[(0, &[0x00, 0x00, 0x01, 0x00])],
        extract: ico::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Psd,
        min_len: 4,
        fields: &[(0, b"8BPS")],
        extract: psd::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Dds,
        min_len: 4,
        fields: &[(0, b"DDS ")],
        extract: dds::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Tiff,
        min_len: 4,
        fields: &[(0, &[b'I', b'I', 0x2A, 0x00])],
        extract: tiff::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Tiff,
        min_len: 4,
        fields: &[(0, &[b'M', b'M', 0x00, 0x2A])],
        extract: tiff::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Tiff,
        min_len: 4,
        fields: &[(0, &[b'I', b'I', 0x2B, 0x00])],
        extract: tiff::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Tiff,
        min_len: 4,
        fields: &[(0, &[b'M', b'M', 0x00, 0x2B])],
        extract: tiff::dimensions,
    },
    SignatureRule {
        format: ImageFormat::Webp,
        min_len: 12,
        fields: &[(0, b"RIFF"), (8, b"WEBP")],
        extract: webp::dimensions,
    },
];

// =============================================================================
// Dispatch
// =============================================================================

/// Select the signature rule for `window`.
///
/// # Errors
/// * `InsufficientData` - the window is shorter than [`MIN_SIGNATURE_LEN`],
///   or nothing matched but a skipped rule agrees with every byte available
/// * `UnrecognizedFormat` - nothing matched and no skipped rule could
pub fn detect(window: &[u8]) -> Result<&'static SignatureRule, ProbeError> {
    if window.len() < MIN_SIGNATURE_LEN {
        return Err(ProbeError::InsufficientData {
            required: MIN_SIGNATURE_LEN,
            actual: window.len(),
        });
    }

    if let Some(rule) = SIGNATURE_RULES.iter().find(|rule| rule.matches(window)) {
        trace!(format = %rule.format, len = window.len(), "signature matched");
        return Ok(rule);
    }

    let pending = SIGNATURE_RULES
        .iter()
        .filter(|rule| rule.could_match_with_more_data(window))
        .map(|rule| rule.min_len)
        .min();

    match pending {
        Some(required) => Err(ProbeError::InsufficientData {
            required,
            actual: window.len(),
        }),
        None => Err(ProbeError::UnrecognizedFormat),
    }
}

/// Identify the format of `window` without extracting dimensions.
pub fn detect_format(window: &[u8]) -> Result<ImageFormat, ProbeError> {
    detect(window).map(|rule| rule.format)
}
