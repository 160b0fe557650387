//! Object sources: where the service gets its bytes from.
//!
//! An [`ObjectSource`] turns an object key into a [`RangeReader`]. The probe
//! service only ever asks a reader for its first window, so a source can be
//! backed by anything that supports positional reads.

mod s3_source;

pub use s3_source::S3ObjectSource;

use async_trait::async_trait;

use crate::error::IoError;
use crate::io::RangeReader;

/// Trait for creating range readers from object keys.
///
/// This abstraction allows the probe service to work with different storage
/// backends (S3, local files, in-memory fixtures) without being tied to a
/// specific implementation.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// The type of range reader this source creates.
    type Reader: RangeReader + 'static;

    /// Open a range reader for the given object key.
    ///
    /// # Arguments
    /// * `key` - Object key relative to the source (e.g. `photos/cat.jpg`)
    ///
    /// # Returns
    /// A range reader for accessing the object's bytes, or
    /// `IoError::NotFound` if there is no such object.
    async fn open(&self, key: &str) -> Result<Self::Reader, IoError>;
}
