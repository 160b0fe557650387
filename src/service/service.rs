//! Probe service: cache-fronted probing of objects in a source.
//!
//! ```text
//! probe_object(key)
//!   1. Check DescriptorCache       -> hit: return
//!   2. ObjectSource::open(key)     -> RangeReader
//!   3. Read first window           -> probe()
//!   4. Cache descriptor & return
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::ProbeError;
use crate::format::ImageDescriptor;
use crate::probe::{clamp_window_size, probe, probe_reader_with_window, DEFAULT_WINDOW_SIZE};
use crate::source::ObjectSource;

use super::cache::{CacheStats, DescriptorCache};

// =============================================================================
// Probe Response
// =============================================================================

/// Response from the probe service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    /// The probe result
    pub descriptor: ImageDescriptor,

    /// Whether this descriptor was served from cache
    pub cache_hit: bool,
}

// =============================================================================
// Probe Service
// =============================================================================

/// Service for probing objects and caching the results.
///
/// # Type Parameters
///
/// * `S` - The object source type (e.g., S3-based source)
///
/// # Example
///
/// ```ignore
/// use imgprobe::service::ProbeService;
///
/// let service = ProbeService::new(source);
/// let response = service.probe_object("photos/cat.jpg").await?;
///
/// println!("{} (cache hit: {})", response.descriptor, response.cache_hit);
/// ```
pub struct ProbeService<S: ObjectSource> {
    /// Where objects are read from
    source: Arc<S>,

    /// Cache of successful probes
    cache: DescriptorCache,

    /// Header window size for every probe
    window_size: usize,
}

impl<S: ObjectSource> ProbeService<S> {
    /// Create a new probe service with default cache and window settings.
    pub fn new(source: S) -> Self {
        Self::with_shared_source(Arc::new(source))
    }

    /// Create a new probe service with a shared source.
    pub fn with_shared_source(source: Arc<S>) -> Self {
        Self {
            source,
            cache: DescriptorCache::new(),
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Replace the descriptor cache with one of `capacity` entries.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = DescriptorCache::with_capacity(capacity);
        self
    }

    /// Set the header window size. Out-of-range values are clamped.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = clamp_window_size(window_size);
        self
    }

    /// The header window size in use.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The underlying object source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Probe an object by key, using the cache when available.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The object cannot be found or read (`ProbeError::Io`)
    /// - The object is too short to identify (`InsufficientData`)
    /// - The object is not a recognized image (`UnrecognizedFormat`)
    pub async fn probe_object(&self, key: &str) -> Result<ProbeResponse, ProbeError> {
        if let Some(descriptor) = self.cache.get(key).await {
            return Ok(ProbeResponse {
                descriptor,
                cache_hit: true,
            });
        }

        let reader = self.source.open(key).await?;
        let descriptor = probe_reader_with_window(&reader, self.window_size).await?;

        debug!(key, %descriptor, "probed object");
        self.cache.put(key, descriptor).await;

        Ok(ProbeResponse {
            descriptor,
            cache_hit: false,
        })
    }

    /// Probe an in-memory buffer, such as an uploaded body.
    ///
    /// Only the first `window_size` bytes are inspected. Results are not
    /// cached since there is no key to cache them under.
    pub fn probe_bytes(&self, data: &[u8]) -> Result<ProbeResponse, ProbeError> {
        let window = &data[..data.len().min(self.window_size)];
        let descriptor = probe(window)?;

        Ok(ProbeResponse {
            descriptor,
            cache_hit: false,
        })
    }

    /// Descriptor cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Forget a cached descriptor, e.g. after the object was replaced.
    pub async fn invalidate(&self, key: &str) {
        self.cache.remove(key).await;
    }

    /// Clear the descriptor cache.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
