//! Descriptor cache for probed objects.
//!
//! Probing an object in remote storage costs a HEAD and a ranged GET. The
//! result is a few dozen bytes, so it is worth keeping: this module provides
//! an LRU cache from object key to [`ImageDescriptor`].
//!
//! Only successful probes are cached. Errors are always recomputed so that an
//! object uploaded after a 404 is picked up on the next request.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;

use crate::format::ImageDescriptor;

/// Default number of cached descriptors.
pub const DEFAULT_DESCRIPTOR_CACHE_CAPACITY: usize = 10_000;

// =============================================================================
// Cache Statistics
// =============================================================================

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,

    /// Lookups that found nothing
    pub misses: u64,

    /// Current number of entries
    pub entries: usize,

    /// Maximum number of entries
    pub capacity: usize,
}

// =============================================================================
// Descriptor Cache
// =============================================================================

/// LRU cache of probe results keyed by object key.
///
/// # Thread Safety
///
/// The cache is thread-safe and can be shared across async tasks via `Arc`.
///
/// # Example
///
/// ```
/// use imgprobe::service::DescriptorCache;
/// use imgprobe::{Dimensions, ImageDescriptor, ImageFormat};
///
/// #[tokio::main]
/// async fn main() {
///     let cache = DescriptorCache::new();
///     let desc = ImageDescriptor::new(ImageFormat::Png, Dimensions::new(612, 357));
///
///     cache.put("photos/a.png", desc).await;
///     assert_eq!(cache.get("photos/a.png").await, Some(desc));
/// }
/// ```
pub struct DescriptorCache {
    /// The underlying LRU cache
    cache: RwLock<LruCache<Arc<str>, ImageDescriptor>>,

    hits: AtomicU64,
    misses: AtomicU64,
}

impl DescriptorCache {
    /// Create a new cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DESCRIPTOR_CACHE_CAPACITY)
    }

    /// Create a new cache holding at most `capacity` descriptors.
    ///
    /// A capacity of `0` is treated as `1`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a descriptor, marking it as recently used.
    pub async fn get(&self, key: &str) -> Option<ImageDescriptor> {
        let mut cache = self.cache.write().await;
        let found = cache.get(key).copied();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Check if a key is cached without updating LRU order or counters.
    pub async fn contains(&self, key: &str) -> bool {
        let cache = self.cache.read().await;
        cache.contains(key)
    }

    /// Store a descriptor, evicting the least recently used entry if full.
    pub async fn put(&self, key: impl Into<Arc<str>>, descriptor: ImageDescriptor) {
        let mut cache = self.cache.write().await;
        cache.put(key.into(), descriptor);
    }

    /// Remove a key. Returns the cached descriptor if there was one.
    pub async fn remove(&self, key: &str) -> Option<ImageDescriptor> {
        let mut cache = self.cache.write().await;
        cache.pop(key)
    }

    /// Clear all entries. Counters are kept.
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
    }

    /// Current number of cached descriptors.
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        let cache = self.cache.read().await;
        cache.is_empty()
    }

    /// Maximum number of entries.
    pub async fn capacity(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cap().get()
    }

    /// Snapshot of hit/miss counters and occupancy.
    pub async fn stats(&self) -> CacheStats {
        let cache = self.cache.read().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: cache.len(),
            capacity: cache.cap().get(),
        }
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
