//! Probe service layer.
//!
//! Sits between the HTTP handlers and an [`ObjectSource`](crate::source::ObjectSource):
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              ProbeService               │
//! │          (DescriptorCache, LRU)         │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     ObjectSource -> RangeReader         │
//! └─────────────────────────────────────────┘
//! ```

mod cache;
mod service;

pub use cache::{CacheStats, DescriptorCache, DEFAULT_DESCRIPTOR_CACHE_CAPACITY};
pub use service::{ProbeResponse, ProbeService};
