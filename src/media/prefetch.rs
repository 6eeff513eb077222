// SPDX-License-Identifier: MPL-2.0
//! Decoded illustration cache for faster page turns.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used illustrations are evicted first;
//!   every plan refreshes the illustrations it still wants
//! - **Memory-bounded**: Total cache size limited by configurable byte limit
//! - **URL-keyed**: Entries indexed by the page's image reference
//! - **Fetch tracking**: References being fetched or that failed are remembered
//!   so the same illustration is not requested twice
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = ImageCache::new(config);
//!
//! // Wanted illustrations that are already decoded are refreshed, not refetched.
//! for url in cache.urls_to_fetch(&wanted) {
//!     cache.mark_pending(&url);
//!     // spawn the fetch, then call `cache.finish(url, result)`
//! }
//! ```

use crate::config::{DEFAULT_CACHE_MAX_IMAGES, DEFAULT_CACHE_MAX_MB};
use crate::error::Result;
use crate::media::ImageData;
use lru::LruCache;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

/// Configuration for the illustration cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of decoded illustrations kept.
    pub max_images: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CACHE_MAX_MB as usize * 1024 * 1024,
            max_images: DEFAULT_CACHE_MAX_IMAGES,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn from_config(images: &crate::config::ImagesConfig) -> Self {
        Self {
            max_bytes: images.cache_max_bytes(),
            max_images: images.cache_max_images(),
        }
    }

    /// Largest single illustration worth keeping: half the byte budget.
    #[must_use]
    pub fn max_image_bytes(&self) -> usize {
        self.max_bytes / 2
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub image_count: usize,
    pub total_bytes: usize,
    /// Wanted illustrations found already decoded.
    pub reuses: u64,
    pub evictions: u64,
    pub insertions: u64,
    pub failures: u64,
}

/// Fetch state of one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    Pending,
    Failed(String),
    Unknown,
}

/// LRU cache of decoded illustrations.
pub struct ImageCache {
    cache: LruCache<String, ImageData>,
    pending: HashSet<String>,
    failed: HashMap<String, String>,
    config: CacheConfig,
    current_bytes: usize,
    stats: CacheStats,
}

impl ImageCache {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
            failed: HashMap::new(),
            config,
            current_bytes: 0,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a decoded illustration.
    ///
    /// Returns `false` if the image is larger than half the byte budget.
    pub fn insert(&mut self, url: String, image: ImageData) -> bool {
        self.pending.remove(&url);
        self.failed.remove(&url);

        let image_size = image.size_bytes();
        if image_size > self.config.max_image_bytes() {
            return false;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            self.evict_lru();
        }

        if self.cache.len() == self.cache.cap().get() {
            self.evict_lru();
        }

        self.current_bytes += image_size;
        self.cache.put(url, image);
        self.stats.insertions += 1;
        self.sync_stats();

        true
    }

    fn evict_lru(&mut self) {
        if let Some((_, evicted)) = self.cache.pop_lru() {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
        }
    }

    fn sync_stats(&mut self) {
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;
    }

    /// Looks up an illustration without touching LRU order.
    ///
    /// The view reads through this; recency is refreshed by [`Self::urls_to_fetch`].
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&ImageData> {
        self.cache.peek(url)
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    #[must_use]
    pub fn availability(&self, url: &str) -> Availability {
        if self.contains(url) {
            Availability::Ready
        } else if self.pending.contains(url) {
            Availability::Pending
        } else if let Some(reason) = self.failed.get(url) {
            Availability::Failed(reason.clone())
        } else {
            Availability::Unknown
        }
    }

    /// Returns references that are neither cached, being fetched, nor failed.
    ///
    /// `urls` is ordered most important first. Cached entries among them are
    /// promoted so that the first one ends most recently used, which keeps
    /// the illustrations still in view out of the next eviction. Order is
    /// preserved and duplicates are dropped.
    pub fn urls_to_fetch(&mut self, urls: &[&str]) -> Vec<String> {
        for url in urls.iter().rev() {
            if self.cache.promote(*url) {
                self.stats.reuses += 1;
            }
        }

        let mut wanted: Vec<String> = Vec::new();
        for url in urls {
            if self.availability(url) == Availability::Unknown
                && !wanted.iter().any(|w| w == url)
            {
                wanted.push((*url).to_string());
            }
        }
        wanted
    }

    /// Records that a fetch for `url` has started.
    pub fn mark_pending(&mut self, url: &str) {
        self.pending.insert(url.to_string());
    }

    /// Stores the outcome of a fetch started with [`Self::mark_pending`].
    pub fn finish(&mut self, url: String, result: Result<ImageData>) {
        match result {
            Ok(image) => {
                self.insert(url, image);
            }
            Err(err) => {
                self.pending.remove(&url);
                self.stats.failures += 1;
                self.failed.insert(url, err.to_string());
            }
        }
    }

    /// Forgets failures so they are retried on the next plan.
    pub fn clear_failures(&mut self) {
        self.failed.clear();
    }

    /// Clears all cached illustrations and fetch tracking.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.pending.clear();
        self.failed.clear();
        self.current_bytes = 0;
        self.sync_stats();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    #[must_use]
    pub fn max_image_bytes(&self) -> usize {
        self.config.max_image_bytes()
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("image_count", &self.cache.len())
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_images", &self.config.max_images)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn create_test_image(width: u32, height: u32) -> ImageData {
        let pixels = vec![0u8; (width * height * 4) as usize];
        ImageData::from_rgba(width, height, pixels)
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = ImageCache::new(CacheConfig::default());
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn insert_and_peek_image() {
        let mut cache = ImageCache::new(CacheConfig::default());
        assert!(cache.insert("https://a/1.png".into(), create_test_image(100, 100)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek("https://a/1.png").map(|i| i.width), Some(100));
    }

    #[test]
    fn lru_eviction_on_byte_limit() {
        let mut cache = ImageCache::new(CacheConfig {
            max_bytes: 100_000,
            max_images: 100,
        });

        // 50*50*4 = 10,000 bytes each.
        for i in 0..15 {
            cache.insert(format!("u{i}"), create_test_image(50, 50));
        }

        assert!(cache.memory_usage() <= 100_000);
        assert!(cache.stats().evictions > 0);
        assert!(!cache.contains("u0"));
        assert!(cache.contains("u14"));
    }

    #[test]
    fn entry_limit_evicts_and_keeps_byte_count() {
        let mut cache = ImageCache::new(CacheConfig {
            max_bytes: 10_000_000,
            max_images: 2,
        });
        for i in 0..3 {
            cache.insert(format!("u{i}"), create_test_image(10, 10));
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.memory_usage(), 2 * 400);
    }

    #[test]
    fn reinserting_replaces_size() {
        let mut cache = ImageCache::new(CacheConfig::default());
        cache.insert("u".into(), create_test_image(10, 10));
        cache.insert("u".into(), create_test_image(20, 20));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 20 * 20 * 4);
    }

    #[test]
    fn large_image_not_cached() {
        let mut cache = ImageCache::new(CacheConfig {
            max_bytes: 1_000,
            max_images: 4,
        });
        assert!(!cache.insert("big".into(), create_test_image(20, 20)));
        assert!(cache.is_empty());
    }

    #[test]
    fn fetch_tracking_filters_plan() {
        let mut cache = ImageCache::new(CacheConfig::default());
        cache.insert("ready".into(), create_test_image(4, 4));
        cache.mark_pending("pending");
        cache.finish("broken".into(), Err(Error::Fetch("404".into())));

        let wanted = cache.urls_to_fetch(&["ready", "pending", "broken", "new", "new"]);
        assert_eq!(wanted, vec!["new".to_string()]);
        assert!(matches!(cache.availability("broken"), Availability::Failed(_)));

        cache.clear_failures();
        assert_eq!(cache.availability("broken"), Availability::Unknown);
    }

    #[test]
    fn finish_moves_pending_to_ready() {
        let mut cache = ImageCache::new(CacheConfig::default());
        cache.mark_pending("u");
        assert_eq!(cache.availability("u"), Availability::Pending);
        cache.finish("u".into(), Ok(create_test_image(2, 2)));
        assert_eq!(cache.availability("u"), Availability::Ready);
        assert!(cache.peek("u").is_some());
    }

    #[test]
    fn planned_urls_survive_eviction() {
        let mut cache = ImageCache::new(CacheConfig {
            max_bytes: 10_000_000,
            max_images: 4,
        });
        for i in 0..4 {
            cache.insert(format!("u{i}"), create_test_image(10, 10));
        }

        // u0 is on screen and still wanted; u4 is new.
        assert!(cache.peek("u0").is_some());
        let wanted = cache.urls_to_fetch(&["u0", "u4"]);
        assert_eq!(wanted, vec!["u4".to_string()]);
        cache.finish("u4".into(), Ok(create_test_image(10, 10)));

        assert!(cache.contains("u0"));
        assert!(cache.contains("u4"));
        assert!(!cache.contains("u1"));
        assert_eq!(cache.stats().reuses, 1);
    }

    #[test]
    fn first_planned_url_is_most_recent() {
        let mut cache = ImageCache::new(CacheConfig {
            max_bytes: 10_000_000,
            max_images: 3,
        });
        for i in 0..3 {
            cache.insert(format!("u{i}"), create_test_image(10, 10));
        }

        let _ = cache.urls_to_fetch(&["u0", "u1"]);
        cache.insert("u3".into(), create_test_image(10, 10));
        cache.insert("u4".into(), create_test_image(10, 10));

        // u2 went first, then u1; u0 led the plan and stays.
        assert!(cache.contains("u0"));
        assert!(!cache.contains("u1"));
        assert!(!cache.contains("u2"));
    }

    #[test]
    fn per_image_budget_is_half_the_cache() {
        let config = CacheConfig {
            max_bytes: 1_000,
            max_images: 4,
        };
        assert_eq!(config.max_image_bytes(), 500);
        assert_eq!(ImageCache::new(config).max_image_bytes(), 500);
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = ImageCache::new(CacheConfig::default());
        cache.insert("a".into(), create_test_image(5, 5));
        cache.mark_pending("b");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
        assert_eq!(cache.availability("b"), Availability::Unknown);
    }
}
