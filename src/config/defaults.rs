// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Book**: Settle delay, flip duration and starting page
//! - **Images**: Load windows, cache bounds and remote host patterns

// ==========================================================================
// Book Defaults
// ==========================================================================

/// Delay before the left page image follows the current page (milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 600;

/// Minimum settle delay (milliseconds).
pub const MIN_SETTLE_DELAY_MS: u64 = 0;

/// Maximum settle delay (milliseconds).
pub const MAX_SETTLE_DELAY_MS: u64 = 5_000;

/// Duration of one leaf rotation (milliseconds).
pub const DEFAULT_FLIP_DURATION_MS: u64 = 900;

/// Minimum flip duration (milliseconds). Zero disables the animation.
pub const MIN_FLIP_DURATION_MS: u64 = 0;

/// Maximum flip duration (milliseconds).
pub const MAX_FLIP_DURATION_MS: u64 = 5_000;

/// Page opened when neither the CLI nor the config names one (0-based).
pub const DEFAULT_START_PAGE: usize = 0;

// ==========================================================================
// Image Defaults
// ==========================================================================

/// Pages within this distance of the current page are fetched first.
pub const DEFAULT_PRIORITY_WINDOW: usize = 1;

/// Pages within this distance of the current page are fetched eagerly.
pub const DEFAULT_EAGER_WINDOW: usize = 2;

/// Upper bound for both load windows.
pub const MAX_LOAD_WINDOW: usize = 16;

/// Default decoded image cache size in megabytes.
pub const DEFAULT_CACHE_MAX_MB: u32 = 64;

/// Minimum decoded image cache size in megabytes.
pub const MIN_CACHE_MAX_MB: u32 = 8;

/// Maximum decoded image cache size in megabytes.
pub const MAX_CACHE_MAX_MB: u32 = 512;

/// Default maximum number of decoded images kept in memory.
pub const DEFAULT_CACHE_MAX_IMAGES: usize = 16;

/// Minimum number of decoded images kept in memory.
pub const MIN_CACHE_MAX_IMAGES: usize = 4;

/// Maximum number of decoded images kept in memory.
pub const MAX_CACHE_MAX_IMAGES: usize = 64;

/// Whether SVG illustrations are rasterized.
pub const DEFAULT_ALLOW_SVG: bool = true;

/// Hosts illustrations may be fetched from, as `(protocol, hostname, pathname)`.
pub const DEFAULT_REMOTE_PATTERNS: &[(&str, &str, &str)] = &[
    ("https", "storage.googleapis.com", "/**"),
    ("https", "*.googleapis.com", "/**"),
    ("https", "s3-us-west-2.amazonaws.com", "/**"),
    ("https", "i.pravatar.cc", "/**"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_delay_defaults_are_ordered() {
        assert!(MIN_SETTLE_DELAY_MS <= DEFAULT_SETTLE_DELAY_MS);
        assert!(DEFAULT_SETTLE_DELAY_MS <= MAX_SETTLE_DELAY_MS);
    }

    #[test]
    fn flip_duration_defaults_are_ordered() {
        assert!(MIN_FLIP_DURATION_MS <= DEFAULT_FLIP_DURATION_MS);
        assert!(DEFAULT_FLIP_DURATION_MS <= MAX_FLIP_DURATION_MS);
    }

    #[test]
    fn eager_window_covers_priority_window() {
        assert!(DEFAULT_PRIORITY_WINDOW <= DEFAULT_EAGER_WINDOW);
        assert!(DEFAULT_EAGER_WINDOW <= MAX_LOAD_WINDOW);
    }

    #[test]
    fn cache_defaults_are_within_bounds() {
        assert!((MIN_CACHE_MAX_MB..=MAX_CACHE_MAX_MB).contains(&DEFAULT_CACHE_MAX_MB));
        assert!(
            (MIN_CACHE_MAX_IMAGES..=MAX_CACHE_MAX_IMAGES).contains(&DEFAULT_CACHE_MAX_IMAGES)
        );
    }
}
