// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read from a
//! user-edited `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[book]` - Settle delay, flip duration and starting page
//! - `[images]` - Load windows, cache bounds and allowed remote hosts
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()` with explicit path
//! 2. Pass `--config-dir` or set `FLIPBOOK_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use flipbook::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, warning) = config::load();
//!
//! if let Some(key) = warning {
//!     eprintln!("settings.toml ignored: {key}");
//! }
//! let _delay = config.book.settle_delay();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::media::remote::RemotePattern;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Book interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookConfig {
    /// Delay before the left page image follows a page change.
    #[serde(
        default = "default_settle_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay_ms: Option<u64>,

    /// Duration of one leaf rotation.
    #[serde(
        default = "default_flip_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub flip_duration_ms: Option<u64>,

    /// Page opened at startup (0-based), unless `--page` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<usize>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            flip_duration_ms: default_flip_duration_ms(),
            start_page: None,
        }
    }
}

impl BookConfig {
    /// Settle delay clamped into the supported range.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        let ms = self
            .settle_delay_ms
            .unwrap_or(DEFAULT_SETTLE_DELAY_MS)
            .clamp(MIN_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// Flip duration clamped into the supported range.
    #[must_use]
    pub fn flip_duration(&self) -> Duration {
        let ms = self
            .flip_duration_ms
            .unwrap_or(DEFAULT_FLIP_DURATION_MS)
            .clamp(MIN_FLIP_DURATION_MS, MAX_FLIP_DURATION_MS);
        Duration::from_millis(ms)
    }
}

/// Illustration loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagesConfig {
    /// Distance from the current page within which images are fetched first.
    #[serde(
        default = "default_priority_window",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority_window: Option<usize>,

    /// Distance from the current page within which images are fetched eagerly.
    #[serde(
        default = "default_eager_window",
        skip_serializing_if = "Option::is_none"
    )]
    pub eager_window: Option<usize>,

    /// Rasterize SVG illustrations.
    #[serde(default = "default_allow_svg", skip_serializing_if = "Option::is_none")]
    pub allow_svg: Option<bool>,

    /// Decoded image cache size in megabytes.
    #[serde(
        default = "default_cache_max_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_max_mb: Option<u32>,

    /// Maximum number of decoded images kept in memory.
    #[serde(
        default = "default_cache_max_images",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_max_images: Option<usize>,

    /// Remote hosts illustrations may be fetched from.
    #[serde(default = "default_remote_patterns")]
    pub remote_patterns: Vec<RemotePattern>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            priority_window: default_priority_window(),
            eager_window: default_eager_window(),
            allow_svg: default_allow_svg(),
            cache_max_mb: default_cache_max_mb(),
            cache_max_images: default_cache_max_images(),
            remote_patterns: default_remote_patterns(),
        }
    }
}

impl ImagesConfig {
    /// Returns `(priority, eager)` window radii, clamped and ordered.
    #[must_use]
    pub fn windows(&self) -> (usize, usize) {
        let priority = self
            .priority_window
            .unwrap_or(DEFAULT_PRIORITY_WINDOW)
            .min(MAX_LOAD_WINDOW);
        let eager = self
            .eager_window
            .unwrap_or(DEFAULT_EAGER_WINDOW)
            .min(MAX_LOAD_WINDOW)
            .max(priority);
        (priority, eager)
    }

    /// Cache byte budget, clamped into the supported range.
    #[must_use]
    pub fn cache_max_bytes(&self) -> usize {
        let mb = self
            .cache_max_mb
            .unwrap_or(DEFAULT_CACHE_MAX_MB)
            .clamp(MIN_CACHE_MAX_MB, MAX_CACHE_MAX_MB);
        (mb as usize) * 1024 * 1024
    }

    /// Cache entry limit, clamped into the supported range.
    #[must_use]
    pub fn cache_max_images(&self) -> usize {
        self.cache_max_images
            .unwrap_or(DEFAULT_CACHE_MAX_IMAGES)
            .clamp(MIN_CACHE_MAX_IMAGES, MAX_CACHE_MAX_IMAGES)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Book interaction settings.
    #[serde(default)]
    pub book: BookConfig,

    /// Illustration loading settings.
    #[serde(default)]
    pub images: ImagesConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_settle_delay_ms() -> Option<u64> {
    Some(DEFAULT_SETTLE_DELAY_MS)
}

fn default_flip_duration_ms() -> Option<u64> {
    Some(DEFAULT_FLIP_DURATION_MS)
}

fn default_priority_window() -> Option<usize> {
    Some(DEFAULT_PRIORITY_WINDOW)
}

fn default_eager_window() -> Option<usize> {
    Some(DEFAULT_EAGER_WINDOW)
}

fn default_allow_svg() -> Option<bool> {
    Some(DEFAULT_ALLOW_SVG)
}

fn default_cache_max_mb() -> Option<u32> {
    Some(DEFAULT_CACHE_MAX_MB)
}

fn default_cache_max_images() -> Option<usize> {
    Some(DEFAULT_CACHE_MAX_IMAGES)
}

fn default_remote_patterns() -> Vec<RemotePattern> {
    DEFAULT_REMOTE_PATTERNS
        .iter()
        .map(|(protocol, hostname, pathname)| RemotePattern::new(protocol, hostname, pathname))
        .collect()
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
