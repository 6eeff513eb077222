// SPDX-License-Identifier: MPL-2.0
//! Load hints for page illustrations.
//!
//! The hints depend only on the distance between a page and the current
//! page, so they are recomputed on every page change instead of cached.

use crate::config::{DEFAULT_EAGER_WINDOW, DEFAULT_PRIORITY_WINDOW};

/// How soon an illustration should be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Fetch now.
    Eager,
    /// Fetch only once the page comes within the eager window.
    Lazy,
}

/// Fetch hints for one illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHints {
    /// Fetch ahead of other eager images.
    pub priority: bool,
    pub loading: Loading,
}

impl ImageHints {
    #[must_use]
    pub fn is_eager(self) -> bool {
        self.loading == Loading::Eager
    }
}

/// Distance thresholds for [`ImageHints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageWindow {
    priority_radius: usize,
    eager_radius: usize,
}

impl Default for ImageWindow {
    fn default() -> Self {
        Self {
            priority_radius: DEFAULT_PRIORITY_WINDOW,
            eager_radius: DEFAULT_EAGER_WINDOW,
        }
    }
}

impl ImageWindow {
    /// Creates a window; the eager radius never shrinks below the priority radius.
    #[must_use]
    pub fn new(priority_radius: usize, eager_radius: usize) -> Self {
        Self {
            priority_radius,
            eager_radius: eager_radius.max(priority_radius),
        }
    }

    #[must_use]
    pub fn hints(&self, index: usize, current: usize) -> ImageHints {
        let distance = index.abs_diff(current);
        ImageHints {
            priority: distance <= self.priority_radius,
            loading: if distance <= self.eager_radius {
                Loading::Eager
            } else {
                Loading::Lazy
            },
        }
    }

    /// Deck positions to fetch now, priority pages first, nearest first.
    ///
    /// Ties at equal distance list the page ahead of the reader before the
    /// one behind. Lazy positions are never included.
    #[must_use]
    pub fn prefetch_plan(&self, current: usize, total: usize) -> Vec<usize> {
        if total == 0 {
            return Vec::new();
        }
        let current = current.min(total - 1);

        let mut plan = vec![current];
        for distance in 1..=self.eager_radius {
            if let Some(ahead) = current.checked_add(distance).filter(|i| *i < total) {
                plan.push(ahead);
            }
            if let Some(behind) = current.checked_sub(distance) {
                plan.push(behind);
            }
        }
        plan
    }
}

/// Hints under the default window (priority within 1 page, eager within 2).
#[must_use]
pub fn hints(index: usize, current: usize) -> ImageHints {
    ImageWindow::default().hints(index, current)
}
