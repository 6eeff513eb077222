// SPDX-License-Identifier: MPL-2.0
//! Fixed-duration leaf rotation.
//!
//! A leaf rests at 0° on the right-hand stack and at -180° once read. A flip
//! eases between the two over a fixed duration; there is no inertia. Motions
//! are keyed by page id so they follow the page, not its deck position.

use crate::config::DEFAULT_FLIP_DURATION_MS;
use crate::story::Deck;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Rotation of a leaf lying on the right-hand stack.
pub const RESTING_RIGHT_DEG: f32 = 0.0;

/// Rotation of a leaf lying on the left-hand stack.
pub const RESTING_LEFT_DEG: f32 = -180.0;

/// Resting rotation for a leaf in the given flip state.
#[must_use]
pub fn resting_angle(flipped: bool) -> f32 {
    if flipped {
        RESTING_LEFT_DEG
    } else {
        RESTING_RIGHT_DEG
    }
}

/// CSS-style cubic Bézier timing function anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// Ease-in-out curve used for page turns.
pub const FLIP_EASING: CubicBezier = CubicBezier::new(0.645, 0.045, 0.355, 1.0);

impl CubicBezier {
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn sample_derivative(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton-Raphson on x(s) = t, falling back to bisection.
        let mut s = t;
        for _ in 0..8 {
            let x = Self::sample(self.x1, self.x2, s) - t;
            if x.abs() < 1e-6 {
                return Self::sample(self.y1, self.y2, s);
            }
            let dx = Self::sample_derivative(self.x1, self.x2, s);
            if dx.abs() < 1e-6 {
                break;
            }
            s -= x / dx;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, s)
    }
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    from: f32,
    to: f32,
    started: Instant,
}

/// In-flight leaf rotations, keyed by page id.
#[derive(Debug, Clone)]
pub struct FlipAnimator {
    duration: Duration,
    easing: CubicBezier,
    motions: HashMap<u32, Motion>,
}

impl Default for FlipAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_FLIP_DURATION_MS))
    }
}

impl FlipAnimator {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: FLIP_EASING,
            motions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts turning `page_id` toward its resting angle for `flipped`.
    ///
    /// A leaf already in motion continues from its current angle.
    pub fn begin(&mut self, page_id: u32, flipped: bool, now: Instant) {
        let to = resting_angle(flipped);
        let from = match self.motions.get(&page_id) {
            Some(_) => self.angle(page_id, !flipped, now),
            None => resting_angle(!flipped),
        };
        if self.duration.is_zero() || (from - to).abs() < f32::EPSILON {
            self.motions.remove(&page_id);
            return;
        }
        self.motions.insert(
            page_id,
            Motion {
                from,
                to,
                started: now,
            },
        );
    }

    /// Animates every leaf whose flip state differs between two current indices.
    pub fn transition(&mut self, deck: &Deck, from_index: usize, to_index: usize, now: Instant) {
        let (lo, hi) = if from_index <= to_index {
            (from_index, to_index)
        } else {
            (to_index, from_index)
        };
        for idx in lo..hi {
            if let Some(page) = deck.get(idx) {
                self.begin(page.id, idx < to_index, now);
            }
        }
    }

    /// Current rotation of `page_id`; leaves without a motion rest per `flipped`.
    #[must_use]
    pub fn angle(&self, page_id: u32, flipped: bool, now: Instant) -> f32 {
        let Some(motion) = self.motions.get(&page_id) else {
            return resting_angle(flipped);
        };
        let progress = self.progress(motion, now);
        motion.from + (motion.to - motion.from) * self.easing.ease(progress)
    }

    /// Whether `page_id` is still turning at `now`.
    #[must_use]
    pub fn is_in_flight(&self, page_id: u32, now: Instant) -> bool {
        self.motions
            .get(&page_id)
            .is_some_and(|motion| self.progress(motion, now) < 1.0)
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.motions
            .values()
            .any(|motion| self.progress(motion, now) < 1.0)
    }

    /// Drops finished motions.
    pub fn prune(&mut self, now: Instant) {
        let duration = self.duration;
        self.motions.retain(|_, motion| {
            now.saturating_duration_since(motion.started) < duration
        });
    }

    pub fn clear(&mut self) {
        self.motions.clear();
    }

    fn progress(&self, motion: &Motion, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(motion.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}
