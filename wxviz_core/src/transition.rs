// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional transitions.
//!
//! A [`Transition`] animates a translation offset applied to a mark at paint time. The mark's
//! payload is already at its final position; the offset starts at `from` (applied instantly)
//! and eases to `to`. Time is caller-supplied milliseconds so the scene stays clock-free.

use kurbo::Vec2;

/// Easing curve for a [`Transition`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out (slow start and end).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    0.5 * t2 * t2 * t2
                } else {
                    let u = t2 - 2.0;
                    0.5 * (u * u * u + 2.0)
                }
            }
        }
    }
}

/// An offset animation for one mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Offset applied at `start_ms`.
    pub from: Vec2,
    /// Offset reached at `start_ms + duration_ms`.
    pub to: Vec2,
    /// Start time in milliseconds.
    pub start_ms: f64,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Transition {
    /// Creates a transition that jumps to `from` and eases back to zero offset.
    pub fn settle_from(from: Vec2, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to: Vec2::ZERO,
            start_ms,
            duration_ms,
            easing: Easing::CubicInOut,
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Returns the offset at `now_ms`.
    pub fn offset_at(&self, now_ms: f64) -> Vec2 {
        let t = self.easing.apply(self.progress(now_ms));
        self.from + (self.to - self.from) * t
    }

    /// Returns `true` once the end offset has been reached.
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}
