//! Easing curves and time-driven tweens.
//!
//! Animations here are plain state. The host advances them from its frame
//! loop; nothing runs on its own and nothing blocks.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    #[default]
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// How a state change reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Jump straight to the new state.
    #[default]
    Immediate,
    /// Interpolate to the new state over the given duration.
    Animated(Duration),
}

impl Transition {
    /// Animated transition lasting `millis` milliseconds.
    #[must_use]
    pub const fn millis(millis: u64) -> Self {
        Self::Animated(Duration::from_millis(millis))
    }

    /// Duration of the transition; zero when immediate.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::Animated(d) => *d,
        }
    }

    /// True when the change must be applied without interpolation.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        self.duration().is_zero()
    }
}

/// A running 0→1 progression over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween lasting `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Advance by `dt`, saturating at the end.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Linear progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    /// Eased progress from 0.0 to 1.0.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    /// Whether the tween has reached its end.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for Rect {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}
