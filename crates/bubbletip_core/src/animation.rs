//! Transition primitives for bubble appearance and dismissal.
//!
//! A transition animates position, scale and opacity as one synchronized
//! group: every track shares the same progress value, so they start and
//! end together.

use serde::Deserialize;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Slow start and end, fast middle (cosine curve).
    #[default]
    AccelerateDecelerate,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-in-out.
    ExponentialInOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// Where a bubble animates in from and out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Grow out of the anchor's center, shrink back into it.
    #[default]
    FromAnchor,
    /// Drop in from overlay y = 0, rise back to it.
    FromTop,
    /// Jump straight to the final state. No frames.
    None,
}

/// Duration and easing shared by all tracks of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    /// Duration in seconds.
    pub duration: f32,
    /// Easing curve.
    pub easing: Easing,
}

impl TransitionTiming {
    /// Default duration, matching the platform animator default.
    pub const DEFAULT_DURATION: f32 = 0.3;
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }
}

/// Interpolated visual state of a bubble at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleFrame {
    /// Left edge in overlay space.
    pub x: f32,
    /// Top edge in overlay space.
    pub y: f32,
    /// Uniform scale on both axes.
    pub scale: f32,
    /// Opacity (0-1).
    pub opacity: f32,
}

impl BubbleFrame {
    /// Fully shown frame at a position.
    #[must_use]
    pub const fn shown(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Collapsed, invisible frame at a position.
    #[must_use]
    pub const fn collapsed(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            scale: 0.0,
            opacity: 0.0,
        }
    }

    /// Linearly interpolates every track.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }
}

/// Identifier of one transition. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u64);

/// A running synchronized transition.
#[derive(Debug, Clone)]
pub struct Transition {
    id: TransitionId,
    from: BubbleFrame,
    to: BubbleFrame,
    current: BubbleFrame,
    progress: f32,
    timing: TransitionTiming,
}

impl Transition {
    /// Creates a transition at progress 0.
    #[must_use]
    pub fn new(
        id: TransitionId,
        from: BubbleFrame,
        to: BubbleFrame,
        timing: TransitionTiming,
    ) -> Self {
        Self {
            id,
            from,
            to,
            current: from,
            progress: 0.0,
            timing,
        }
    }

    /// Returns the transition id.
    #[must_use]
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// Returns the frame the transition ends on.
    #[must_use]
    pub fn target(&self) -> BubbleFrame {
        self.to
    }

    /// Returns the current interpolated frame.
    #[must_use]
    pub fn current(&self) -> BubbleFrame {
        self.current
    }

    /// Returns true if the transition reached its end.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advances by `dt` seconds and returns the new frame.
    pub fn advance(&mut self, dt: f32) -> BubbleFrame {
        if self.progress >= 1.0 {
            return self.current;
        }

        if self.timing.duration > 0.0 {
            self.progress += dt.max(0.0) / self.timing.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        self.current = if self.progress >= 1.0 {
            // Snap to target when complete
            self.to
        } else {
            self.from.lerp(self.to, self.timing.easing.apply(self.progress))
        };
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::AccelerateDecelerate,
            Easing::ExponentialOut,
            Easing::ExponentialIn,
            Easing::ExponentialInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 0.001);
        assert!(Easing::AccelerateDecelerate.apply(0.1) < 0.1);
    }

    #[test]
    fn test_tracks_finish_together() {
        let timing = TransitionTiming {
            duration: 0.2,
            easing: Easing::Linear,
        };
        let mut transition = Transition::new(
            TransitionId(1),
            BubbleFrame::collapsed(0.0, 0.0),
            BubbleFrame::shown(100.0, 50.0),
            timing,
        );

        let half = transition.advance(0.1);
        assert!((half.x - 50.0).abs() < 0.01);
        assert!((half.y - 25.0).abs() < 0.01);
        assert!((half.scale - 0.5).abs() < 0.01);
        assert!((half.opacity - 0.5).abs() < 0.01);
        assert!(!transition.is_complete());

        let end = transition.advance(0.1);
        assert!(transition.is_complete());
        assert_eq!(end, BubbleFrame::shown(100.0, 50.0));
    }

    #[test]
    fn test_zero_duration_completes_on_first_step() {
        let timing = TransitionTiming {
            duration: 0.0,
            easing: Easing::Linear,
        };
        let mut transition = Transition::new(
            TransitionId(7),
            BubbleFrame::shown(10.0, 10.0),
            BubbleFrame::collapsed(0.0, 0.0),
            timing,
        );
        assert_eq!(transition.advance(0.0), BubbleFrame::collapsed(0.0, 0.0));
        assert!(transition.is_complete());
    }
}
