//! Single-property tweens.
//!
//! A [`Tween`] interpolates one style property from a start to an end value
//! over a duration, sampled at explicit instants. The completion edge is
//! reported exactly once; later samples hold the end value.

use std::time::{Duration, Instant};

use super::easing::{Easing, lerp_eased};

/// Which style property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProp {
    /// Element opacity.
    Opacity,
    /// Horizontal offset.
    OffsetX,
    /// Vertical offset.
    OffsetY,
    /// Animated box height.
    Height,
    /// Uniform scale.
    Scale,
}

/// The result of sampling a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Interpolated value at the sampled instant.
    pub value: f32,
    /// `true` exactly once: on the first sample at or past the deadline.
    pub finished_edge: bool,
}

/// One animated property transition.
#[derive(Debug, Clone)]
pub struct Tween {
    prop: StyleProp,
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    started_at: Option<Instant>,
    finished: bool,
}

impl Tween {
    /// Create a tween. It does nothing until [`start`](Self::start).
    pub fn new(prop: StyleProp, from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            prop,
            from,
            to,
            duration,
            easing,
            started_at: None,
            finished: false,
        }
    }

    /// The property this tween animates.
    pub fn prop(&self) -> StyleProp {
        self.prop
    }

    /// The tween's end value.
    pub fn end_value(&self) -> f32 {
        self.to
    }

    /// The tween's duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin the transition at `now`. Restarting a finished tween re-arms
    /// it from the beginning.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.finished = false;
    }

    /// Whether the tween has started and not yet reported completion.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.finished
    }

    /// Sample the tween at `now`.
    ///
    /// Returns `None` if the tween has not been started. A zero-duration
    /// tween completes on its first sample.
    pub fn sample(&mut self, now: Instant) -> Option<TweenSample> {
        let started_at = self.started_at?;

        if self.finished {
            return Some(TweenSample {
                value: self.to,
                finished_edge: false,
            });
        }

        let elapsed = now.saturating_duration_since(started_at);
        let raw_progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        let value = lerp_eased(self.easing, self.from, self.to, raw_progress);

        if raw_progress >= 1.0 {
            self.finished = true;
            return Some(TweenSample {
                value: self.to,
                finished_edge: true,
            });
        }

        Some(TweenSample {
            value,
            finished_edge: false,
        })
    }
}
