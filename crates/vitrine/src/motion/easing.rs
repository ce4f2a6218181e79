//! Easing functions for motion curves.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a
//! transformed value. Most curves stay within [0, 1]; [`Easing::EaseOutBack`]
//! deliberately overshoots past 1.0 before settling, which is what gives
//! panel slide-ins and modal entries their bounce.

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    #[default]
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Cubic ease-out (more pronounced deceleration).
    EaseOutCubic,
    /// Overshooting ease-out: exceeds the target mid-curve, then settles.
    EaseOutBack,
}

/// Apply an easing function to a progress value.
///
/// `t` is clamped to [0.0, 1.0] before easing. The output is in [0.0, 1.0]
/// for all curves except [`Easing::EaseOutBack`], which may exceed 1.0
/// mid-curve (and still ends at exactly 1.0).
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseOutBack => ease_out_back(t),
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    let eased_t = ease(easing, t);
    start + (end - start) * eased_t
}

// Overshoot magnitude for the back curve. c1 = 1.70158 overshoots by
// roughly 10% of the travel distance.
const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

#[inline]
fn ease_out_back(t: f32) -> f32 {
    let u = t - 1.0;
    1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(ease(Easing::Linear, 0.0), 0.0);
        assert_eq!(ease(Easing::Linear, 0.5), 0.5);
        assert_eq!(ease(Easing::Linear, 1.0), 1.0);
    }

    #[test]
    fn test_ease_in_slower_at_start() {
        assert_eq!(ease(Easing::EaseIn, 0.0), 0.0);
        assert!(ease(Easing::EaseIn, 0.5) < 0.5);
        assert_eq!(ease(Easing::EaseIn, 1.0), 1.0);
    }

    #[test]
    fn test_ease_out_faster_at_start() {
        assert_eq!(ease(Easing::EaseOut, 0.0), 0.0);
        assert!(ease(Easing::EaseOut, 0.5) > 0.5);
        assert_eq!(ease(Easing::EaseOut, 1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert_eq!(ease(Easing::EaseInOut, 0.5), 0.5);
        assert_eq!(ease(Easing::EaseInOut, 0.0), 0.0);
        assert_eq!(ease(Easing::EaseInOut, 1.0), 1.0);
    }

    #[test]
    fn test_cubic_more_pronounced_than_quadratic() {
        assert!(ease(Easing::EaseOutCubic, 0.5) > ease(Easing::EaseOut, 0.5));
    }

    #[test]
    fn test_out_back_overshoots_then_settles() {
        // The curve must exceed 1.0 somewhere past the midpoint...
        let peak = (50..100)
            .map(|i| ease(Easing::EaseOutBack, i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);

        // ...and still land exactly on the endpoints.
        assert!((ease(Easing::EaseOutBack, 0.0) - 0.0).abs() < 1e-6);
        assert!((ease(Easing::EaseOutBack, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ease(Easing::Linear, -0.5), 0.0);
        assert_eq!(ease(Easing::Linear, 1.5), 1.0);
    }

    #[test]
    fn test_lerp_eased() {
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.5), 150.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 1.0), 200.0);
        // Reverse travel works the same way.
        assert_eq!(lerp_eased(Easing::Linear, 240.0, 0.0, 0.5), 120.0);
    }
}
