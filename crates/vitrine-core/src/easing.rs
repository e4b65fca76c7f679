//! L4 Atomic Layer: Pure easing functions for animation curves
//!
//! Provides mathematical easing functions that map input [0, 1] to output
//! [0, 1] with various acceleration curves. BackOut and ElasticOut pass
//! above 1.0 before settling; clamp at the consumer if that matters.

use serde::{Deserialize, Serialize};

/// Easing curve selection for tweens and scroll animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Hold the start value until completion, then jump
    None,
    /// Constant velocity
    Linear,
    /// Quadratic ease-in: f(t) = t²
    QuadIn,
    /// Quadratic ease-out: f(t) = 1 - (1-t)²
    QuadOut,
    /// Quadratic ease-in-out
    QuadInOut,
    /// Cubic ease-in: f(t) = t³
    CubicIn,
    /// Cubic ease-out: f(t) = 1 - (1-t)³
    CubicOut,
    /// Cubic ease-in-out
    CubicInOut,
    /// Quartic ease-out: f(t) = 1 - (1-t)⁴
    QuartOut,
    /// Quartic ease-in-out
    QuartInOut,
    /// Exponential ease-out: f(t) = 1 - 2^(-10t)
    ExpoOut,
    /// Overshooting ease-out, settles from above
    BackOut,
    /// Damped spring ease-out
    ElasticOut,
}

impl Easing {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value, in [0, 1] for the monotonic curves
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => quad_ease_out(t),
            Easing::QuadInOut => quad_ease_in_out(t),
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => cubic_ease_out(t),
            Easing::CubicInOut => cubic_ease_in_out(t),
            Easing::QuartOut => quart_ease_out(t),
            Easing::QuartInOut => quart_ease_in_out(t),
            Easing::ExpoOut => exponential_ease_out(t),
            Easing::BackOut => back_ease_out(t),
            Easing::ElasticOut => elastic_ease_out(t),
        }
    }
}

/// Quadratic ease-out: f(t) = 1 - (1-t)²
#[inline]
fn quad_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

/// Quadratic ease-in-out: accelerate to the midpoint, decelerate after
#[inline]
fn quad_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Cubic ease-in-out
#[inline]
fn cubic_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Quartic ease-out: f(t) = 1 - (1-t)⁴
#[inline]
fn quart_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Quartic ease-in-out
#[inline]
fn quart_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv * inv / 2.0
    }
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Back ease-out with overshoot 1.5: passes the target, then settles
#[inline]
fn back_ease_out(t: f64) -> f64 {
    const C1: f64 = 1.5;
    const C3: f64 = C1 + 1.0;
    let shifted = t - 1.0;
    1.0 + C3 * shifted * shifted * shifted + C1 * shifted * shifted
}

/// Elastic ease-out with period 0.4: decaying oscillation into the target
#[inline]
fn elastic_ease_out(t: f64) -> f64 {
    const PERIOD: f64 = 0.4;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        let omega = std::f64::consts::TAU / PERIOD;
        2.0_f64.powf(-10.0 * t) * ((t - PERIOD / 4.0) * omega).sin() + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 13] = [
        Easing::None,
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::ExpoOut,
        Easing::BackOut,
        Easing::ElasticOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            // t=0 should give 0 (except None which jumps)
            if easing != Easing::None {
                assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            // t=1 should give 1
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
            Easing::QuartOut,
            Easing::QuartInOut,
            Easing::ExpoOut,
        ] {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let mut max = 0.0_f64;
        for i in 0..=100 {
            max = max.max(Easing::BackOut.apply(i as f64 / 100.0));
        }
        assert!(max > 1.0, "back-out should pass above the target, got {}", max);
    }

    #[test]
    fn test_elastic_out_settles() {
        // Oscillation has died down near the end of the curve
        assert!((Easing::ElasticOut.apply(0.95) - 1.0).abs() < 0.05);
        assert!((Easing::ElasticOut.apply(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_clamped() {
        for easing in ALL {
            assert!((easing.apply(1.5) - 1.0).abs() < 0.001, "{:?} above range", easing);
            assert!(easing.apply(-0.5).abs() < 0.001 || easing == Easing::None, "{:?} below range", easing);
        }
    }
}
