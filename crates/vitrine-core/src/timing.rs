//! L4 Atomic Layer: Time and interpolation utilities
//!
//! Pure functions for animation progress and interpolation. All progress is
//! computed from an explicit clock value, never from wall-clock reads, so
//! every caller stays deterministic under test.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) from start time and duration
/// against an explicit clock
///
/// # Arguments
/// * `start` - Clock value at which the animation began
/// * `duration` - Total animation duration
/// * `now` - Current clock value
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]. Zero-duration animations are
/// complete immediately; a clock before `start` reads as 0.
#[inline]
pub fn progress(start: Duration, duration: Duration, now: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation started at `start` has run its full duration
#[inline]
pub fn is_complete(start: Duration, duration: Duration, now: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (row offsets)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

/// Normalized position of `value` inside the span [start, end]
///
/// Clamped to [0.0, 1.0]. A degenerate span (end <= start) reads as a step:
/// 0 before `start`, 1 at or past it.
#[inline]
pub fn span_progress(value: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if value >= start { 1.0 } else { 0.0 };
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

/// Repeating "next step after D" timer against the explicit clock
///
/// `tick` reports how many whole intervals elapsed since the last call and
/// moves the baseline forward by exactly that many, so slow frames catch up
/// instead of dropping steps.
#[derive(Debug, Clone)]
pub struct StepTimer {
    interval: Duration,
    last: Duration,
}

impl StepTimer {
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self { interval, last: now }
    }

    /// Number of steps elapsed since the previous tick
    pub fn tick(&mut self, now: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        let elapsed = now.saturating_sub(self.last);
        let steps = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        if steps > 0 {
            self.last += self.interval * steps;
        }
        steps
    }

    /// Restart the cycle, optionally with a new interval
    pub fn restart(&mut self, interval: Duration, now: Duration) {
        self.interval = interval;
        self.last = now;
    }
}
