//! Magnetic pull for the hero call to action
//!
//! While the pointer moves over the control, the label is drawn toward the
//! pointer by a quarter of its offset from center. When the pointer leaves,
//! the label springs back with a damped elastic settle. Every retarget
//! starts from the currently displayed offset so fast pointer motion never
//! snaps.

use std::time::Duration;

use crate::easing::Easing;
use crate::tween::Tween;

/// Fraction of the pointer offset the label follows
const PULL: f64 = 0.25;
const ATTRACT_DURATION: Duration = Duration::from_millis(400);
const RELEASE_DURATION: Duration = Duration::from_millis(600);

/// Displacement model for a magnetic control
#[derive(Debug, Clone)]
pub struct Magnet {
    x: Tween,
    y: Tween,
    since: Duration,
    held: bool,
}

impl Magnet {
    pub fn new() -> Self {
        Self {
            x: Tween::new(0.0, 0.0, Duration::ZERO),
            y: Tween::new(0.0, 0.0, Duration::ZERO),
            since: Duration::ZERO,
            held: false,
        }
    }

    /// Pull toward a pointer offset from the control center, in cells
    pub fn attract(&mut self, dx: f64, dy: f64, now: Duration) {
        let (cx, cy) = self.offset(now);
        self.x = Tween::new(cx, dx * PULL, ATTRACT_DURATION).ease(Easing::CubicOut);
        self.y = Tween::new(cy, dy * PULL, ATTRACT_DURATION).ease(Easing::CubicOut);
        self.since = now;
        self.held = true;
    }

    /// Spring back to rest
    pub fn release(&mut self, now: Duration) {
        if !self.held {
            return;
        }
        let (cx, cy) = self.offset(now);
        self.x = Tween::new(cx, 0.0, RELEASE_DURATION).ease(Easing::ElasticOut);
        self.y = Tween::new(cy, 0.0, RELEASE_DURATION).ease(Easing::ElasticOut);
        self.since = now;
        self.held = false;
    }

    /// Current displacement (columns, rows)
    pub fn offset(&self, now: Duration) -> (f64, f64) {
        let elapsed = now.saturating_sub(self.since);
        (self.x.sample(elapsed), self.y.sample(elapsed))
    }

    /// Whether the displacement is still settling
    pub fn needs_frame(&self, now: Duration) -> bool {
        let elapsed = now.saturating_sub(self.since);
        !(self.x.is_complete(elapsed) && self.y.is_complete(elapsed))
    }
}

impl Default for Magnet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_rests_at_center() {
        let magnet = Magnet::new();
        assert_eq!(magnet.offset(ms(0)), (0.0, 0.0));
        assert!(!magnet.needs_frame(ms(0)));
    }

    #[test]
    fn test_attract_pulls_quarter_of_offset() {
        let mut magnet = Magnet::new();
        magnet.attract(8.0, -4.0, ms(0));
        let (x, y) = magnet.offset(ms(400));
        assert!((x - 2.0).abs() < 0.001);
        assert!((y + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_retarget_starts_from_current_offset() {
        let mut magnet = Magnet::new();
        magnet.attract(8.0, 0.0, ms(0));
        let before = magnet.offset(ms(200));
        magnet.attract(-8.0, 0.0, ms(200));
        let after = magnet.offset(ms(200));
        assert!((before.0 - after.0).abs() < 1e-9, "retarget snapped");
    }

    #[test]
    fn test_release_overshoots_then_settles() {
        let mut magnet = Magnet::new();
        magnet.attract(10.0, 0.0, ms(0));
        magnet.release(ms(400));
        // The elastic settle swings past center on its way back
        assert!(magnet.offset(ms(550)).0 < 0.0);
        let (x, y) = magnet.offset(ms(1_000));
        assert!(x.abs() < 0.001);
        assert!(y.abs() < 0.001);
        assert!(!magnet.needs_frame(ms(1_000)));
    }

    #[test]
    fn test_release_without_hold_is_noop() {
        let mut magnet = Magnet::new();
        magnet.release(ms(100));
        assert_eq!(magnet.offset(ms(100)), (0.0, 0.0));
        assert!(!magnet.needs_frame(ms(100)));
    }
}
