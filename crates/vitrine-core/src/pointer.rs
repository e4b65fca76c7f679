//! Pointer trail: a dot at the pointer and a ring easing after it
//!
//! The dot tracks the last pointer event with no lag; the ring closes a
//! fixed fraction of the remaining distance every frame. Pressing shrinks
//! the dot as a transient cue. When pointer input is unavailable the trail
//! is disabled outright: no state, no per-frame work, nothing rendered.

use std::time::Duration;

use crate::config::OverlayConfig;
use crate::easing::Easing;
use crate::tween::Tween;

const PRESS_SCALE: f64 = 0.6;
const SCALE_DURATION: Duration = Duration::from_millis(200);

/// How close the ring must get before per-frame work stops
const SETTLE_DISTANCE: f64 = 0.05;

/// Dot/ring pointer follower
#[derive(Debug, Clone)]
pub struct PointerTrail {
    enabled: bool,
    /// Smoothing factor per frame, in (0, 1]
    smoothing: f64,
    /// Last pointer position (columns, rows)
    dot: (f64, f64),
    /// Trailing ring position
    ring: (f64, f64),
    /// No rendering until the first pointer event arrives
    seen: bool,
    pressed: bool,
    scale: Tween,
    scale_since: Duration,
}

impl PointerTrail {
    /// Build the trail. `input_available` is false when mouse capture is
    /// off (the touch-primary analog); the trail then disables itself
    /// entirely.
    pub fn new(config: &OverlayConfig, input_available: bool) -> Self {
        Self {
            enabled: config.enabled && input_available,
            smoothing: config.smoothing.clamp(0.01, 1.0),
            dot: (0.0, 0.0),
            ring: (0.0, 0.0),
            seen: false,
            pressed: false,
            scale: Tween::new(1.0, 1.0, Duration::ZERO),
            scale_since: Duration::ZERO,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a pointer move. The first event also snaps the ring so it
    /// does not fly in from the origin.
    pub fn on_move(&mut self, column: u16, row: u16) {
        if !self.enabled {
            return;
        }
        self.dot = (column as f64, row as f64);
        if !self.seen {
            self.ring = self.dot;
            self.seen = true;
        }
    }

    /// Press cue: shrink the dot
    pub fn on_press(&mut self, now: Duration) {
        if !self.enabled {
            return;
        }
        self.pressed = true;
        self.retarget_scale(PRESS_SCALE, now);
    }

    /// Release cue: restore the dot
    pub fn on_release(&mut self, now: Duration) {
        if !self.enabled {
            return;
        }
        self.pressed = false;
        self.retarget_scale(1.0, now);
    }

    fn retarget_scale(&mut self, to: f64, now: Duration) {
        let from = self.scale_value(now);
        self.scale = Tween::new(from, to, SCALE_DURATION).ease(Easing::CubicOut);
        self.scale_since = now;
    }

    /// Ease the ring toward the dot. One call per frame.
    pub fn advance(&mut self) {
        if !self.enabled || !self.seen {
            return;
        }
        self.ring.0 += (self.dot.0 - self.ring.0) * self.smoothing;
        self.ring.1 += (self.dot.1 - self.ring.1) * self.smoothing;
    }

    /// Whether another frame of easing or scaling is pending
    pub fn needs_frame(&self, now: Duration) -> bool {
        if !self.enabled || !self.seen {
            return false;
        }
        let dx = self.dot.0 - self.ring.0;
        let dy = self.dot.1 - self.ring.1;
        if (dx * dx + dy * dy).sqrt() > SETTLE_DISTANCE {
            return true;
        }
        !self.scale.is_complete(now.saturating_sub(self.scale_since))
    }

    /// Dot cell, if there is anything to draw
    pub fn dot(&self) -> Option<(u16, u16)> {
        if !self.enabled || !self.seen {
            return None;
        }
        Some((self.dot.0.round() as u16, self.dot.1.round() as u16))
    }

    /// Ring cell, if there is anything to draw
    pub fn ring(&self) -> Option<(u16, u16)> {
        if !self.enabled || !self.seen {
            return None;
        }
        Some((self.ring.0.round() as u16, self.ring.1.round() as u16))
    }

    /// Current dot scale in [0.6, 1.0]
    pub fn scale_value(&self, now: Duration) -> f64 {
        self.scale.sample(now.saturating_sub(self.scale_since))
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
