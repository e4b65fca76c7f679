//! L3 Molecular Layer: Smooth scroll controller
//!
//! Combines easing and timing utilities into the page's single scroll
//! emulation. The animator owns the authoritative scroll offset; everything
//! scroll-linked reads the [`ScrollState`] snapshot it publishes and never
//! writes back.
//!
//! Call `scroll_to()`/`scroll_by()` to request motion, then `update()` each
//! frame with the current clock to get the interpolated position. Deltas
//! arriving mid-animation are batched into the live animation's target
//! rather than restarting it from scratch.

use std::time::Duration;

use crate::config::ScrollConfig;
use crate::timing::{is_complete, lerp_u16, progress};

/// Read-only scroll snapshot: one writer, many readers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current offset in page rows
    pub offset: u16,
    /// Signed velocity in rows per second, from the last update
    pub velocity: f64,
}

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Clock value at animation start
    start: Duration,
    /// Starting scroll position
    from: u16,
    /// Target scroll position
    to: u16,
    /// Animation duration
    duration: Duration,
}

/// Smooth scroll controller
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
    /// Clock value of the previous update, for velocity
    last_update: Option<Duration>,
    /// Velocity in rows per second, from the last update
    velocity: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    /// Create a new scroll animator with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
            last_update: None,
            velocity: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or batched delta)
    ///
    /// Use this to decide whether the frame loop needs its fast cadence.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    /// Get the current interpolated scroll position
    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Read-only snapshot for scroll-linked consumers
    #[inline]
    pub fn state(&self) -> ScrollState {
        ScrollState {
            offset: self.current_scroll,
            velocity: self.velocity,
        }
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
        self.velocity = 0.0;
    }

    /// Start a scroll animation to a target position
    ///
    /// If smooth scrolling is disabled, jumps immediately to target.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Duration) {
        let target = target.min(max_scroll);

        if !self.config.is_smooth() {
            // Instant jump when smooth scrolling is disabled
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        // Start from current visible position
        let from = self.current_scroll;

        // Skip animation if already at target
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration: self.config.animation_duration(),
        });
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    ///
    /// Multiple scroll events within the same frame are batched together
    /// for smoother handling of rapid key presses and wheel trains.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            // Instant scroll
            let new_scroll =
                (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.current_scroll = new_scroll;
            self.animation = None;
            return;
        }

        // Accumulate delta for batching
        self.pending_delta += delta;
    }

    /// Scroll down by the configured line count
    pub fn scroll_down(&mut self, max_scroll: u16) {
        self.scroll_by(self.config.scroll_lines as i32, max_scroll);
    }

    /// Scroll up by the configured line count
    pub fn scroll_up(&mut self, max_scroll: u16) {
        self.scroll_by(-(self.config.scroll_lines as i32), max_scroll);
    }

    /// Scroll down by half a viewport
    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(half_page, max_scroll);
    }

    /// Scroll up by half a viewport
    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(-half_page, max_scroll);
    }

    /// Scroll down by a full viewport
    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(viewport_height as i32, max_scroll);
    }

    /// Scroll up by a full viewport
    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-(viewport_height as i32), max_scroll);
    }

    /// Update animation state and return the current scroll position
    ///
    /// Call this every frame with the current clock. Batched deltas are
    /// folded into the animation target here, relative to the target of any
    /// animation already in flight.
    pub fn update(&mut self, max_scroll: u16, now: Duration) -> u16 {
        let before = self.current_scroll;

        // Process any pending scroll delta
        if self.pending_delta != 0 {
            let target = self.target_scroll();
            let new_target =
                (target as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            // Start or retarget the animation
            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                });
            } else {
                self.animation = None;
            }
        }

        // Update active animation
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                let eased_t = self.config.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased_t).min(max_scroll);
            }
        }

        // Re-clamp after a resize shrank the page
        if self.current_scroll > max_scroll {
            self.current_scroll = max_scroll;
        }

        self.velocity = match self.last_update {
            Some(prev) if now > prev => {
                let dt = (now - prev).as_secs_f64();
                (self.current_scroll as f64 - before as f64) / dt
            }
            _ => 0.0,
        };
        self.last_update = Some(now);

        self.current_scroll
    }

    /// Cancel any active animation and stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        self.animation = None;
        self.current_scroll = 0;
        self.pending_delta = 0;
        self.last_update = None;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(100, 200, ms(0));
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animation_starts() {
        let config = ScrollConfig {
            smooth_enabled: true,
            duration_ms: 100,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(100, 200, ms(0));
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);
    }

    #[test]
    fn test_scroll_by_batching() {
        let config = ScrollConfig {
            smooth_enabled: true,
            duration_ms: 100,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        // Multiple scroll_by calls should batch
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);

        // Update should process all pending deltas
        animator.update(200, ms(0));
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_retarget_keeps_position() {
        let config = ScrollConfig {
            smooth_enabled: true,
            duration_ms: 100,
            easing: Easing::Linear,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_by(100, 200);
        animator.update(200, ms(0));
        let mid = animator.update(200, ms(50));
        assert_eq!(mid, 50);

        // A new delta mid-flight retargets from the in-flight target,
        // starting at the currently visible position
        animator.scroll_by(50, 200);
        animator.update(200, ms(50));
        assert_eq!(animator.target_scroll(), 150);
        assert_eq!(animator.current_scroll(), 50);
    }

    #[test]
    fn test_animation_completes() {
        let config = ScrollConfig {
            smooth_enabled: true,
            duration_ms: 100,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(80, 200, ms(0));
        animator.update(200, ms(250));
        assert_eq!(animator.current_scroll(), 80);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(50);
        animator.scroll_to(300, 100, ms(0));
        animator.update(100, ms(0));
        // Target should be clamped to max_scroll
        assert!(animator.target_scroll() <= 100);
    }

    #[test]
    fn test_reclamp_after_shrink() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(150);
        // Page shrank below the held offset
        animator.update(100, ms(0));
        assert_eq!(animator.current_scroll(), 100);
    }

    #[test]
    fn test_velocity_sign() {
        let config = ScrollConfig {
            smooth_enabled: true,
            duration_ms: 100,
            easing: Easing::Linear,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_by(100, 200);
        animator.update(200, ms(0));
        animator.update(200, ms(50));
        assert!(animator.state().velocity > 0.0);

        animator.set_scroll(100);
        animator.scroll_by(-50, 200);
        animator.update(200, ms(100));
        animator.update(200, ms(150));
        assert!(animator.state().velocity < 0.0);
    }
}
