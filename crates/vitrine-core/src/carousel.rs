//! Testimonial carousel: cyclic index with serialized slide transitions
//!
//! `next`/`previous` animate the current record out (0.4 s), advance the
//! index only when that completes, then animate the new record in (0.5 s).
//! A request arriving while a transition is in flight is ignored, so exit
//! and enter phases of different indices can never interleave. The index is
//! always in [0, len).

use std::time::Duration;

use crate::easing::Easing;
use crate::timing::{is_complete, progress};

const EXIT_DURATION: Duration = Duration::from_millis(400);
const ENTER_DURATION: Duration = Duration::from_millis(500);

/// Slide direction of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Current record sliding out
    Exiting { dir: Direction, since: Duration },
    /// New record sliding in
    Entering { dir: Direction, since: Duration },
}

/// Cyclic carousel over a fixed number of records
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    phase: Phase,
}

impl Carousel {
    /// Create a carousel over `len` records. `len` must be at least 1.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
            phase: Phase::Idle,
        }
    }

    /// Currently displayed record index, always in [0, len)
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a transition is in flight
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Whether per-frame updates are needed
    pub fn needs_frame(&self) -> bool {
        !self.is_idle()
    }

    /// Request the next record. Ignored while a transition is in flight;
    /// returns whether the request was accepted.
    pub fn next(&mut self, now: Duration) -> bool {
        self.request(Direction::Next, now)
    }

    /// Request the previous record. Ignored while a transition is in flight;
    /// returns whether the request was accepted.
    pub fn previous(&mut self, now: Duration) -> bool {
        self.request(Direction::Previous, now)
    }

    fn request(&mut self, dir: Direction, now: Duration) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Exiting { dir, since: now };
        true
    }

    /// Advance transition phases against the clock
    ///
    /// The enter phase is chained off the exit's exact end, so slow frames
    /// do not stretch the choreography.
    pub fn advance(&mut self, now: Duration) {
        if let Phase::Exiting { dir, since } = self.phase {
            if is_complete(since, EXIT_DURATION, now) {
                self.index = match dir {
                    Direction::Next => (self.index + 1) % self.len,
                    Direction::Previous => (self.index + self.len - 1) % self.len,
                };
                self.phase = Phase::Entering {
                    dir,
                    since: since + EXIT_DURATION,
                };
            }
        }
        if let Phase::Entering { since, .. } = self.phase {
            if is_complete(since, ENTER_DURATION, now) {
                self.phase = Phase::Idle;
            }
        }
    }

    /// Horizontal offset of the displayed record in [-1, 1]
    ///
    /// Next exits left and enters from the right; previous is mirrored.
    /// The consumer scales this to columns.
    pub fn offset(&self, now: Duration) -> f64 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Exiting { dir, since } => {
                let t = Easing::CubicIn.apply(progress(since, EXIT_DURATION, now));
                match dir {
                    Direction::Next => -t,
                    Direction::Previous => t,
                }
            }
            Phase::Entering { dir, since } => {
                let t = Easing::CubicOut.apply(progress(since, ENTER_DURATION, now));
                match dir {
                    Direction::Next => 1.0 - t,
                    Direction::Previous => t - 1.0,
                }
            }
        }
    }

    /// Opacity of the displayed record in [0, 1]
    pub fn opacity(&self, now: Duration) -> f64 {
        match self.phase {
            Phase::Idle => 1.0,
            Phase::Exiting { since, .. } => {
                1.0 - Easing::CubicIn.apply(progress(since, EXIT_DURATION, now))
            }
            Phase::Entering { since, .. } => {
                Easing::CubicOut.apply(progress(since, ENTER_DURATION, now))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Run one full transition starting at `now`, returning the clock after
    fn settle(carousel: &mut Carousel, now: Duration) -> Duration {
        let done = now + EXIT_DURATION + ENTER_DURATION;
        carousel.advance(now + EXIT_DURATION);
        carousel.advance(done);
        done
    }

    #[test]
    fn test_next_cycles_forward() {
        let mut carousel = Carousel::new(3);
        let mut now = ms(0);
        for expected in [1, 2, 0] {
            assert!(carousel.next(now));
            now = settle(&mut carousel, now);
            assert_eq!(carousel.index(), expected);
            assert!(carousel.is_idle());
        }
    }

    #[test]
    fn test_last_wraps_to_first() {
        let mut carousel = Carousel::new(3);
        let mut now = ms(0);
        carousel.next(now);
        now = settle(&mut carousel, now);
        carousel.next(now);
        now = settle(&mut carousel, now);
        assert_eq!(carousel.index(), 2);

        // next() on the last of 3 lands on 0, not 3
        carousel.next(now);
        settle(&mut carousel, now);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut carousel = Carousel::new(3);
        carousel.previous(ms(0));
        settle(&mut carousel, ms(0));
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_index_always_in_range() {
        let mut carousel = Carousel::new(3);
        let mut now = ms(0);
        for step in 0..30 {
            if step % 3 == 0 {
                carousel.previous(now);
            } else {
                carousel.next(now);
            }
            now = settle(&mut carousel, now);
            assert!(carousel.index() < 3);
        }
    }

    #[test]
    fn test_requests_serialized() {
        let mut carousel = Carousel::new(3);
        assert!(carousel.next(ms(0)));
        // Mid-exit and mid-enter requests are dropped
        carousel.advance(ms(200));
        assert!(!carousel.next(ms(200)));
        assert!(!carousel.previous(ms(200)));
        carousel.advance(ms(500));
        assert!(!carousel.next(ms(500)));
        carousel.advance(ms(900));
        assert!(carousel.is_idle());
        // Only the first request advanced the index
        assert_eq!(carousel.index(), 1);
        assert!(carousel.next(ms(900)));
    }

    #[test]
    fn test_index_advances_only_after_exit() {
        let mut carousel = Carousel::new(3);
        carousel.next(ms(0));
        carousel.advance(ms(399));
        assert_eq!(carousel.index(), 0);
        carousel.advance(ms(400));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn test_offset_directions() {
        let mut carousel = Carousel::new(3);
        carousel.next(ms(0));
        carousel.advance(ms(200));
        // Sliding out to the left
        assert!(carousel.offset(ms(200)) < 0.0);
        carousel.advance(ms(450));
        // Entering from the right
        assert!(carousel.offset(ms(450)) > 0.0);
        carousel.advance(ms(900));
        assert_eq!(carousel.offset(ms(900)), 0.0);
    }

    #[test]
    fn test_opacity_bounds() {
        let mut carousel = Carousel::new(3);
        carousel.next(ms(0));
        for t in (0..=900).step_by(50) {
            carousel.advance(ms(t));
            let opacity = carousel.opacity(ms(t));
            assert!((0.0..=1.0).contains(&opacity), "opacity {} at {}ms", opacity, t);
        }
        assert_eq!(carousel.opacity(ms(900)), 1.0);
    }

    #[test]
    fn test_single_frame_lag_still_chains() {
        let mut carousel = Carousel::new(3);
        carousel.next(ms(0));
        // One late advance lands past both phases; chaining uses the exit's
        // exact end, so the whole transition resolves
        carousel.advance(ms(5000));
        carousel.advance(ms(5000));
        assert_eq!(carousel.index(), 1);
        assert!(carousel.is_idle());
    }
}
