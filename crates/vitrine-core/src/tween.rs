//! L3 Molecular Layer: Tweens and multi-track timelines
//!
//! A [`Tween`] is one animated value: from → to over a duration with an
//! easing curve, starting `delay` after its owner's clock origin. A
//! [`Timeline`] groups tweens that share one origin, which is how the loader
//! and the section entrances choreograph many values against a single start.
//!
//! Sampling is a pure function of elapsed time. Nothing here accumulates
//! state, so rewinding the clock rewinds the values.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::easing::Easing;
use crate::timing;

/// A single animated value with delay, duration, and easing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Create a tween with no delay and a linear curve
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration,
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the delay from the clock origin
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Clock offset at which this tween finishes
    #[inline]
    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }

    /// Sample the value at `elapsed` since the clock origin
    ///
    /// Before the delay this is `from`; after `end()` it stays at `to`.
    #[inline]
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let t = timing::progress(self.delay, self.duration, elapsed);
        timing::lerp(self.from, self.to, self.easing.apply(t))
    }

    /// Sample the value at an externally supplied normalized progress
    ///
    /// Used by scrubbed animations, where progress comes from scroll
    /// position rather than time. Delay and duration are ignored.
    #[inline]
    pub fn sample_at(&self, t: f64) -> f64 {
        timing::lerp(self.from, self.to, self.easing.apply(t.clamp(0.0, 1.0)))
    }

    /// Whether the tween has run its full course at `elapsed`
    #[inline]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.end()
    }
}

/// Handle to one track inside a [`Timeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track(usize);

/// An ordered set of tweens sharing one clock origin
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track, returning its handle
    pub fn add(&mut self, tween: Tween) -> Track {
        self.tweens.push(tween);
        Track(self.tweens.len() - 1)
    }

    /// Add `count` copies of `base`, each delayed `step` after the previous
    pub fn add_staggered(&mut self, base: Tween, count: usize, step: Duration) -> Vec<Track> {
        (0..count)
            .map(|i| self.add(base.delay(base.delay + step * i as u32)))
            .collect()
    }

    /// Add `count` copies of `base` staggered in a random order
    ///
    /// Track i keeps position i, but its extra delay is drawn from a random
    /// permutation, so reveal order differs from layout order.
    pub fn add_shuffled(
        &mut self,
        base: Tween,
        count: usize,
        step: Duration,
        rng: &mut impl Rng,
    ) -> Vec<Track> {
        let mut slots: Vec<usize> = (0..count).collect();
        slots.shuffle(rng);
        slots
            .into_iter()
            .map(|slot| self.add(base.delay(base.delay + step * slot as u32)))
            .collect()
    }

    /// Sample one track at `elapsed` since the origin
    #[inline]
    pub fn value(&self, track: Track, elapsed: Duration) -> f64 {
        self.tweens[track.0].sample(elapsed)
    }

    /// Total duration: the latest end offset across all tracks
    pub fn duration(&self) -> Duration {
        self.tweens
            .iter()
            .map(Tween::end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Whether every track has finished at `elapsed`
    #[inline]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_tween_holds_from_during_delay() {
        let tween = Tween::new(10.0, 20.0, secs(1.0)).delay(secs(0.5));
        assert!((tween.sample(secs(0.0)) - 10.0).abs() < 0.001);
        assert!((tween.sample(secs(0.4)) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_tween_linear_midpoint() {
        let tween = Tween::new(0.0, 100.0, secs(2.0));
        assert!((tween.sample(secs(1.0)) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_tween_clamps_after_end() {
        let tween = Tween::new(0.0, 1.0, secs(1.0)).delay(secs(0.5));
        assert!((tween.sample(secs(10.0)) - 1.0).abs() < 0.001);
        assert!(tween.is_complete(secs(1.5)));
        assert!(!tween.is_complete(secs(1.4)));
    }

    #[test]
    fn test_tween_sample_at_ignores_clock() {
        let tween = Tween::new(0.0, 10.0, secs(5.0)).delay(secs(9.0));
        assert!((tween.sample_at(0.5) - 5.0).abs() < 0.001);
        assert!((tween.sample_at(-1.0) - 0.0).abs() < 0.001);
        assert!((tween.sample_at(2.0) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_timeline_duration_is_latest_end() {
        let mut tl = Timeline::new();
        tl.add(Tween::new(0.0, 1.0, secs(1.0)));
        tl.add(Tween::new(0.0, 1.0, secs(0.5)).delay(secs(2.0)));
        assert_eq!(tl.duration(), secs(2.5));
        assert!(!tl.is_complete(secs(2.4)));
        assert!(tl.is_complete(secs(2.5)));
    }

    #[test]
    fn test_staggered_delays_step() {
        let mut tl = Timeline::new();
        let base = Tween::new(0.0, 1.0, secs(0.1)).delay(secs(1.0));
        let tracks = tl.add_staggered(base, 3, secs(0.1));
        // Track 0 starts at the base delay, each later one a step after
        assert!((tl.value(tracks[0], secs(1.1)) - 1.0).abs() < 0.001);
        assert!((tl.value(tracks[2], secs(1.1)) - 0.0).abs() < 0.001);
        assert!((tl.value(tracks[2], secs(1.3)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_shuffled_covers_all_slots() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tl = Timeline::new();
        let base = Tween::new(0.0, 1.0, secs(0.1));
        let tracks = tl.add_shuffled(base, 16, secs(0.05), &mut rng);
        assert_eq!(tracks.len(), 16);
        // Every stagger slot appears exactly once
        let mut delays: Vec<Duration> = tracks
            .iter()
            .map(|t| {
                // All tweens complete by base + slot*step + duration
                let mut lo = Duration::ZERO;
                let mut hi = secs(2.0);
                for _ in 0..32 {
                    let mid = (lo + hi) / 2;
                    if tl.value(*t, mid) > 0.0 {
                        hi = mid;
                    } else {
                        lo = mid;
                    }
                }
                lo
            })
            .collect();
        delays.sort();
        for (i, delay) in delays.iter().enumerate() {
            let expected = secs(0.05 * i as f64);
            let diff = if *delay > expected { *delay - expected } else { expected - *delay };
            assert!(diff < secs(0.01), "slot {} at {:?}", i, delay);
        }
    }
}
