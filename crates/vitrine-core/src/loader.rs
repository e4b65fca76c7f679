//! Loading sequence: a one-shot choreography gating first reveal
//!
//! The sequence is a single multi-track timeline sampled against the frame
//! clock: a progress readout runs 0→100 while structural grid rules and a
//! table of boot cells light up, then the whole surface wipes off-screen.
//! Completion is reported exactly once, through `poll_complete`.
//!
//! State machine: `Loading → Wiping → Done`. Early teardown consults
//! [`CompletionPolicy`] to decide whether a not-yet-reported completion is
//! still delivered.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::easing::Easing;
use crate::tween::{Timeline, Track, Tween};

/// Data cells in the boot table (4x4 grid, each with a label and a status line)
pub const CELL_COUNT: usize = 16;
/// Horizontal grid rules
pub const H_RULE_COUNT: usize = 3;
/// Vertical grid rules
pub const V_RULE_COUNT: usize = 3;

/// Clock offset at which the wipe begins
const WIPE_START: Duration = Duration::from_millis(2800);

/// Loading sequence phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Progress counting up, grid and cells revealing
    Loading,
    /// Content fading, container sliding off-screen
    Wiping,
    /// Sequence finished; the page owns the screen
    Done,
}

/// What happens to an unreported completion when the sequence is torn down
/// before finishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Drop it; teardown mid-sequence means the reveal never happened
    #[default]
    Abandon,
    /// Deliver it at teardown so the gated reveal still runs
    Deliver,
}

/// One-shot loading choreography
#[derive(Debug, Clone)]
pub struct LoadSequence {
    timeline: Timeline,
    progress: Track,
    grid_h: Vec<Track>,
    grid_v: Vec<Track>,
    /// 2 tracks per cell: label then status line
    cells: Vec<Track>,
    text_opacity: Track,
    text_lift: Track,
    table_opacity: Track,
    table_scale: Track,
    wipe: Track,
    /// Clock value at `begin`; the sequence is inert until set
    started: Option<Duration>,
    time_scale: f64,
    policy: CompletionPolicy,
    reported: bool,
}

impl LoadSequence {
    /// Build the sequence with a random cell reveal order
    pub fn new(policy: CompletionPolicy, time_scale: f64) -> Self {
        Self::with_rng(policy, time_scale, &mut StdRng::from_entropy())
    }

    /// Build the sequence with a caller-supplied RNG for the cell order
    pub fn with_rng(policy: CompletionPolicy, time_scale: f64, rng: &mut impl Rng) -> Self {
        let mut timeline = Timeline::new();

        let progress = timeline.add(
            Tween::new(0.0, 100.0, Duration::from_millis(2500)).ease(Easing::CubicInOut),
        );

        let rule = Tween::new(0.0, 1.0, Duration::from_millis(1500)).ease(Easing::QuartInOut);
        let grid_h = timeline.add_staggered(rule, H_RULE_COUNT, Duration::from_millis(100));
        let grid_v = timeline.add_staggered(
            rule.delay(Duration::from_millis(200)),
            V_RULE_COUNT,
            Duration::from_millis(100),
        );

        let cell = Tween::new(0.0, 1.0, Duration::from_millis(100))
            .delay(Duration::from_millis(1000));
        let cells = timeline.add_shuffled(cell, CELL_COUNT * 2, Duration::from_millis(50), rng);

        let text_opacity = timeline.add(
            Tween::new(1.0, 0.0, Duration::from_millis(500))
                .delay(WIPE_START)
                .ease(Easing::CubicIn),
        );
        let text_lift = timeline.add(
            Tween::new(0.0, -1.0, Duration::from_millis(500))
                .delay(WIPE_START)
                .ease(Easing::CubicIn),
        );
        let table_opacity = timeline.add(
            Tween::new(1.0, 0.0, Duration::from_millis(500))
                .delay(Duration::from_millis(2900))
                .ease(Easing::CubicIn),
        );
        let table_scale = timeline.add(
            Tween::new(1.0, 0.95, Duration::from_millis(500))
                .delay(Duration::from_millis(2900))
                .ease(Easing::CubicIn),
        );
        let wipe = timeline.add(
            Tween::new(0.0, -1.0, Duration::from_millis(800))
                .delay(Duration::from_millis(3100))
                .ease(Easing::QuartInOut),
        );

        Self {
            timeline,
            progress,
            grid_h,
            grid_v,
            cells,
            text_opacity,
            text_lift,
            table_opacity,
            table_scale,
            wipe,
            started: None,
            time_scale: if time_scale > 0.0 { time_scale } else { 1.0 },
            policy,
            reported: false,
        }
    }

    /// Start the sequence clock. Later calls are ignored; the sequence runs
    /// once per mount.
    pub fn begin(&mut self, now: Duration) {
        if self.started.is_none() {
            self.started = Some(now);
            debug!("loading sequence started");
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Sequence-local elapsed time, scaled
    fn elapsed(&self, now: Duration) -> Duration {
        match self.started {
            Some(start) => now.saturating_sub(start).mul_f64(self.time_scale),
            None => Duration::ZERO,
        }
    }

    /// Current phase at `now`
    pub fn phase(&self, now: Duration) -> LoaderPhase {
        let elapsed = self.elapsed(now);
        if elapsed >= self.timeline.duration() {
            LoaderPhase::Done
        } else if elapsed >= WIPE_START {
            LoaderPhase::Wiping
        } else {
            LoaderPhase::Loading
        }
    }

    /// Progress readout in [0, 100]; monotonic while the clock moves forward
    pub fn progress(&self, now: Duration) -> f64 {
        self.timeline.value(self.progress, self.elapsed(now))
    }

    /// Report completion. Returns `true` exactly once, on the first poll at
    /// or after the end of the wipe.
    pub fn poll_complete(&mut self, now: Duration) -> bool {
        if self.reported || self.phase(now) != LoaderPhase::Done {
            return false;
        }
        self.reported = true;
        info!("loading sequence complete");
        true
    }

    /// Tear the sequence down. Returns `true` if a completion that was never
    /// reported should still be delivered, per the configured policy.
    pub fn teardown(self) -> bool {
        if self.reported {
            return false;
        }
        match self.policy {
            CompletionPolicy::Abandon => {
                debug!("loading sequence torn down; completion abandoned");
                false
            }
            CompletionPolicy::Deliver => {
                debug!("loading sequence torn down; completion delivered late");
                true
            }
        }
    }

    /// Whether the sequence still needs per-frame updates
    pub fn needs_frame(&self) -> bool {
        self.started.is_some() && !self.reported
    }

    // Cosmetic track sampling for the render side.

    /// Horizontal rule i growth, 0..1
    pub fn rule_h_scale(&self, i: usize, now: Duration) -> f64 {
        self.timeline.value(self.grid_h[i], self.elapsed(now))
    }

    /// Vertical rule i growth, 0..1
    pub fn rule_v_scale(&self, i: usize, now: Duration) -> f64 {
        self.timeline.value(self.grid_v[i], self.elapsed(now))
    }

    /// Cell label opacity, i in [0, CELL_COUNT)
    pub fn cell_label_opacity(&self, i: usize, now: Duration) -> f64 {
        self.timeline.value(self.cells[i * 2], self.elapsed(now))
    }

    /// Cell status-line opacity, i in [0, CELL_COUNT)
    pub fn cell_status_opacity(&self, i: usize, now: Duration) -> f64 {
        self.timeline.value(self.cells[i * 2 + 1], self.elapsed(now))
    }

    /// Center text opacity during the wipe
    pub fn text_opacity(&self, now: Duration) -> f64 {
        self.timeline.value(self.text_opacity, self.elapsed(now))
    }

    /// Center text lift in rows (0 at rest, negative while wiping)
    pub fn text_lift(&self, now: Duration) -> f64 {
        self.timeline.value(self.text_lift, self.elapsed(now))
    }

    /// Table opacity multiplier during the wipe
    pub fn table_opacity(&self, now: Duration) -> f64 {
        self.timeline.value(self.table_opacity, self.elapsed(now))
    }

    /// Table scale during the wipe (1 → 0.95)
    pub fn table_scale(&self, now: Duration) -> f64 {
        self.timeline.value(self.table_scale, self.elapsed(now))
    }

    /// Container offset as a fraction of viewport height (0 → -1)
    pub fn wipe_offset(&self, now: Duration) -> f64 {
        self.timeline.value(self.wipe, self.elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn started_sequence() -> LoadSequence {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seq = LoadSequence::with_rng(CompletionPolicy::Abandon, 1.0, &mut rng);
        seq.begin(ms(0));
        seq
    }

    #[test]
    fn test_progress_monotonic_zero_to_hundred() {
        let seq = started_sequence();
        let mut prev = -1.0;
        for t in (0..=5000).step_by(50) {
            let p = seq.progress(ms(t));
            assert!(p >= prev, "progress regressed at {}ms", t);
            assert!((0.0..=100.0).contains(&p));
            prev = p;
        }
        assert!((seq.progress(ms(0)) - 0.0).abs() < 0.001);
        assert!((seq.progress(ms(2500)) - 100.0).abs() < 0.001);
        assert!((seq.progress(ms(5000)) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_phases() {
        let seq = started_sequence();
        assert_eq!(seq.phase(ms(1000)), LoaderPhase::Loading);
        assert_eq!(seq.phase(ms(3000)), LoaderPhase::Wiping);
        assert_eq!(seq.phase(ms(3900)), LoaderPhase::Done);
        assert_eq!(seq.phase(ms(10000)), LoaderPhase::Done);
    }

    #[test]
    fn test_inert_until_begun() {
        let mut rng = StdRng::seed_from_u64(1);
        let seq = LoadSequence::with_rng(CompletionPolicy::Abandon, 1.0, &mut rng);
        assert_eq!(seq.phase(ms(60_000)), LoaderPhase::Loading);
        assert!((seq.progress(ms(60_000)) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_begin_is_idempotent() {
        let mut seq = started_sequence();
        seq.begin(ms(2000));
        // Origin stays at the first begin
        assert!((seq.progress(ms(2500)) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut seq = started_sequence();
        assert!(!seq.poll_complete(ms(3899)));
        assert!(seq.poll_complete(ms(3900)));
        assert!(!seq.poll_complete(ms(3901)));
        assert!(!seq.poll_complete(ms(60_000)));
    }

    #[test]
    fn test_teardown_abandons_by_default() {
        let mut seq = started_sequence();
        seq.poll_complete(ms(3000));
        assert!(!seq.teardown());
    }

    #[test]
    fn test_teardown_delivers_when_configured() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seq = LoadSequence::with_rng(CompletionPolicy::Deliver, 1.0, &mut rng);
        seq.begin(ms(0));
        assert!(!seq.poll_complete(ms(3000)));
        assert!(seq.teardown());
    }

    #[test]
    fn test_teardown_never_delivers_twice() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seq = LoadSequence::with_rng(CompletionPolicy::Deliver, 1.0, &mut rng);
        seq.begin(ms(0));
        assert!(seq.poll_complete(ms(4000)));
        assert!(!seq.teardown());
    }

    #[test]
    fn test_time_scale_compresses_sequence() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seq = LoadSequence::with_rng(CompletionPolicy::Abandon, 2.0, &mut rng);
        seq.begin(ms(0));
        assert_eq!(seq.phase(ms(1950)), LoaderPhase::Done);
        assert!(seq.poll_complete(ms(1950)));
    }

    #[test]
    fn test_cells_reveal_between_marks() {
        let seq = started_sequence();
        for i in 0..CELL_COUNT {
            assert!((seq.cell_label_opacity(i, ms(990)) - 0.0).abs() < 0.001);
            assert!((seq.cell_label_opacity(i, ms(2800)) - 1.0).abs() < 0.001);
            assert!((seq.cell_status_opacity(i, ms(2800)) - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_rules_grow_from_zero() {
        let seq = started_sequence();
        assert!((seq.rule_h_scale(0, ms(0)) - 0.0).abs() < 0.001);
        assert!((seq.rule_h_scale(2, ms(2000)) - 1.0).abs() < 0.001);
        // Vertical rules trail the horizontal ones
        assert!(seq.rule_v_scale(0, ms(300)) < seq.rule_h_scale(0, ms(300)));
        assert!((seq.rule_v_scale(2, ms(2200)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_wipe_values() {
        let seq = started_sequence();
        assert!((seq.wipe_offset(ms(3100)) - 0.0).abs() < 0.001);
        assert!(seq.wipe_offset(ms(3500)) < -0.3);
        assert!((seq.wipe_offset(ms(3900)) + 1.0).abs() < 0.001);
        assert!((seq.text_opacity(ms(2800)) - 1.0).abs() < 0.001);
        assert!((seq.text_opacity(ms(3300)) - 0.0).abs() < 0.001);
        assert!((seq.table_scale(ms(3400)) - 0.95).abs() < 0.001);
    }
}
