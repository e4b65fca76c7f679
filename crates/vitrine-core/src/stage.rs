//! The stage: frame clock, scroll, and scoped animation entries
//!
//! One [`Stage`] is constructed at application start and injected everywhere
//! frame time or scroll position is needed. It owns the only clock and the
//! only scroll writer in the process.
//!
//! Sections animate through scopes: `acquire()` a scope at the section's
//! page anchor, `add()` entries (a tween plus a trigger), sample them with
//! `value()` every frame, and `release()` the scope on unmount. Release is
//! atomic: all of a scope's entries stop existing together, and stale
//! handles (generation-checked) sample as `None` afterward, so a torn-down
//! section can leave nothing behind.
//!
//! Triggers come in three kinds: fire on mount after a delay, fire once when
//! scroll carries the anchor past a viewport mark, or scrub a value between
//! two marks as a pure function of scroll position. Scrubbed values are
//! recomputed from the current offset every sample; scrolling backward moves
//! them backward.

use std::time::Duration;

use tracing::debug;

use crate::config::ScrollConfig;
use crate::scroll::{ScrollAnimator, ScrollState};
use crate::timing::span_progress;
use crate::tween::Tween;

/// A scroll position expressed relative to a scope's anchor row plus a
/// fraction of the viewport height
///
/// `resolve = anchor + rows + viewport * viewport_rows`. The classic
/// "section top reaches 75% down the screen" becomes
/// `Mark::viewport(-0.75)`; "section top reaches the top of the screen" is
/// `Mark::rows(0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub rows: i32,
    pub viewport: f64,
}

impl Mark {
    pub fn new(rows: i32, viewport: f64) -> Self {
        Self { rows, viewport }
    }

    /// Anchor-relative rows only
    pub fn rows(rows: i32) -> Self {
        Self::new(rows, 0.0)
    }

    /// Viewport fraction only
    pub fn viewport(viewport: f64) -> Self {
        Self::new(0, viewport)
    }

    fn resolve(&self, anchor: f64, viewport_rows: f64) -> f64 {
        anchor + self.rows as f64 + self.viewport * viewport_rows
    }
}

/// When an entry's tween runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Fire once, `delay` after the entry was added
    Mount { delay: Duration },
    /// Fire once when scroll reaches the resolved mark
    Enter { at: Mark },
    /// Value follows scroll between the two resolved marks
    Scrub { start: Mark, end: Mark },
}

impl Trigger {
    /// Fire as soon as the entry is added
    pub fn mount() -> Self {
        Trigger::Mount {
            delay: Duration::ZERO,
        }
    }

    /// Fire a fixed delay after the entry is added
    pub fn mount_after(delay: Duration) -> Self {
        Trigger::Mount { delay }
    }

    /// Fire once when the anchor rises to `fraction` of the viewport
    /// (0.75 means "75% down the screen")
    pub fn enter(fraction: f64) -> Self {
        Trigger::Enter {
            at: Mark::viewport(-fraction),
        }
    }

    /// Scrub between two marks
    pub fn scrub(start: Mark, end: Mark) -> Self {
        Trigger::Scrub { start, end }
    }
}

/// One-shot playback state
#[derive(Debug, Clone, Copy, PartialEq)]
enum Playback {
    /// Waiting for the trigger condition
    Armed,
    /// Trigger fired; sampling against the clock
    Running { started: Duration },
    /// Ran to completion; holds the end value
    Done,
    /// Scrubbed; no playback state
    Scrub,
}

#[derive(Debug, Clone)]
struct Entry {
    tween: Tween,
    trigger: Trigger,
    playback: Playback,
    /// Clock value when the entry was added (Mount delays count from here)
    added: Duration,
}

#[derive(Debug, Clone)]
struct ScopeSlot {
    generation: u64,
    anchor: u16,
    entries: Vec<Entry>,
    alive: bool,
}

/// Handle to an acquired scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId {
    index: usize,
    generation: u64,
}

/// Handle to one animation entry within a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    scope: ScopeId,
    entry: usize,
}

/// Process-wide animation service: clock, scroll, and scopes
#[derive(Debug)]
pub struct Stage {
    now: Duration,
    scroll: ScrollAnimator,
    viewport: u16,
    max_scroll: u16,
    scopes: Vec<ScopeSlot>,
}

impl Stage {
    pub fn new(scroll_config: ScrollConfig, viewport: u16) -> Self {
        Self {
            now: Duration::ZERO,
            scroll: ScrollAnimator::new(scroll_config),
            viewport,
            max_scroll: 0,
            scopes: Vec::new(),
        }
    }

    /// Current clock value
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Viewport height in rows
    #[inline]
    pub fn viewport(&self) -> u16 {
        self.viewport
    }

    pub fn set_viewport(&mut self, rows: u16) {
        self.viewport = rows;
    }

    /// Scrollable range set by the page layout
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
    }

    #[inline]
    pub fn max_scroll(&self) -> u16 {
        self.max_scroll
    }

    /// Read-only scroll snapshot
    #[inline]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Current scroll offset in rows
    #[inline]
    pub fn scroll_offset(&self) -> u16 {
        self.scroll.current_scroll()
    }

    // Scroll requests forward to the single scroll writer.

    pub fn scroll_to(&mut self, row: u16) {
        let (max, now) = (self.max_scroll, self.now);
        self.scroll.scroll_to(row, max, now);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll.scroll_by(delta, self.max_scroll);
    }

    pub fn scroll_line_down(&mut self) {
        self.scroll.scroll_down(self.max_scroll);
    }

    pub fn scroll_line_up(&mut self) {
        self.scroll.scroll_up(self.max_scroll);
    }

    pub fn scroll_half_page_down(&mut self) {
        let (vh, max) = (self.viewport, self.max_scroll);
        self.scroll.scroll_half_page_down(vh, max);
    }

    pub fn scroll_half_page_up(&mut self) {
        let (vh, max) = (self.viewport, self.max_scroll);
        self.scroll.scroll_half_page_up(vh, max);
    }

    pub fn scroll_full_page_down(&mut self) {
        let (vh, max) = (self.viewport, self.max_scroll);
        self.scroll.scroll_full_page_down(vh, max);
    }

    pub fn scroll_full_page_up(&mut self) {
        let (vh, max) = (self.viewport, self.max_scroll);
        self.scroll.scroll_full_page_up(vh, max);
    }

    pub fn jump_top(&mut self) {
        self.scroll_to(0);
    }

    pub fn jump_bottom(&mut self) {
        self.scroll_to(self.max_scroll);
    }

    /// Acquire a scope anchored at a page row
    pub fn acquire(&mut self, anchor: u16) -> ScopeId {
        // Reuse the first dead slot, bumping its generation so stale
        // handles from the previous occupant stay invalid
        for (index, slot) in self.scopes.iter_mut().enumerate() {
            if !slot.alive {
                slot.generation += 1;
                slot.anchor = anchor;
                slot.entries.clear();
                slot.alive = true;
                debug!(scope = index, anchor, "animation scope acquired");
                return ScopeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.scopes.push(ScopeSlot {
            generation: 0,
            anchor,
            entries: Vec::new(),
            alive: true,
        });
        let index = self.scopes.len() - 1;
        debug!(scope = index, anchor, "animation scope acquired");
        ScopeId {
            index,
            generation: 0,
        }
    }

    /// Move a scope's anchor without touching playback state
    ///
    /// Used on resize: entrances that have played do not replay, scrubbed
    /// entries resolve against the new geometry.
    pub fn rebase(&mut self, scope: ScopeId, anchor: u16) {
        if let Some(slot) = self.slot_mut(scope) {
            slot.anchor = anchor;
        }
    }

    /// Add an animation entry. Returns a channel to sample it by; a no-op
    /// returning `None` if the scope has been released.
    pub fn add(&mut self, scope: ScopeId, tween: Tween, trigger: Trigger) -> Option<Channel> {
        let now = self.now;
        let slot = self.slot_mut(scope)?;
        let playback = match trigger {
            Trigger::Scrub { .. } => Playback::Scrub,
            _ => Playback::Armed,
        };
        slot.entries.push(Entry {
            tween,
            trigger,
            playback,
            added: now,
        });
        Some(Channel {
            scope,
            entry: slot.entries.len() - 1,
        })
    }

    /// Release a scope: every entry under it is removed atomically
    pub fn release(&mut self, scope: ScopeId) {
        if let Some(slot) = self.slot_mut(scope) {
            let dropped = slot.entries.len();
            slot.entries.clear();
            slot.alive = false;
            debug!(scope = scope.index, dropped, "animation scope released");
        }
    }

    /// Release every live scope (application teardown)
    pub fn release_all(&mut self) {
        for slot in &mut self.scopes {
            slot.entries.clear();
            slot.alive = false;
        }
    }

    /// Number of live entries under a scope (0 if released)
    pub fn entry_count(&self, scope: ScopeId) -> usize {
        self.slot(scope).map(|s| s.entries.len()).unwrap_or(0)
    }

    /// Total live entries across all scopes
    pub fn total_entries(&self) -> usize {
        self.scopes
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.entries.len())
            .sum()
    }

    /// Sample a channel. `None` once the owning scope is gone.
    pub fn value(&self, channel: Channel) -> Option<f64> {
        let slot = self.slot(channel.scope)?;
        let entry = slot.entries.get(channel.entry)?;
        let value = match entry.playback {
            Playback::Armed => entry.tween.from,
            Playback::Running { started } => {
                entry.tween.sample(self.now.saturating_sub(started))
            }
            Playback::Done => entry.tween.to,
            Playback::Scrub => {
                let (start, end) = match entry.trigger {
                    Trigger::Scrub { start, end } => (start, end),
                    // Scrub playback only ever pairs with a scrub trigger
                    _ => return None,
                };
                let anchor = slot.anchor as f64;
                let vh = self.viewport as f64;
                let offset = self.scroll.current_scroll() as f64;
                let t = span_progress(
                    offset,
                    start.resolve(anchor, vh),
                    end.resolve(anchor, vh),
                );
                entry.tween.sample_at(t)
            }
        };
        Some(value)
    }

    /// Advance the clock, the scroll animation, and all trigger state
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        let now = self.now;
        let max = self.max_scroll;
        self.scroll.update(max, now);
        let offset = self.scroll.current_scroll() as f64;
        let vh = self.viewport as f64;

        for slot in &mut self.scopes {
            if !slot.alive {
                continue;
            }
            let anchor = slot.anchor as f64;
            for entry in &mut slot.entries {
                let fire = match (&entry.trigger, &entry.playback) {
                    (Trigger::Mount { delay }, Playback::Armed) => now >= entry.added + *delay,
                    (Trigger::Enter { at }, Playback::Armed) => {
                        offset >= at.resolve(anchor, vh)
                    }
                    _ => false,
                };
                if fire {
                    entry.playback = Playback::Running { started: now };
                }
                if let Playback::Running { started } = entry.playback {
                    if entry.tween.is_complete(now.saturating_sub(started)) {
                        entry.playback = Playback::Done;
                    }
                }
            }
        }
    }

    /// Whether any one-shot animation or scroll motion is in flight
    ///
    /// Drives the frame loop's fast/idle cadence. Armed entries wait on
    /// input, scrubbed entries move only with scroll; neither needs frames
    /// on its own.
    pub fn needs_frame(&self) -> bool {
        if self.scroll.needs_update() {
            return true;
        }
        self.scopes.iter().any(|slot| {
            slot.alive
                && slot
                    .entries
                    .iter()
                    .any(|e| matches!(e.playback, Playback::Running { .. }))
        })
    }

    fn slot(&self, scope: ScopeId) -> Option<&ScopeSlot> {
        self.scopes
            .get(scope.index)
            .filter(|s| s.alive && s.generation == scope.generation)
    }

    fn slot_mut(&mut self, scope: ScopeId) -> Option<&mut ScopeSlot> {
        self.scopes
            .get_mut(scope.index)
            .filter(|s| s.alive && s.generation == scope.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn stage() -> Stage {
        let mut stage = Stage::new(ScrollConfig::default(), 40);
        stage.set_max_scroll(400);
        stage
    }

    #[test]
    fn test_mount_entry_runs_and_latches() {
        let mut stage = stage();
        let scope = stage.acquire(0);
        let ch = stage
            .add(
                scope,
                Tween::new(0.0, 10.0, ms(100)).ease(Easing::Linear),
                Trigger::mount(),
            )
            .expect("live scope");

        // Armed until the first advance
        assert_eq!(stage.value(ch), Some(0.0));
        stage.advance(ms(0));
        stage.advance(ms(50));
        assert_eq!(stage.value(ch), Some(5.0));
        stage.advance(ms(100));
        assert_eq!(stage.value(ch), Some(10.0));
        assert!(!stage.needs_frame());
    }

    #[test]
    fn test_mount_delay_holds_base() {
        let mut stage = stage();
        let scope = stage.acquire(0);
        let ch = stage
            .add(
                scope,
                Tween::new(0.0, 1.0, ms(100)),
                Trigger::mount_after(ms(500)),
            )
            .expect("live scope");

        stage.advance(ms(400));
        assert_eq!(stage.value(ch), Some(0.0));
        assert!(!stage.needs_frame());
        stage.advance(ms(200));
        assert!(stage.needs_frame());
        stage.advance(ms(200));
        assert_eq!(stage.value(ch), Some(1.0));
    }

    #[test]
    fn test_enter_fires_once_past_mark() {
        let mut stage = stage();
        // Section anchored at row 100, triggering at 75% of a 40-row viewport
        let scope = stage.acquire(100);
        let ch = stage
            .add(
                scope,
                Tween::new(0.0, 1.0, ms(100)).ease(Easing::Linear),
                Trigger::enter(0.75),
            )
            .expect("live scope");

        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.0));

        // 100 - 0.75*40 = 70 is the firing offset
        stage.scroll.set_scroll(69);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.0));

        stage.scroll.set_scroll(70);
        stage.advance(ms(16));
        stage.advance(ms(200));
        assert_eq!(stage.value(ch), Some(1.0));

        // Scrolling back up does not rewind a played one-shot
        stage.scroll.set_scroll(0);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(1.0));
    }

    #[test]
    fn test_scrub_is_idempotent_in_offset() {
        let mut stage = stage();
        let scope = stage.acquire(100);
        let ch = stage
            .add(
                scope,
                Tween::new(0.0, 80.0, ms(0)).ease(Easing::Linear),
                Trigger::scrub(Mark::rows(0), Mark::rows(20)),
            )
            .expect("live scope");

        stage.scroll.set_scroll(110);
        stage.advance(ms(16));
        let mid = stage.value(ch);
        assert_eq!(mid, Some(40.0));

        // Move away and back; same offset, same value
        stage.scroll.set_scroll(200);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(80.0));
        stage.scroll.set_scroll(110);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), mid);
        stage.scroll.set_scroll(0);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.0));
    }

    #[test]
    fn test_release_reverts_everything() {
        let mut stage = stage();
        let scope = stage.acquire(0);
        let ch = stage
            .add(scope, Tween::new(0.0, 1.0, ms(1000)), Trigger::mount())
            .expect("live scope");
        stage.advance(ms(500));
        assert!(stage.needs_frame());
        assert_eq!(stage.entry_count(scope), 1);

        // Mid-animation teardown leaves nothing running and nothing sampled
        stage.release(scope);
        assert_eq!(stage.entry_count(scope), 0);
        assert_eq!(stage.total_entries(), 0);
        assert_eq!(stage.value(ch), None);
        assert!(!stage.needs_frame());
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut stage = stage();
        let old = stage.acquire(0);
        let ch = stage
            .add(old, Tween::new(0.0, 1.0, ms(100)), Trigger::mount())
            .expect("live scope");
        stage.release(old);

        // Same slot, new generation
        let new = stage.acquire(50);
        assert_eq!(stage.value(ch), None);
        assert_eq!(stage.entry_count(old), 0);
        assert_eq!(stage.entry_count(new), 0);
    }

    #[test]
    fn test_add_to_released_scope_is_noop() {
        let mut stage = stage();
        let scope = stage.acquire(0);
        stage.release(scope);
        assert!(stage
            .add(scope, Tween::new(0.0, 1.0, ms(100)), Trigger::mount())
            .is_none());
        assert_eq!(stage.total_entries(), 0);
        // Releasing again is harmless
        stage.release(scope);
    }

    #[test]
    fn test_rebase_keeps_playback() {
        let mut stage = stage();
        let scope = stage.acquire(100);
        let played = stage
            .add(
                scope,
                Tween::new(0.0, 1.0, ms(50)).ease(Easing::Linear),
                Trigger::enter(0.0),
            )
            .expect("live scope");
        stage.scroll.set_scroll(150);
        stage.advance(ms(16));
        stage.advance(ms(100));
        assert_eq!(stage.value(played), Some(1.0));

        // New geometry far below the current offset; the one-shot stays done
        stage.rebase(scope, 300);
        stage.scroll.set_scroll(0);
        stage.advance(ms(16));
        assert_eq!(stage.value(played), Some(1.0));
    }

    #[test]
    fn test_rebase_moves_scrub_window() {
        let mut stage = stage();
        let scope = stage.acquire(100);
        let ch = stage
            .add(
                scope,
                Tween::new(0.0, 1.0, ms(0)).ease(Easing::Linear),
                Trigger::scrub(Mark::rows(0), Mark::rows(10)),
            )
            .expect("live scope");
        stage.scroll.set_scroll(105);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.5));

        stage.rebase(scope, 200);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.0));
        stage.scroll.set_scroll(205);
        stage.advance(ms(16));
        assert_eq!(stage.value(ch), Some(0.5));
    }

    #[test]
    fn test_needs_frame_during_scroll() {
        let mut stage = stage();
        assert!(!stage.needs_frame());
        stage.scroll_by(30);
        assert!(stage.needs_frame());
        // Let the scroll animation run out
        stage.advance(ms(16));
        stage.advance(ms(5000));
        assert!(!stage.needs_frame());
    }

    #[test]
    fn test_release_all() {
        let mut stage = stage();
        let a = stage.acquire(0);
        let b = stage.acquire(100);
        stage.add(a, Tween::new(0.0, 1.0, ms(100)), Trigger::mount());
        stage.add(b, Tween::new(0.0, 1.0, ms(100)), Trigger::mount());
        assert_eq!(stage.total_entries(), 2);
        stage.release_all();
        assert_eq!(stage.total_entries(), 0);
        assert!(!stage.needs_frame());
    }
}
