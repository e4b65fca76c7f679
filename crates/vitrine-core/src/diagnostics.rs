//! Animated feature diagnostics: the telemetry feed and the shuffler
//!
//! `TelemetryFeed` cycles through its messages with a typewriter effect:
//! type, hold live, scramble into the next line. `DiagnosticWindow` shows a
//! sliding window of three entries that rotates on a fixed cadence, each
//! rotation replaying a staggered flip-in. Both run off the explicit clock
//! through `StepTimer`, so a slow frame catches up instead of stalling.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::easing::Easing;
use crate::timing::{progress, StepTimer};

const CHAR_INTERVAL: Duration = Duration::from_millis(30);
const HOLD_INTERVAL: Duration = Duration::from_millis(3000);
const SCRAMBLE_INTERVAL: Duration = Duration::from_millis(40);
/// Scramble frames shown before the next message starts typing
const SCRAMBLE_ROUNDS: u32 = 10;
const SCRAMBLE_WIDTH: usize = 15;
const SCRAMBLE_GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Feed state, shown verbatim as the status lamp label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Typing,
    Live,
    Scrambling,
}

impl FeedStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FeedStatus::Typing => "TYPING",
            FeedStatus::Live => "LIVE",
            FeedStatus::Scrambling => "SCRAMBLING",
        }
    }
}

/// Typewriter message cycle
#[derive(Debug, Clone)]
pub struct TelemetryFeed {
    messages: Vec<String>,
    message: usize,
    typed: usize,
    status: FeedStatus,
    timer: StepTimer,
    scrambles: u32,
    line: String,
    rng: StdRng,
}

impl TelemetryFeed {
    pub fn new(messages: Vec<String>, now: Duration) -> Self {
        Self::with_rng(messages, now, StdRng::from_entropy())
    }

    pub fn with_rng(messages: Vec<String>, now: Duration, rng: StdRng) -> Self {
        Self {
            messages,
            message: 0,
            typed: 0,
            status: FeedStatus::Typing,
            timer: StepTimer::new(CHAR_INTERVAL, now),
            scrambles: 0,
            line: String::new(),
            rng,
        }
    }

    /// Text currently on the feed line
    pub fn line(&self) -> &str {
        &self.line
    }

    #[inline]
    pub fn status(&self) -> FeedStatus {
        self.status
    }

    /// Drive the cycle forward to the given clock value
    pub fn advance(&mut self, now: Duration) {
        if self.messages.is_empty() {
            return;
        }
        match self.status {
            FeedStatus::Typing => {
                let steps = self.timer.tick(now);
                for _ in 0..steps {
                    let msg = &self.messages[self.message];
                    if let Some(c) = msg.chars().nth(self.typed) {
                        self.line.push(c);
                        self.typed += 1;
                    }
                    if self.typed >= msg.chars().count() {
                        self.status = FeedStatus::Live;
                        self.timer.restart(HOLD_INTERVAL, now);
                        break;
                    }
                }
            }
            FeedStatus::Live => {
                if self.timer.tick(now) > 0 {
                    self.message = (self.message + 1) % self.messages.len();
                    self.typed = 0;
                    self.scrambles = 0;
                    self.status = FeedStatus::Scrambling;
                    self.timer.restart(SCRAMBLE_INTERVAL, now);
                }
            }
            FeedStatus::Scrambling => {
                let steps = self.timer.tick(now);
                for _ in 0..steps {
                    self.scrambles += 1;
                    if self.scrambles > SCRAMBLE_ROUNDS {
                        self.line.clear();
                        self.status = FeedStatus::Typing;
                        self.timer.restart(CHAR_INTERVAL, now);
                        break;
                    }
                    self.line = scramble_line(&mut self.rng);
                }
            }
        }
    }
}

fn scramble_line(rng: &mut StdRng) -> String {
    (0..SCRAMBLE_WIDTH)
        .map(|_| SCRAMBLE_GLYPHS[rng.gen_range(0..SCRAMBLE_GLYPHS.len())] as char)
        .collect()
}

const WINDOW_ROWS: usize = 3;
const SHUFFLE_INTERVAL: Duration = Duration::from_millis(3000);
const FLIP_DURATION: Duration = Duration::from_millis(600);
const FLIP_STAGGER: Duration = Duration::from_millis(100);

/// Sliding three-row window over a list of entries
#[derive(Debug, Clone)]
pub struct DiagnosticWindow {
    len: usize,
    rows: Vec<usize>,
    timer: StepTimer,
    flipped: Option<Duration>,
}

impl DiagnosticWindow {
    pub fn new(len: usize, now: Duration) -> Self {
        Self {
            len,
            rows: (0..WINDOW_ROWS.min(len)).collect(),
            timer: StepTimer::new(SHUFFLE_INTERVAL, now),
            flipped: None,
        }
    }

    /// Entry indices currently visible, oldest first
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Rotate the window on schedule
    pub fn advance(&mut self, now: Duration) {
        if self.rows.is_empty() {
            return;
        }
        let steps = self.timer.tick(now);
        for _ in 0..steps {
            let last = self.rows[self.rows.len() - 1];
            self.rows.remove(0);
            self.rows.push((last + 1) % self.len);
        }
        if steps > 0 {
            self.flipped = Some(now);
        }
    }

    /// Flip-in progress for a visible row, eased with overshoot
    ///
    /// Rows settle at 1.0; before the first rotation everything reads as
    /// settled.
    pub fn row_entrance(&self, row: usize, now: Duration) -> f64 {
        match self.flipped {
            Some(start) => {
                let delayed = start + FLIP_STAGGER * row as u32;
                Easing::BackOut.apply(progress(delayed, FLIP_DURATION, now))
            }
            None => 1.0,
        }
    }

    /// Whether a flip-in is still playing
    pub fn needs_frame(&self, now: Duration) -> bool {
        match self.flipped {
            Some(start) => {
                let tail = start + FLIP_STAGGER * (WINDOW_ROWS as u32 - 1) + FLIP_DURATION;
                now < tail
            }
            None => false,
        }
    }
}
