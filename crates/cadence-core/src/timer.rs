//! Frame timer: turns wall-clock samples into per-frame durations.
//!
//! The scheduler never samples time itself.  A host render loop owns a
//! `FrameTimer`, calls [`FrameTimer::advance`] once per frame, and feeds
//! [`FrameTimer::dt`] into `Scheduler::update`.
//!
//! # Pause correction
//!
//! While paused the timer reports `dt = 0`.  The first unpaused sample after
//! a pause also reports `0` instead of the real gap, so a long pause never
//! shows up as one huge frame.
//!
//! ```text
//! frame   advance(paused)   dt
//!   1     false             now₁ - created
//!   2     true              0            (correction armed)
//!   3     true              0
//!   4     false             0            (correction consumed, previous = now₄)
//!   5     false             now₅ - now₄
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

// ── Time sources ──────────────────────────────────────────────────────────────

/// A monotonic source of wall-clock seconds.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Real time, measured from the moment the clock was created.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A hand-driven clock.  Clones share the same reading, so a test can keep
/// one handle and give another to a `FrameTimer`.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    pub fn set(&self, secs: f64) {
        self.0.set(secs);
    }

    pub fn advance(&self, by: f64) {
        self.0.set(self.0.get() + by);
    }
}

impl TimeSource for ManualClock {
    #[inline]
    fn now(&self) -> f64 {
        self.0.get()
    }
}

// ── FrameTimer ────────────────────────────────────────────────────────────────

pub struct FrameTimer<S: TimeSource = MonotonicClock> {
    source: S,
    previous: f64,
    dt: f64,
    correct_after_pause: bool,
}

impl FrameTimer<MonotonicClock> {
    /// A timer over real time.
    pub fn monotonic() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<S: TimeSource> FrameTimer<S> {
    /// Create a timer; the first unpaused `advance` measures from now.
    pub fn new(source: S) -> Self {
        let previous = source.now();
        Self { source, previous, dt: 0.0, correct_after_pause: false }
    }

    /// Duration of the last frame, in seconds.  Never negative.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// `true` while the next unpaused sample will be forced to zero.
    #[inline]
    pub fn is_correcting(&self) -> bool {
        self.correct_after_pause
    }

    /// Sample the time source once for this frame.
    pub fn advance(&mut self, paused: bool) {
        if paused {
            self.correct_after_pause = true;
            self.dt = 0.0;
            return;
        }

        let now = self.source.now();
        self.dt = if self.correct_after_pause {
            self.correct_after_pause = false;
            0.0
        } else {
            // A source that steps backwards must not produce a negative dt.
            (now - self.previous).max(0.0)
        };
        self.previous = now;
    }

    pub fn pause(&mut self) {
        self.advance(true);
    }

    pub fn unpause(&mut self) {
        self.advance(false);
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
