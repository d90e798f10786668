//! The `Scheduler` struct, its state machine, and the per-update fire loop.

use std::fmt;

use cadence_core::{
    EventId, SchedRng, SchedulerConfig, SimTime, check_non_negative,
};
use cadence_event::{EventQueue, SchedulerEvent};
use tracing::{debug, trace};

use crate::{EventDefinition, NoopObserver, SchedError, SchedResult, SchedulerObserver};

// ── State ─────────────────────────────────────────────────────────────────────

/// Lifecycle of a [`Scheduler`].
///
/// ```text
/// Stopped ──start──▶ Running ──pause──▶ Paused
///    ▲                  │  ◀──resume──
///    └──────stop────────┘
/// ```
///
/// Only `Running` accumulates time.  A stopped scheduler may be started
/// again; elapsed time carries over.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchedulerState::Stopped => "stopped",
            SchedulerState::Running => "running",
            SchedulerState::Paused => "paused",
        })
    }
}

/// What a stop did with the events still pending.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DrainSummary {
    /// `ensure()`d events that were fired (whether or not their probability
    /// roll invoked the action).
    pub forced: usize,
    /// Events dropped without firing.
    pub discarded: usize,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// A deterministic, frame-driven event scheduler.
///
/// The scheduler owns its event queue and random stream.  It never reads the
/// wall clock: simulation time moves only through [`Scheduler::update`].
/// There is no global instance; create one per owner.
pub struct Scheduler {
    /// Diagnostic label, prefixed onto the names of events defined through
    /// the fluent API.
    pub name: String,

    elapsed: SimTime,
    duration: f64,
    state: SchedulerState,
    events: EventQueue,
    rng: SchedRng,
    next_id: EventId,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::with_rng(String::new(), 0.0, SchedRng::from_entropy())
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("name", &self.name)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("state", &self.state)
            .field("pending", &self.events.len())
            .finish()
    }
}

impl Scheduler {
    // ── Construction ──────────────────────────────────────────────────────

    /// Unbounded scheduler seeded from entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbounded scheduler with a reproducible random stream.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(String::new(), 0.0, SchedRng::new(seed))
    }

    pub fn from_config(config: SchedulerConfig) -> SchedResult<Self> {
        config.validate()?;
        Ok(Self::with_rng(config.name, config.duration, SchedRng::from_seed_opt(config.seed)))
    }

    fn with_rng(name: String, duration: f64, rng: SchedRng) -> Self {
        Self {
            name,
            elapsed: SimTime::ZERO,
            duration,
            state: SchedulerState::Stopped,
            events: EventQueue::new(),
            rng,
            next_id: EventId(0),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn elapsed(&self) -> SimTime {
        self.elapsed
    }

    /// Total run length; `0` means unbounded.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) -> SchedResult<()> {
        self.duration = check_non_negative("duration", duration)?;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Events waiting to fire, earliest first.
    #[inline]
    pub fn pending(&self) -> &EventQueue {
        &self.events
    }

    #[inline]
    pub fn pending_len(&self) -> usize {
        self.events.len()
    }

    /// The scheduler's random stream, for building jittered events by hand.
    #[inline]
    pub fn rng(&mut self) -> &mut SchedRng {
        &mut self.rng
    }

    // ── State machine ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        if self.state != SchedulerState::Running {
            debug!(scheduler = %self.name, from = %self.state, elapsed = self.elapsed.secs(), "scheduler started");
        }
        self.state = SchedulerState::Running;
    }

    /// Freeze time and the queue.  No-op unless running.
    pub fn pause(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Paused;
            debug!(scheduler = %self.name, elapsed = self.elapsed.secs(), "scheduler paused");
        }
    }

    /// Continue after [`pause`](Self::pause).  No-op unless paused.
    pub fn resume(&mut self) {
        if self.state == SchedulerState::Paused {
            self.state = SchedulerState::Running;
            debug!(scheduler = %self.name, elapsed = self.elapsed.secs(), "scheduler resumed");
        }
    }

    /// Stop and drain the queue: `ensure()`d events fire once, everything
    /// else is dropped unfired.  No-op unless running; a paused scheduler
    /// keeps its queue and stays paused.
    pub fn stop(&mut self) -> DrainSummary {
        self.stop_with(&mut NoopObserver)
    }

    pub fn stop_with<O: SchedulerObserver>(&mut self, observer: &mut O) -> DrainSummary {
        if self.state != SchedulerState::Running {
            return DrainSummary::default();
        }
        self.state = SchedulerState::Stopped;

        let mut summary = DrainSummary::default();
        while let Some(mut event) = self.events.pop_min() {
            if event.force_fire_on_stop() {
                let invoked = event.fire(&mut self.rng);
                trace!(id = event.id().0, name = event.name(), invoked, "forced fire on stop");
                summary.forced += 1;
                observer.on_fire(&event, invoked);
            } else {
                summary.discarded += 1;
                observer.on_discard(&event);
            }
        }

        debug!(
            scheduler = %self.name,
            elapsed = self.elapsed.secs(),
            forced = summary.forced,
            discarded = summary.discarded,
            "scheduler stopped"
        );
        observer.on_stop(self.elapsed, &summary);
        summary
    }

    // ── Per-frame update ──────────────────────────────────────────────────

    /// Advance simulation time by `dt` seconds and fire everything that
    /// became due, in trigger order.
    ///
    /// Returns the number of fires.  Does nothing unless running.  Once
    /// `elapsed` passes a non-zero duration the scheduler stops instead of
    /// firing; the forced fires of that stop are counted.
    ///
    /// # Errors
    /// [`SchedError::InvalidDelta`] for a negative or non-finite `dt`, in
    /// any state.
    pub fn update(&mut self, dt: f64) -> SchedResult<usize> {
        self.update_with(dt, &mut NoopObserver)
    }

    pub fn update_with<O: SchedulerObserver>(
        &mut self,
        dt: f64,
        observer: &mut O,
    ) -> SchedResult<usize> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SchedError::InvalidDelta(dt));
        }
        if self.state != SchedulerState::Running {
            return Ok(0);
        }

        self.elapsed += dt;
        observer.on_update_start(self.elapsed);

        if !self.within_duration() {
            debug!(
                scheduler = %self.name,
                elapsed = self.elapsed.secs(),
                duration = self.duration,
                "duration elapsed"
            );
            return Ok(self.stop_with(observer).forced);
        }

        let mut fired = 0;
        while let Some(mut event) = self.events.pop_due(self.elapsed) {
            let invoked = event.fire(&mut self.rng);
            fired += 1;
            trace!(
                id = event.id().0,
                name = event.name(),
                trigger = event.trigger().secs(),
                invoked,
                "fired"
            );
            observer.on_fire(&event, invoked);

            if event.should_requeue() {
                event.advance_for_requeue(&mut self.rng);
                observer.on_requeue(&event);
                self.events.add(event);
            } else {
                observer.on_retire(&event);
            }
        }

        observer.on_update_end(self.elapsed, fired);
        Ok(fired)
    }

    #[inline]
    fn within_duration(&self) -> bool {
        self.duration == 0.0 || self.elapsed.secs() <= self.duration
    }

    // ── Committing events ─────────────────────────────────────────────────

    /// Validate `event`, give it an id, and queue it.
    pub fn add(&mut self, mut event: SchedulerEvent) -> SchedResult<EventId> {
        event.validate()?;
        let id = self.next_id;
        self.next_id = id.next();
        event.set_id(id);
        trace!(
            id = id.0,
            name = event.name(),
            trigger = event.trigger().secs(),
            recurring = event.is_recurring(),
            repeat = event.repeat_count(),
            "event committed"
        );
        self.events.add(event);
        Ok(id)
    }

    /// `"<scheduler> - <label>"`, or just `label` for an unnamed scheduler.
    pub(crate) fn event_label(&self, label: &str) -> String {
        if self.name.is_empty() {
            label.to_owned()
        } else {
            format!("{} - {}", self.name, label)
        }
    }

    // ── Fluent definitions ────────────────────────────────────────────────

    /// One-shot event due at the current elapsed time; fires on the next
    /// update.
    pub fn now(&mut self) -> EventDefinition<'_> {
        let time = self.elapsed.secs();
        self.at(time)
    }

    /// One-shot event due `delta` seconds from the current elapsed time.
    pub fn after(&mut self, delta: f64) -> EventDefinition<'_> {
        let checked = check_non_negative("delay", delta);
        let time = self.elapsed.secs() + delta;
        self.at(time).check(checked)
    }

    /// One-shot event due at absolute simulation time `time`.
    pub fn at(&mut self, time: f64) -> EventDefinition<'_> {
        EventDefinition::open(self, SchedulerEvent::at(time))
    }

    /// One-shot event due at `time` plus a random delay in `[0, jitter_range)`.
    pub fn at_jittered(&mut self, time: f64, jitter_range: f64) -> EventDefinition<'_> {
        let event = SchedulerEvent::at_jittered(time, jitter_range, &mut self.rng);
        EventDefinition::open(self, event)
    }

    /// Recurring event every `period` seconds, first due one period from
    /// time zero.
    pub fn every(&mut self, period: f64) -> EventDefinition<'_> {
        EventDefinition::open(self, SchedulerEvent::every(period))
    }

    /// Recurring event spaced `period` plus a random `[0, jitter_range)` apart.
    pub fn every_jittered(&mut self, period: f64, jitter_range: f64) -> EventDefinition<'_> {
        let event = SchedulerEvent::every_jittered(period, jitter_range, &mut self.rng);
        EventDefinition::open(self, event)
    }
}
