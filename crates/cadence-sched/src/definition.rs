//! Fluent builder for defining one scheduler event.
//!
//! A definition is opened by one of the scheduler's timing calls (`now`,
//! `after`, `at`, `at_jittered`, `every`, `every_jittered`), refined with
//! the chained options below, and closed by [`EventDefinition::commit`].
//! The timing calls are also available on an open definition, where they
//! commit it and open the next one:
//!
//! ```rust,ignore
//! scheduler
//!     .every(1.0).bind(update_label)
//!     .every(0.5)?.bind(spawn_sprite).with_chance(0.8)
//!     .commit()?;
//! ```
//!
//! | Option               | Effect                                          |
//! |----------------------|-------------------------------------------------|
//! | `.delay(by)`         | Shift the first trigger by `by` seconds         |
//! | `.repeat(n)`         | Fire `n` times in total (clears recurrence)     |
//! | `.ensure()`          | Fire once on stop if still pending              |
//! | `.with_chance(p)`    | Run the action with probability `p` per fire    |
//! | `.bind(action)`      | Action to run                                   |
//! | `.bind_weak(rc, f)`  | Call `f` on a weakly held receiver              |
//! | `.name(label)`       | Diagnostic label                                |
//!
//! Out-of-range values are reported by `commit`, never clamped.

use std::cell::RefCell;
use std::rc::Rc;

use cadence_core::{CadenceError, CadenceResult, EventId};
use cadence_event::{Action, SchedulerEvent, weak};

use crate::{SchedResult, Scheduler};

/// An event under construction.  Holds the scheduler borrowed until it is
/// committed or dropped; a dropped definition is discarded.
#[must_use = "an event definition is discarded unless it is committed"]
pub struct EventDefinition<'s> {
    scheduler: &'s mut Scheduler,
    event:     SchedulerEvent,
    error:     Option<CadenceError>,
}

impl<'s> EventDefinition<'s> {
    pub(crate) fn open(scheduler: &'s mut Scheduler, event: SchedulerEvent) -> Self {
        Self { scheduler, event, error: None }
    }

    /// Remember the first failed check; `commit` reports it.
    pub(crate) fn check(mut self, checked: CadenceResult<f64>) -> Self {
        if let Err(err) = checked {
            self.error.get_or_insert(err);
        }
        self
    }

    /// The event as defined so far.
    pub fn event(&self) -> &SchedulerEvent {
        &self.event
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Shift the first trigger by `by` seconds.  Negative shifts are fine
    /// as long as the trigger stays non-negative.
    pub fn delay(mut self, by: f64) -> Self {
        self.event = self.event.delay(by);
        self
    }

    pub fn repeat(mut self, times: u32) -> Self {
        self.event = self.event.repeat(times);
        self
    }

    pub fn ensure(mut self) -> Self {
        self.event = self.event.ensure();
        self
    }

    pub fn with_chance(mut self, probability: f64) -> Self {
        self.event = self.event.with_chance(probability);
        self
    }

    pub fn bind<A: Action + 'static>(mut self, action: A) -> Self {
        self.event = self.event.bind(action);
        self
    }

    /// Bind `method` on `target` without keeping `target` alive.  Fires after
    /// `target` is dropped do nothing.
    pub fn bind_weak<T, F>(self, target: &Rc<RefCell<T>>, method: F) -> Self
    where
        T: 'static,
        F: FnMut(&mut T) + 'static,
    {
        self.bind(weak(target, method))
    }

    pub fn name(mut self, label: &str) -> Self {
        let label = self.scheduler.event_label(label);
        self.event = self.event.named(label);
        self
    }

    // ── Closing ───────────────────────────────────────────────────────────

    /// Validate the definition and queue it.
    pub fn commit(self) -> SchedResult<EventId> {
        self.commit_into().map(|(_, id)| id)
    }

    fn commit_into(self) -> SchedResult<(&'s mut Scheduler, EventId)> {
        let Self { scheduler, event, error } = self;
        if let Some(err) = error {
            return Err(err.into());
        }
        let id = scheduler.add(event)?;
        Ok((scheduler, id))
    }

    // ── Commit-and-open ───────────────────────────────────────────────────

    pub fn now(self) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.now())
    }

    pub fn after(self, delta: f64) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.after(delta))
    }

    pub fn at(self, time: f64) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.at(time))
    }

    pub fn at_jittered(self, time: f64, jitter_range: f64) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.at_jittered(time, jitter_range))
    }

    pub fn every(self, period: f64) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.every(period))
    }

    pub fn every_jittered(self, period: f64, jitter_range: f64) -> SchedResult<EventDefinition<'s>> {
        let (scheduler, _) = self.commit_into()?;
        Ok(scheduler.every_jittered(period, jitter_range))
    }
}
