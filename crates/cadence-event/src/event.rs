//! `SchedulerEvent`: one scheduled action plus its timing policy.
//!
//! # Timing fields
//!
//! | Field             | One-shot (`at`)             | Recurring (`every`)          |
//! |-------------------|-----------------------------|------------------------------|
//! | `trigger`         | absolute due time           | absolute due time            |
//! | `initial_trigger` | the original absolute time  | the recurrence period        |
//! | `jitter_range`    | extra delay, drawn once     | extra delay, drawn per fire  |
//!
//! After each fire a recurring or repeating event moves forward by
//!
//! ```text
//! trigger += initial_trigger + uniform(0, jitter_range)
//! ```
//!
//! so a one-shot event turned into a repeating one (`at(t).repeat(n)`)
//! refires every `t` seconds.
//!
//! # Recurrence policy
//!
//! `recurring` and `repeat_count > 1` are exclusive: `repeat` clears
//! `recurring`.  A repeating event is re-enqueued while `repeat_count > 1`
//! at fire time and the count is decremented on each re-enqueue, so
//! `repeat(n)` fires `n` times in total.

use std::fmt;

use cadence_core::{
    CadenceResult, EventId, SchedRng, SimTime, check_non_negative, check_period,
    check_probability,
};

use crate::Action;

pub struct SchedulerEvent {
    id: EventId,
    name: String,
    trigger: SimTime,
    initial_trigger: f64,
    jitter_range: f64,
    recurring: bool,
    repeat_count: u32,
    probability: f64,
    force_fire_on_stop: bool,
    action: Option<Box<dyn Action>>,
}

impl SchedulerEvent {
    fn blank(trigger: f64, initial_trigger: f64, jitter_range: f64, recurring: bool) -> Self {
        Self {
            id: EventId::UNASSIGNED,
            name: String::new(),
            trigger: SimTime(trigger + 0.0),
            initial_trigger,
            jitter_range,
            recurring,
            repeat_count: 0,
            probability: 1.0,
            force_fire_on_stop: false,
            action: None,
        }
    }

    // ── Constructors ──────────────────────────────────────────────────────

    /// One-shot event due at absolute simulation time `time`.
    pub fn at(time: f64) -> Self {
        Self::blank(time, time, 0.0, false)
    }

    /// One-shot event due at `time + uniform(0, jitter_range)`.
    pub fn at_jittered(time: f64, jitter_range: f64, rng: &mut SchedRng) -> Self {
        Self::blank(time + rng.jitter(jitter_range), time, jitter_range, false)
    }

    /// Recurring event, first due after one `period`.
    pub fn every(period: f64) -> Self {
        Self::blank(period, period, 0.0, true)
    }

    /// Recurring event spaced `period + uniform(0, jitter_range)` apart.
    pub fn every_jittered(period: f64, jitter_range: f64, rng: &mut SchedRng) -> Self {
        Self::blank(period + rng.jitter(jitter_range), period, jitter_range, true)
    }

    // ── Fluent setters ────────────────────────────────────────────────────

    /// Push the next trigger back by `by` seconds.
    pub fn delay(mut self, by: f64) -> Self {
        self.trigger = SimTime(self.trigger.secs() + by + 0.0);
        self
    }

    /// Fire `times` times in total.  Overrides any recurrence.
    pub fn repeat(mut self, times: u32) -> Self {
        self.repeat_count = times;
        self.recurring = false;
        self
    }

    /// Fire once when the scheduler stops while this event is still pending.
    pub fn ensure(mut self) -> Self {
        self.force_fire_on_stop = true;
        self
    }

    pub fn with_chance(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn bind<A: Action + 'static>(mut self, action: A) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Stamp the identity handed out by the scheduler on commit.
    #[inline]
    pub fn set_id(&mut self, id: EventId) {
        self.id = id;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn trigger(&self) -> SimTime {
        self.trigger
    }

    #[inline]
    pub fn initial_trigger(&self) -> f64 {
        self.initial_trigger
    }

    #[inline]
    pub fn jitter_range(&self) -> f64 {
        self.jitter_range
    }

    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    #[inline]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    #[inline]
    pub fn force_fire_on_stop(&self) -> bool {
        self.force_fire_on_stop
    }

    #[inline]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    // ── Behaviour ─────────────────────────────────────────────────────────

    /// Reject out-of-range timing and probability values.
    pub fn validate(&self) -> CadenceResult<()> {
        check_non_negative("trigger", self.trigger.0)?;
        check_non_negative("jitter range", self.jitter_range)?;
        check_probability(self.probability)?;
        if self.recurring {
            check_period(self.initial_trigger)?;
        } else {
            check_non_negative("repeat period", self.initial_trigger)?;
        }
        Ok(())
    }

    /// Run the bound action if the probability roll succeeds.
    ///
    /// Returns whether the action was invoked.  An unbound event rolls
    /// nothing and invokes nothing.
    pub fn fire(&mut self, rng: &mut SchedRng) -> bool {
        let Some(action) = self.action.as_mut() else {
            return false;
        };
        if !rng.chance(self.probability) {
            return false;
        }
        action.perform();
        true
    }

    /// `true` if this event goes back into the queue after firing.
    #[inline]
    pub fn should_requeue(&self) -> bool {
        self.recurring || self.repeat_count > 1
    }

    /// Consume one repetition and move the trigger one period (plus jitter)
    /// forward.
    pub fn advance_for_requeue(&mut self, rng: &mut SchedRng) -> &mut Self {
        self.repeat_count = self.repeat_count.saturating_sub(1);
        self.trigger += self.initial_trigger + rng.jitter(self.jitter_range);
        self
    }
}

impl fmt::Debug for SchedulerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerEvent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .field("initial_trigger", &self.initial_trigger)
            .field("jitter_range", &self.jitter_range)
            .field("recurring", &self.recurring)
            .field("repeat_count", &self.repeat_count)
            .field("probability", &self.probability)
            .field("force_fire_on_stop", &self.force_fire_on_stop)
            .field("action", &if self.has_action() { "bound" } else { "none" })
            .finish()
    }
}

impl fmt::Display for SchedulerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - recurring: {}", self.trigger, self.name, self.recurring)
    }
}
