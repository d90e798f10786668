//! Scheduler observer trait for diagnostics and data collection.

use cadence_core::SimTime;
use cadence_event::SchedulerEvent;

use crate::DrainSummary;

/// Callbacks invoked by [`Scheduler::update_with`][crate::Scheduler::update_with]
/// and [`Scheduler::stop_with`][crate::Scheduler::stop_with].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: fire counter
///
/// ```rust,ignore
/// struct FireCounter { invoked: usize }
///
/// impl SchedulerObserver for FireCounter {
///     fn on_fire(&mut self, _event: &SchedulerEvent, invoked: bool) {
///         self.invoked += invoked as usize;
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called after `elapsed` has been advanced, before any event fires.
    fn on_update_start(&mut self, _elapsed: SimTime) {}

    /// Called after each fire.  `invoked` is `false` when the event has no
    /// action or its probability roll failed.
    fn on_fire(&mut self, _event: &SchedulerEvent, _invoked: bool) {}

    /// Called when a fired event goes back into the queue with its new trigger.
    fn on_requeue(&mut self, _event: &SchedulerEvent) {}

    /// Called when a fired event is finished and dropped.
    fn on_retire(&mut self, _event: &SchedulerEvent) {}

    /// Called for each pending event dropped unfired by a stop.
    fn on_discard(&mut self, _event: &SchedulerEvent) {}

    /// Called once a stop has drained the queue.
    fn on_stop(&mut self, _elapsed: SimTime, _summary: &DrainSummary) {}

    /// Called at the end of an update that ran the fire loop.
    fn on_update_end(&mut self, _elapsed: SimTime, _fired: usize) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
