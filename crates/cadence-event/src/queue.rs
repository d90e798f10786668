//! `EventQueue`: pending events ordered by trigger time.
//!
//! # Ordering
//!
//! Events are keyed by `(trigger, seq)` where `seq` is a counter bumped on
//! every [`EventQueue::add`].  The map therefore yields events in ascending
//! trigger order and, among equal triggers, in insertion order.  A recurring
//! event that is re-added after firing draws a fresh `seq`, so it lands
//! behind every event already waiting at the same time.
//!
//! `BTreeMap` gives O(log n) insert and O(log n) pop-min.  Queues hold tens
//! of events in practice, so the constant is what matters and it is small.

use std::collections::BTreeMap;

use cadence_core::SimTime;

use crate::SchedulerEvent;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct QueueKey {
    trigger: SimTime,
    seq: u64,
}

/// A priority queue of pending events, earliest trigger first.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<QueueKey, SchedulerEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event` behind every queued event with a trigger ≤ its own.
    pub fn add(&mut self, event: SchedulerEvent) {
        // `-0.0` and `0.0` must share a key slot or the tie-break breaks.
        let trigger = SimTime(event.trigger().secs() + 0.0);
        let key = QueueKey { trigger, seq: self.next_seq };
        self.next_seq += 1;
        self.inner.insert(key, event);
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop_min(&mut self) -> Option<SchedulerEvent> {
        self.inner.pop_first().map(|(_, event)| event)
    }

    /// The earliest event, without removing it.
    pub fn peek_min(&self) -> Option<&SchedulerEvent> {
        self.inner.first_key_value().map(|(_, event)| event)
    }

    /// Trigger time of the earliest event, or `None` if empty.
    pub fn next_trigger(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|key| key.trigger)
    }

    /// Pop the earliest event only if it is due at or before `now`.
    pub fn pop_due(&mut self, now: SimTime) -> Option<SchedulerEvent> {
        match self.next_trigger() {
            Some(trigger) if trigger <= now => self.pop_min(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Pending events in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &SchedulerEvent> + '_ {
        self.inner.values()
    }

    /// Remove every event, yielding them in firing order.
    pub fn drain(&mut self) -> impl Iterator<Item = SchedulerEvent> + use<> {
        std::mem::take(&mut self.inner).into_values()
    }
}
