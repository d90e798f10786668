//! Strongly typed event identifier.
//!
//! Ids are handed out by the scheduler in commit order and stay with an
//! event across every re-enqueue, so observers can correlate successive
//! fires of the same recurring event.

use std::fmt;

/// Identity of one committed scheduler event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub u64);

impl EventId {
    /// Sentinel carried by events that have not been committed yet.
    pub const UNASSIGNED: EventId = EventId(u64::MAX);

    #[inline(always)]
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }

    /// The id following `self` in commit order.
    #[inline(always)]
    pub fn next(self) -> EventId {
        EventId(self.0 + 1)
    }
}

impl Default for EventId {
    /// Returns the `UNASSIGNED` sentinel so uncommitted events are visibly unassigned.
    #[inline(always)]
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assigned() {
            write!(f, "EventId({})", self.0)
        } else {
            f.write_str("EventId(unassigned)")
        }
    }
}
