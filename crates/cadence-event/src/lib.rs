//! `cadence-event`: what to run, when to run it, and in which order.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`action`] | `Action` trait, `NoAction`, `WeakAction`, `Chained`        |
//! | [`event`]  | `SchedulerEvent`                                           |
//! | [`queue`]  | `EventQueue` (`BTreeMap<(SimTime, seq), SchedulerEvent>`)  |
//!
//! # Event lifecycle (summary)
//!
//! ```text
//! built (SchedulerEvent::at / every …)
//!   → committed into EventQueue
//!   → popped when trigger ≤ elapsed → fire()
//!       → should_requeue()? advance_for_requeue() → back into EventQueue
//!       → otherwise dropped
//!   → or drained by stop(): fired only if ensure()d, dropped either way
//! ```

pub mod action;
pub mod event;
pub mod queue;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionExt, Chained, NoAction, WeakAction, weak};
pub use event::SchedulerEvent;
pub use queue::EventQueue;
