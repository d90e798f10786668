//! `cadence-sched`: the frame-driven scheduler.
//!
//! # Per-update fire loop
//!
//! ```text
//! update(dt):
//!   if state != Running: return
//!   elapsed += dt
//!   if duration == 0 or elapsed ≤ duration:
//!     while queue.min.trigger ≤ elapsed:
//!       pop → fire (probability roll) → requeue if recurring / repeating
//!   else:
//!     stop()   # drain: fire ensure()d events, drop the rest
//! ```
//!
//! A coarse `dt` can span several triggers; the loop re-reads the queue
//! minimum after every pop, so all of them fire within the one call, in
//! trigger order.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cadence_sched::Scheduler;
//!
//! let mut scheduler = Scheduler::seeded(42);
//! scheduler.every(1.0).bind(|| println!("tick")).commit()?;
//! scheduler.every(0.5).bind(weak(&scene, Scene::spawn)).commit()?;
//! scheduler.start();
//!
//! loop {
//!     timer.advance(paused);
//!     scheduler.update(timer.dt())?;
//! }
//! ```

pub mod definition;
pub mod error;
pub mod observer;
pub mod scheduler;


pub use definition::EventDefinition;
pub use error::{SchedError, SchedResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use scheduler::{DrainSummary, Scheduler, SchedulerState};

pub use cadence_core::{EventId, SchedulerConfig, SimTime};
pub use cadence_event::{Action, ActionExt, EventQueue, SchedulerEvent, weak};
