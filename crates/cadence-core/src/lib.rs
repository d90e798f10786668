//! `cadence-core`: foundational types for the `cadence` event scheduler.
//!
//! This crate is a dependency of every other `cadence-*` crate.  It has no
//! `cadence-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`time`]   | `SimTime`                                                 |
//! | [`ids`]    | `EventId`                                                 |
//! | [`rng`]    | `SchedRng`                                                |
//! | [`timer`]  | `FrameTimer`, `TimeSource`, `MonotonicClock`, `ManualClock` |
//! | [`config`] | `SchedulerConfig`                                         |
//! | [`error`]  | `CadenceError`, `CadenceResult`, `check_*` validators     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod timer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SchedulerConfig;
pub use error::{
    CadenceError, CadenceResult, check_finite, check_non_negative, check_period,
    check_probability,
};
pub use ids::EventId;
pub use rng::SchedRng;
pub use time::SimTime;
pub use timer::{FrameTimer, ManualClock, MonotonicClock, TimeSource};
