//! Simulation time model.
//!
//! # Design
//!
//! Simulation time is a non-negative number of seconds held in `SimTime`.
//! It only moves when the host calls `Scheduler::update(dt)`; nothing here
//! reads the wall clock (see [`crate::timer`] for the host-side piece that
//! turns wall-clock samples into `dt`).
//!
//! `SimTime` orders with `f64::total_cmp`, which makes it `Eq + Ord` and
//! therefore usable as an ordered-map key.  Validated times are always
//! finite and non-negative, where `total_cmp` agrees with `<`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

/// An absolute simulation time in seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl AddAssign<f64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(secs: f64) -> Self {
        SimTime(secs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}
