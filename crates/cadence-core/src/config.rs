//! Scheduler configuration.

use crate::{CadenceResult, check_non_negative};

/// Top-level scheduler configuration.
///
/// Typically built in code or loaded from JSON by the host application
/// (with the `serde` feature) and handed to `Scheduler::from_config`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Diagnostic label.  Prefixed onto the names of events defined through
    /// the fluent API.
    pub name: String,

    /// Total run length in simulated seconds.  `0` means unbounded.
    pub duration: f64,

    /// RNG seed.  The same seed always produces identical jitter and
    /// probability draws.  `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { name: String::new(), duration: 0.0, seed: None }
    }
}

impl SchedulerConfig {
    /// `true` when the run never ends on its own.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.duration == 0.0
    }

    pub fn validate(&self) -> CadenceResult<()> {
        check_non_negative("duration", self.duration)?;
        Ok(())
    }
}
