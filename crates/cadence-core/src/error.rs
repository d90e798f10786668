//! Validation error type shared by every `cadence-*` crate.
//!
//! The scheduler has no recoverable runtime failures: every error here is a
//! caller handing in an out-of-range value.  Values are rejected, never
//! clamped.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CadenceError {
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("probability must lie in [0, 1], got {0}")]
    Probability(f64),

    #[error("recurrence period must be positive, got {0}")]
    Period(f64),
}

/// Shorthand result type for all `cadence-*` crates.
pub type CadenceResult<T> = Result<T, CadenceError>;

/// Reject NaN and infinities.
#[inline]
pub fn check_finite(what: &'static str, value: f64) -> CadenceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CadenceError::NonFinite { what, value })
    }
}

/// Reject non-finite and negative values.  `-0.0` is normalised to `0.0`.
#[inline]
pub fn check_non_negative(what: &'static str, value: f64) -> CadenceResult<f64> {
    let value = check_finite(what, value)?;
    if value < 0.0 {
        return Err(CadenceError::Negative { what, value });
    }
    Ok(value + 0.0)
}

#[inline]
pub fn check_probability(p: f64) -> CadenceResult<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(CadenceError::Probability(p))
    }
}

/// A recurring event with a zero period would refire forever inside a
/// single update.
#[inline]
pub fn check_period(period: f64) -> CadenceResult<f64> {
    let period = check_finite("period", period)?;
    if period > 0.0 {
        Ok(period)
    } else {
        Err(CadenceError::Period(period))
    }
}
