use cadence_core::CadenceError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedError {
    #[error("frame duration must be finite and non-negative, got {0}")]
    InvalidDelta(f64),

    #[error("invalid event definition: {0}")]
    Invalid(#[from] CadenceError),
}

pub type SchedResult<T> = Result<T, SchedError>;
