//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so input-validation failures surface unchanged.

use thiserror::Error;

/// Errors produced while constructing `er-core` values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("acuity level {0} is outside the ESI range 1-5")]
    InvalidAcuity(u8),

    #[error("invalid blood pressure reading {0:?}: expected \"systolic/diastolic\"")]
    InvalidBloodPressure(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `er-core`.
pub type CoreResult<T> = Result<T, CoreError>;
