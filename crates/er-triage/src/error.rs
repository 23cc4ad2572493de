use thiserror::Error;

use er_core::{ActionId, CoreError, PatientId};

#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("patient {0} is already in the waiting room")]
    DuplicateEntry(PatientId),

    #[error("patient {0} not found")]
    PatientNotFound(PatientId),

    #[error("treatment action {0} not found")]
    ActionNotFound(ActionId),

    #[error("treatment action {0} is already recorded")]
    DuplicateAction(ActionId),

    #[error("priority score {0} is not a finite number")]
    InvalidPriority(f64),

    #[error("lab priority {0} is outside the range 1-10")]
    InvalidLabPriority(u8),

    #[error("history parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
