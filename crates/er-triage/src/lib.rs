//! `er-triage`: the patient-facing schedulers.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`triage`]       | `priority_score`, `TriageScheduler` over a `PriorityHeap` |
//! | [`waiting_room`] | `WaitingRoomScheduler`, `PatientDirectory`, status reports |
//! | [`history`]      | `TreatmentHistory` undo stacks, `HistoryStore` trait      |
//! | [`lab`]          | `LabQueue`                                                |
//! | [`metrics`]      | `MetricsTracker`, door-to-provider and length-of-stay     |
//! | [`loader`]       | `load_history_csv`, `load_history_reader`                 |
//! | [`error`]        | `SchedulingError`, `SchedulingResult<T>`                  |
//!
//! # Ownership
//!
//! Each scheduler is a plain owned value with `&mut self` mutators and no
//! internal locking.  A service holds one of each and wraps it in a single
//! `Mutex` if it needs to share it.  Time comes from an `er_core::Clock`
//! type parameter that defaults to the system clock.

pub mod error;
pub mod history;
pub mod lab;
pub mod loader;
pub mod metrics;
pub mod triage;
pub mod waiting_room;


pub use error::{SchedulingError, SchedulingResult};
pub use history::{
    ActionType, HistoryStore, InMemoryHistoryStore, NewAction, TreatmentHistory, TreatmentRecord,
};
pub use lab::{LabQueue, LabRequest, MAX_LAB_PRIORITY};
pub use loader::{load_history_csv, load_history_reader};
pub use metrics::{AggregateMetrics, EsiLevelMetrics, MetricsTracker, PatientMetrics};
pub use triage::{priority_score, TriageEntry, TriagePayload, TriageRequest, TriageScheduler};
pub use waiting_room::{
    Admission, InMemoryDirectory, PatientDirectory, PatientProfile, WaitingPatientStatus,
    WaitingRoomScheduler, WaitingRoomStatus,
};
