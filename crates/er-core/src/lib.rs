//! `er-core`: foundational types for the `er_flow` patient-flow core.
//!
//! This crate is a dependency of every other `er-*` crate.  It intentionally
//! has no `er-*` dependencies and minimal external ones (only `chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `PatientId`, `ActionId`, `ResourceId`                    |
//! | [`acuity`]    | `AcuityLevel` (ESI 1–5)                                  |
//! | [`vitals`]    | `VitalSigns`, `BloodPressure`                            |
//! | [`clock`]     | `Clock` trait, `SystemClock`, `ManualClock`              |
//! | [`config`]    | `FlowConfig`, `TriageConfig`, `WaitingRoomConfig`, `ResourceConfig` |
//! | [`error`]     | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod acuity;
pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod vitals;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use acuity::AcuityLevel;
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{FlowConfig, ResourceConfig, TriageConfig, WaitingRoomConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{ActionId, PatientId, ResourceId};
pub use vitals::{BloodPressure, VitalSigns};
