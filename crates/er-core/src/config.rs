//! Scheduler configuration.
//!
//! Defaults reproduce the behaviour the ER floor runs with today.  A host
//! typically loads a [`FlowConfig`] from TOML/JSON (with the `serde`
//! feature) and hands the sub-configs to each scheduler.

use crate::{CoreError, CoreResult};

/// Tuning for the triage priority score.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TriageConfig {
    /// Score points added per minute waited.  Default: 0.1.
    pub wait_points_per_minute: f64,
    /// Upper bound on the wait-time contribution.  Default: 20.
    pub max_wait_points: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            wait_points_per_minute: 0.1,
            max_wait_points:        20.0,
        }
    }
}

/// Tuning for the waiting-room queue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaitingRoomConfig {
    /// Minutes each patient ahead in the queue is assumed to occupy.
    /// Default: 30.
    pub average_treatment_minutes: u32,
}

impl Default for WaitingRoomConfig {
    fn default() -> Self {
        Self { average_treatment_minutes: 30 }
    }
}

/// Tuning for resource allocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceConfig {
    /// A provider stops accepting patients at this many.  Default: 3.
    pub max_patients_per_provider: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self { max_patients_per_provider: 3 }
    }
}

/// Umbrella configuration for one ER instance.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowConfig {
    pub triage:       TriageConfig,
    pub waiting_room: WaitingRoomConfig,
    pub resources:    ResourceConfig,
    /// Seed for action-id generation.  The same seed yields the same ids.
    pub seed: u64,
}

impl FlowConfig {
    /// Reject values the schedulers cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        let t = &self.triage;
        if !t.wait_points_per_minute.is_finite() || t.wait_points_per_minute < 0.0 {
            return Err(CoreError::Config(format!(
                "wait_points_per_minute must be a non-negative number, got {}",
                t.wait_points_per_minute
            )));
        }
        if !t.max_wait_points.is_finite() || t.max_wait_points < 0.0 {
            return Err(CoreError::Config(format!(
                "max_wait_points must be a non-negative number, got {}",
                t.max_wait_points
            )));
        }
        if self.waiting_room.average_treatment_minutes == 0 {
            return Err(CoreError::Config(
                "average_treatment_minutes must be at least 1".into(),
            ));
        }
        if self.resources.max_patients_per_provider == 0 {
            return Err(CoreError::Config(
                "max_patients_per_provider must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
