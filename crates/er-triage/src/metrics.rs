//! Visit timing metrics: door-to-triage, door-to-provider, length of stay.
//!
//! [`MetricsTracker`] keeps one [`PatientMetrics`] per visit.  A patient who
//! returns gets a new visit; milestone calls always stamp the latest one.
//! Milestones are stamped from the tracker's clock.
//!
//! Durations are whole minutes, truncated toward zero, and only present once
//! both ends are stamped.  Aggregates cover visits that *arrived* inside the
//! look-back window and average only the visits that have the duration.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use er_core::{AcuityLevel, Clock, PatientId, SystemClock, Timestamp};

use crate::SchedulingResult;

// ── PatientMetrics ────────────────────────────────────────────────────────────

/// Timestamps for one ED visit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientMetrics {
    pub patient_id:            PatientId,
    pub esi_level:             Option<AcuityLevel>,
    pub chief_complaint:       Option<String>,
    pub arrival_time:          Timestamp,
    pub triage_complete_time:  Option<Timestamp>,
    pub provider_contact_time: Option<Timestamp>,
    pub treatment_start_time:  Option<Timestamp>,
    pub discharge_time:        Option<Timestamp>,
}

impl PatientMetrics {
    pub fn door_to_triage_minutes(&self) -> Option<i64> {
        self.since_arrival(self.triage_complete_time)
    }

    pub fn door_to_provider_minutes(&self) -> Option<i64> {
        self.since_arrival(self.provider_contact_time)
    }

    pub fn door_to_treatment_minutes(&self) -> Option<i64> {
        self.since_arrival(self.treatment_start_time)
    }

    pub fn length_of_stay_minutes(&self) -> Option<i64> {
        self.since_arrival(self.discharge_time)
    }

    pub fn is_discharged(&self) -> bool {
        self.discharge_time.is_some()
    }

    fn since_arrival(&self, at: Option<Timestamp>) -> Option<i64> {
        at.map(|t| (t - self.arrival_time).num_minutes())
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Averages over a look-back window.  Averages are rounded to one decimal
/// and `None` when no visit in the window has that duration yet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateMetrics {
    pub total_patients:                 usize,
    pub avg_door_to_provider_minutes:   Option<f64>,
    pub avg_length_of_stay_minutes:     Option<f64>,
    pub avg_door_to_triage_minutes:     Option<f64>,
    /// Visits with a discharge stamp.
    pub patients_with_complete_metrics: usize,
    pub time_window_hours:              u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsiLevelMetrics {
    pub count:                        usize,
    pub avg_door_to_provider_minutes: Option<f64>,
}

fn rounded_mean(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (sum, n) = values.fold((0i64, 0u32), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| (sum as f64 / f64::from(n) * 10.0).round() / 10.0)
}

// ── MetricsTracker ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MetricsTracker<C: Clock = SystemClock> {
    clock:  C,
    /// Every visit, in arrival order.
    visits: Vec<PatientMetrics>,
    /// Index of each patient's latest visit.
    latest: FxHashMap<PatientId, usize>,
}

impl Default for MetricsTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsTracker<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> MetricsTracker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, visits: Vec::new(), latest: FxHashMap::default() }
    }

    /// Open a new visit at the door.  `esi_level` must be 1-5 when given.
    pub fn record_arrival(
        &mut self,
        patient_id: impl Into<PatientId>,
        esi_level: Option<u8>,
        chief_complaint: Option<String>,
    ) -> SchedulingResult<PatientMetrics> {
        let patient_id = patient_id.into();
        let esi_level = esi_level.map(AcuityLevel::try_from).transpose()?;
        let visit = PatientMetrics {
            patient_id: patient_id.clone(),
            esi_level,
            chief_complaint,
            arrival_time: self.clock.now(),
            triage_complete_time: None,
            provider_contact_time: None,
            treatment_start_time: None,
            discharge_time: None,
        };
        self.latest.insert(patient_id.clone(), self.visits.len());
        self.visits.push(visit.clone());
        info!(patient = %patient_id, esi = ?esi_level.map(AcuityLevel::level), "arrival recorded");
        Ok(visit)
    }

    /// `None` if the patient has no recorded arrival.
    pub fn record_triage_complete(&mut self, patient_id: &str) -> Option<PatientMetrics> {
        self.stamp(patient_id, "triage complete", |m| &mut m.triage_complete_time)
    }

    pub fn record_provider_contact(&mut self, patient_id: &str) -> Option<PatientMetrics> {
        self.stamp(patient_id, "provider contact", |m| &mut m.provider_contact_time)
    }

    pub fn record_treatment_start(&mut self, patient_id: &str) -> Option<PatientMetrics> {
        self.stamp(patient_id, "treatment start", |m| &mut m.treatment_start_time)
    }

    pub fn record_discharge(&mut self, patient_id: &str) -> Option<PatientMetrics> {
        self.stamp(patient_id, "discharge", |m| &mut m.discharge_time)
    }

    /// The patient's latest visit.
    pub fn patient_metrics(&self, patient_id: &str) -> Option<&PatientMetrics> {
        self.latest.get(patient_id).map(|&i| &self.visits[i])
    }

    pub fn visits(&self) -> &[PatientMetrics] {
        &self.visits
    }

    /// Aggregates over visits that arrived in the last `hours`.
    pub fn aggregate(&self, hours: u32) -> AggregateMetrics {
        self.aggregate_at(self.clock.now(), hours)
    }

    pub fn aggregate_at(&self, now: Timestamp, hours: u32) -> AggregateMetrics {
        let window: Vec<&PatientMetrics> = self.window(now, hours).collect();
        AggregateMetrics {
            total_patients:                 window.len(),
            avg_door_to_provider_minutes:   rounded_mean(window.iter().filter_map(|m| m.door_to_provider_minutes())),
            avg_length_of_stay_minutes:     rounded_mean(window.iter().filter_map(|m| m.length_of_stay_minutes())),
            avg_door_to_triage_minutes:     rounded_mean(window.iter().filter_map(|m| m.door_to_triage_minutes())),
            patients_with_complete_metrics: window.iter().filter(|m| m.is_discharged()).count(),
            time_window_hours:              hours,
        }
    }

    /// Per-ESI-level counts over the last `hours`.  Levels with no visits
    /// are absent; visits without a level are skipped.
    pub fn by_esi_level(&self, hours: u32) -> BTreeMap<AcuityLevel, EsiLevelMetrics> {
        self.by_esi_level_at(self.clock.now(), hours)
    }

    pub fn by_esi_level_at(&self, now: Timestamp, hours: u32) -> BTreeMap<AcuityLevel, EsiLevelMetrics> {
        let mut grouped: BTreeMap<AcuityLevel, Vec<&PatientMetrics>> = BTreeMap::new();
        for visit in self.window(now, hours) {
            if let Some(level) = visit.esi_level {
                grouped.entry(level).or_default().push(visit);
            }
        }
        grouped
            .into_iter()
            .map(|(level, visits)| {
                let metrics = EsiLevelMetrics {
                    count:                        visits.len(),
                    avg_door_to_provider_minutes: rounded_mean(
                        visits.iter().filter_map(|m| m.door_to_provider_minutes()),
                    ),
                };
                (level, metrics)
            })
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn window(&self, now: Timestamp, hours: u32) -> impl Iterator<Item = &PatientMetrics> + '_ {
        let cutoff = now - chrono::Duration::hours(i64::from(hours));
        self.visits.iter().filter(move |m| m.arrival_time >= cutoff)
    }

    fn stamp(
        &mut self,
        patient_id: &str,
        milestone: &'static str,
        field: impl FnOnce(&mut PatientMetrics) -> &mut Option<Timestamp>,
    ) -> Option<PatientMetrics> {
        let Some(&i) = self.latest.get(patient_id) else {
            debug!(patient = patient_id, milestone, "no arrival on record");
            return None;
        };
        let now = self.clock.now();
        let visit = &mut self.visits[i];
        *field(visit) = Some(now);
        info!(patient = patient_id, milestone, "milestone recorded");
        Some(visit.clone())
    }
}
