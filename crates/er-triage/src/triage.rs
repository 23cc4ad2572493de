//! `TriageScheduler`: composite priority score over a max-heap.
//!
//! # Score
//!
//! ```text
//! score = base(acuity)                                   100 / 80 / 60 / 40 / 20
//!       + min(waiting_minutes * wait_points_per_minute,  default 0.1
//!             max_wait_points)                           default 20
//!       + 10 if heart rate < 50 or > 120
//!       + 10 if systolic < 90 or > 180
//!       + 15 if SpO2 < 92
//! ```
//!
//! Penalties are independent and add up to at most 35.  The score is not
//! capped, so a Level 1 patient with every penalty and a long wait scores
//! 155.  Missing vitals contribute nothing.

use tracing::{debug, info};

use er_core::{AcuityLevel, Clock, PatientId, SystemClock, Timestamp, TriageConfig, VitalSigns};
use er_queue::{HeapEntry, PriorityHeap};

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Compute the triage priority score.  Higher is more urgent.
pub fn priority_score(
    config: &TriageConfig,
    acuity: AcuityLevel,
    waiting_minutes: u32,
    vitals: &VitalSigns,
) -> f64 {
    let wait = (f64::from(waiting_minutes) * config.wait_points_per_minute).min(config.max_wait_points);
    acuity.base_score() + wait + vital_penalty(vitals)
}

fn vital_penalty(vitals: &VitalSigns) -> f64 {
    let mut penalty = 0.0;
    if vitals.heart_rate.is_some_and(|hr| hr < 50.0 || hr > 120.0) {
        penalty += 10.0;
    }
    if vitals
        .blood_pressure
        .as_ref()
        .is_some_and(|bp| bp.systolic < 90 || bp.systolic > 180)
    {
        penalty += 10.0;
    }
    if vitals.oxygen_saturation.is_some_and(|spo2| spo2 < 92.0) {
        penalty += 15.0;
    }
    penalty
}

// ── Request / payload ─────────────────────────────────────────────────────────

/// Intake data for one patient entering triage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriageRequest {
    /// External id.  `None` (or an empty id) gets a `P000001`-style
    /// fallback from the scheduler.
    pub patient_id:      Option<PatientId>,
    pub acuity:          AcuityLevel,
    pub waiting_minutes: u32,
    pub vitals:          VitalSigns,
}

impl TriageRequest {
    pub fn new(acuity: AcuityLevel) -> Self {
        Self { patient_id: None, acuity, waiting_minutes: 0, vitals: VitalSigns::default() }
    }

    pub fn with_patient_id(mut self, id: impl Into<PatientId>) -> Self {
        self.patient_id = Some(id.into());
        self
    }

    pub fn with_waiting_minutes(mut self, minutes: u32) -> Self {
        self.waiting_minutes = minutes;
        self
    }

    pub fn with_vitals(mut self, vitals: VitalSigns) -> Self {
        self.vitals = vitals;
        self
    }
}

/// Clinical data carried alongside each heap entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriagePayload {
    pub request:         TriageRequest,
    pub waiting_minutes: u32,
    pub enqueued_at:     Timestamp,
}

pub type TriageEntry = HeapEntry<PatientId, TriagePayload>;

// ── TriageScheduler ───────────────────────────────────────────────────────────

/// Owns the triage heap.  One scheduler per ER; not internally synchronised.
#[derive(Debug)]
pub struct TriageScheduler<C: Clock = SystemClock> {
    config:        TriageConfig,
    clock:         C,
    heap:          PriorityHeap<PatientId, TriagePayload>,
    /// Last fallback id handed out.
    local_counter: u32,
}

impl TriageScheduler<SystemClock> {
    pub fn new(config: TriageConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TriageScheduler<C> {
    pub fn with_clock(config: TriageConfig, clock: C) -> Self {
        Self { config, clock, heap: PriorityHeap::new(), local_counter: 0 }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Score with this scheduler's configuration.
    pub fn priority_score(&self, acuity: AcuityLevel, waiting_minutes: u32, vitals: &VitalSigns) -> f64 {
        priority_score(&self.config, acuity, waiting_minutes, vitals)
    }

    /// Score `request` and push it.  Returns the id the patient was queued
    /// under.
    pub fn enqueue(&mut self, request: TriageRequest) -> PatientId {
        let patient_id = match &request.patient_id {
            Some(id) if !id.as_str().is_empty() => id.clone(),
            _ => self.next_local_id(),
        };
        let score = self.priority_score(request.acuity, request.waiting_minutes, &request.vitals);
        let payload = TriagePayload {
            waiting_minutes: request.waiting_minutes,
            enqueued_at:     self.clock.now(),
            request,
        };
        self.heap.push(score, patient_id.clone(), payload);
        info!(patient = %patient_id, score, depth = self.heap.len(), "triage enqueue");
        patient_id
    }

    /// Remove and return the most urgent patient.
    pub fn dequeue_next(&mut self) -> Option<TriageEntry> {
        let entry = self.heap.pop()?;
        debug!(patient = %entry.id, score = entry.priority, "triage dequeue");
        Some(entry)
    }

    pub fn peek_next(&self) -> Option<&TriageEntry> {
        self.heap.peek()
    }

    pub fn queue_depth(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued entries in heap order (not priority order).
    pub fn entries(&self) -> impl Iterator<Item = &TriageEntry> + '_ {
        self.heap.iter()
    }

    /// Re-score a queued patient after new clinical information.
    ///
    /// The payload is replaced with the new acuity, wait, and vitals; the
    /// original `enqueued_at` is kept.  Returns `false` if the patient is not
    /// queued.  With duplicate ids only the first entry in heap order is
    /// updated.
    pub fn reprioritize(
        &mut self,
        patient_id: &str,
        acuity: AcuityLevel,
        waiting_minutes: u32,
        vitals: VitalSigns,
    ) -> bool {
        let Some(current) = self.heap.iter().find(|e| e.id.as_str() == patient_id) else {
            return false;
        };
        let enqueued_at = current.payload.enqueued_at;
        let request = TriageRequest {
            patient_id: Some(current.id.clone()),
            acuity,
            waiting_minutes,
            vitals,
        };
        let score = self.priority_score(acuity, waiting_minutes, &request.vitals);
        let payload = TriagePayload { request, waiting_minutes, enqueued_at };
        let updated = self.heap.update_priority(patient_id, score, Some(payload));
        if updated {
            info!(patient = patient_id, score, "triage reprioritized");
        }
        updated
    }

    fn next_local_id(&mut self) -> PatientId {
        self.local_counter += 1;
        PatientId::new(format!("P{:06}", self.local_counter))
    }
}
