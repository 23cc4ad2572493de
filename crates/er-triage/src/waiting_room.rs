//! `WaitingRoomScheduler`: FIFO-with-priority queue plus a membership cache.
//!
//! # Tickets
//!
//! The underlying [`OrderedPriorityQueue`] cannot delete from the middle or
//! change a priority in place.  The scheduler therefore queues lightweight
//! tickets and treats the cache as the source of truth:
//!
//! ```text
//! queue:  [ Ticket { patient, sequence }, ... ]     may hold stale tickets
//! cache:  patient -> CacheEntry { priority, sequence, ... }
//! ```
//!
//! A ticket is live only if its patient is still cached with the same
//! `sequence`.  [`remove`](WaitingRoomScheduler::remove) drops the cache
//! entry; [`update_priority`](WaitingRoomScheduler::update_priority) bumps
//! the sequence and queues a fresh ticket.  [`next`](WaitingRoomScheduler::next)
//! and [`peek_next`](WaitingRoomScheduler::peek_next) discard stale tickets
//! as they reach the head.
//!
//! # Position
//!
//! Position is the 1-indexed rank in the cache ordered by priority
//! descending, then by `sequence` ascending.  The queue dequeues the highest
//! priority first and FIFO among equals, and every ticket gets a fresh
//! sequence, so positions always agree with dequeue order.  Scores must be
//! finite and `-0.0` is stored as `0.0`, so the queue's `>` comparison and
//! the cache's `total_cmp` ranking see the same order.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use er_core::clock::whole_minutes_between;
use er_core::{AcuityLevel, Clock, PatientId, SystemClock, Timestamp, WaitingRoomConfig};
use er_queue::OrderedPriorityQueue;

use crate::{SchedulingError, SchedulingResult};

// ── Patient directory ─────────────────────────────────────────────────────────

/// Demographics the waiting room needs from the patient registry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientProfile {
    pub display_name: String,
    pub acuity:       AcuityLevel,
}

/// Lookup into the external patient registry.
pub trait PatientDirectory {
    fn profile(&self, patient_id: &PatientId) -> Option<PatientProfile>;
}

/// Map-backed directory for tests and the demo.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    profiles: FxHashMap<PatientId, PatientProfile>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, patient_id: impl Into<PatientId>, display_name: impl Into<String>, acuity: AcuityLevel) {
        self.profiles.insert(
            patient_id.into(),
            PatientProfile { display_name: display_name.into(), acuity },
        );
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl PatientDirectory for InMemoryDirectory {
    fn profile(&self, patient_id: &PatientId) -> Option<PatientProfile> {
        self.profiles.get(patient_id).cloned()
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Result of a successful [`WaitingRoomScheduler::add`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Admission {
    pub patient_id:             PatientId,
    pub display_name:           String,
    pub priority_score:         f64,
    pub position:               usize,
    pub total_waiting:          usize,
    pub estimated_wait_minutes: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitingPatientStatus {
    pub patient_id:             PatientId,
    pub display_name:           String,
    pub acuity:                 AcuityLevel,
    pub priority_score:         f64,
    pub position:               usize,
    /// Whole minutes since the patient was added.
    pub wait_time_minutes:      u64,
    pub estimated_wait_minutes: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitingRoomStatus {
    pub total_waiting:        usize,
    /// Sorted by position.
    pub patients:             Vec<WaitingPatientStatus>,
    /// Mean of `wait_time_minutes`, truncated.  0 when nobody is waiting.
    pub average_wait_minutes: u64,
    pub next_patient:         Option<WaitingPatientStatus>,
}

// ── Internals ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Ticket {
    patient_id: PatientId,
    sequence:   u64,
}

#[derive(Clone, Debug)]
struct CacheEntry {
    priority:     f64,
    added_at:     Timestamp,
    display_name: String,
    acuity:       AcuityLevel,
    sequence:     u64,
}

impl CacheEntry {
    /// `Less` means `self` is served before `other`.
    fn queue_order(&self, other: &CacheEntry) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

// ── WaitingRoomScheduler ──────────────────────────────────────────────────────

#[derive(Debug)]
pub struct WaitingRoomScheduler<C: Clock = SystemClock> {
    config:        WaitingRoomConfig,
    clock:         C,
    queue:         OrderedPriorityQueue<Ticket>,
    cache:         FxHashMap<PatientId, CacheEntry>,
    next_sequence: u64,
}

impl WaitingRoomScheduler<SystemClock> {
    pub fn new(config: WaitingRoomConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> WaitingRoomScheduler<C> {
    pub fn with_clock(config: WaitingRoomConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            queue: OrderedPriorityQueue::new(),
            cache: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    /// Admit a patient.  Higher `priority_score` is served first; a
    /// non-finite score is rejected.
    pub fn add(
        &mut self,
        patient_id: PatientId,
        priority_score: f64,
        directory: &impl PatientDirectory,
    ) -> SchedulingResult<Admission> {
        let priority_score = checked_priority(priority_score)?;
        if self.cache.contains_key(&patient_id) {
            return Err(SchedulingError::DuplicateEntry(patient_id));
        }
        let Some(profile) = directory.profile(&patient_id) else {
            return Err(SchedulingError::PatientNotFound(patient_id));
        };

        let sequence = self.enqueue_ticket(&patient_id, priority_score);
        self.cache.insert(
            patient_id.clone(),
            CacheEntry {
                priority: priority_score,
                added_at: self.clock.now(),
                display_name: profile.display_name.clone(),
                acuity: profile.acuity,
                sequence,
            },
        );

        let position = self.position(patient_id.as_str()).unwrap_or(1);
        info!(patient = %patient_id, priority_score, position, "waiting room add");
        Ok(Admission {
            estimated_wait_minutes: self.wait_for_position(position),
            total_waiting: self.cache.len(),
            display_name: profile.display_name,
            patient_id,
            priority_score,
            position,
        })
    }

    /// Dequeue the next live patient, discarding stale tickets on the way.
    pub fn next(&mut self) -> Option<PatientId> {
        while let Some(ticket) = self.queue.dequeue() {
            if self.is_live(&ticket) {
                self.cache.remove(&ticket.patient_id);
                info!(patient = %ticket.patient_id, remaining = self.cache.len(), "waiting room next");
                return Some(ticket.patient_id);
            }
            debug!(patient = %ticket.patient_id, sequence = ticket.sequence, "discarding stale ticket");
        }
        None
    }

    /// The patient [`next`](Self::next) would return.  Stale tickets at the
    /// head are discarded; the live one stays queued.
    pub fn peek_next(&mut self) -> Option<PatientId> {
        loop {
            let ticket = self.queue.peek()?;
            if self.is_live(ticket) {
                return Some(ticket.patient_id.clone());
            }
            debug!(patient = %ticket.patient_id, sequence = ticket.sequence, "discarding stale ticket");
            self.queue.dequeue();
        }
    }

    /// Drop a patient who left or was admitted elsewhere.  Their ticket is
    /// discarded lazily.
    pub fn remove(&mut self, patient_id: &str) -> bool {
        let removed = self.cache.remove(patient_id).is_some();
        if removed {
            info!(patient = patient_id, "waiting room remove");
        }
        removed
    }

    /// Change a waiting patient's priority.  The patient goes behind anyone
    /// already waiting at the new priority.  `Ok(false)` if not waiting.
    pub fn update_priority(&mut self, patient_id: &str, new_priority: f64) -> SchedulingResult<bool> {
        let new_priority = checked_priority(new_priority)?;
        let Some(id) = self.cache.get_key_value(patient_id).map(|(id, _)| id.clone()) else {
            return Ok(false);
        };
        let sequence = self.enqueue_ticket(&id, new_priority);
        if let Some(entry) = self.cache.get_mut(patient_id) {
            entry.priority = new_priority;
            entry.sequence = sequence;
        }
        info!(patient = patient_id, new_priority, "waiting room priority update");
        Ok(true)
    }

    /// 1-indexed queue position, `None` if not waiting.
    pub fn position(&self, patient_id: &str) -> Option<usize> {
        let entry = self.cache.get(patient_id)?;
        let ahead = self
            .cache
            .values()
            .filter(|other| other.queue_order(entry) == Ordering::Less)
            .count();
        Some(ahead + 1)
    }

    /// `(position - 1) * average_treatment_minutes`, `None` if not waiting.
    pub fn estimated_wait(&self, patient_id: &str) -> Option<u32> {
        self.position(patient_id).map(|p| self.wait_for_position(p))
    }

    /// Snapshot of everyone waiting, using the scheduler's clock.
    pub fn status(&self) -> WaitingRoomStatus {
        self.status_at(self.clock.now())
    }

    /// Snapshot of everyone waiting as of `now`.
    pub fn status_at(&self, now: Timestamp) -> WaitingRoomStatus {
        let mut ordered: Vec<(&PatientId, &CacheEntry)> = self.cache.iter().collect();
        ordered.sort_by(|a, b| a.1.queue_order(b.1));

        let patients: Vec<WaitingPatientStatus> = ordered
            .into_iter()
            .enumerate()
            .map(|(i, (id, entry))| WaitingPatientStatus {
                patient_id:             id.clone(),
                display_name:           entry.display_name.clone(),
                acuity:                 entry.acuity,
                priority_score:         entry.priority,
                position:               i + 1,
                wait_time_minutes:      whole_minutes_between(entry.added_at, now),
                estimated_wait_minutes: self.wait_for_position(i + 1),
            })
            .collect();

        let average_wait_minutes = match patients.len() {
            0 => 0,
            n => patients.iter().map(|p| p.wait_time_minutes).sum::<u64>() / n as u64,
        };

        WaitingRoomStatus {
            total_waiting: patients.len(),
            next_patient: patients.first().cloned(),
            average_wait_minutes,
            patients,
        }
    }

    /// Patients currently waiting.
    pub fn waiting_count(&self) -> usize {
        self.cache.len()
    }

    /// Tickets in the underlying queue, stale ones included.
    pub fn ticket_count(&self) -> usize {
        self.queue.len()
    }

    pub fn contains(&self, patient_id: &str) -> bool {
        self.cache.contains_key(patient_id)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.cache.clear();
        info!("waiting room cleared");
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn enqueue_ticket(&mut self, patient_id: &PatientId, priority: f64) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.enqueue(Ticket { patient_id: patient_id.clone(), sequence }, priority);
        sequence
    }

    fn is_live(&self, ticket: &Ticket) -> bool {
        self.cache
            .get(&ticket.patient_id)
            .is_some_and(|entry| entry.sequence == ticket.sequence)
    }

    fn wait_for_position(&self, position: usize) -> u32 {
        let ahead = u32::try_from(position.saturating_sub(1)).unwrap_or(u32::MAX);
        ahead.saturating_mul(self.config.average_treatment_minutes)
    }
}

/// Finite scores only; `-0.0` becomes `0.0`.
fn checked_priority(priority: f64) -> SchedulingResult<f64> {
    if !priority.is_finite() {
        return Err(SchedulingError::InvalidPriority(priority));
    }
    Ok(priority + 0.0)
}
