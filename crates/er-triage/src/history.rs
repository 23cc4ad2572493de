//! Treatment history with per-patient undo.
//!
//! # Ownership
//!
//! The [`HistoryStore`] is the source of truth: it keeps every record,
//! including undone ones, for audit.  [`TreatmentHistory`] keeps one
//! [`UndoStack`] of action ids per patient as a cache over the store's
//! active (not undone) actions.
//!
//! Stacks are created lazily.  Every operation first calls `ensure_loaded`,
//! which rebuilds a missing or empty stack from
//! [`HistoryStore::active_actions`], so a cold start or a
//! [`clear`](TreatmentHistory::clear) never loses undo capability.
//!
//! # Undo
//!
//! Undo asks the store to stamp `undone_at` on the newest id, then pops it.  The record stays in the store and shows up in
//! `full_history(.., include_undone = true)`.

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use er_core::{ActionId, Clock, PatientId, SystemClock, Timestamp};
use er_queue::UndoStack;

use crate::{SchedulingError, SchedulingResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionType {
    MedicationGiven,
    VitalSignsUpdate,
    ProcedurePerformed,
    DiagnosisUpdate,
    StatusChange,
    NoteAdded,
}

impl ActionType {
    pub const ALL: [ActionType; 6] = [
        ActionType::MedicationGiven,
        ActionType::VitalSignsUpdate,
        ActionType::ProcedurePerformed,
        ActionType::DiagnosisUpdate,
        ActionType::StatusChange,
        ActionType::NoteAdded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::MedicationGiven => "medication_given",
            ActionType::VitalSignsUpdate => "vital_signs_update",
            ActionType::ProcedurePerformed => "procedure_performed",
            ActionType::DiagnosisUpdate => "diagnosis_update",
            ActionType::StatusChange => "status_change",
            ActionType::NoteAdded => "note_added",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchedulingError::Parse(format!("unknown action type {s:?}")))
    }
}

/// One recorded treatment action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreatmentRecord {
    pub action_id:    ActionId,
    pub patient_id:   PatientId,
    pub action_type:  ActionType,
    pub performed_by: String,
    pub notes:        Option<String>,
    /// Structured payload from the charting system (dose, route, reading),
    /// kept verbatim.
    pub details:      Option<String>,
    pub recorded_at:  Timestamp,
    pub undone_at:    Option<Timestamp>,
}

impl TreatmentRecord {
    pub fn is_undone(&self) -> bool {
        self.undone_at.is_some()
    }
}

/// Caller-supplied part of a new record.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAction {
    pub action_type:  ActionType,
    pub performed_by: String,
    pub notes:        Option<String>,
    pub details:      Option<String>,
}

impl NewAction {
    pub fn new(action_type: ActionType, performed_by: impl Into<String>) -> Self {
        Self { action_type, performed_by: performed_by.into(), notes: None, details: None }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ── HistoryStore ──────────────────────────────────────────────────────────────

/// Persistent side of the treatment history.
///
/// Ordering is by `recorded_at`; records sharing a timestamp keep the order
/// they were appended in.
pub trait HistoryStore {
    /// Persist a new record.  Fails if the action id already exists.
    fn append(&mut self, record: TreatmentRecord) -> SchedulingResult<()>;

    fn record(&self, action_id: &ActionId) -> Option<TreatmentRecord>;

    /// Ids of the patient's actions that are not undone, oldest first.
    fn active_actions(&self, patient_id: &PatientId) -> Vec<ActionId>;

    /// Stamp `undone_at` on a record and return the updated record.  A
    /// record that is already undone keeps its original stamp.
    fn mark_undone(&mut self, action_id: &ActionId, at: Timestamp) -> SchedulingResult<TreatmentRecord>;

    /// The patient's records, oldest first.
    fn records(&self, patient_id: &PatientId, include_undone: bool) -> Vec<TreatmentRecord>;
}

/// `Vec`-backed store with an id index.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHistoryStore {
    records: Vec<TreatmentRecord>,
    by_id:   FxHashMap<ActionId, usize>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn patient_records<'a>(
        &'a self,
        patient_id: &'a PatientId,
        include_undone: bool,
    ) -> Vec<&'a TreatmentRecord> {
        let mut out: Vec<&TreatmentRecord> = self
            .records
            .iter()
            .filter(|r| &r.patient_id == patient_id && (include_undone || !r.is_undone()))
            .collect();
        out.sort_by_key(|r| r.recorded_at);
        out
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&mut self, record: TreatmentRecord) -> SchedulingResult<()> {
        if self.by_id.contains_key(&record.action_id) {
            return Err(SchedulingError::DuplicateAction(record.action_id));
        }
        self.by_id.insert(record.action_id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    fn record(&self, action_id: &ActionId) -> Option<TreatmentRecord> {
        self.by_id.get(action_id).map(|&i| self.records[i].clone())
    }

    fn active_actions(&self, patient_id: &PatientId) -> Vec<ActionId> {
        self.patient_records(patient_id, false)
            .into_iter()
            .map(|r| r.action_id.clone())
            .collect()
    }

    fn mark_undone(&mut self, action_id: &ActionId, at: Timestamp) -> SchedulingResult<TreatmentRecord> {
        let &i = self
            .by_id
            .get(action_id)
            .ok_or_else(|| SchedulingError::ActionNotFound(action_id.clone()))?;
        let record = &mut self.records[i];
        record.undone_at.get_or_insert(at);
        Ok(record.clone())
    }

    fn records(&self, patient_id: &PatientId, include_undone: bool) -> Vec<TreatmentRecord> {
        self.patient_records(patient_id, include_undone)
            .into_iter()
            .cloned()
            .collect()
    }
}

// ── TreatmentHistory ──────────────────────────────────────────────────────────

/// Undo-capable treatment history over a [`HistoryStore`].
#[derive(Debug)]
pub struct TreatmentHistory<S: HistoryStore, C: Clock = SystemClock> {
    store:  S,
    clock:  C,
    stacks: FxHashMap<PatientId, UndoStack<ActionId>>,
    rng:    SmallRng,
}

impl<S: HistoryStore> TreatmentHistory<S, SystemClock> {
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_clock(store, SystemClock, seed)
    }
}

impl<S: HistoryStore, C: Clock> TreatmentHistory<S, C> {
    /// `seed` drives action-id generation; the same seed yields the same
    /// id sequence.
    pub fn with_clock(store: S, clock: C, seed: u64) -> Self {
        Self {
            store,
            clock,
            stacks: FxHashMap::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist a new action and push it onto the patient's undo stack.
    pub fn record_action(&mut self, patient_id: &PatientId, action: NewAction) -> SchedulingResult<TreatmentRecord> {
        self.ensure_loaded(patient_id);

        let record = TreatmentRecord {
            action_id:    self.fresh_action_id(),
            patient_id:   patient_id.clone(),
            action_type:  action.action_type,
            performed_by: action.performed_by,
            notes:        action.notes,
            details:      action.details,
            recorded_at:  self.clock.now(),
            undone_at:    None,
        };
        self.store.append(record.clone())?;
        self.stacks
            .entry(patient_id.clone())
            .or_default()
            .push(record.action_id.clone());

        info!(
            patient = %patient_id,
            action = %record.action_id,
            action_type = %record.action_type,
            "treatment recorded"
        );
        Ok(record)
    }

    /// Undo the patient's most recent active action.
    ///
    /// `Ok(None)` means there was nothing to undo.  The id leaves the stack
    /// only once the store has accepted the undo, so a failed undo can be
    /// retried and still targets the same action.
    pub fn undo_last(&mut self, patient_id: &PatientId) -> SchedulingResult<Option<TreatmentRecord>> {
        self.ensure_loaded(patient_id);

        let Some(action_id) = self.stacks.get(patient_id).and_then(UndoStack::peek).cloned() else {
            debug!(patient = %patient_id, "nothing to undo");
            return Ok(None);
        };
        let record = self
            .store
            .mark_undone(&action_id, self.clock.now())
            .inspect_err(|e| warn!(patient = %patient_id, action = %action_id, error = %e, "undo failed"))?;
        if let Some(stack) = self.stacks.get_mut(patient_id) {
            stack.pop();
        }
        info!(patient = %patient_id, action = %action_id, "treatment undone");
        Ok(Some(record))
    }

    /// The record `undo_last` would undo.
    pub fn peek_last(&mut self, patient_id: &PatientId) -> Option<TreatmentRecord> {
        self.ensure_loaded(patient_id);
        let action_id = self.stacks.get(patient_id)?.peek()?;
        self.store.record(action_id)
    }

    /// Number of active actions, as counted by the store.
    pub fn history_size(&mut self, patient_id: &PatientId) -> usize {
        self.ensure_loaded(patient_id);
        self.store.active_actions(patient_id).len()
    }

    /// Records newest first.
    pub fn full_history(&mut self, patient_id: &PatientId, include_undone: bool) -> Vec<TreatmentRecord> {
        self.ensure_loaded(patient_id);
        let mut records = self.store.records(patient_id, include_undone);
        records.reverse();
        records
    }

    /// Empty the cached undo stack.  Store records are untouched, so the
    /// next operation rebuilds the stack from them.  Returns whether a
    /// stack existed.
    pub fn clear(&mut self, patient_id: &PatientId) -> bool {
        match self.stacks.get_mut(patient_id) {
            Some(stack) => {
                stack.clear();
                true
            }
            None => false,
        }
    }

    /// Depth of the cached stack, without consulting the store.
    pub fn cached_depth(&self, patient_id: &PatientId) -> usize {
        self.stacks.get(patient_id).map_or(0, UndoStack::len)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn ensure_loaded(&mut self, patient_id: &PatientId) {
        if self.stacks.get(patient_id).is_some_and(|s| !s.is_empty()) {
            return;
        }
        let active = self.store.active_actions(patient_id);
        if active.is_empty() {
            return;
        }
        debug!(patient = %patient_id, depth = active.len(), "rebuilt undo stack from store");
        self.stacks.insert(patient_id.clone(), active.into_iter().collect());
    }

    /// `TRT` + 12 uppercase hex digits, retried on the rare collision.
    fn fresh_action_id(&mut self) -> ActionId {
        loop {
            let bits: u64 = self.rng.r#gen::<u64>() & 0xFFFF_FFFF_FFFF;
            let id = ActionId::new(format!("TRT{bits:012X}"));
            if self.store.record(&id).is_none() {
                return id;
            }
        }
    }
}
