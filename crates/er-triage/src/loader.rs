//! CSV treatment-history loader.
//!
//! Seeds an [`InMemoryHistoryStore`] from an export of the treatment table,
//! so undo stacks can be rebuilt after a restart.
//!
//! # CSV format
//!
//! ```csv
//! action_id,patient_id,action_type,performed_by,recorded_at,undone_at,notes,details
//! TRT00000000A1B2,P000001,medication_given,rn-kaye,2024-03-01T08:15:00Z,,aspirin 325mg,"{""dose_mg"":325}"
//! TRT00000000C3D4,P000001,note_added,dr-ito,2024-03-01T08:20:00Z,2024-03-01T08:21:00Z,,
//! ```
//!
//! Timestamps are RFC 3339.  An empty `undone_at` marks an active action;
//! empty `notes` or `details` are `None`.  The `details` column may be
//! omitted entirely.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use er_core::{ActionId, PatientId, Timestamp};

use crate::history::{HistoryStore, InMemoryHistoryStore, TreatmentRecord};
use crate::{SchedulingError, SchedulingResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryRecord {
    action_id:    String,
    patient_id:   String,
    action_type:  String,
    performed_by: String,
    recorded_at:  String,
    #[serde(default)]
    undone_at:    Option<String>,
    #[serde(default)]
    notes:        Option<String>,
    #[serde(default)]
    details:      Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a history store from a CSV file.
pub fn load_history_csv(path: &Path) -> SchedulingResult<InMemoryHistoryStore> {
    let file = std::fs::File::open(path)?;
    load_history_reader(file)
}

/// Like [`load_history_csv`] but accepts any `Read` source.
pub fn load_history_reader<R: Read>(reader: R) -> SchedulingResult<InMemoryHistoryStore> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut store = InMemoryHistoryStore::new();

    for result in csv_reader.deserialize::<HistoryRecord>() {
        let row = result.map_err(|e| SchedulingError::Parse(e.to_string()))?;
        store.append(TreatmentRecord {
            action_type:  row.action_type.parse()?,
            recorded_at:  parse_timestamp(&row.recorded_at)?,
            undone_at:    non_empty(row.undone_at).map(|s| parse_timestamp(&s)).transpose()?,
            notes:        non_empty(row.notes),
            details:      non_empty(row.details),
            action_id:    ActionId::new(row.action_id),
            patient_id:   PatientId::new(row.patient_id),
            performed_by: row.performed_by,
        })?;
    }

    debug!(records = store.len(), "loaded treatment history");
    Ok(store)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_timestamp(s: &str) -> SchedulingResult<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| SchedulingError::Parse(format!("bad timestamp {s:?}: {e}")))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}
