//! `LabQueue`: pending lab tests, most urgent first, FIFO among equals.

use tracing::info;

use er_core::PatientId;
use er_queue::OrderedPriorityQueue;

use crate::{SchedulingError, SchedulingResult};

/// Highest lab priority; 1 is routine.
pub const MAX_LAB_PRIORITY: u8 = 10;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabRequest {
    pub patient_id:   PatientId,
    pub test_type:    String,
    /// 1 (routine) to 10 (stat).
    pub priority:     u8,
    pub requested_by: String,
    pub notes:        Option<String>,
}

impl LabRequest {
    pub fn new(
        patient_id: impl Into<PatientId>,
        test_type: impl Into<String>,
        priority: u8,
        requested_by: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            test_type: test_type.into(),
            priority,
            requested_by: requested_by.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct LabQueue {
    queue: OrderedPriorityQueue<LabRequest>,
}

impl LabQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request.  Priorities outside 1-10 are rejected.
    pub fn schedule(&mut self, request: LabRequest) -> SchedulingResult<()> {
        if !(1..=MAX_LAB_PRIORITY).contains(&request.priority) {
            return Err(SchedulingError::InvalidLabPriority(request.priority));
        }
        info!(
            patient = %request.patient_id,
            test = %request.test_type,
            priority = request.priority,
            "lab test scheduled"
        );
        let priority = f64::from(request.priority);
        self.queue.enqueue(request, priority);
        Ok(())
    }

    pub fn next(&mut self) -> Option<LabRequest> {
        self.queue.dequeue()
    }

    pub fn peek(&self) -> Option<&LabRequest> {
        self.queue.peek()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
