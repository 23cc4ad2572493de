//! `ResourceTracker`: room, equipment, and provider allocation on top of
//! the resource graph.
//!
//! Every registered resource is a graph vertex.  Each successful assignment
//! also adds a unit-weight edge between the two parties, so over a shift the
//! graph accumulates who-used-what and [`ResourceTracker::bottlenecks`]
//! surfaces the most contended resources.
//!
//! # Room lifecycle
//!
//! ```text
//! Available ──assign_room──▶ Occupied ──release_room──▶ Cleaning ──mark_room_ready──▶ Available
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use er_core::{PatientId, ResourceConfig, ResourceId};

use crate::error::{ResourceError, ResourceResult};
use crate::graph::WeightedGraph;

// ── Resource model ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Room,
    Equipment,
    Provider,
    Staff,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ResourceKind::Room => "room",
            ResourceKind::Equipment => "equipment",
            ResourceKind::Provider => "provider",
            ResourceKind::Staff => "staff",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentStatus {
    Available,
    InUse,
}

/// Kind-specific allocation state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceState {
    Room {
        status:  RoomStatus,
        patient: Option<PatientId>,
    },
    Equipment {
        status:   EquipmentStatus,
        location: Option<ResourceId>,
    },
    Provider {
        patients:  Vec<PatientId>,
        available: bool,
    },
    Staff,
}

impl ResourceState {
    fn fresh(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Room => ResourceState::Room { status: RoomStatus::Available, patient: None },
            ResourceKind::Equipment => ResourceState::Equipment {
                status:   EquipmentStatus::Available,
                location: None,
            },
            ResourceKind::Provider => ResourceState::Provider { patients: Vec::new(), available: true },
            ResourceKind::Staff => ResourceState::Staff,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceState::Room { .. } => ResourceKind::Room,
            ResourceState::Equipment { .. } => ResourceKind::Equipment,
            ResourceState::Provider { .. } => ResourceKind::Provider,
            ResourceState::Staff => ResourceKind::Staff,
        }
    }

    /// Whether the resource can take a new assignment right now.
    pub fn is_available(&self) -> bool {
        match self {
            ResourceState::Room { status, .. } => *status == RoomStatus::Available,
            ResourceState::Equipment { status, .. } => *status == EquipmentStatus::Available,
            ResourceState::Provider { available, .. } => *available,
            ResourceState::Staff => true,
        }
    }
}

/// A registered resource.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub id:    ResourceId,
    pub state: ResourceState,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        self.state.kind()
    }
}

/// Snapshot returned by [`ResourceTracker::summary`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceSummary {
    /// Vertices in the resource graph, patients included.
    pub total_resources: usize,
    pub bottlenecks:     Vec<(ResourceId, usize)>,
    pub rooms:           usize,
    pub equipment:       usize,
    pub providers:       usize,
    pub staff:           usize,
}

// ── ResourceTracker ───────────────────────────────────────────────────────────

/// Registry of ER resources plus the graph of their assignments.
#[derive(Debug, Default)]
pub struct ResourceTracker {
    config:    ResourceConfig,
    resources: FxHashMap<ResourceId, Resource>,
    /// Registration order, for deterministic listings.
    order:     Vec<ResourceId>,
    graph:     WeightedGraph<ResourceId>,
}

impl ResourceTracker {
    pub fn new(config: ResourceConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Start from an existing graph (e.g. one read by [`crate::load_edges_csv`]).
    /// Vertices in the graph are not registered as resources until
    /// [`register`](Self::register) is called for them.
    pub fn with_graph(config: ResourceConfig, graph: WeightedGraph<ResourceId>) -> Self {
        Self { config, graph, ..Self::default() }
    }

    /// Register a resource and seed its graph vertex.  Re-registering an id
    /// resets its allocation state.
    pub fn register(&mut self, id: impl Into<ResourceId>, kind: ResourceKind) {
        let id = id.into();
        self.graph.add_vertex(id.clone());
        let resource = Resource { id: id.clone(), state: ResourceState::fresh(kind) };
        if self.resources.insert(id.clone(), resource).is_none() {
            self.order.push(id.clone());
        }
        debug!(resource = %id, %kind, "registered resource");
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn graph(&self) -> &WeightedGraph<ResourceId> {
        &self.graph
    }

    /// Add a corridor/working relationship between two vertices.
    pub fn connect(&mut self, a: impl Into<ResourceId>, b: impl Into<ResourceId>, weight: f64) {
        self.graph.add_edge(a.into(), b.into(), weight);
    }

    /// Ids of currently available resources of `kind`, in registration order.
    pub fn available(&self, kind: ResourceKind) -> Vec<ResourceId> {
        self.order
            .iter()
            .filter_map(|id| self.resources.get(id))
            .filter(|r| r.kind() == kind && r.state.is_available())
            .map(|r| r.id.clone())
            .collect()
    }

    // ── Rooms ─────────────────────────────────────────────────────────────

    /// Put `patient` in an available room.
    pub fn assign_room(&mut self, room: &str, patient: &PatientId) -> ResourceResult<()> {
        let Resource { id, state } = self.lookup_mut(room)?;
        let ResourceState::Room { status, patient: occupant } = state else {
            return Err(wrong_kind(id, ResourceKind::Room, state.kind()));
        };
        if *status != RoomStatus::Available {
            return Err(ResourceError::Unavailable(id.clone()));
        }
        *status = RoomStatus::Occupied;
        *occupant = Some(patient.clone());
        let room_id = id.clone();

        self.graph.add_unit_edge(patient.clone().into(), room_id.clone());
        info!(room = %room_id, patient = %patient, "room assigned");
        Ok(())
    }

    /// Vacate a room; it goes to cleaning, not straight back to available.
    pub fn release_room(&mut self, room: &str) -> ResourceResult<()> {
        let Resource { id, state } = self.lookup_mut(room)?;
        let ResourceState::Room { status, patient } = state else {
            return Err(wrong_kind(id, ResourceKind::Room, state.kind()));
        };
        *status = RoomStatus::Cleaning;
        let previous = patient.take();
        info!(room = %id, patient = ?previous, "room released for cleaning");
        Ok(())
    }

    /// Cleaning finished.  No-op for a room that is already available.
    pub fn mark_room_ready(&mut self, room: &str) -> ResourceResult<()> {
        let Resource { id, state } = self.lookup_mut(room)?;
        let ResourceState::Room { status, .. } = state else {
            return Err(wrong_kind(id, ResourceKind::Room, state.kind()));
        };
        match *status {
            RoomStatus::Occupied => Err(ResourceError::Unavailable(id.clone())),
            RoomStatus::Cleaning | RoomStatus::Available => {
                *status = RoomStatus::Available;
                Ok(())
            }
        }
    }

    // ── Equipment ─────────────────────────────────────────────────────────

    /// Move available equipment to `location` (usually a room).
    pub fn assign_equipment(&mut self, equipment: &str, location: impl Into<ResourceId>) -> ResourceResult<()> {
        let location = location.into();
        let Resource { id, state } = self.lookup_mut(equipment)?;
        let ResourceState::Equipment { status, location: current } = state else {
            return Err(wrong_kind(id, ResourceKind::Equipment, state.kind()));
        };
        if *status != EquipmentStatus::Available {
            return Err(ResourceError::Unavailable(id.clone()));
        }
        *status = EquipmentStatus::InUse;
        *current = Some(location.clone());
        let equipment_id = id.clone();

        self.graph.add_unit_edge(equipment_id.clone(), location.clone());
        info!(equipment = %equipment_id, location = %location, "equipment assigned");
        Ok(())
    }

    /// Return equipment to the available pool; it keeps its last location.
    pub fn return_equipment(&mut self, equipment: &str) -> ResourceResult<()> {
        let Resource { id, state } = self.lookup_mut(equipment)?;
        let ResourceState::Equipment { status, .. } = state else {
            return Err(wrong_kind(id, ResourceKind::Equipment, state.kind()));
        };
        *status = EquipmentStatus::Available;
        Ok(())
    }

    // ── Providers ─────────────────────────────────────────────────────────

    /// Add `patient` to a provider's list.  The provider stops accepting new
    /// patients once the list reaches `max_patients_per_provider`.
    pub fn assign_provider(&mut self, provider: &str, patient: &PatientId) -> ResourceResult<()> {
        let capacity = self.config.max_patients_per_provider;
        let Resource { id, state } = self.lookup_mut(provider)?;
        let ResourceState::Provider { patients, available } = state else {
            return Err(wrong_kind(id, ResourceKind::Provider, state.kind()));
        };
        if !*available {
            return Err(ResourceError::Unavailable(id.clone()));
        }
        if !patients.contains(patient) {
            patients.push(patient.clone());
        }
        if patients.len() >= capacity {
            *available = false;
        }
        let load = patients.len();
        let provider_id = id.clone();

        self.graph.add_unit_edge(provider_id.clone(), patient.clone().into());
        info!(provider = %provider_id, patient = %patient, load, "provider assigned");
        Ok(())
    }

    /// Drop `patient` from a provider's list, reopening the provider if it
    /// falls below capacity.  Returns whether the patient was on the list.
    pub fn release_provider(&mut self, provider: &str, patient: &PatientId) -> ResourceResult<bool> {
        let capacity = self.config.max_patients_per_provider;
        let Resource { id, state } = self.lookup_mut(provider)?;
        let ResourceState::Provider { patients, available } = state else {
            return Err(wrong_kind(id, ResourceKind::Provider, state.kind()));
        };
        let before = patients.len();
        patients.retain(|p| p != patient);
        if patients.len() < capacity {
            *available = true;
        }
        Ok(patients.len() != before)
    }

    // ── Graph analysis ────────────────────────────────────────────────────

    /// Shortest route for a staff member to reach a room.  Empty if either
    /// is unknown to the graph or they are not connected.
    pub fn optimize_staff_path(&self, staff: &str, room: &str) -> Vec<ResourceId> {
        self.graph.shortest_path(staff, room)
    }

    pub fn bottlenecks(&self) -> Vec<(ResourceId, usize)> {
        self.graph.find_bottlenecks()
    }

    pub fn summary(&self) -> ResourceSummary {
        let count = |kind| self.resources.values().filter(|r| r.kind() == kind).count();
        ResourceSummary {
            total_resources: self.graph.vertex_count(),
            bottlenecks:     self.graph.find_bottlenecks(),
            rooms:           count(ResourceKind::Room),
            equipment:       count(ResourceKind::Equipment),
            providers:       count(ResourceKind::Provider),
            staff:           count(ResourceKind::Staff),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lookup_mut(&mut self, id: &str) -> ResourceResult<&mut Resource> {
        self.resources
            .get_mut(id)
            .ok_or_else(|| ResourceError::NotFound(ResourceId::from(id)))
    }
}

fn wrong_kind(id: &ResourceId, expected: ResourceKind, actual: ResourceKind) -> ResourceError {
    ResourceError::WrongKind { id: id.clone(), expected, actual }
}
