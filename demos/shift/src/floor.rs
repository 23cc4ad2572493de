//! ER floor plan used by the shift demo.
//!
//! Corridor weights are walking minutes.  The nurse station sits between
//! triage and the treatment rooms; trauma bay 1 is only reachable through
//! the hallway.

use anyhow::Result;
use std::io::Cursor;

use er_core::ResourceConfig;
use er_graph::{load_edges_reader, ResourceKind, ResourceTracker};

const FLOOR_CSV: &str = "\
from_vertex,to_vertex,weight
triage,nurse-station,1
nurse-station,room-1,1
nurse-station,room-2,2
nurse-station,hallway,1
hallway,room-3,1
hallway,trauma-1,2
room-2,room-3,1
";

pub const ROOMS: [&str; 4] = ["room-1", "room-2", "room-3", "trauma-1"];
pub const PROVIDERS: [&str; 2] = ["dr-ito", "dr-okafor"];
pub const EQUIPMENT: [&str; 2] = ["monitor-1", "ventilator-1"];
pub const STAFF: [&str; 2] = ["rn-kaye", "nurse-station"];

/// Load the floor graph and register every resource on it.
pub fn build_floor(config: ResourceConfig) -> Result<ResourceTracker> {
    let graph = load_edges_reader(Cursor::new(FLOOR_CSV))?;
    let mut tracker = ResourceTracker::with_graph(config, graph);

    for room in ROOMS {
        tracker.register(room, ResourceKind::Room);
    }
    for provider in PROVIDERS {
        tracker.register(provider, ResourceKind::Provider);
    }
    for equipment in EQUIPMENT {
        tracker.register(equipment, ResourceKind::Equipment);
    }
    for staff in STAFF {
        tracker.register(staff, ResourceKind::Staff);
    }
    // The nurse on shift starts at the station.
    tracker.connect("rn-kaye", "nurse-station", 0.0);
    Ok(tracker)
}
