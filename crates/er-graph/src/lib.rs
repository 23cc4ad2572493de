//! `er-graph`: resource graph, traversal, routing, and allocation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`graph`]     | `WeightedGraph` (undirected, insertion-ordered), BFS, DFS, bottlenecks |
//! | [`router`]    | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`resources`] | `ResourceTracker` (rooms, equipment, providers, staff)      |
//! | [`loader`]    | `load_edges_csv`, `load_edges_reader`                       |
//! | [`error`]     | `GraphError`, `ResourceError`                               |
//!
//! # Soft-fail contract
//!
//! Graph queries on an absent vertex return an empty collection or zero,
//! never an error.  Callers translate "empty" into "not found" at their own
//! boundary.  Only allocation ([`ResourceTracker`]) and loading can fail.

pub mod error;
pub mod graph;
pub mod loader;
pub mod resources;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult, ResourceError, ResourceResult};
pub use graph::{VertexIdx, VertexKey, WeightedGraph};
pub use loader::{load_edges_csv, load_edges_reader};
pub use resources::{
    EquipmentStatus, Resource, ResourceKind, ResourceState, ResourceSummary, ResourceTracker,
    RoomStatus,
};
pub use router::{DijkstraRouter, Route, Router};
