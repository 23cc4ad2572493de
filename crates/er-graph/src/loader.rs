//! CSV edge-list loader for the resource graph.
//!
//! # CSV format
//!
//! One row per undirected edge.  `weight` may be left blank, in which case
//! the edge gets the default weight of 1.
//!
//! ```csv
//! from_vertex,to_vertex,weight
//! nurse-station,room-1,2.5
//! nurse-station,room-2,4
//! room-1,room-2,
//! ```
//!
//! Vertices are created in the order they first appear, which fixes their
//! insertion order for traversal and tie-breaking.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use er_core::ResourceId;

use crate::error::{GraphError, GraphResult};
use crate::graph::WeightedGraph;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    from_vertex: String,
    to_vertex:   String,
    #[serde(default)]
    weight:      Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a resource graph from a CSV edge list.
pub fn load_edges_csv(path: &Path) -> GraphResult<WeightedGraph<ResourceId>> {
    let file = std::fs::File::open(path)?;
    load_edges_reader(file)
}

/// Like [`load_edges_csv`] but accepts any `Read` source.
pub fn load_edges_reader<R: Read>(reader: R) -> GraphResult<WeightedGraph<ResourceId>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut graph = WeightedGraph::new();

    for (line, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let weight = row.weight.unwrap_or(1.0);
        if !weight.is_finite() || weight < 0.0 {
            // +2: header row plus 1-based numbering.
            return Err(GraphError::Parse(format!(
                "row {}: weight must be a non-negative number, got {weight}",
                line + 2
            )));
        }
        graph.add_edge(ResourceId::new(row.from_vertex), ResourceId::new(row.to_vertex), weight);
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_entry_count() / 2,
        "loaded resource graph"
    );
    Ok(graph)
}
