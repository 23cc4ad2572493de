//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! [`WeightedGraph::shortest_path`] and the [`ResourceTracker`] call routing
//! through the [`Router`] trait, so a host can swap in A* or a
//! congestion-aware model without touching the graph.  The default
//! [`DijkstraRouter`] is sufficient at ER scale.
//!
//! # Determinism
//!
//! The frontier is ordered by `(cost, VertexIdx)`, so equal-cost vertices
//! pop in insertion order, and relaxation uses strict `<`, so the first
//! predecessor to reach a vertex at its final cost is the one kept.  The
//! same insertion order therefore always yields the same path.
//!
//! [`ResourceTracker`]: crate::ResourceTracker

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::graph::{VertexIdx, VertexKey, WeightedGraph};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<V> {
    /// Vertices from source to destination, both inclusive.
    pub vertices: Vec<V>,
    /// Sum of the edge weights along `vertices`.
    pub total_weight: f64,
}

impl<V> Route<V> {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.vertices.len() <= 1
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path-finding engine.
pub trait Router<V: VertexKey>: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// Returns `None` if `to` is unreachable.  `from == to` yields a trivial
    /// one-vertex route, not `None`.
    fn route(&self, graph: &WeightedGraph<V>, from: VertexIdx, to: VertexIdx) -> Option<Route<V>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over non-negative edge weights.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl<V: VertexKey> Router<V> for DijkstraRouter {
    fn route(&self, graph: &WeightedGraph<V>, from: VertexIdx, to: VertexIdx) -> Option<Route<V>> {
        dijkstra(graph, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total-ordered wrapper so `f64` costs can live in a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra<V: VertexKey>(graph: &WeightedGraph<V>, from: VertexIdx, to: VertexIdx) -> Option<Route<V>> {
    if from == to {
        return Some(Route {
            vertices:     vec![graph.vertex(from).clone()],
            total_weight: 0.0,
        });
    }

    let n = graph.vertex_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = vertex that reached v at dist[v]; None for unreached vertices.
    let mut prev: Vec<Option<VertexIdx>> = vec![None; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, vertex). Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, VertexIdx)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), vertex))) = heap.pop() {
        if vertex == to {
            return Some(reconstruct(graph, &prev, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[vertex.index()] {
            continue;
        }

        for &(neighbor, weight) in graph.adjacency(vertex) {
            let candidate = cost + weight;
            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev[neighbor.index()] = Some(vertex);
                heap.push(Reverse((Cost(candidate), neighbor)));
            }
        }
    }

    None
}

fn reconstruct<V: VertexKey>(
    graph: &WeightedGraph<V>,
    prev: &[Option<VertexIdx>],
    from: VertexIdx,
    to: VertexIdx,
    total_weight: f64,
) -> Route<V> {
    let mut vertices = vec![graph.vertex(to).clone()];
    let mut current = to;
    while current != from {
        match prev[current.index()] {
            Some(p) => {
                vertices.push(graph.vertex(p).clone());
                current = p;
            }
            None => break,
        }
    }
    vertices.reverse();
    Route { vertices, total_weight }
}
