//! Undirected weighted graph over ER resource identifiers.
//!
//! # Data layout
//!
//! Vertices are interned: each key gets a dense [`VertexIdx`] in insertion
//! order, and adjacency is a `Vec` of `(neighbor, weight)` lists indexed by
//! that position.  Traversals work on indices and only clone keys when
//! building their output.
//!
//! ```text
//! vertices[i]   = key of vertex i           (insertion order)
//! adjacency[i]  = [(j, w), ...]             (append order, duplicates kept)
//! index[key]    = i
//! ```
//!
//! `add_edge(u, v, w)` appends `v` to `u`'s list and `u` to `v`'s list.
//! Repeating an edge appends again (multi-edges count toward degree), and a
//! self-loop lands twice on the same list.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::router::{DijkstraRouter, Router};

/// Bound satisfied by any type usable as a vertex key.
pub trait VertexKey: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> VertexKey for T {}

/// Dense position of a vertex in insertion order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VertexIdx(pub u32);

impl VertexIdx {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── WeightedGraph ─────────────────────────────────────────────────────────────

/// Undirected multigraph with non-negative `f64` edge weights.
///
/// Weights are not validated.  Shortest-path results are only meaningful
/// when every weight is non-negative; upholding that is the caller's job.
#[derive(Clone, Debug)]
pub struct WeightedGraph<V> {
    vertices:  Vec<V>,
    index:     FxHashMap<V, VertexIdx>,
    adjacency: Vec<Vec<(VertexIdx, f64)>>,
}

impl<V> Default for WeightedGraph<V> {
    fn default() -> Self {
        Self {
            vertices:  Vec::new(),
            index:     FxHashMap::default(),
            adjacency: Vec::new(),
        }
    }
}

impl<V: VertexKey> WeightedGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add `vertex` if absent and return its index.  Idempotent.
    pub fn add_vertex(&mut self, vertex: V) -> VertexIdx {
        if let Some(&idx) = self.index.get(&vertex) {
            return idx;
        }
        let idx = VertexIdx(self.vertices.len() as u32);
        self.vertices.push(vertex.clone());
        self.index.insert(vertex, idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add an undirected edge, creating either endpoint if needed.
    pub fn add_edge(&mut self, u: V, v: V, weight: f64) {
        let a = self.add_vertex(u);
        let b = self.add_vertex(v);
        self.adjacency[a.index()].push((b, weight));
        self.adjacency[b.index()].push((a, weight));
    }

    /// [`add_edge`](Self::add_edge) with the default weight of 1.
    pub fn add_unit_edge(&mut self, u: V, v: V) {
        self.add_edge(u, v, 1.0);
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn index_of<Q>(&self, vertex: &Q) -> Option<VertexIdx>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(vertex).copied()
    }

    /// Key of the vertex at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` did not come from this graph.
    #[inline]
    pub fn vertex(&self, idx: VertexIdx) -> &V {
        &self.vertices[idx.index()]
    }

    pub fn contains_vertex<Q>(&self, vertex: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(vertex)
    }

    /// All vertex keys in insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total adjacency entries across all vertices (twice the edge count).
    pub fn edge_entry_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `(neighbor, weight)` pairs of `vertex` in append order.  Empty if
    /// `vertex` is absent.
    pub fn neighbors<'a, Q>(&'a self, vertex: &Q) -> impl Iterator<Item = (&'a V, f64)> + use<'a, V, Q>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let list: &[(VertexIdx, f64)] = match self.index_of(vertex) {
            Some(idx) => &self.adjacency[idx.index()],
            None => &[],
        };
        list.iter().map(|&(n, w)| (self.vertex(n), w))
    }

    /// Raw adjacency of `idx`, for routers.
    #[inline]
    pub fn adjacency(&self, idx: VertexIdx) -> &[(VertexIdx, f64)] {
        &self.adjacency[idx.index()]
    }

    /// Number of adjacency entries of `vertex`; 0 if absent.
    pub fn degree_of<Q>(&self, vertex: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(vertex)
            .map_or(0, |idx| self.adjacency[idx.index()].len())
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Level-order exploration from `start`, returning `(vertex, depth)` in
    /// visit order.
    ///
    /// A vertex is marked visited when it is dequeued, so the first depth at
    /// which it is reached wins.  Entries deeper than `max_depth` are
    /// dropped without stopping shallower branches.
    pub fn breadth_first_search<Q>(&self, start: &Q, max_depth: Option<usize>) -> Vec<(V, usize)>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(start) = self.index_of(start) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.vertices.len()];
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut result = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if visited[current.index()] {
                continue;
            }
            if max_depth.is_some_and(|max| depth > max) {
                continue;
            }
            visited[current.index()] = true;
            result.push((self.vertex(current).clone(), depth));

            for &(neighbor, _) in &self.adjacency[current.index()] {
                if !visited[neighbor.index()] {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
        result
    }

    /// Depth-first visit order from `start`, stopping as soon as `end` is
    /// visited.
    ///
    /// The result is the sequence of vertices in the order they were first
    /// entered, including dead-end branches explored before `end` was
    /// reached.  It is a traversal trace, not a path.
    pub fn depth_first_search<Q>(&self, start: &Q, end: Option<&Q>) -> Vec<V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(start) = self.index_of(start) else {
            return Vec::new();
        };
        // An absent `end` can never be reached: traverse everything.
        let end = end.and_then(|e| self.index_of(e));

        let mut visited = vec![false; self.vertices.len()];
        let mut path = Vec::new();

        visited[start.index()] = true;
        path.push(self.vertex(start).clone());
        if end == Some(start) {
            return path;
        }

        // Explicit stack of (vertex, next adjacency slot to try) mirrors the
        // recursive visit order without risking stack overflow.
        let mut stack = vec![(start, 0usize)];
        while let Some(top) = stack.last_mut() {
            let (current, cursor) = *top;
            let adjacency = &self.adjacency[current.index()];
            if cursor >= adjacency.len() {
                stack.pop();
                continue;
            }
            top.1 += 1;

            let next = adjacency[cursor].0;
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            path.push(self.vertex(next).clone());
            if end == Some(next) {
                break;
            }
            stack.push((next, 0));
        }
        path
    }

    /// Minimum-weight vertex sequence from `start` to `end`, inclusive.
    ///
    /// `[start]` when both are the same present vertex; empty when either is
    /// absent or `end` is unreachable.
    pub fn shortest_path<Q>(&self, start: &Q, end: &Q) -> Vec<V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (Some(from), Some(to)) = (self.index_of(start), self.index_of(end)) else {
            return Vec::new();
        };
        DijkstraRouter
            .route(self, from, to)
            .map(|route| route.vertices)
            .unwrap_or_default()
    }

    /// Every vertex with its degree, highest degree first.  Equal degrees
    /// keep insertion order.
    pub fn find_bottlenecks(&self) -> Vec<(V, usize)> {
        let mut degrees: Vec<(V, usize)> = self
            .vertices
            .iter()
            .zip(&self.adjacency)
            .map(|(v, adj)| (v.clone(), adj.len()))
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1));
        degrees
    }
}
