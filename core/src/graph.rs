use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::vertex::{Edge, Label, Vertex};

/// In-memory undirected graph: label-keyed vertex registry + edge counter.
///
/// The registry is the sole owner of every vertex. Edges refer to their
/// neighbor by label, so there are no ownership cycles. Each undirected
/// edge is stored as two reciprocal entries (one per endpoint) that share
/// a weight, and is counted once in `edge_count`.
///
/// Traversals write per-vertex state (visited, cost, predecessor) and take
/// `&mut Graph`, so at most one traversal can run at a time and no
/// structural mutation can interleave with it.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    vertices: HashMap<T, Vertex<T>>,
    edge_count: usize,
}

impl<T: Label> Graph<T> {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Insert a vertex with default traversal state. Returns false if the
    /// label is already registered.
    pub fn add_vertex(&mut self, label: T) -> bool {
        match self.vertices.entry(label) {
            Entry::Occupied(slot) => {
                debug!(label = ?slot.key(), "add_vertex: label already present");
                false
            }
            Entry::Vacant(slot) => {
                let vertex = Vertex::new(slot.key().clone());
                slot.insert(vertex);
                true
            }
        }
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// Every neighbor loses all of its entries pointing at `label`, and
    /// `edge_count` drops by the number of back-entries actually removed.
    /// Returns the removed label, or None if it was not registered.
    pub fn remove_vertex(&mut self, label: &T) -> Option<T> {
        let vertex = self.vertices.remove(label)?;

        let mut neighbors: Vec<&T> = Vec::new();
        for target in vertex.neighbors() {
            if !neighbors.contains(&target) {
                neighbors.push(target);
            }
        }

        let mut severed = 0;
        for target in neighbors {
            if let Some(neighbor) = self.vertices.get_mut(target) {
                severed += neighbor.disconnect_all(label);
            }
        }
        self.edge_count = self.edge_count.saturating_sub(severed);

        debug!(label = ?label, edges = severed, "vertex removed");
        Some(vertex.into_label())
    }

    /// Add an unweighted edge (weight 0).
    pub fn add_edge(&mut self, begin: &T, end: &T) -> bool {
        self.add_weighted_edge(begin, end, 0.0)
    }

    /// Connect `begin` and `end` in both directions with the same weight.
    ///
    /// Fails on a self-loop, a missing endpoint, or an existing
    /// (neighbor, weight) entry in either direction. A failed call leaves
    /// both adjacency lists unchanged.
    pub fn add_weighted_edge(&mut self, begin: &T, end: &T, weight: f64) -> bool {
        if begin == end {
            debug!(label = ?begin, "add_edge: self-loop rejected");
            return false;
        }
        if !weight.is_finite() {
            debug!(begin = ?begin, end = ?end, weight, "add_edge: non-finite weight rejected");
            return false;
        }
        if !self.contains_vertex(begin) || !self.contains_vertex(end) {
            debug!(begin = ?begin, end = ?end, "add_edge: endpoint not found");
            return false;
        }

        if !self.link(begin, end, weight) {
            return false;
        }
        if !self.link(end, begin, weight) {
            // Undo the forward half so no one-sided edge is left behind
            self.unlink(begin, end, weight);
            return false;
        }

        self.edge_count += 1;
        true
    }

    pub fn remove_edge(&mut self, begin: &T, end: &T) -> bool {
        self.remove_weighted_edge(begin, end, 0.0)
    }

    /// Remove the (begin, end, weight) edge from both adjacency lists.
    ///
    /// Both directions must be present; otherwise nothing is touched.
    pub fn remove_weighted_edge(&mut self, begin: &T, end: &T, weight: f64) -> bool {
        if begin == end {
            return false;
        }

        let forward = self
            .vertices
            .get(begin)
            .is_some_and(|v| v.has_edge(end, weight));
        let backward = self
            .vertices
            .get(end)
            .is_some_and(|v| v.has_edge(begin, weight));
        if !(forward && backward) {
            return false;
        }

        self.unlink(begin, end, weight);
        self.unlink(end, begin, weight);
        self.edge_count -= 1;
        true
    }

    fn link(&mut self, from: &T, to: &T, weight: f64) -> bool {
        self.vertices
            .get_mut(from)
            .is_some_and(|v| v.connect_weighted(to, weight))
    }

    fn unlink(&mut self, from: &T, to: &T, weight: f64) -> bool {
        self.vertices
            .get_mut(from)
            .is_some_and(|v| v.disconnect_weighted(to, weight))
    }

    /// True iff both labels are registered, distinct, and `end` appears
    /// among `begin`'s neighbors (any weight).
    pub fn has_edge(&self, begin: &T, end: &T) -> bool {
        begin != end
            && self.contains_vertex(end)
            && self
                .vertices
                .get(begin)
                .is_some_and(|v| v.neighbors().any(|n| n == end))
    }

    pub fn contains_vertex(&self, label: &T) -> bool {
        self.vertices.contains_key(label)
    }

    pub fn vertex(&self, label: &T) -> Option<&Vertex<T>> {
        self.vertices.get(label)
    }

    pub(crate) fn vertex_mut(&mut self, label: &T) -> Option<&mut Vertex<T>> {
        self.vertices.get_mut(label)
    }

    /// Neighbors of `label` in edge-insertion order. Empty for an unknown label.
    pub fn neighbors<'a>(&'a self, label: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.vertices
            .get(label)
            .into_iter()
            .flat_map(|v| v.neighbors())
    }

    pub fn degree(&self, label: &T) -> usize {
        self.vertices.get(label).map_or(0, Vertex::neighbor_count)
    }

    /// First neighbor of `label` whose visited flag is clear.
    pub fn unvisited_neighbor(&self, label: &T) -> Option<&T> {
        let vertex = self.vertices.get(label)?;
        vertex.unvisited_neighbor(|n| self.vertices.get(n).is_some_and(Vertex::is_visited))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Snapshot of all vertices, in no particular order.
    pub fn vertices(&self) -> Vec<&Vertex<T>> {
        self.vertices.values().collect()
    }

    /// Snapshot of all labels, in no particular order.
    pub fn labels(&self) -> Vec<T> {
        self.vertices.keys().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edge_count = 0;
    }

    /// Clear visited/cost/predecessor on every vertex.
    pub fn reset_traversal_state(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.reset_traversal_state();
        }
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem = self.vertices.len() * (size_of::<T>() + size_of::<Vertex<T>>() + 16);
        let edge_mem: usize = self
            .vertices
            .values()
            .map(|v| v.neighbor_count() * size_of::<Edge<T>>())
            .sum();

        vertex_mem + edge_mem
    }
}

impl<T: Label> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}
