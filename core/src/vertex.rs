use std::fmt::Debug;
use std::hash::Hash;

/// Bound for vertex labels: an opaque identity key.
///
/// `Debug` is required so rejected operations can be logged with the
/// offending label.
pub trait Label: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Label for T {}

/// Hop count (or weight sum) from a traversal origin.
pub type Cost = u32;

/// Cost of a vertex that no traversal has reached.
pub const INFINITE_COST: Cost = Cost::MAX;

/// One direction of an undirected edge, stored in the source vertex's list.
///
/// Two entries are the same edge when both the neighbor label and the
/// weight match; parallel entries with different weights are distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub target: T,
    pub weight: f64,
}

impl<T: PartialEq> Edge<T> {
    fn matches(&self, target: &T, weight: f64) -> bool {
        self.target == *target && self.weight == weight
    }
}

/// A node in the graph: identity, adjacency list, and transient traversal
/// state.
///
/// `connect`/`disconnect` only touch this vertex's own list. Keeping the
/// reciprocal entry in sync is the graph's job.
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    label: T,
    visited: bool,
    cost: Cost,
    predecessor: Option<T>,
    edges: Vec<Edge<T>>,
}

impl<T: Label> Vertex<T> {
    pub(crate) fn new(label: T) -> Self {
        Self {
            label,
            visited: false,
            cost: INFINITE_COST,
            predecessor: None,
            edges: Vec::new(),
        }
    }

    pub fn label(&self) -> &T {
        &self.label
    }

    pub(crate) fn into_label(self) -> T {
        self.label
    }

    // --- adjacency ---

    /// Add an unweighted (weight 0) edge to `target`.
    pub fn connect(&mut self, target: &T) -> bool {
        self.connect_weighted(target, 0.0)
    }

    /// Append an edge to `target`. Fails on a self-loop, a non-finite
    /// weight, or when the same (target, weight) pair is already present.
    pub fn connect_weighted(&mut self, target: &T, weight: f64) -> bool {
        if !weight.is_finite() || *target == self.label || self.has_edge(target, weight) {
            return false;
        }
        self.edges.push(Edge {
            target: target.clone(),
            weight,
        });
        true
    }

    pub fn disconnect(&mut self, target: &T) -> bool {
        self.disconnect_weighted(target, 0.0)
    }

    /// Remove the first entry matching (target, weight), keeping the order
    /// of the remaining edges.
    pub fn disconnect_weighted(&mut self, target: &T, weight: f64) -> bool {
        match self.edges.iter().position(|e| e.matches(target, weight)) {
            Some(idx) => {
                self.edges.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every entry pointing at `target`, whatever its weight.
    /// Returns how many were removed.
    pub(crate) fn disconnect_all(&mut self, target: &T) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| e.target != *target);
        before - self.edges.len()
    }

    pub fn has_edge(&self, target: &T, weight: f64) -> bool {
        self.edges.iter().any(|e| e.matches(target, weight))
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Neighbor labels in edge-insertion order.
    pub fn neighbors(&self) -> impl Iterator<Item = &T> + '_ {
        self.edges.iter().map(|e| &e.target)
    }

    /// Edge weights, positionally aligned with [`Vertex::neighbors`].
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.iter().map(|e| e.weight)
    }

    pub fn neighbor_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_neighbor(&self) -> bool {
        !self.edges.is_empty()
    }

    /// First neighbor (in edge order) for which `is_visited` returns false.
    ///
    /// Neighbor state lives in other vertices, so the caller supplies the
    /// lookup.
    pub fn unvisited_neighbor<F>(&self, is_visited: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.neighbors().find(|n| !is_visited(n))
    }

    // --- traversal state ---

    pub fn visit(&mut self) {
        self.visited = true;
    }

    pub fn unvisit(&mut self) {
        self.visited = false;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_cost(&mut self, cost: Cost) {
        self.cost = cost;
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn set_predecessor(&mut self, predecessor: Option<T>) {
        self.predecessor = predecessor;
    }

    pub fn predecessor(&self) -> Option<&T> {
        self.predecessor.as_ref()
    }

    pub fn has_predecessor(&self) -> bool {
        self.predecessor.is_some()
    }

    /// Back to the state of a freshly added vertex: unvisited, infinite
    /// cost, no predecessor. Edges are untouched.
    pub fn reset_traversal_state(&mut self) {
        self.visited = false;
        self.cost = INFINITE_COST;
        self.predecessor = None;
    }
}
