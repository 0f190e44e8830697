use std::collections::{HashMap, VecDeque};

use tracing::{trace, warn};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::vertex::{Cost, Label, Vertex, INFINITE_COST};

/// A vertex found during depth-limited neighborhood traversal.
#[derive(Debug, Clone)]
pub struct NeighborResult<T> {
    pub label: T,
    pub distance: u32,
    /// Labels on one shortest path from start to this vertex, start excluded,
    /// this vertex included.
    pub path: Vec<T>,
}

/// Result of a neighborhood traversal.
#[derive(Debug)]
pub struct TraversalResult<T> {
    pub neighbors: Vec<NeighborResult<T>>,
    pub nodes_visited: usize,
}

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult<T> {
    pub label: T,
    pub degree: u32,
}

/// Breadth-first traversal from `origin`, returning labels in visit order.
///
/// Resets all traversal state first, then marks `origin` visited before
/// the main loop. Neighbors are visited in edge-insertion order.
pub fn breadth_first_traversal<T: Label>(
    graph: &mut Graph<T>,
    origin: &T,
) -> Result<Vec<T>, GraphError> {
    if !graph.contains_vertex(origin) {
        return Err(GraphError::vertex_not_found(origin));
    }

    graph.reset_traversal_state();

    let mut order = Vec::with_capacity(graph.vertex_count());
    let mut queue: VecDeque<T> = VecDeque::new();
    let mut adjacent: Vec<T> = Vec::new();

    if let Some(v) = graph.vertex_mut(origin) {
        v.visit();
    }
    queue.push_back(origin.clone());

    while let Some(current) = queue.pop_front() {
        adjacent.clear();
        adjacent.extend(graph.neighbors(&current).cloned());

        for next in adjacent.drain(..) {
            if let Some(v) = graph.vertex_mut(&next) {
                if !v.is_visited() {
                    v.visit();
                    queue.push_back(next);
                }
            }
        }

        order.push(current);
    }

    trace!(origin = ?origin, visited = order.len(), "breadth-first traversal done");
    Ok(order)
}

/// Unweighted shortest path from `origin` to `destination`.
///
/// Runs a full BFS that records hop count in each vertex's cost and the
/// discovering vertex as its predecessor, then walks predecessors back
/// from `destination` until it reaches `origin`.
///
/// On success `path` is replaced with the labels from `origin` to
/// `destination` (both included) and the hop count is returned. If either
/// endpoint is missing or `destination` is unreachable, `path` is left
/// untouched and [`INFINITE_COST`] is returned.
pub fn shortest_path<T: Label>(
    graph: &mut Graph<T>,
    origin: &T,
    destination: &T,
    path: &mut Vec<T>,
) -> Cost {
    if !graph.contains_vertex(origin) || !graph.contains_vertex(destination) {
        trace!(origin = ?origin, destination = ?destination, "shortest_path: endpoint not found");
        return INFINITE_COST;
    }

    graph.reset_traversal_state();

    let mut queue: VecDeque<T> = VecDeque::new();
    let mut adjacent: Vec<T> = Vec::new();

    if let Some(v) = graph.vertex_mut(origin) {
        v.visit();
        v.set_cost(0);
    }
    queue.push_back(origin.clone());

    while let Some(current) = queue.pop_front() {
        let cost = graph.vertex(&current).map_or(INFINITE_COST, Vertex::cost);
        adjacent.clear();
        adjacent.extend(graph.neighbors(&current).cloned());

        for next in adjacent.drain(..) {
            if let Some(v) = graph.vertex_mut(&next) {
                if !v.is_visited() {
                    v.visit();
                    v.set_cost(cost.saturating_add(1));
                    v.set_predecessor(Some(current.clone()));
                    queue.push_back(next);
                }
            }
        }
    }

    let hops = graph.vertex(destination).map_or(INFINITE_COST, Vertex::cost);
    if hops == INFINITE_COST {
        trace!(origin = ?origin, destination = ?destination, "shortest_path: unreachable");
        return INFINITE_COST;
    }

    match reconstruct_path(graph, origin, destination) {
        Some(found) => {
            *path = found;
            hops
        }
        None => INFINITE_COST,
    }
}

/// Walk predecessor links from `destination` back to `origin`.
///
/// Stops on equality with `origin`, not on a missing predecessor. A chain
/// that breaks or runs longer than the vertex count yields None.
fn reconstruct_path<T: Label>(graph: &Graph<T>, origin: &T, destination: &T) -> Option<Vec<T>> {
    let mut reversed = vec![destination.clone()];
    let mut current = destination.clone();

    while current != *origin {
        if reversed.len() > graph.vertex_count() {
            warn!(origin = ?origin, destination = ?destination, "predecessor chain does not terminate");
            return None;
        }
        match graph.vertex(&current).and_then(Vertex::predecessor) {
            Some(prev) => {
                current = prev.clone();
                reversed.push(current.clone());
            }
            None => {
                warn!(label = ?current, "predecessor chain broken before origin");
                return None;
            }
        }
    }

    reversed.reverse();
    Some(reversed)
}

/// BFS neighborhood: every vertex reachable from `start` within `max_depth`
/// hops.
///
/// Read-only: discovery state is kept in a local map, so the per-vertex
/// traversal fields are left alone. Paths are rebuilt from parent pointers
/// during result collection.
pub fn bfs_neighborhood<T: Label>(graph: &Graph<T>, start: &T, max_depth: u32) -> TraversalResult<T> {
    if !graph.contains_vertex(start) {
        return TraversalResult {
            neighbors: Vec::new(),
            nodes_visited: 0,
        };
    }

    // visited maps label → (distance, parent); start is its own parent
    let mut visited: HashMap<T, (u32, T)> = HashMap::new();
    let mut queue: VecDeque<(T, u32)> = VecDeque::new();

    visited.insert(start.clone(), (0, start.clone()));
    queue.push_back((start.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for next in graph.neighbors(&current) {
            if !visited.contains_key(next) {
                visited.insert(next.clone(), (depth + 1, current.clone()));
                queue.push_back((next.clone(), depth + 1));
            }
        }
    }

    let nodes_visited = visited.len();

    let neighbors = visited
        .iter()
        .filter(|(label, _)| *label != start)
        .map(|(label, &(distance, _))| NeighborResult {
            label: label.clone(),
            distance,
            path: neighborhood_path(&visited, start, label),
        })
        .collect();

    TraversalResult {
        neighbors,
        nodes_visited,
    }
}

fn neighborhood_path<T: Label>(visited: &HashMap<T, (u32, T)>, start: &T, node: &T) -> Vec<T> {
    let mut path = Vec::new();
    let mut current = node;

    while current != start {
        path.push(current.clone());
        match visited.get(current) {
            Some((_, parent)) => current = parent,
            None => break,
        }
    }

    path.reverse();
    path
}

/// Return vertices ranked by degree.
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// degree (descending). Ties are broken by label (ascending).
pub fn degree_centrality<T: Label + Ord>(graph: &Graph<T>, top_n: usize) -> Vec<DegreeResult<T>> {
    let mut results: Vec<DegreeResult<T>> = graph
        .vertices()
        .into_iter()
        .map(|v| DegreeResult {
            label: v.label().clone(),
            degree: v.neighbor_count() as u32,
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.label.cmp(&b.label)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
