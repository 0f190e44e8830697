//! social-graph-core: mutable undirected graph engine.
//!
//! A pure Rust library that maintains a label-keyed adjacency list and
//! provides breadth-first traversal and unweighted shortest paths with
//! path reconstruction. Per-vertex traversal state (visited, cost,
//! predecessor) is reset at the start of every traversal.
//!
//! Designed as the engine behind the `social-graph` directory, but usable
//! independently for benchmarking and testing.

mod error;
mod graph;
mod traversal;
mod vertex;

pub use error::GraphError;
pub use graph::Graph;
pub use traversal::{
    bfs_neighborhood, breadth_first_traversal, degree_centrality, shortest_path, DegreeResult,
    NeighborResult, TraversalResult,
};
pub use vertex::{Cost, Edge, Label, Vertex, INFINITE_COST};
