use social_graph_core::{Graph, INFINITE_COST};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: social-graph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Ternary tree (deep paths)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!();
        println!("Default node_count: 200000");
        println!("Set RUST_LOG=debug to see engine events.");
        return;
    }

    if node_count < 16 {
        eprintln!("node_count must be at least 16, got {}", node_count);
        return;
    }

    println!("social-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "tree" => vec![("Ternary tree", gen_tree)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Ternary tree", gen_tree as fn(u64) -> Graph<u64>),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", node_count);

    let t = Instant::now();
    let mut graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    info!(generator = name, vertices = graph.vertex_count(), edges = graph.edge_count(), "graph generated");

    // Full traversal from vertex 0
    let t = Instant::now();
    match social_graph_core::breadth_first_traversal(&mut graph, &0) {
        Ok(order) => println!(
            "Breadth-first traversal from 0: {} reached in {:.1}ms",
            order.len(),
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Breadth-first traversal failed: {}", e),
    }

    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "depth", "found", "visited", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = social_graph_core::bfs_neighborhood(&graph, &0, depth);
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            result.neighbors.len(),
            result.nodes_visited,
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if result.nodes_visited >= graph.vertex_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    // Shortest path: vertex 0 to last vertex, twice to include the state reset
    let far = graph.vertex_count() as u64 - 1;
    println!();
    for run in 1..=2 {
        let mut path = Vec::new();
        let t = Instant::now();
        let hops = social_graph_core::shortest_path(&mut graph, &0, &far, &mut path);
        let elapsed = t.elapsed();
        if hops == INFINITE_COST {
            println!(
                "Shortest path 0 -> {} (run {}): no path ({:.1}ms)",
                far,
                run,
                elapsed.as_secs_f64() * 1000.0
            );
        } else {
            println!(
                "Shortest path 0 -> {} (run {}): {} hops in {:.1}ms",
                far,
                run,
                hops,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }

    // Structural mutation: drop the highest-degree vertex
    let hub = social_graph_core::degree_centrality(&graph, 1);
    if let Some(top) = hub.first() {
        let edges_before = graph.edge_count();
        let t = Instant::now();
        graph.remove_vertex(&top.label);
        println!(
            "Removed hub {} (degree {}): {} edges dropped in {:.1}ms",
            top.label,
            top.degree,
            edges_before - graph.edge_count(),
            t.elapsed().as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn with_vertices(node_count: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize);
    for i in 0..node_count {
        graph.add_vertex(i);
    }
    graph
}

/// Ternary tree: every vertex has three children, filled level by level.
/// Deep paths and wide frontiers; no cycles.
fn gen_tree(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count);
    for child in 1..node_count {
        graph.add_edge(&((child - 1) / 3), &child);
    }
    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each vertex connects to its K nearest successors on a ring; each of
/// those edges is rewired to a random vertex with probability p.
fn gen_small_world(node_count: u64) -> Graph<u64> {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                neighbor
            };
            // Self-loops and repeats are rejected by the graph
            if !graph.add_edge(&i, &target) {
                graph.add_edge(&i, &neighbor);
            }
        }
    }

    graph
}

/// Erdos-Renyi: ~5 uniform random edges per vertex, no structure.
fn gen_random(node_count: u64) -> Graph<u64> {
    let target_edges = node_count * 5;
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        graph.add_edge(&from, &to);
    }

    graph
}

/// Barbell: two dense clusters joined by a chain of bridge vertices.
///
/// Every path between the clusters runs through the bridge.
fn gen_barbell(node_count: u64) -> Graph<u64> {
    let bridge_len = 10u64;
    let cluster_size = (node_count - bridge_len) / 2;
    let mut graph = with_vertices(cluster_size * 2 + bridge_len);
    let mut rng = FastRng::new(99999);

    let b_start = cluster_size + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster_size {
            for _ in 0..10u64.min(cluster_size - 1) {
                let target = rng.next(cluster_size);
                graph.add_edge(&(base + i), &(base + target));
            }
        }
    }

    // Chain from the last vertex of A through the bridge to the first of B
    for id in cluster_size..=b_start {
        graph.add_edge(&(id - 1), &id);
    }

    graph
}
