//! Single-source shortest-path lengths.
//!
//! Global efficiency, closeness and weighted betweenness all reduce to
//! repeated single-source distance queries on the mutating working copy, so
//! the traversals live here rather than in any one metric. Unweighted
//! queries use BFS (hop counts); weighted queries use Dijkstra over the
//! named edge attribute. Negative weights are not validated — the distances
//! they produce are undefined.
//!
//! Distances come back as a dense vector indexed by [`Network::to_index`],
//! with `f64::INFINITY` marking unreachable nodes (and any index holes left
//! by removals). Dense storage keeps downstream summation in a fixed order,
//! which float addition needs for bit-identical repeat runs.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use petgraph::{Direction, stable_graph::NodeIndex};

use crate::graph::Network;

/// Distances from `source` to every node, `source → source = 0`,
/// unreachable entries `f64::INFINITY`.
///
/// `dir` selects edge orientation for directed networks (`Outgoing` for
/// forward distances, `Incoming` for distances *to* a target); undirected
/// networks ignore it.
pub(crate) fn shortest_path_lengths(
    net: &Network,
    source: NodeIndex,
    weight: Option<&str>,
    dir: Direction,
) -> Vec<f64> {
    match weight {
        None => bfs_lengths(net, source, dir),
        Some(attr) => dijkstra_lengths(net, source, attr, dir),
    }
}

fn bfs_lengths(net: &Network, source: NodeIndex, dir: Direction) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; net.node_bound()];
    dist[net.to_index(source)] = 0.0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let dv = dist[net.to_index(v)];
        for (w, _) in net.adjacency(v, dir) {
            let wi = net.to_index(w);
            if dist[wi].is_infinite() {
                dist[wi] = dv + 1.0;
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Min-heap entry ordered by distance; `f64` is not `Ord`, so ordering goes
/// through `total_cmp`.
#[derive(Debug, PartialEq)]
struct HeapEntry {
    dist: f64,
    node: NodeIndex,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.node.cmp(&other.node))
    }
}

fn dijkstra_lengths(net: &Network, source: NodeIndex, attr: &str, dir: Direction) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; net.node_bound()];
    let mut settled = vec![false; net.node_bound()];

    let mut heap = BinaryHeap::new();
    heap.push(Reverse(HeapEntry {
        dist: 0.0,
        node: source,
    }));

    while let Some(Reverse(HeapEntry { dist: d, node: v })) = heap.pop() {
        let vi = net.to_index(v);
        if settled[vi] {
            continue;
        }
        settled[vi] = true;
        dist[vi] = d;

        for (w, edge) in net.adjacency(v, dir) {
            if !settled[net.to_index(w)] {
                heap.push(Reverse(HeapEntry {
                    dist: d + net.edge_cost(edge, Some(attr)),
                    node: w,
                }));
            }
        }
    }
    dist
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
