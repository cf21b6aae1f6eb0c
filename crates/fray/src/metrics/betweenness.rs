//! Node and edge betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness counts how often an element lies on shortest paths between
//! other node pairs. High-betweenness nodes and edges are the bridges whose
//! removal fragments a network fastest, which makes these rankings the
//! default drivers for targeted attacks.
//!
//! # Algorithm
//!
//! Brandes (2001): one single-source shortest-path pass per node, tracking
//! path counts and predecessor lists, then dependency accumulation in
//! reverse settlement order. Unweighted graphs use BFS, weighted graphs the
//! Dijkstra variant over the named edge attribute. Complexity `O(V·E)`
//! unweighted, `O(V·E + V²·log V)` weighted.
//!
//! Scores use the standard normalisation:
//! nodes by `1/((n−1)(n−2))`, edges by `1/(n·(n−1))`, with undirected pair
//! double-counting folded into those factors. Graphs too small for the
//! scale (n ≤ 2 for nodes, n ≤ 1 for edges) are left unscaled — every score
//! is zero there anyway.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use petgraph::{
    Direction,
    stable_graph::{EdgeIndex, NodeIndex},
};
use tracing::instrument;

use crate::graph::Network;
use crate::metrics::{EdgeRanking, NodeRanking, sort_ranking};

/// Compute betweenness centrality for every node, descending.
#[must_use]
#[instrument(skip(net))]
pub fn betweenness_centrality(net: &Network, weight: Option<&str>) -> NodeRanking {
    let bound = net.node_bound();
    let mut cb = vec![0.0; bound];

    for s in net.node_indices() {
        let tree = match weight {
            None => sssp_unweighted(net, s),
            Some(attr) => sssp_weighted(net, s, attr),
        };
        accumulate_nodes(net, s, &tree, &mut cb);
    }

    let scale = node_scale(net.node_count());
    let mut ranking: NodeRanking = net
        .node_indices()
        .map(|v| (net.label(v).to_string(), cb[net.to_index(v)] * scale))
        .collect();
    sort_ranking(&mut ranking);
    ranking
}

/// Compute betweenness centrality for every edge, descending.
///
/// Edge identifiers keep the stored endpoint orientation.
#[must_use]
#[instrument(skip(net))]
pub fn edge_betweenness_centrality(net: &Network, weight: Option<&str>) -> EdgeRanking {
    let edge_bound = net.edge_indices().map(|e| e.index() + 1).max().unwrap_or(0);
    let mut ce = vec![0.0; edge_bound];

    for s in net.node_indices() {
        let tree = match weight {
            None => sssp_unweighted(net, s),
            Some(attr) => sssp_weighted(net, s, attr),
        };
        accumulate_edges(net, &tree, &mut ce);
    }

    let scale = edge_scale(net.node_count());
    let mut ranking: EdgeRanking = net
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = net.edge_endpoints(e)?;
            let pair = (net.label(a).to_string(), net.label(b).to_string());
            Some((pair, ce[e.index()] * scale))
        })
        .collect();
    sort_ranking(&mut ranking);
    ranking
}

// ---------------------------------------------------------------------------
// Single-source shortest-path trees
// ---------------------------------------------------------------------------

/// Result of one Brandes source pass: settlement order, predecessor lists
/// (with the edge used), and shortest-path counts. All dense vectors are
/// indexed by [`Network::to_index`].
struct SsspTree {
    order: Vec<NodeIndex>,
    preds: Vec<Vec<(NodeIndex, EdgeIndex)>>,
    sigma: Vec<f64>,
}

fn sssp_unweighted(net: &Network, s: NodeIndex) -> SsspTree {
    let bound = net.node_bound();
    let mut order = Vec::new();
    let mut preds: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); bound];
    let mut sigma = vec![0.0; bound];
    let mut dist: Vec<i64> = vec![-1; bound];

    let si = net.to_index(s);
    sigma[si] = 1.0;
    dist[si] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        let vi = net.to_index(v);
        order.push(v);

        for (w, edge) in net.adjacency(v, Direction::Outgoing) {
            let wi = net.to_index(w);
            if dist[wi] < 0 {
                dist[wi] = dist[vi] + 1;
                queue.push_back(w);
            }
            if dist[wi] == dist[vi] + 1 {
                sigma[wi] += sigma[vi];
                preds[wi].push((v, edge));
            }
        }
    }

    SsspTree {
        order,
        preds,
        sigma,
    }
}

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

fn sssp_weighted(net: &Network, s: NodeIndex, attr: &str) -> SsspTree {
    let bound = net.node_bound();
    let mut order = Vec::new();
    let mut preds: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); bound];
    let mut sigma = vec![0.0; bound];
    let mut dist = vec![f64::INFINITY; bound];
    let mut settled = vec![false; bound];

    let si = net.to_index(s);
    sigma[si] = 1.0;
    dist[si] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Reverse(HeapEntry {
        dist: 0.0,
        node: s,
    }));

    while let Some(Reverse(HeapEntry { dist: d, node: v })) = heap.pop() {
        let vi = net.to_index(v);
        if settled[vi] {
            continue;
        }
        settled[vi] = true;
        order.push(v);

        for (w, edge) in net.adjacency(v, Direction::Outgoing) {
            let wi = net.to_index(w);
            if settled[wi] {
                continue;
            }
            let nd = d + net.edge_cost(edge, Some(attr));
            if nd < dist[wi] {
                dist[wi] = nd;
                sigma[wi] = sigma[vi];
                preds[wi].clear();
                preds[wi].push((v, edge));
                heap.push(Reverse(HeapEntry { dist: nd, node: w }));
            } else if nd == dist[wi] {
                sigma[wi] += sigma[vi];
                preds[wi].push((v, edge));
            }
        }
    }

    SsspTree {
        order,
        preds,
        sigma,
    }
}

// ---------------------------------------------------------------------------
// Dependency accumulation
// ---------------------------------------------------------------------------

fn accumulate_nodes(net: &Network, s: NodeIndex, tree: &SsspTree, cb: &mut [f64]) {
    let mut delta = vec![0.0; cb.len()];
    let si = net.to_index(s);

    for &w in tree.order.iter().rev() {
        let wi = net.to_index(w);
        for &(v, _) in &tree.preds[wi] {
            let vi = net.to_index(v);
            if tree.sigma[wi] > 0.0 {
                delta[vi] += (tree.sigma[vi] / tree.sigma[wi]) * (1.0 + delta[wi]);
            }
        }
        if wi != si {
            cb[wi] += delta[wi];
        }
    }
}

fn accumulate_edges(net: &Network, tree: &SsspTree, ce: &mut [f64]) {
    let mut delta = vec![0.0; net.node_bound()];

    for &w in tree.order.iter().rev() {
        let wi = net.to_index(w);
        if tree.sigma[wi] <= 0.0 {
            continue;
        }
        let coeff = (1.0 + delta[wi]) / tree.sigma[wi];
        for &(v, edge) in &tree.preds[wi] {
            let vi = net.to_index(v);
            let c = tree.sigma[vi] * coeff;
            ce[edge.index()] += c;
            delta[vi] += c;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn node_scale(n: usize) -> f64 {
    if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        1.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn edge_scale(n: usize) -> f64 {
    if n > 1 {
        1.0 / (n * (n - 1)) as f64
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
