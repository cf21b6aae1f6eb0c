//! Articulation points (cut vertices).
//!
//! # Overview
//!
//! An articulation point is a node whose removal increases the number of
//! connected components — the single points of failure in a network.
//! Directed networks are analysed on their undirected projection (mutual
//! a↔b arcs collapse to one link), since failure analysis cares about any
//! connection, not its direction.
//!
//! # Algorithm
//!
//! Hopcroft–Tarjan low-link DFS, implemented with an explicit stack so deep
//! grid-like networks cannot overflow the call stack. A non-root vertex `v`
//! is a cut vertex when some DFS child's low-link cannot climb above `v`'s
//! discovery time; a root is one when it has two or more DFS children.
//! Output order is the order in which vertices are first identified as cut
//! vertices — deterministic for a fixed graph.

use petgraph::{Direction, stable_graph::NodeIndex};
use tracing::instrument;

use crate::graph::Network;

struct Frame {
    v: NodeIndex,
    parent: Option<NodeIndex>,
    nbrs: Vec<NodeIndex>,
    next: usize,
    parent_skipped: bool,
}

/// Find all articulation points, in discovery order.
#[must_use]
#[instrument(skip(net))]
pub fn articulation_points(net: &Network) -> Vec<String> {
    let bound = net.node_bound();
    let mut disc = vec![usize::MAX; bound];
    let mut low = vec![0usize; bound];
    let mut flagged = vec![false; bound];
    let mut found: Vec<NodeIndex> = Vec::new();
    let mut time = 0usize;

    for root in net.node_indices() {
        let ri = net.to_index(root);
        if disc[ri] != usize::MAX {
            continue;
        }
        disc[ri] = time;
        low[ri] = time;
        time += 1;

        let mut root_children = 0usize;
        let mut stack = vec![Frame {
            v: root,
            parent: None,
            nbrs: undirected_neighbors(net, root),
            next: 0,
            parent_skipped: false,
        }];

        while !stack.is_empty() {
            let (v, push) = advance(net, &mut stack, &disc, &mut low);

            if let Some(w) = push {
                let wi = net.to_index(w);
                disc[wi] = time;
                low[wi] = time;
                time += 1;
                if v == root {
                    root_children += 1;
                }
                stack.push(Frame {
                    v: w,
                    parent: Some(v),
                    nbrs: undirected_neighbors(net, w),
                    next: 0,
                    parent_skipped: false,
                });
            } else if let Some(frame) = stack.pop() {
                let vi = net.to_index(frame.v);
                if let Some(parent) = frame.parent {
                    let pi = net.to_index(parent);
                    low[pi] = low[pi].min(low[vi]);
                    if parent != root && low[vi] >= disc[pi] && !flagged[pi] {
                        flagged[pi] = true;
                        found.push(parent);
                    }
                }
            }
        }

        if root_children >= 2 && !flagged[ri] {
            flagged[ri] = true;
            found.push(root);
        }
    }

    found
        .into_iter()
        .map(|v| net.label(v).to_string())
        .collect()
}

/// Scan the top frame's remaining neighbors: record back edges into `low`,
/// stop at the first unvisited neighbor. Returns the frame's vertex and the
/// neighbor to descend into, if any.
fn advance(
    net: &Network,
    stack: &mut [Frame],
    disc: &[usize],
    low: &mut [usize],
) -> (NodeIndex, Option<NodeIndex>) {
    let last = stack.len() - 1;
    let top = &mut stack[last];
    let vi = net.to_index(top.v);
    let mut push = None;

    while top.next < top.nbrs.len() {
        let w = top.nbrs[top.next];
        top.next += 1;

        // The tree edge back to the parent is skipped exactly once; further
        // occurrences would be parallel edges, which the projection removes.
        if top.parent == Some(w) && !top.parent_skipped {
            top.parent_skipped = true;
            continue;
        }

        let wi = net.to_index(w);
        if disc[wi] == usize::MAX {
            push = Some(w);
            break;
        }
        low[vi] = low[vi].min(disc[wi]);
    }

    (top.v, push)
}

/// Neighbors in the undirected projection: both orientations unioned, with
/// mutual directed arcs and self-loops collapsed away.
fn undirected_neighbors(net: &Network, v: NodeIndex) -> Vec<NodeIndex> {
    let mut nbrs: Vec<NodeIndex> = Vec::new();
    for (w, _) in net.adjacency(v, Direction::Outgoing) {
        if w != v && !nbrs.contains(&w) {
            nbrs.push(w);
        }
    }
    if net.is_directed() {
        for (w, _) in net.adjacency(v, Direction::Incoming) {
            if w != v && !nbrs.contains(&w) {
                nbrs.push(w);
            }
        }
    }
    nbrs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
