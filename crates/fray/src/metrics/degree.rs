//! Degree centrality.
//!
//! The cheapest targeted-attack ranking: a node's score is its incident edge
//! count normalised by `n - 1`, the maximum possible degree. Hub removal by
//! degree is the classic first-order attack strategy; it ignores path
//! structure entirely, which is what the betweenness-based strategies
//! improve on.

use crate::graph::Network;
use crate::metrics::{NodeRanking, sort_ranking};

/// Compute degree centrality for every node, descending.
///
/// Scores are `degree / (n - 1)`; a graph with fewer than two nodes scores
/// every node 1.0 (the usual degenerate convention).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(net: &Network) -> NodeRanking {
    let n = net.node_count();
    let mut ranking: NodeRanking = if n <= 1 {
        net.nodes().map(|label| (label.to_string(), 1.0)).collect()
    } else {
        let scale = 1.0 / (n - 1) as f64;
        net.nodes()
            .map(|label| (label.to_string(), net.degree(label) as f64 * scale))
            .collect()
    };
    sort_ranking(&mut ranking);
    ranking
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
