//! Closeness centrality.
//!
//! A node is central when it is a short distance from everything that can
//! reach it. Scores use the Wasserman–Faust improvement for disconnected
//! graphs: the raw closeness `(r − 1) / Σd` (where `r` counts the nodes in
//! the node's reachable set and `Σd` their total distance) is scaled by
//! `(r − 1) / (n − 1)` so nodes in small fragments do not outrank nodes in
//! the giant component. Directed networks use incoming distances: a node is
//! close when things can reach it.

use petgraph::Direction;
use tracing::instrument;

use crate::graph::{Network, paths::shortest_path_lengths};
use crate::metrics::{NodeRanking, sort_ranking};

/// Compute closeness centrality for every node, descending.
///
/// `weight` names the edge attribute to use as distance; `None` uses hop
/// counts. Isolated nodes score 0.
#[must_use]
#[instrument(skip(net))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(net: &Network, weight: Option<&str>) -> NodeRanking {
    let n = net.node_count();

    let mut ranking: NodeRanking = net
        .node_indices()
        .map(|v| {
            let dist = shortest_path_lengths(net, v, weight, Direction::Incoming);
            // Dense index order keeps the sum deterministic bit for bit.
            let mut total = 0.0;
            let mut reached = 0usize;
            for &d in &dist {
                if d.is_finite() {
                    total += d;
                    reached += 1;
                }
            }

            let score = if total > 0.0 && n > 1 {
                let closeness = (reached - 1) as f64 / total;
                closeness * ((reached - 1) as f64 / (n - 1) as f64)
            } else {
                0.0
            };
            (net.label(v).to_string(), score)
        })
        .collect();

    sort_ranking(&mut ranking);
    ranking
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
