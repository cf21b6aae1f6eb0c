//! Global efficiency.
//!
//! # Overview
//!
//! Global efficiency is the mean reciprocal shortest-path distance over all
//! ordered node pairs:
//!
//! ```text
//! eff = ( Σ over pairs (i, j), i ≠ j, j reachable from i, of 1/d(i, j) )
//!       / (n · (n − 1))
//! ```
//!
//! Unreachable pairs simply drop out of the sum; they are not penalised
//! beyond contributing nothing, so efficiency degrades smoothly as an attack
//! fragments the network. A complete unweighted graph has efficiency exactly
//! 1; a graph with fewer than two nodes is defined as 0.
//!
//! Weighted distances come from Dijkstra over the named attribute; negative
//! weights are undefined behaviour, not validated.

use petgraph::Direction;
use tracing::instrument;

use crate::graph::{Network, paths::shortest_path_lengths};

/// Compute global efficiency.
///
/// `weight` names the edge attribute holding traversal costs; `None` uses
/// hop counts.
#[must_use]
#[instrument(skip(net))]
#[allow(clippy::cast_precision_loss)]
pub fn global_efficiency(net: &Network, weight: Option<&str>) -> f64 {
    let n = net.node_count();
    if n < 2 {
        return 0.0;
    }

    let mut inv_sum = 0.0;
    for source in net.node_indices() {
        let dist = shortest_path_lengths(net, source, weight, Direction::Outgoing);
        // d == 0 covers the source itself and any zero-cost weighted pair;
        // unreachable entries are infinite and contribute nothing either way.
        // Index order is fixed, so repeat runs sum in the same order.
        inv_sum += dist
            .iter()
            .filter(|&&d| d.is_finite() && d != 0.0)
            .map(|d| 1.0 / d)
            .sum::<f64>();
    }

    inv_sum / (n * (n - 1)) as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
