//! Attack traces: what was removed, and what it cost the network.
//!
//! Every dismantling run produces one [`AttackTrace`]. The zero-th entry of
//! each series describes the un-attacked network (with [`Removal::None`] as
//! the sentinel "removed element"), and every attack step appends exactly
//! one entry to every series, so all series always share the same length:
//! `steps_taken + 1`.

use serde::{Deserialize, Serialize};

use crate::graph::Network;
use crate::metrics::{
    efficiency::global_efficiency,
    components::{largest_connected_component, second_largest_connected_component},
};

/// One removed element, or the pre-attack sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Removal {
    /// Sentinel for the measurement taken before any attack.
    None,
    /// A removed node.
    Node(String),
    /// A removed edge, endpoints in stored orientation.
    Edge(String, String),
}

/// Time series produced by one dismantling run.
///
/// Invariant: `removed`, `largest_component`, `second_largest_component`
/// and `efficiency` (and `scores`, when present) all have length
/// `steps() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTrace {
    /// Removed elements; first entry is the sentinel.
    pub removed: Vec<Removal>,
    /// Largest weak-component size after each step.
    pub largest_component: Vec<usize>,
    /// Second-largest weak-component size after each step.
    pub second_largest_component: Vec<usize>,
    /// Global efficiency after each step.
    pub efficiency: Vec<f64>,
    /// Centrality score of each removed element, for centrality-driven
    /// attacks; first entry is 0.0. `None` for other strategies.
    pub scores: Option<Vec<f64>>,
}

impl AttackTrace {
    /// Start a trace; `with_scores` reserves the centrality-score series.
    pub(crate) fn new(with_scores: bool) -> Self {
        Self {
            removed: Vec::new(),
            largest_component: Vec::new(),
            second_largest_component: Vec::new(),
            efficiency: Vec::new(),
            scores: with_scores.then(Vec::new),
        }
    }

    /// Append the sentinel entry and the pre-attack measurement.
    pub(crate) fn record_baseline(&mut self, net: &Network, weight: Option<&str>) {
        self.removed.push(Removal::None);
        if let Some(scores) = &mut self.scores {
            scores.push(0.0);
        }
        self.measure(net, weight);
    }

    /// Append one attack step: the removal and the post-removal measurement.
    pub(crate) fn record_step(&mut self, removal: Removal, score: f64, net: &Network, weight: Option<&str>) {
        self.removed.push(removal);
        if let Some(scores) = &mut self.scores {
            scores.push(score);
        }
        self.measure(net, weight);
    }

    fn measure(&mut self, net: &Network, weight: Option<&str>) {
        self.largest_component.push(largest_connected_component(net));
        self.second_largest_component
            .push(second_largest_connected_component(net));
        self.efficiency.push(global_efficiency(net, weight));
    }

    /// Number of attack steps actually executed.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.removed.len().saturating_sub(1)
    }
}

/// Final working network plus the full trace of one run.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    /// The mutated working copy after the last step.
    pub network: Network,
    /// Per-step series.
    pub trace: AttackTrace,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
