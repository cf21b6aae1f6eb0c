//! The dismantling engine: iterative removal with remeasurement.
//!
//! # Overview
//!
//! A [`Dismantler`] borrows an immutable source network and runs attack
//! strategies against private working copies. Every strategy follows the
//! same skeleton:
//!
//! 1. Clamp the requested budget (see below).
//! 2. Clone the source into a working copy owned by this run alone.
//! 3. Record the pre-attack measurement with a sentinel removal entry.
//! 4. Per step: select an element (strategy-specific), remove it, remeasure
//!    largest/second-largest component and global efficiency, append.
//! 5. Return the mutated copy plus all series.
//!
//! Selection never skips remeasurement: each removal appends exactly one
//! entry to every series. A metric failure (or cancellation) aborts the run
//! and discards the partial trace — callers get a complete trace or an
//! error, never a truncated one.
//!
//! ## Budget clamping
//!
//! Centrality and random attacks clamp the budget to `[1, edge_count]` —
//! the *edge* count even for node removal, a long-standing quirk that
//! observable trace lengths depend on. The articulation
//! attack clamps to its precomputed articulation-point list (and the node
//! count). Should a working copy still run out of removable elements early,
//! the run ends there; the trace stays internally consistent.

#![allow(clippy::module_name_repetitions)]

pub mod strategy;
pub mod trace;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rand::Rng;
use tracing::{debug, instrument};

use crate::error::{FrayError, Result};
use crate::graph::Network;
use crate::metrics::articulation_points;

pub use strategy::{Centrality, EdgeCentrality, EdgeRanker, NodeRanker};
pub use trace::{AttackOutcome, AttackTrace, Removal};

// ---------------------------------------------------------------------------
// AttackConfig
// ---------------------------------------------------------------------------

/// Per-run configuration. No process-wide state: weight attribute, budget
/// and cancellation all travel with the call.
#[derive(Debug, Clone, Default)]
pub struct AttackConfig {
    /// Requested number of removal steps; clamped per strategy.
    pub budget: usize,
    /// Edge attribute to use for weighted centrality and efficiency;
    /// `None` means unweighted.
    pub weight: Option<String>,
    cancel: Option<Arc<AtomicBool>>,
}

impl AttackConfig {
    /// Configuration with the given budget, unweighted, non-cancellable.
    #[must_use]
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    /// Use the named edge attribute for distances and centrality weights.
    #[must_use]
    pub fn with_weight(mut self, attr: impl Into<String>) -> Self {
        self.weight = Some(attr.into());
        self
    }

    /// Attach a cooperative cancellation flag. The engine checks it between
    /// steps (not inside a metric computation); a raised flag aborts the run
    /// with [`FrayError::Cancelled`].
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<()> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Err(FrayError::Cancelled);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dismantler
// ---------------------------------------------------------------------------

/// Attack runner over a read-only source network.
///
/// The source is never mutated; each run clones it. Multiple runs may share
/// one `Dismantler` (or the underlying network) freely.
#[derive(Debug, Clone, Copy)]
pub struct Dismantler<'a> {
    source: &'a Network,
}

impl<'a> Dismantler<'a> {
    /// Create a runner for `source`.
    #[must_use]
    pub const fn new(source: &'a Network) -> Self {
        Self { source }
    }

    /// Iterative targeted node attack: re-rank with `selector` each step and
    /// remove the top node.
    ///
    /// # Errors
    ///
    /// Propagates ranking failures ([`FrayError::NonConvergence`] for the
    /// eigenvector selector) and [`FrayError::Cancelled`]; no partial trace
    /// is returned.
    #[instrument(skip(self, selector))]
    pub fn node_centrality_attack(
        &self,
        config: &AttackConfig,
        selector: &Centrality,
    ) -> Result<AttackOutcome> {
        let steps = self.clamp_to_edges(config.budget);
        let weight = config.weight.clone();
        self.drive_nodes(steps, config, true, |net| {
            let ranking = selector.rank(net, weight.as_deref())?;
            Ok(ranking.into_iter().next())
        })
    }

    /// Iterative targeted edge attack: re-rank with `selector` each step and
    /// remove the top edge.
    ///
    /// # Errors
    ///
    /// Propagates ranking failures and [`FrayError::Cancelled`].
    #[instrument(skip(self, selector))]
    pub fn edge_centrality_attack(
        &self,
        config: &AttackConfig,
        selector: &EdgeCentrality,
    ) -> Result<AttackOutcome> {
        let steps = self.clamp_to_edges(config.budget);
        let weight = config.weight.clone();
        self.drive_edges(steps, config, true, |net| {
            let ranking = selector.rank(net, weight.as_deref())?;
            Ok(ranking.into_iter().next())
        })
    }

    /// Articulation-point attack: the cut-vertex set is computed once on the
    /// un-attacked network and removed in that fixed order. Deliberately not
    /// recomputed per step.
    ///
    /// # Errors
    ///
    /// Returns [`FrayError::Cancelled`] if the cancellation flag is raised.
    #[instrument(skip(self))]
    pub fn articulation_point_attack(&self, config: &AttackConfig) -> Result<AttackOutcome> {
        let points = articulation_points(self.source);
        let steps = config
            .budget
            .max(1)
            .min(self.source.node_count())
            .min(points.len());
        let mut queue = points.into_iter();
        self.drive_nodes(steps, config, false, |_net| {
            Ok(queue.next().map(|label| (label, 0.0)))
        })
    }

    /// Random node attack: remove uniformly chosen remaining nodes, without
    /// replacement, drawing from the caller's random source.
    ///
    /// # Errors
    ///
    /// Returns [`FrayError::Cancelled`] if the cancellation flag is raised.
    #[instrument(skip(self, rng))]
    pub fn random_node_attack<R: Rng + ?Sized>(
        &self,
        config: &AttackConfig,
        rng: &mut R,
    ) -> Result<AttackOutcome> {
        let steps = self.clamp_to_edges(config.budget);
        self.drive_nodes(steps, config, false, |net| {
            let nodes: Vec<&str> = net.nodes().collect();
            if nodes.is_empty() {
                return Ok(None);
            }
            let pick = nodes[rng.gen_range(0..nodes.len())];
            Ok(Some((pick.to_string(), 0.0)))
        })
    }

    /// Random edge attack: remove uniformly chosen remaining edges, without
    /// replacement, drawing from the caller's random source.
    ///
    /// # Errors
    ///
    /// Returns [`FrayError::Cancelled`] if the cancellation flag is raised.
    #[instrument(skip(self, rng))]
    pub fn random_edge_attack<R: Rng + ?Sized>(
        &self,
        config: &AttackConfig,
        rng: &mut R,
    ) -> Result<AttackOutcome> {
        let steps = self.clamp_to_edges(config.budget);
        self.drive_edges(steps, config, false, |net| {
            let edges: Vec<(&str, &str)> = net.edges().collect();
            if edges.is_empty() {
                return Ok(None);
            }
            let (a, b) = edges[rng.gen_range(0..edges.len())];
            Ok(Some(((a.to_string(), b.to_string()), 0.0)))
        })
    }

    // -- shared step skeleton ----------------------------------------------

    fn clamp_to_edges(&self, budget: usize) -> usize {
        budget.max(1).min(self.source.edge_count())
    }

    fn drive_nodes<F>(
        &self,
        steps: usize,
        config: &AttackConfig,
        with_scores: bool,
        mut select: F,
    ) -> Result<AttackOutcome>
    where
        F: FnMut(&Network) -> Result<Option<(String, f64)>>,
    {
        let weight = config.weight.as_deref();
        let mut net = self.source.clone();
        let mut trace = AttackTrace::new(with_scores);
        trace.record_baseline(&net, weight);

        for step in 0..steps {
            config.check_cancelled()?;
            let Some((label, score)) = select(&net)? else {
                debug!(step, "no removable nodes left, ending run early");
                break;
            };
            net.remove_node(&label)?;
            debug!(step, node = %label, score, "removed node");
            trace.record_step(Removal::Node(label), score, &net, weight);
        }

        Ok(AttackOutcome {
            network: net,
            trace,
        })
    }

    fn drive_edges<F>(
        &self,
        steps: usize,
        config: &AttackConfig,
        with_scores: bool,
        mut select: F,
    ) -> Result<AttackOutcome>
    where
        F: FnMut(&Network) -> Result<Option<((String, String), f64)>>,
    {
        let weight = config.weight.as_deref();
        let mut net = self.source.clone();
        let mut trace = AttackTrace::new(with_scores);
        trace.record_baseline(&net, weight);

        for step in 0..steps {
            config.check_cancelled()?;
            let Some(((a, b), score)) = select(&net)? else {
                debug!(step, "no removable edges left, ending run early");
                break;
            };
            net.remove_edge(&a, &b)?;
            debug!(step, edge = %format!("{a} -- {b}"), score, "removed edge");
            trace.record_step(Removal::Edge(a, b), score, &net, weight);
        }

        Ok(AttackOutcome {
            network: net,
            trace,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn five_cycle() -> Network {
        Network::from_edges([("0", "1"), ("1", "2"), ("2", "3"), ("3", "4"), ("4", "0")])
    }

    fn bowtie() -> Network {
        Network::from_edges([
            ("a", "b"),
            ("b", "m"),
            ("m", "a"),
            ("m", "x"),
            ("x", "y"),
            ("y", "m"),
        ])
    }

    #[test]
    fn cycle_betweenness_attack_leaves_a_path() {
        let net = five_cycle();
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(1), &Centrality::Betweenness)
            .expect("attack runs");

        let trace = &outcome.trace;
        assert_eq!(trace.steps(), 1);
        assert_eq!(trace.largest_component, vec![5, 4]);
        assert_eq!(trace.second_largest_component, vec![0, 0]);
        assert_eq!(outcome.network.node_count(), 4);
        assert_eq!(outcome.network.edge_count(), 3, "path of four remains");
    }

    #[test]
    fn zero_budget_clamps_to_one_step() {
        let net = five_cycle();
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(0), &Centrality::Degree)
            .expect("attack runs");
        assert_eq!(outcome.trace.steps(), 1);
    }

    #[test]
    fn oversized_budget_clamps_to_edge_count() {
        let net = Network::from_edges([("a", "b"), ("b", "c")]);
        let outcome = Dismantler::new(&net)
            .edge_centrality_attack(&AttackConfig::new(100), &EdgeCentrality::Betweenness)
            .expect("attack runs");
        assert_eq!(outcome.trace.steps(), 2, "clamped to 2 edges");
        assert_eq!(outcome.network.edge_count(), 0);
    }

    #[test]
    fn edgeless_network_yields_baseline_only() {
        let mut net = Network::undirected();
        net.add_node("a");
        net.add_node("b");
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(3), &Centrality::Degree)
            .expect("attack runs");
        assert_eq!(outcome.trace.steps(), 0, "edge-count clamp gives 0 steps");
        assert_eq!(outcome.trace.removed, vec![Removal::None]);
    }

    #[test]
    fn node_attack_stops_when_nodes_run_out() {
        // Triangle: 3 edges but only 3 nodes; removing all nodes exhausts
        // the network at step 3 even though the clamp allowed 3.
        let net = Network::from_edges([("a", "b"), ("b", "c"), ("c", "a")]);
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(10), &Centrality::Degree)
            .expect("attack runs");
        assert_eq!(outcome.trace.steps(), 3);
        assert_eq!(outcome.network.node_count(), 0);
    }

    #[test]
    fn articulation_attack_hits_bowtie_center_first() {
        let net = bowtie();
        let outcome = Dismantler::new(&net)
            .articulation_point_attack(&AttackConfig::new(1))
            .expect("attack runs");

        let trace = &outcome.trace;
        assert_eq!(trace.removed.len(), 2);
        assert_eq!(trace.removed[1], Removal::Node("m".to_string()));
        // Removing the shared vertex leaves the two triangle remnants,
        // a pair each.
        assert_eq!(trace.largest_component, vec![5, 2]);
        assert_eq!(trace.second_largest_component, vec![0, 2]);
    }

    #[test]
    fn articulation_budget_clamps_to_point_count() {
        let net = bowtie();
        let outcome = Dismantler::new(&net)
            .articulation_point_attack(&AttackConfig::new(50))
            .expect("attack runs");
        assert_eq!(outcome.trace.steps(), 1, "only one cut vertex exists");
    }

    #[test]
    fn random_attacks_are_seed_reproducible() {
        let net = five_cycle();
        let dismantler = Dismantler::new(&net);
        let config = AttackConfig::new(3);

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let run_a = dismantler
            .random_node_attack(&config, &mut rng_a)
            .expect("runs");
        let run_b = dismantler
            .random_node_attack(&config, &mut rng_b)
            .expect("runs");
        assert_eq!(run_a.trace, run_b.trace, "identical seeds, identical traces");

        let mut rng_c = StdRng::seed_from_u64(8);
        let run_c = dismantler
            .random_edge_attack(&config, &mut rng_c)
            .expect("runs");
        assert_eq!(run_c.trace.steps(), 3);
    }

    #[test]
    fn source_network_is_never_mutated() {
        let net = five_cycle();
        let _ = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(5), &Centrality::Degree)
            .expect("attack runs");
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.edge_count(), 5);
    }

    #[test]
    fn cancellation_aborts_between_steps() {
        let net = five_cycle();
        let flag = Arc::new(AtomicBool::new(true));
        let config = AttackConfig::new(2).with_cancel_flag(Arc::clone(&flag));
        let err = Dismantler::new(&net)
            .node_centrality_attack(&config, &Centrality::Degree)
            .expect_err("cancelled before the first step");
        assert!(matches!(err, FrayError::Cancelled));
    }

    #[test]
    fn centrality_scores_recorded_per_step() {
        let net = five_cycle();
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(2), &Centrality::Betweenness)
            .expect("attack runs");
        let scores = outcome.trace.scores.expect("centrality attack has scores");
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 0.0).abs() < 1e-12, "sentinel score");
        assert!(scores[1] > 0.0, "cycle nodes have positive betweenness");
    }

    #[test]
    fn weighted_attack_uses_the_named_attribute() {
        // Heavy direct edge is bypassed, so the detour node c tops the
        // weighted ranking and is removed first.
        let net = Network::from_weighted_edges(
            [("a", "b", 10.0), ("a", "c", 1.0), ("c", "b", 1.0)],
            "w",
        );
        let config = AttackConfig::new(1).with_weight("w");
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&config, &Centrality::Betweenness)
            .expect("attack runs");
        assert_eq!(outcome.trace.removed[1], Removal::Node("c".to_string()));
    }
}
