//! Property tests for structural invariants of attack traces and metrics.

use fray::{
    AttackConfig, AttackTrace, Centrality, Dismantler, EdgeCentrality, Network,
    betweenness_centrality,
    closeness_centrality, degree_centrality, global_efficiency, largest_connected_component,
    second_largest_connected_component,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

const LABELS: [&str; 8] = ["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];

/// Small undirected networks: up to 8 nodes, self-loops dropped, duplicate
/// edges collapsed by the builder.
fn arb_network() -> impl Strategy<Value = Network> {
    prop::collection::vec((0..LABELS.len(), 0..LABELS.len()), 1..24).prop_map(|pairs| {
        Network::from_edges(
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (LABELS[a], LABELS[b])),
        )
    })
}

fn series_all_same_length(trace: &AttackTrace) -> bool {
    let len = trace.removed.len();
    trace.largest_component.len() == len
        && trace.second_largest_component.len() == len
        && trace.efficiency.len() == len
        && trace.scores.as_ref().is_none_or(|s| s.len() == len)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    // -- trace shape --------------------------------------------------------

    #[test]
    fn every_strategy_produces_parallel_series(net in arb_network(), seed in any::<u64>()) {
        let dismantler = Dismantler::new(&net);
        let config = AttackConfig::new(3);
        let mut rng = StdRng::seed_from_u64(seed);

        let traces = [
            dismantler.node_centrality_attack(&config, &Centrality::Degree).expect("runs").trace,
            dismantler.node_centrality_attack(&config, &Centrality::Betweenness).expect("runs").trace,
            dismantler.edge_centrality_attack(&config, &EdgeCentrality::Betweenness).expect("runs").trace,
            dismantler.articulation_point_attack(&config).expect("runs").trace,
            dismantler.random_node_attack(&config, &mut rng).expect("runs").trace,
            dismantler.random_edge_attack(&config, &mut rng).expect("runs").trace,
        ];
        for trace in &traces {
            prop_assert!(series_all_same_length(trace));
            prop_assert!(!trace.removed.is_empty(), "baseline always present");
        }
    }

    #[test]
    fn steps_never_exceed_the_clamped_budget(net in arb_network(), budget in 0usize..12) {
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(budget), &Centrality::Degree)
            .expect("runs");
        prop_assert!(outcome.trace.steps() <= budget.max(1).min(net.edge_count()));
    }

    // -- component series ---------------------------------------------------

    #[test]
    fn second_component_never_beats_the_first(net in arb_network(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let trace = Dismantler::new(&net)
            .random_node_attack(&AttackConfig::new(4), &mut rng)
            .expect("runs")
            .trace;
        for (lcc, slcc) in trace.largest_component.iter().zip(&trace.second_largest_component) {
            prop_assert!(lcc >= slcc);
        }
    }

    #[test]
    fn node_removal_shrinks_the_node_count_monotonically(net in arb_network()) {
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(4), &Centrality::Betweenness)
            .expect("runs");
        let steps = outcome.trace.steps();
        prop_assert_eq!(outcome.network.node_count(), net.node_count() - steps);
        // Component sizes are bounded by the surviving node count.
        for (i, lcc) in outcome.trace.largest_component.iter().enumerate() {
            prop_assert!(*lcc <= net.node_count() - i);
        }
    }

    #[test]
    fn component_sizes_match_direct_measurement(net in arb_network()) {
        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(2), &Centrality::Degree)
            .expect("runs");
        let last_lcc = *outcome.trace.largest_component.last().expect("nonempty");
        let last_slcc = *outcome.trace.second_largest_component.last().expect("nonempty");
        prop_assert_eq!(last_lcc, largest_connected_component(&outcome.network));
        prop_assert_eq!(last_slcc, second_largest_connected_component(&outcome.network));
    }

    // -- determinism --------------------------------------------------------

    #[test]
    fn targeted_attacks_are_deterministic(net in arb_network()) {
        let dismantler = Dismantler::new(&net);
        let config = AttackConfig::new(3);
        let a = dismantler.node_centrality_attack(&config, &Centrality::Betweenness).expect("runs");
        let b = dismantler.node_centrality_attack(&config, &Centrality::Betweenness).expect("runs");
        prop_assert_eq!(a.trace, b.trace);
    }

    #[test]
    fn seeded_random_attacks_are_deterministic(net in arb_network(), seed in any::<u64>()) {
        let dismantler = Dismantler::new(&net);
        let config = AttackConfig::new(3);
        let mut rng_a = StdRng::seed_from_u64(seed);
        let mut rng_b = StdRng::seed_from_u64(seed);
        let a = dismantler.random_edge_attack(&config, &mut rng_a).expect("runs");
        let b = dismantler.random_edge_attack(&config, &mut rng_b).expect("runs");
        prop_assert_eq!(a.trace, b.trace);
    }

    // -- metric ranges ------------------------------------------------------

    #[test]
    fn centrality_scores_stay_in_unit_range(net in arb_network()) {
        for (_, score) in degree_centrality(&net) {
            prop_assert!((0.0..=1.0).contains(&score));
        }
        for (_, score) in betweenness_centrality(&net, None) {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&score));
        }
        for (_, score) in closeness_centrality(&net, None) {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&score));
        }
    }

    #[test]
    fn efficiency_series_stays_in_unit_range(net in arb_network()) {
        let eff = global_efficiency(&net, None);
        prop_assert!((0.0..=1.0 + 1e-9).contains(&eff));

        let outcome = Dismantler::new(&net)
            .node_centrality_attack(&AttackConfig::new(2), &Centrality::Degree)
            .expect("runs");
        for entry in &outcome.trace.efficiency {
            prop_assert!((0.0..=1.0 + 1e-9).contains(entry));
        }
        // The last entry describes the network the run hands back.
        let last = *outcome.trace.efficiency.last().expect("nonempty");
        let direct = global_efficiency(&outcome.network, None);
        prop_assert!((last - direct).abs() < 1e-12);
    }
}
