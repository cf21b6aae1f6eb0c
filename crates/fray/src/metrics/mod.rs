//! Robustness metrics computed on a network snapshot.
//!
//! # Overview
//!
//! Pure functions over a [`crate::graph::Network`]: each takes the current
//! graph (and, where meaningful, an optional weight-attribute name) and
//! returns fresh values. Nothing here caches — the dismantling engine
//! mutates its working copy between calls, so every ranking is recomputed
//! from scratch per attack step.
//!
//! - **Centrality rankings** (`degree`, `eigenvector`, `betweenness`,
//!   `closeness`): who matters most right now, sorted descending.
//! - **Structure** (`articulation`, `components`): cut vertices and weak
//!   component sizes.
//! - **Performance** (`efficiency`): global efficiency from reciprocal
//!   shortest-path distances.
//!
//! Rankings use a stable descending sort over nodes (or edges) in insertion
//! order, so ties resolve deterministically for a fixed graph.

pub mod articulation;
pub mod betweenness;
pub mod closeness;
pub mod components;
pub mod degree;
pub mod efficiency;
pub mod eigenvector;

pub use articulation::articulation_points;
pub use betweenness::{betweenness_centrality, edge_betweenness_centrality};
pub use closeness::closeness_centrality;
pub use components::{
    largest_connected_component, largest_connected_component_subgraph,
    second_largest_connected_component,
};
pub use degree::degree_centrality;
pub use efficiency::global_efficiency;
pub use eigenvector::{eigenvector_centrality, eigenvector_centrality_with};

/// A centrality ranking over nodes: `(label, score)` descending by score.
pub type NodeRanking = Vec<(String, f64)>;

/// A centrality ranking over edges: `((a, b), score)` descending by score.
pub type EdgeRanking = Vec<((String, String), f64)>;

/// Stable descending sort by score. Input order is preserved among ties, so
/// rankings built in node/edge insertion order stay deterministic.
pub(crate) fn sort_ranking<T>(ranking: &mut [(T, f64)]) {
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
}
