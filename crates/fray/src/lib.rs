#![forbid(unsafe_code)]
//! fray: how networks come apart.
//!
//! Builds a labelled graph, measures its structure (centrality, components,
//! global efficiency), then dismantles it step by step under a chosen attack
//! strategy while recording the damage after every removal.
//!
//! ```
//! use fray::{AttackConfig, Centrality, Dismantler, Network};
//!
//! let net = Network::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
//! let outcome = Dismantler::new(&net)
//!     .node_centrality_attack(&AttackConfig::new(2), &Centrality::Betweenness)?;
//! assert_eq!(outcome.trace.steps(), 2);
//! # Ok::<(), fray::FrayError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: library APIs return `fray::Result`; only infallible
//!   measures return plain values.
//! - **Logging**: `tracing` macros (`debug!`, `instrument`); no output
//!   unless a subscriber is installed.
//! - **Determinism**: fixed input plus fixed seed gives bit-identical
//!   output. All randomness is drawn from caller-supplied `rand` sources.

pub mod aggregate;
pub mod attack;
pub mod error;
pub mod graph;
pub mod metrics;

pub use aggregate::{
    TraceStats, ensemble_efficiency, ensemble_largest_component,
    ensemble_second_largest_component, mean_std,
};
pub use attack::{
    AttackConfig, AttackOutcome, AttackTrace, Centrality, Dismantler, EdgeCentrality, Removal,
};
pub use error::{FrayError, Result};
pub use graph::{Network, weight_from_capacity};
pub use metrics::{
    EdgeRanking, NodeRanking, articulation_points, betweenness_centrality, closeness_centrality,
    degree_centrality, edge_betweenness_centrality, eigenvector_centrality, global_efficiency,
    largest_connected_component, second_largest_connected_component,
};
