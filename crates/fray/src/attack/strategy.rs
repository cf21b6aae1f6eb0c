//! Pluggable centrality selectors for targeted attacks.
//!
//! The engine never calls a metric directly; it asks a selector to rank the
//! current working copy and removes the top element. The built-in variants
//! cover the stock measures, and `Custom` accepts any ranking function with
//! the same shape, so experimental measures drive the same attack loop.

use std::fmt;

use crate::error::Result;
use crate::graph::Network;
use crate::metrics::{
    EdgeRanking, NodeRanking, betweenness_centrality, closeness_centrality, degree_centrality,
    edge_betweenness_centrality, eigenvector_centrality,
};

/// Caller-supplied node ranking function.
pub type NodeRanker = Box<dyn Fn(&Network, Option<&str>) -> Result<NodeRanking> + Send + Sync>;

/// Caller-supplied edge ranking function.
pub type EdgeRanker = Box<dyn Fn(&Network, Option<&str>) -> Result<EdgeRanking> + Send + Sync>;

/// Node-ranking strategy for targeted node attacks.
pub enum Centrality {
    /// Incident-edge count, normalised.
    Degree,
    /// Dominant-eigenvector scores; can fail to converge.
    Eigenvector,
    /// Shortest-path betweenness (the default attack driver).
    Betweenness,
    /// Inverse farness, Wasserman–Faust scaled.
    Closeness,
    /// Any other ranking with the same contract: descending scores,
    /// deterministic order for a fixed graph.
    Custom(NodeRanker),
}

impl Centrality {
    /// Rank all nodes of `net`, descending.
    ///
    /// # Errors
    ///
    /// Propagates the underlying measure's failure, e.g.
    /// [`crate::FrayError::NonConvergence`] from `Eigenvector`.
    pub fn rank(&self, net: &Network, weight: Option<&str>) -> Result<NodeRanking> {
        match self {
            Self::Degree => Ok(degree_centrality(net)),
            Self::Eigenvector => eigenvector_centrality(net, weight),
            Self::Betweenness => Ok(betweenness_centrality(net, weight)),
            Self::Closeness => Ok(closeness_centrality(net, weight)),
            Self::Custom(rank) => rank(net, weight),
        }
    }
}

impl Default for Centrality {
    fn default() -> Self {
        Self::Betweenness
    }
}

impl fmt::Debug for Centrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Degree => "Degree",
            Self::Eigenvector => "Eigenvector",
            Self::Betweenness => "Betweenness",
            Self::Closeness => "Closeness",
            Self::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

/// Edge-ranking strategy for targeted edge attacks.
pub enum EdgeCentrality {
    /// Shortest-path edge betweenness (the default).
    Betweenness,
    /// Any other edge ranking with the same contract.
    Custom(EdgeRanker),
}

impl EdgeCentrality {
    /// Rank all edges of `net`, descending.
    ///
    /// # Errors
    ///
    /// Propagates the underlying measure's failure.
    pub fn rank(&self, net: &Network, weight: Option<&str>) -> Result<EdgeRanking> {
        match self {
            Self::Betweenness => Ok(edge_betweenness_centrality(net, weight)),
            Self::Custom(rank) => rank(net, weight),
        }
    }
}

impl Default for EdgeCentrality {
    fn default() -> Self {
        Self::Betweenness
    }
}

impl fmt::Debug for EdgeCentrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Betweenness => "Betweenness",
            Self::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
