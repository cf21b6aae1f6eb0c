//! Network representation for dismantling runs.
//!
//! # Overview
//!
//! [`Network`] wraps a [`petgraph`] stable graph so node and edge indices
//! survive removals — the dismantling engine mutates its working copy one
//! element at a time, and metrics recompute on the mutated graph between
//! steps. Nodes are identified by string labels; edges carry a named
//! attribute map so callers can store several numeric attributes (capacity,
//! length, reciprocal-capacity weight) on the same edge and pick one by name
//! per computation.
//!
//! ## Directedness
//!
//! Storage is always a directed stable graph. A `Network` built through the
//! undirected constructors sets `directed = false` and presents undirected
//! semantics on top of it: neighbor iteration unions both edge orientations,
//! duplicate edges in either orientation are rejected, and edge lookup
//! matches either endpoint order. This mirrors how the robustness metrics
//! treat directed inputs (weak connectivity, undirected projection for
//! articulation points) without duplicating storage.
//!
//! ## Determinism
//!
//! Node and edge iteration follow insertion order. Rankings and random
//! sampling both draw from these iterators, so a fixed graph and seed always
//! reproduce the same attack trace.

#![allow(clippy::module_name_repetitions)]

pub mod paths;

use std::collections::{BTreeMap, HashMap};

use petgraph::{
    Directed, Direction,
    stable_graph::{EdgeIndex, NodeIndex, StableGraph},
    visit::EdgeRef,
};

use crate::error::{FrayError, Result};

/// Named numeric attributes stored on an edge.
///
/// A weight argument to a metric names the attribute to read; edges missing
/// the attribute fall back to `1.0`.
pub type EdgeAttrs = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// A mutable infrastructure network: labelled nodes, attributed edges.
///
/// Cloning a `Network` deep-copies it; each attack run clones the caller's
/// source network and mutates only its own copy.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: StableGraph<String, EdgeAttrs, Directed>,
    labels: HashMap<String, NodeIndex>,
    directed: bool,
}

impl Network {
    /// Create an empty undirected network.
    #[must_use]
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Create an empty directed network.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Build an undirected network from an edge list, adding endpoint nodes
    /// as they appear.
    #[must_use]
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut net = Self::undirected();
        for (a, b) in edges {
            net.add_edge(a, b);
        }
        net
    }

    /// Build a directed network from an edge list.
    #[must_use]
    pub fn from_edges_directed<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut net = Self::directed();
        for (a, b) in edges {
            net.add_edge(a, b);
        }
        net
    }

    /// Build an undirected network from `(a, b, value)` triples, storing the
    /// value under the attribute named `attr`.
    #[must_use]
    pub fn from_weighted_edges<'a, I>(edges: I, attr: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut net = Self::undirected();
        for (a, b, value) in edges {
            let mut attrs = EdgeAttrs::new();
            attrs.insert(attr.to_string(), value);
            net.add_edge_with(a, b, attrs);
        }
        net
    }

    /// Build a network from a dependency/adjacency matrix.
    ///
    /// A non-zero entry at row `i`, column `j` is interpreted as "`i` depends
    /// on `j`" and inserted as the edge `j → i`, with the entry stored under
    /// the `weight` attribute. Rows shorter than `labels` are treated as
    /// zero-padded. For undirected networks symmetric entries collapse to a
    /// single edge.
    #[must_use]
    pub fn from_adjacency(labels: &[&str], matrix: &[Vec<f64>], directed: bool) -> Self {
        let mut net = if directed {
            Self::directed()
        } else {
            Self::undirected()
        };
        for label in labels {
            net.add_node(*label);
        }
        for (i, row) in matrix.iter().enumerate().take(labels.len()) {
            for (j, &value) in row.iter().enumerate().take(labels.len()) {
                if value != 0.0 {
                    let mut attrs = EdgeAttrs::new();
                    attrs.insert("weight".to_string(), value);
                    net.add_edge_with(labels[j], labels[i], attrs);
                }
            }
        }
        net
    }

    /// Whether this network has directed semantics.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node, returning its index. Adding an existing label is a no-op.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIndex {
        let label = label.into();
        if let Some(&idx) = self.labels.get(&label) {
            return idx;
        }
        let idx = self.graph.add_node(label.clone());
        self.labels.insert(label, idx);
        idx
    }

    /// Add an unattributed edge, creating endpoint nodes as needed.
    /// Duplicate edges (in either orientation for undirected networks) are
    /// not added again.
    pub fn add_edge(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.add_edge_with(a, b, EdgeAttrs::new());
    }

    /// Add an edge carrying named attributes, creating endpoint nodes as
    /// needed. Duplicates are skipped, keeping the first edge's attributes.
    pub fn add_edge_with(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        attrs: EdgeAttrs,
    ) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if self.edge_between(ia, ib).is_none() {
            self.graph.add_edge(ia, ib, attrs);
        }
    }

    /// Whether a node with this label exists.
    #[must_use]
    pub fn contains_node(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Whether an edge between `a` and `b` exists (either orientation for
    /// undirected networks).
    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        let (Some(&ia), Some(&ib)) = (self.labels.get(a), self.labels.get(b)) else {
            return false;
        };
        self.edge_between(ia, ib).is_some()
    }

    /// Remove a node and all incident edges.
    ///
    /// # Errors
    ///
    /// Returns [`FrayError::MissingElement`] if no node has this label.
    pub fn remove_node(&mut self, label: &str) -> Result<()> {
        let idx = self
            .labels
            .remove(label)
            .ok_or_else(|| FrayError::MissingElement(format!("node {label}")))?;
        self.graph.remove_node(idx);
        Ok(())
    }

    /// Remove the edge between `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`FrayError::MissingElement`] if the edge is absent.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<()> {
        let missing = || FrayError::MissingElement(format!("edge {a} -- {b}"));
        let (&ia, &ib) = match (self.labels.get(a), self.labels.get(b)) {
            (Some(ia), Some(ib)) => (ia, ib),
            _ => return Err(missing()),
        };
        let edge = self.edge_between(ia, ib).ok_or_else(missing)?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Iterate node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(String::as_str))
    }

    /// Iterate edges as `(a, b)` label pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_indices().filter_map(|e| {
            let (ia, ib) = self.graph.edge_endpoints(e)?;
            Some((self.label(ia), self.label(ib)))
        })
    }

    /// Labels adjacent to `label`: successors for directed networks, all
    /// neighbors for undirected ones. Empty for unknown labels.
    #[must_use]
    pub fn neighbors<'a>(&'a self, label: &str) -> Vec<&'a str> {
        let Some(idx) = self.index_of(label) else {
            return Vec::new();
        };
        self.adjacency(idx, Direction::Outgoing)
            .into_iter()
            .map(|(n, _)| self.label(n))
            .collect()
    }

    /// Number of incident edges (in-degree plus out-degree for directed
    /// networks). Zero for unknown labels.
    #[must_use]
    pub fn degree(&self, label: &str) -> usize {
        let Some(idx) = self.index_of(label) else {
            return 0;
        };
        if self.directed {
            self.graph.edges_directed(idx, Direction::Outgoing).count()
                + self.graph.edges_directed(idx, Direction::Incoming).count()
        } else {
            self.adjacency(idx, Direction::Outgoing).len()
        }
    }

    /// Read a named attribute from the edge between `a` and `b`, if both the
    /// edge and the attribute exist.
    #[must_use]
    pub fn edge_attr(&self, a: &str, b: &str, attr: &str) -> Option<f64> {
        let (&ia, &ib) = match (self.labels.get(a), self.labels.get(b)) {
            (Some(ia), Some(ib)) => (ia, ib),
            _ => return None,
        };
        let edge = self.edge_between(ia, ib)?;
        self.graph.edge_weight(edge)?.get(attr).copied()
    }

    // -- crate-internal access for metrics and the engine -------------------

    pub(crate) fn label(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map_or("", String::as_str)
    }

    pub(crate) fn index_of(&self, label: &str) -> Option<NodeIndex> {
        self.labels.get(label).copied()
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Upper bound for dense vectors indexed by [`Self::to_index`].
    pub(crate) fn node_bound(&self) -> usize {
        use petgraph::visit::NodeIndexable;
        self.graph.node_bound()
    }

    pub(crate) fn to_index(&self, idx: NodeIndex) -> usize {
        use petgraph::visit::NodeIndexable;
        self.graph.to_index(idx)
    }

    /// Adjacent `(node, edge)` pairs. For undirected networks the requested
    /// direction is ignored and both orientations are unioned.
    pub(crate) fn adjacency(&self, v: NodeIndex, dir: Direction) -> Vec<(NodeIndex, EdgeIndex)> {
        if self.directed {
            return self
                .graph
                .edges_directed(v, dir)
                .map(|e| match dir {
                    Direction::Outgoing => (e.target(), e.id()),
                    Direction::Incoming => (e.source(), e.id()),
                })
                .collect();
        }
        let mut out: Vec<(NodeIndex, EdgeIndex)> = self
            .graph
            .edges_directed(v, Direction::Outgoing)
            .map(|e| (e.target(), e.id()))
            .collect();
        out.extend(
            self.graph
                .edges_directed(v, Direction::Incoming)
                .map(|e| (e.source(), e.id())),
        );
        out
    }

    /// Cost of traversing `edge` under the named weight attribute.
    /// `None` means unweighted (hop count); a missing attribute reads as 1.
    pub(crate) fn edge_cost(&self, edge: EdgeIndex, weight: Option<&str>) -> f64 {
        weight
            .and_then(|name| self.graph.edge_weight(edge)?.get(name).copied())
            .unwrap_or(1.0)
    }

    pub(crate) fn edge_attr_map(&self, edge: EdgeIndex) -> Option<&EdgeAttrs> {
        self.graph.edge_weight(edge)
    }

    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub(crate) fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        if self.directed {
            self.graph.find_edge(a, b)
        } else {
            self.graph
                .find_edge(a, b)
                .or_else(|| self.graph.find_edge(b, a))
        }
    }
}

// ---------------------------------------------------------------------------
// Capacity-derived weights
// ---------------------------------------------------------------------------

/// Derive a shortest-path weight from an edge capacity.
///
/// Weights are the reciprocal of capacity, so high-capacity edges are cheap
/// to traverse. Degenerate capacities are sanitised before inversion:
/// `0` and `NaN` become machine epsilon, `+Inf` becomes `f64::MAX`.
#[must_use]
pub fn weight_from_capacity(capacity: f64) -> f64 {
    let capacity = if capacity.is_nan() || capacity == 0.0 {
        f64::EPSILON
    } else if capacity == f64::INFINITY {
        f64::MAX
    } else {
        capacity
    };
    1.0 / capacity
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_network() {
        let net = Network::undirected();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(!net.is_directed());
    }

    #[test]
    fn from_edges_adds_endpoints() {
        let net = Network::from_edges([("a", "b"), ("b", "c")]);
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 2);
        assert!(net.contains_node("a"));
        assert!(net.has_edge("b", "c"));
    }

    #[test]
    fn undirected_edge_matches_both_orientations() {
        let net = Network::from_edges([("a", "b")]);
        assert!(net.has_edge("a", "b"));
        assert!(net.has_edge("b", "a"));
    }

    #[test]
    fn directed_edge_is_one_way() {
        let net = Network::from_edges_directed([("a", "b")]);
        assert!(net.has_edge("a", "b"));
        assert!(!net.has_edge("b", "a"));
    }

    #[test]
    fn duplicate_edges_skipped() {
        let net = Network::from_edges([("a", "b"), ("b", "a"), ("a", "b")]);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn duplicate_directed_edges_allowed_in_reverse() {
        let net = Network::from_edges_directed([("a", "b"), ("b", "a")]);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut net = Network::from_edges([("a", "b"), ("b", "c"), ("a", "c")]);
        net.remove_node("b").expect("b exists");
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
        assert!(!net.contains_node("b"));
    }

    #[test]
    fn remove_missing_node_errors() {
        let mut net = Network::from_edges([("a", "b")]);
        let err = net.remove_node("z").expect_err("z absent");
        assert!(matches!(err, FrayError::MissingElement(_)));
    }

    #[test]
    fn remove_edge_keeps_nodes() {
        let mut net = Network::from_edges([("a", "b")]);
        net.remove_edge("b", "a").expect("reverse lookup works");
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn remove_missing_edge_errors() {
        let mut net = Network::from_edges([("a", "b"), ("b", "c")]);
        assert!(net.remove_edge("a", "c").is_err());
    }

    #[test]
    fn weighted_edges_expose_attribute() {
        let net = Network::from_weighted_edges([("a", "b", 2.5)], "weight");
        let attr = net.edge_attr("a", "b", "weight").expect("attr stored");
        assert!((attr - 2.5).abs() < f64::EPSILON);
        assert!(net.edge_attr("a", "b", "capacity").is_none());
    }

    #[test]
    fn adjacency_matrix_transposed_direction() {
        // Row i, column j non-zero: i depends on j, so edge j → i.
        let labels = ["p", "q", "r"];
        let matrix = vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ];
        let net = Network::from_adjacency(&labels, &matrix, true);
        assert!(net.has_edge("q", "p"), "p depends on q");
        assert!(net.has_edge("p", "r"), "r depends on p");
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn adjacency_matrix_undirected_symmetric_collapses() {
        let labels = ["p", "q"];
        let matrix = vec![vec![0.0, 3.0], vec![3.0, 0.0]];
        let net = Network::from_adjacency(&labels, &matrix, false);
        assert_eq!(net.edge_count(), 1);
        let w = net.edge_attr("p", "q", "weight").expect("weight stored");
        assert!((w - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degree_counts_incident_edges() {
        let net = Network::from_edges([("a", "b"), ("a", "c"), ("a", "d")]);
        assert_eq!(net.degree("a"), 3);
        assert_eq!(net.degree("b"), 1);
        assert_eq!(net.degree("missing"), 0);
    }

    #[test]
    fn directed_degree_sums_in_and_out() {
        let net = Network::from_edges_directed([("a", "b"), ("c", "a")]);
        assert_eq!(net.degree("a"), 2);
    }

    #[test]
    fn neighbors_union_for_undirected() {
        let net = Network::from_edges([("a", "b"), ("c", "a")]);
        let mut nbrs = net.neighbors("a");
        nbrs.sort_unstable();
        assert_eq!(nbrs, vec!["b", "c"]);
    }

    #[test]
    fn clone_is_independent() {
        let net = Network::from_edges([("a", "b"), ("b", "c")]);
        let mut copy = net.clone();
        copy.remove_node("b").expect("b exists");
        assert_eq!(net.node_count(), 3, "source untouched");
        assert_eq!(copy.node_count(), 2);
    }

    #[test]
    fn capacity_weight_reciprocal() {
        assert!((weight_from_capacity(4.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn capacity_weight_sanitises_degenerate_values() {
        assert!((weight_from_capacity(0.0) - 1.0 / f64::EPSILON).abs() < 1.0);
        assert!((weight_from_capacity(f64::NAN) - 1.0 / f64::EPSILON).abs() < 1.0);
        assert!(weight_from_capacity(f64::INFINITY) > 0.0);
        assert!(weight_from_capacity(f64::INFINITY) < 1e-300);
    }
}
