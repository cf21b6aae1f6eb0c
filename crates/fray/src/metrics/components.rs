//! Weak connectivity: component sizes and subgraph extraction.
//!
//! Attack traces are phrased in terms of the largest and second-largest
//! components: a dismantling step that splits the giant component shows up
//! as a drop in the first series and a jump in the second. Directed edges
//! are treated as undirected here (weak connectivity), matching how
//! infrastructure reachability is usually assessed under failure.

use petgraph::Direction;

use crate::graph::Network;

/// Sizes of all weakly connected components, descending.
#[must_use]
pub fn component_sizes(net: &Network) -> Vec<usize> {
    let bound = net.node_bound();
    let mut visited = vec![false; bound];
    let mut sizes = Vec::new();

    for start in net.node_indices() {
        if visited[net.to_index(start)] {
            continue;
        }

        let mut stack = vec![start];
        let mut size = 0usize;

        while let Some(v) = stack.pop() {
            let vi = net.to_index(v);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            size += 1;

            for (w, _) in net.adjacency(v, Direction::Outgoing) {
                if !visited[net.to_index(w)] {
                    stack.push(w);
                }
            }
            // Directed graphs also follow in-edges for weak connectivity;
            // undirected adjacency already unions both.
            if net.is_directed() {
                for (w, _) in net.adjacency(v, Direction::Incoming) {
                    if !visited[net.to_index(w)] {
                        stack.push(w);
                    }
                }
            }
        }

        sizes.push(size);
    }

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// Node count of the largest weak component; 0 for an empty network.
#[must_use]
pub fn largest_connected_component(net: &Network) -> usize {
    component_sizes(net).first().copied().unwrap_or(0)
}

/// Node count of the second-largest weak component; 0 when the network has
/// fewer than two components (including empty and single-component graphs).
#[must_use]
pub fn second_largest_connected_component(net: &Network) -> usize {
    component_sizes(net).get(1).copied().unwrap_or(0)
}

/// Extract the largest weak component as an owned sub-network.
///
/// Node labels, directedness and edge attributes are preserved. For an
/// empty input the result is an empty network with matching directedness.
#[must_use]
pub fn largest_connected_component_subgraph(net: &Network) -> Network {
    let bound = net.node_bound();
    let mut visited = vec![false; bound];
    let mut best: Vec<petgraph::stable_graph::NodeIndex> = Vec::new();

    for start in net.node_indices() {
        if visited[net.to_index(start)] {
            continue;
        }

        let mut stack = vec![start];
        let mut members = Vec::new();

        while let Some(v) = stack.pop() {
            let vi = net.to_index(v);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            members.push(v);

            for (w, _) in net.adjacency(v, Direction::Outgoing) {
                if !visited[net.to_index(w)] {
                    stack.push(w);
                }
            }
            if net.is_directed() {
                for (w, _) in net.adjacency(v, Direction::Incoming) {
                    if !visited[net.to_index(w)] {
                        stack.push(w);
                    }
                }
            }
        }

        if members.len() > best.len() {
            best = members;
        }
    }

    let mut sub = if net.is_directed() {
        Network::directed()
    } else {
        Network::undirected()
    };
    let keep: std::collections::HashSet<_> = best.iter().copied().collect();
    for &v in &best {
        sub.add_node(net.label(v));
    }
    for edge in net.edge_indices() {
        let Some((a, b)) = net.edge_endpoints(edge) else {
            continue;
        };
        if keep.contains(&a) && keep.contains(&b) {
            let attrs = net
                .edge_attr_map(edge)
                .cloned()
                .unwrap_or_default();
            sub.add_edge_with(net.label(a), net.label(b), attrs);
        }
    }
    sub
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
