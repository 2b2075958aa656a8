//! Shortest graph-like logical error.
//!
//! Boundary mechanisms and two-detector mechanisms become edges of a
//! matching graph with an extra boundary node. A logical error is a cycle
//! through that graph that flips an observable an odd number of times. The
//! search runs in a doubled graph whose nodes also carry the observable
//! parity accumulated so far, so an odd cycle through `u` is a path from
//! `(u, even)` to `(u, odd)`.

use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use crate::model::DetectorErrorModel;

/// Doubled matching graph for one observable.
struct ParityGraph {
    graph: UnGraph<(), usize>,
    num_sites: usize,
}

impl ParityGraph {
    fn build(dem: &DetectorErrorModel, observable: u32) -> Self {
        // Detector sites plus the boundary.
        let num_sites = dem.num_detectors as usize + 1;
        let boundary = num_sites - 1;
        let mut graph = UnGraph::with_capacity(2 * num_sites, 4 * dem.mechanisms.len());
        for _ in 0..2 * num_sites {
            graph.add_node(());
        }

        for (i, mechanism) in dem.mechanisms.iter().enumerate() {
            let (a, b) = match mechanism.detectors.as_slice() {
                &[a] => (a as usize, boundary),
                &[a, b] => (a as usize, b as usize),
                _ => continue,
            };
            let flip = usize::from(mechanism.observables.contains(&observable));
            for parity in 0..2 {
                graph.add_edge(
                    Self::node(a, parity),
                    Self::node(b, parity ^ flip),
                    i,
                );
            }
        }
        Self { graph, num_sites }
    }

    fn node(site: usize, parity: usize) -> NodeIndex {
        NodeIndex::new(2 * site + parity)
    }

    /// Shortest odd cycle through `site`, as mechanism indices.
    fn odd_cycle_through(&self, site: usize) -> Option<Vec<usize>> {
        let start = Self::node(site, 0);
        let goal = Self::node(site, 1);
        let (_, path) = astar(&self.graph, start, |n| n == goal, |_| 1usize, |_| 0)?;
        path.windows(2)
            .map(|w| {
                self.graph
                    .find_edge(w[0], w[1])
                    .and_then(|e| self.graph.edge_weight(e).copied())
            })
            .collect()
    }
}

/// The smallest set of graph-like mechanisms (indices into
/// `dem.mechanisms`) that flips an observable without tripping a detector.
///
/// Hyperedges are ignored. Returns `None` when no such set exists.
pub fn shortest_graphlike_error(dem: &DetectorErrorModel) -> Option<Vec<usize>> {
    if let Some(i) = dem
        .mechanisms
        .iter()
        .position(|m| m.is_undetectable_logical())
    {
        return Some(vec![i]);
    }

    let mut best: Option<Vec<usize>> = None;
    for observable in 0..dem.num_observables {
        let graph = ParityGraph::build(dem, observable);
        for site in 0..graph.num_sites {
            if graph
                .graph
                .neighbors(ParityGraph::node(site, 0))
                .next()
                .is_none()
            {
                continue;
            }
            if let Some(cycle) = graph.odd_cycle_through(site) {
                if best.as_ref().is_none_or(|b| cycle.len() < b.len()) {
                    best = Some(cycle);
                }
            }
        }
    }

    debug!(
        weight = best.as_ref().map(Vec::len),
        num_mechanisms = dem.mechanisms.len(),
        "graph-like distance search finished"
    );
    best
}

/// Number of mechanisms in the shortest graph-like logical error.
pub fn graphlike_distance(dem: &DetectorErrorModel) -> Option<usize> {
    shortest_graphlike_error(dem).map(|error| error.len())
}
