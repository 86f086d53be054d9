/*!
# Graph Algorithms

Every algorithm is a *resumable* state machine implementing [`StepAlgorithm`]: a driver (such as
a GUI timer) calls [`StepAlgorithm::step`] repeatedly and may redraw the graph in between, since
the algorithms report their progress by coloring nodes and edges. All progress lives in the
algorithm struct, so stopping is simply not calling `step` anymore.

An algorithm starts over on its own if it is stepped on a graph with a different
[`GraphStamp`] than the one its state was built for (another graph, or the same graph after a
structural change), or if its previous run already finished.

```
use graphkit::prelude::*;
use graphkit::algo::*;

let mut graph = ListGraph::new();
let ids: Vec<NodeId> = (0..3).map(|i| graph.add_node(Node::new(i)).unwrap()).collect();
graph.add_edge(ids[0], ids[2], Label::default()).unwrap();
graph.add_edge(ids[2], ids[1], Label::default()).unwrap();

let mut dfs = DepthFirstSearch::new();
dfs.run_to_completion(&mut graph).unwrap();
assert_eq!(dfs.order(), &[ids[0], ids[2], ids[1]]);
```
*/

mod hamiltonian;
mod kruskal;
mod registry;
mod scc;
mod search;

use tracing::debug;

use crate::{
    color::Rgb,
    edge::EdgeKey,
    error::{GraphError, Result},
    node::NodeId,
    ops::Graph,
    repr::GraphStamp,
    utils::UnionFind,
};

pub use hamiltonian::*;
pub use kruskal::*;
pub use registry::*;
pub use scc::*;
pub use search::*;

/// A graph algorithm that can be executed one minimal step at a time.
///
/// The trait is object-safe so that drivers can hold any algorithm as `Box<dyn StepAlgorithm>`.
pub trait StepAlgorithm {
    /// Human readable name
    fn name(&self) -> &'static str;

    /// Performs exactly one unit of work on `graph`, starting over first if needed.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidGraph`] if the algorithm cannot succeed on `graph`;
    /// the algorithm is finished afterwards.
    fn step(&mut self, graph: &mut dyn Graph) -> Result<()>;

    /// Returns *true* if the last run is complete
    fn is_finished(&self) -> bool;

    /// Forgets all progress
    fn reset(&mut self);

    /// Starts over and steps until finished
    fn run_to_completion(&mut self, graph: &mut dyn Graph) -> Result<()> {
        self.reset();
        loop {
            self.step(graph)?;
            if self.is_finished() {
                return Ok(());
            }
        }
    }
}

/// Remembers which graph a resumable state was built for
#[derive(Debug, Default, Clone)]
struct Session {
    stamp: Option<GraphStamp>,
    finished: bool,
}

impl Session {
    /// Returns *true* if the state must be rebuilt before stepping on `graph`
    fn is_stale(&self, graph: &dyn Graph) -> bool {
        self.finished || self.stamp != Some(graph.stamp())
    }

    fn start(&mut self, name: &str, graph: &dyn Graph) {
        debug!(
            algorithm = name,
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            "initializing"
        );
        self.stamp = Some(graph.stamp());
        self.finished = false;
    }

    fn finish(&mut self) {
        self.finished = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Index-based adjacency of `graph`: for every node the distinct targets of its
/// outgoing edges in increasing order
fn out_neighbours(graph: &dyn Graph) -> Vec<Vec<usize>> {
    graph
        .nodes()
        .iter()
        .map(|node| {
            graph
                .neighbours(node.id())
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| graph.node_to_index(id))
                .collect()
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{label::Label, node::Node, repr::ListGraph};

    /// Builds a list graph with `n` nodes labelled `0..n` and the given edges
    pub(crate) fn graph_from_edges(
        n: usize,
        edges: &[(usize, usize, &str)],
    ) -> (ListGraph, Vec<NodeId>) {
        let mut graph = ListGraph::with_name("test");
        let ids: Vec<NodeId> = (0..n)
            .map(|i| graph.add_node(Node::new(i)).unwrap())
            .collect();
        for &(u, v, label) in edges {
            graph.add_edge(ids[u], ids[v], Label::from(label)).unwrap();
        }
        (graph, ids)
    }

    #[test]
    fn neighbours_are_sorted_indices() {
        let (graph, _) = graph_from_edges(4, &[(0, 3, ""), (0, 1, ""), (0, 3, "x"), (2, 2, "")]);
        assert_eq!(out_neighbours(&graph), vec![vec![1, 3], vec![], vec![2], vec![]]);
    }

    #[test]
    fn sessions_detect_structural_changes() {
        let (mut graph, ids) = graph_from_edges(2, &[]);
        let mut session = Session::default();
        assert!(session.is_stale(&graph));

        session.start("test", &graph);
        assert!(!session.is_stale(&graph));

        graph.set_node_color(ids[0], Rgb::GREEN).unwrap();
        assert!(!session.is_stale(&graph));

        graph.add_edge(ids[0], ids[1], Label::default()).unwrap();
        assert!(session.is_stale(&graph));

        session.start("test", &graph);
        session.finish();
        assert!(session.is_finished());
        assert!(session.is_stale(&graph));
    }
}
