/*!
# Kruskal

Minimum spanning forest of a weighted graph, where the weight of an edge is the integer its label
starts with (see [`Label::lenient_cost`](crate::label::Label::lenient_cost)). Edge direction is
ignored. Edges of equal cost are processed in graph order.

Every step of [`Kruskal`] pops the cheapest remaining edge:
- if its endpoints lie in different clusters, the clusters are merged and the edge turns green,
- otherwise the edge turns orange until the next step restores its previous color.

The restore also happens if the run is reset or restarted in between, as long as the edge still
exists. Costs add up saturating.
*/

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::warn;

use super::*;

/// Resumable minimum spanning forest
#[derive(Debug, Default, Clone)]
pub struct Kruskal {
    session: Session,
    /// Edges of the graph with the indices of their endpoints
    edges: Vec<(EdgeKey, usize, usize)>,
    /// `(cost, position in edges)`
    queue: BinaryHeap<Reverse<(i64, usize)>>,
    clusters: UnionFind,
    rejected: Option<(EdgeKey, Rgb)>,
    forest: Vec<EdgeKey>,
    total_cost: i64,
}

impl Kruskal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges accepted in the current run
    pub fn forest(&self) -> &[EdgeKey] {
        &self.forest
    }

    /// Sum of the costs of [`Kruskal::forest`]
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Number of clusters left
    pub fn number_of_clusters(&self) -> usize {
        self.clusters.number_of_sets()
    }

    fn initialize(&mut self, graph: &dyn Graph) {
        let name = self.name();
        self.session.start(name, graph);
        self.clusters = UnionFind::new(graph.number_of_nodes());
        self.forest.clear();
        self.total_cost = 0;

        self.edges = graph
            .edges()
            .into_iter()
            .filter_map(|e| {
                let source = graph.node_to_index(e.source())?;
                let target = graph.node_to_index(e.target())?;
                Some((e.key(), source, target))
            })
            .collect();

        let free = self
            .edges
            .iter()
            .filter(|(key, _, _)| !key.label.is_cost())
            .count();
        if free > 0 {
            warn!(edges = free, "edge labels without a numeric cost are read leniently");
        }

        self.queue = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, (key, _, _))| Reverse((key.label.lenient_cost(), i)))
            .collect();
    }
}

impl StepAlgorithm for Kruskal {
    fn name(&self) -> &'static str {
        "Kruskal's Algorithm"
    }

    fn step(&mut self, graph: &mut dyn Graph) -> Result<()> {
        if let Some((key, color)) = self.rejected.take() {
            if graph.edge(&key).is_some() {
                graph.set_edge_color(&key, color)?;
            }
        }

        if self.session.is_stale(graph) {
            self.initialize(graph);
        }

        let Some(Reverse((cost, i))) = self.queue.pop() else {
            self.session.finish();
            return Ok(());
        };

        let (key, source, target) = &self.edges[i];
        if self.clusters.union(*source, *target) {
            graph.set_edge_color(key, Rgb::GREEN)?;
            self.forest.push(key.clone());
            self.total_cost = self.total_cost.saturating_add(cost);
        } else {
            let color = graph
                .edge(key)
                .map_or(Rgb::BLACK, |edge| edge.color);
            graph.set_edge_color(key, Rgb::ORANGE)?;
            self.rejected = Some((key.clone(), color));
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    /// Forgets all progress but the color of the last rejected edge, which the next step restores
    fn reset(&mut self) {
        let rejected = self.rejected.take();
        *self = Self {
            rejected,
            ..Self::default()
        };
    }
}
