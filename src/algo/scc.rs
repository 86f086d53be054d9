/*!
# Strongly Connected Components

Tarjan's algorithm, run iteratively with an explicit work stack so that deep graphs cannot
exhaust the call stack. The components are computed eagerly on the first step of
[`StronglyConnectedComponents`]; the following steps only color them one at a time.
*/

use fixedbitset::FixedBitSet;

use super::*;

const UNVISITED: usize = usize::MAX;

/// Computes the strongly connected components of the adjacency lists `adj`.
///
/// Every component is sorted and the components are ordered by their smallest index.
pub fn tarjan(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adj.len();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = FixedBitSet::with_capacity(n);
    let mut stack = Vec::new();
    let mut components = Vec::new();
    let mut counter = 0;

    // (node, position of the next child to explore)
    let mut work: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = counter;
        lowlink[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack.insert(root);
        work.push((root, 0));

        while let Some(frame) = work.last_mut() {
            let v = frame.0;
            if let Some(&w) = adj[v].get(frame.1) {
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = counter;
                    lowlink[w] = counter;
                    counter += 1;
                    stack.push(w);
                    on_stack.insert(w);
                    work.push((w, 0));
                } else if on_stack.contains(w) {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack.set(w, false);
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }

    components.sort_unstable_by_key(|c| c[0]);
    components
}

/// Strongly connected components of `graph`, see [`tarjan`]
pub fn strongly_connected_components(graph: &dyn Graph) -> Vec<Vec<NodeId>> {
    let nodes = graph.nodes();
    tarjan(&out_neighbours(graph))
        .into_iter()
        .map(|c| c.into_iter().map(|i| nodes[i].id()).collect())
        .collect()
}

/// Resumable component coloring
#[derive(Debug, Default, Clone)]
pub struct StronglyConnectedComponents {
    session: Session,
    components: Vec<Vec<NodeId>>,
    colored: usize,
}

impl StronglyConnectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Components of the current run
    pub fn components(&self) -> &[Vec<NodeId>] {
        &self.components
    }

    /// Number of components colored so far
    pub fn colored(&self) -> usize {
        self.colored
    }

    /// Color used for the `i`-th component
    pub fn component_color(i: usize) -> Rgb {
        Rgb::from_seed(i as u64)
    }

    fn color_next(&mut self, graph: &mut dyn Graph) -> Result<()> {
        let Some(members) = self.components.get(self.colored) else {
            self.session.finish();
            return Ok(());
        };

        let color = Self::component_color(self.colored);
        for &id in members {
            graph.set_node_color(id, color)?;
            let internal: Vec<EdgeKey> = graph
                .outgoing_edges(id)?
                .into_iter()
                .filter(|e| members.contains(&e.target()))
                .map(|e| e.key())
                .collect();
            for key in &internal {
                graph.set_edge_color(key, color)?;
            }
        }

        self.colored += 1;
        if self.colored == self.components.len() {
            self.session.finish();
        }
        Ok(())
    }
}

impl StepAlgorithm for StronglyConnectedComponents {
    fn name(&self) -> &'static str {
        "Strongly Connected Components"
    }

    fn step(&mut self, graph: &mut dyn Graph) -> Result<()> {
        if self.session.is_stale(graph) {
            let name = self.name();
            self.session.start(name, graph);
            self.components = strongly_connected_components(graph);
            self.colored = 0;
        }
        self.color_next(graph)
    }

    fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    fn reset(&mut self) {
        self.session = Session::default();
        self.components.clear();
        self.colored = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algo::tests::graph_from_edges, label::Label};

    #[test]
    fn components_partition_the_nodes() {
        let adj = vec![vec![1], vec![2], vec![0, 3], vec![4], vec![3], vec![], vec![5, 0]];
        assert_eq!(
            tarjan(&adj),
            vec![vec![0, 1, 2], vec![3, 4], vec![5], vec![6]]
        );
        assert!(tarjan(&[]).is_empty());
    }

    #[test]
    fn deep_paths_do_not_recurse() {
        let n = 200_000;
        let mut adj: Vec<Vec<usize>> = (0..n).map(|i| vec![i + 1]).collect();
        adj[n - 1] = vec![0];
        assert_eq!(tarjan(&adj).len(), 1);

        adj[n - 1].clear();
        assert_eq!(tarjan(&adj).len(), n);
    }

    #[test]
    fn colors_one_component_per_step() {
        let (mut graph, ids) = graph_from_edges(
            6,
            &[(0, 1, ""), (1, 2, ""), (2, 0, ""), (2, 3, ""), (3, 4, ""), (4, 3, "")],
        );
        let mut scc = StronglyConnectedComponents::new();

        scc.step(&mut graph).unwrap();
        assert_eq!(
            scc.components(),
            &[vec![ids[0], ids[1], ids[2]], vec![ids[3], ids[4]], vec![ids[5]]]
        );
        assert_eq!(scc.colored(), 1);

        let first = StronglyConnectedComponents::component_color(0);
        assert_eq!(graph.node(ids[1]).unwrap().color, first);
        assert_eq!(
            graph.edge(&EdgeKey::new(ids[2], ids[0], "")).unwrap().color,
            first
        );
        assert_eq!(
            graph.edge(&EdgeKey::new(ids[2], ids[3], "")).unwrap().color,
            Rgb::BLACK
        );
        assert_eq!(graph.node(ids[3]).unwrap().color, Rgb::BLACK);

        scc.step(&mut graph).unwrap();
        assert!(!scc.is_finished());
        scc.step(&mut graph).unwrap();
        assert!(scc.is_finished());
        assert_eq!(
            graph.node(ids[5]).unwrap().color,
            StronglyConnectedComponents::component_color(2)
        );
        assert_eq!(
            graph.edge(&EdgeKey::new(ids[2], ids[3], "")).unwrap().color,
            Rgb::BLACK
        );
    }

    #[test]
    fn restarts_on_new_edges() {
        let (mut graph, ids) = graph_from_edges(3, &[(0, 1, "")]);
        let mut scc = StronglyConnectedComponents::new();
        scc.run_to_completion(&mut graph).unwrap();
        assert_eq!(scc.components().len(), 3);

        graph.add_edge(ids[1], ids[0], Label::default()).unwrap();
        scc.step(&mut graph).unwrap();
        assert_eq!(scc.components().len(), 2);
        assert_eq!(scc.colored(), 1);
    }

    #[test]
    fn empty_graph() {
        let (mut graph, _) = graph_from_edges(0, &[]);
        let mut scc = StronglyConnectedComponents::new();
        scc.step(&mut graph).unwrap();
        assert!(scc.is_finished());
        assert!(scc.components().is_empty());
    }
}
