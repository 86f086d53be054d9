/*!
# Hamiltonian Cycles and Paths

Exhaustive search for a directed cycle ([`HamiltonianCycle`]) or path ([`HamiltonianPath`])
through every node. The positions of a candidate form an odometer over node indices that is
incremented with carry; states with a repeated digit are skipped, so every step examines one
permutation:

- the candidate's nodes and the edges between consecutive nodes are colored orange,
- the colors of the previous candidate are restored first,
- once every consecutive pair is joined by an edge of any label, the next step colors the
  candidate green and finishes.

For cycles node `0` is pinned to the first position and the last node must connect back to it,
so the other positions range over `1..n`. Paths pin nothing and have no wraparound.

A search fails with [`GraphError::InvalidGraph`] if the graph has too few edges (fewer than `n`
for a cycle, fewer than `n - 1` for a path) or after the odometer overflowed.

Colors that are still pending a restore survive [`StepAlgorithm::reset`] and restarts: the next
step restores them for every node and edge that still exists.
*/

use fixedbitset::FixedBitSet;

use super::*;

/// Resumable Hamiltonian cycle search
#[derive(Debug, Clone)]
pub struct HamiltonianCycle {
    tour: Tour,
}

impl Default for HamiltonianCycle {
    fn default() -> Self {
        Self {
            tour: Tour::new(true),
        }
    }
}

impl HamiltonianCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cycle found in the current run, in traversal order
    pub fn cycle(&self) -> Option<&[NodeId]> {
        self.tour.found.as_deref()
    }
}

impl StepAlgorithm for HamiltonianCycle {
    fn name(&self) -> &'static str {
        "Hamiltonian Cycle"
    }

    fn step(&mut self, graph: &mut dyn Graph) -> Result<()> {
        let name = self.name();
        self.tour.step(name, graph)
    }

    fn is_finished(&self) -> bool {
        self.tour.session.is_finished()
    }

    fn reset(&mut self) {
        self.tour.reset();
    }
}

/// Resumable Hamiltonian path search
#[derive(Debug, Clone)]
pub struct HamiltonianPath {
    tour: Tour,
}

impl Default for HamiltonianPath {
    fn default() -> Self {
        Self {
            tour: Tour::new(false),
        }
    }
}

impl HamiltonianPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path found in the current run, from its first to its last node
    pub fn path(&self) -> Option<&[NodeId]> {
        self.tour.found.as_deref()
    }
}

impl StepAlgorithm for HamiltonianPath {
    fn name(&self) -> &'static str {
        "Hamiltonian Path"
    }

    fn step(&mut self, graph: &mut dyn Graph) -> Result<()> {
        let name = self.name();
        self.tour.step(name, graph)
    }

    fn is_finished(&self) -> bool {
        self.tour.session.is_finished()
    }

    fn reset(&mut self) {
        self.tour.reset();
    }
}

/// Odometer search shared by cycles and paths
#[derive(Debug, Clone)]
struct Tour {
    session: Session,
    /// Requires an edge from the last node back to the first
    closed: bool,
    nodes: Vec<NodeId>,
    /// `None` until the first candidate was generated
    digits: Option<Vec<usize>>,
    saved_nodes: Vec<(NodeId, Rgb)>,
    saved_edges: Vec<(EdgeKey, Rgb)>,
    found: Option<Vec<NodeId>>,
}

impl Tour {
    fn new(closed: bool) -> Self {
        Self {
            session: Session::default(),
            closed,
            nodes: Vec::new(),
            digits: None,
            saved_nodes: Vec::new(),
            saved_edges: Vec::new(),
            found: None,
        }
    }

    fn kind(&self) -> &'static str {
        if self.closed {
            "cycle"
        } else {
            "path"
        }
    }

    /// Lowest digit of every free position, which is also the number of pinned positions
    fn low(&self) -> usize {
        usize::from(self.closed)
    }

    fn reset(&mut self) {
        let saved_nodes = std::mem::take(&mut self.saved_nodes);
        let saved_edges = std::mem::take(&mut self.saved_edges);
        *self = Self {
            saved_nodes,
            saved_edges,
            ..Self::new(self.closed)
        };
    }

    fn initialize(&mut self, name: &str, graph: &dyn Graph) -> Result<()> {
        self.session.start(name, graph);
        self.nodes = graph.node_ids();
        self.digits = None;
        self.found = None;

        let (n, m) = (graph.number_of_nodes(), graph.number_of_edges());
        let needed = if self.closed { n } else { n.saturating_sub(1) };
        if m < needed {
            self.session.finish();
            return Err(GraphError::InvalidGraph(format!(
                "{m} edges are too few to admit a Hamiltonian {} through {n} nodes",
                self.kind()
            )));
        }
        Ok(())
    }

    /// Moves the odometer to the next state without repeated digits.
    /// Returns *false* once every state was tried.
    fn advance(&mut self) -> bool {
        let n = self.nodes.len();
        let low = self.low();
        if self.digits.is_none() {
            let first: Vec<usize> = (0..n).map(|i| i.min(low)).collect();
            let valid = is_permutation(&first);
            self.digits = Some(first);
            if valid {
                return true;
            }
        }
        let Some(digits) = self.digits.as_mut() else {
            return false;
        };

        loop {
            let mut pos = n;
            loop {
                if pos <= low {
                    return false;
                }
                pos -= 1;
                digits[pos] += 1;
                if digits[pos] < n {
                    break;
                }
                digits[pos] = low;
            }

            if is_permutation(digits) {
                return true;
            }
        }
    }

    /// Gives back the colors saved for the last candidate, skipping removed nodes and edges
    fn restore(&mut self, graph: &mut dyn Graph) -> Result<()> {
        for (id, color) in self.saved_nodes.drain(..) {
            if graph.node(id).is_some() {
                graph.set_node_color(id, color)?;
            }
        }
        for (key, color) in self.saved_edges.drain(..) {
            if graph.edge(&key).is_some() {
                graph.set_edge_color(&key, color)?;
            }
        }
        Ok(())
    }

    /// Colors the candidate and returns *true* if every consecutive pair is joined
    fn examine(&mut self, graph: &mut dyn Graph, candidate: &[NodeId]) -> Result<bool> {
        let mut joined = true;
        for (i, &u) in candidate.iter().enumerate() {
            if let Some(node) = graph.node(u) {
                self.saved_nodes.push((u, node.color));
            }
            graph.set_node_color(u, Rgb::ORANGE)?;

            let v = match candidate.get(i + 1) {
                Some(&v) => v,
                None if self.closed => candidate[0],
                None => break,
            };
            let edge = graph
                .outgoing_edges(u)?
                .into_iter()
                .find(|e| e.target() == v)
                .map(|e| (e.key(), e.color));
            match edge {
                Some((key, color)) => {
                    graph.set_edge_color(&key, Rgb::ORANGE)?;
                    self.saved_edges.push((key, color));
                }
                None => joined = false,
            }
        }
        Ok(joined)
    }

    fn mark_found(&mut self, graph: &mut dyn Graph) -> Result<()> {
        for (id, _) in &self.saved_nodes {
            graph.set_node_color(*id, Rgb::GREEN)?;
        }
        for (key, _) in &self.saved_edges {
            graph.set_edge_color(key, Rgb::GREEN)?;
        }
        self.saved_nodes.clear();
        self.saved_edges.clear();
        Ok(())
    }

    fn step(&mut self, name: &str, graph: &mut dyn Graph) -> Result<()> {
        if self.session.is_stale(graph) {
            self.restore(graph)?;
            self.initialize(name, graph)?;
            if graph.is_empty() {
                self.session.finish();
                return Ok(());
            }
        }

        if self.found.is_some() {
            self.mark_found(graph)?;
            self.session.finish();
            return Ok(());
        }

        self.restore(graph)?;
        if !self.advance() {
            self.session.finish();
            return Err(GraphError::InvalidGraph(format!(
                "no Hamiltonian {}",
                self.kind()
            )));
        }

        let candidate: Vec<NodeId> = self
            .digits
            .iter()
            .flatten()
            .map(|&d| self.nodes[d])
            .collect();
        if self.examine(graph, &candidate)? {
            self.found = Some(candidate);
        }
        Ok(())
    }
}

fn is_permutation(digits: &[usize]) -> bool {
    let mut seen = FixedBitSet::with_capacity(digits.len());
    digits.iter().all(|&d| !seen.put(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::tests::graph_from_edges;

    fn odometer(closed: bool, n: usize) -> Vec<Vec<usize>> {
        let mut tour = Tour::new(closed);
        tour.nodes = (0..n).map(|_| NodeId::fresh()).collect();

        let mut seen = Vec::new();
        while tour.advance() {
            seen.push(tour.digits.clone().unwrap());
        }
        seen
    }

    fn star(leaves: usize) -> Vec<(usize, usize, &'static str)> {
        (1..=leaves)
            .flat_map(|leaf| [(0, leaf, ""), (leaf, 0, "")])
            .collect()
    }

    #[test]
    fn permutations() {
        assert!(is_permutation(&[0, 2, 1, 3]));
        assert!(!is_permutation(&[0, 1, 1, 3]));
        assert!(is_permutation(&[]));
    }

    #[test]
    fn odometer_visits_every_permutation_once() {
        let seen = odometer(true, 4);
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 1, 2, 3]);
        assert_eq!(seen[5], vec![0, 3, 2, 1]);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));

        let seen = odometer(false, 3);
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 1, 2]);
        assert_eq!(seen[5], vec![2, 1, 0]);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(odometer(false, 1), vec![vec![0]]);
        assert_eq!(odometer(true, 1), vec![vec![0]]);
    }

    #[test]
    fn star_has_no_cycle() {
        let (mut graph, _) = graph_from_edges(5, &star(4));

        let mut search = HamiltonianCycle::new();
        let err = search.run_to_completion(&mut graph).unwrap_err();
        assert!(matches!(err, GraphError::InvalidGraph(_)));
        assert!(search.is_finished());
        assert!(search.cycle().is_none());
        assert!(graph.nodes().iter().all(|node| node.color == Rgb::BLACK));
        assert!(graph.edges().iter().all(|edge| edge.color == Rgb::BLACK));
    }

    #[test]
    fn too_few_edges() {
        let (mut graph, _) = graph_from_edges(3, &[(0, 1, ""), (1, 2, "")]);
        let mut search = HamiltonianCycle::new();
        assert!(matches!(
            search.step(&mut graph),
            Err(GraphError::InvalidGraph(_))
        ));
        assert!(search.is_finished());

        let (mut graph, _) = graph_from_edges(4, &[(0, 1, ""), (1, 2, "")]);
        let mut search = HamiltonianPath::new();
        assert!(matches!(
            search.step(&mut graph),
            Err(GraphError::InvalidGraph(_))
        ));
        assert!(search.is_finished());
    }

    #[test]
    fn finds_a_directed_cycle() {
        let (mut graph, ids) = graph_from_edges(
            4,
            &[(0, 1, ""), (0, 2, ""), (2, 1, "a"), (1, 3, ""), (3, 0, "")],
        );

        let mut search = HamiltonianCycle::new();
        search.run_to_completion(&mut graph).unwrap();
        assert_eq!(search.cycle(), Some(&[ids[0], ids[2], ids[1], ids[3]][..]));

        assert!(graph.nodes().iter().all(|node| node.color == Rgb::GREEN));
        let green = |u: usize, v: usize, l: &str| {
            graph.edge(&EdgeKey::new(ids[u], ids[v], l)).unwrap().color == Rgb::GREEN
        };
        assert!(green(0, 2, "") && green(2, 1, "a") && green(1, 3, "") && green(3, 0, ""));
        assert!(!green(0, 1, ""));
    }

    #[test]
    fn finds_a_directed_path() {
        let (mut graph, ids) =
            graph_from_edges(4, &[(3, 1, ""), (0, 1, ""), (1, 2, ""), (2, 3, "")]);

        let mut search = HamiltonianPath::new();
        search.run_to_completion(&mut graph).unwrap();
        assert_eq!(search.path(), Some(&ids[..]));

        assert!(graph.nodes().iter().all(|node| node.color == Rgb::GREEN));
        let green = |u: usize, v: usize| {
            graph.edge(&EdgeKey::new(ids[u], ids[v], "")).unwrap().color == Rgb::GREEN
        };
        assert!(green(0, 1) && green(1, 2) && green(2, 3));
        assert!(!green(3, 1));

        // the path does not close, so there is no cycle
        let mut cycle = HamiltonianCycle::new();
        assert!(cycle.run_to_completion(&mut graph).is_err());
    }

    #[test]
    fn star_has_no_path() {
        let (mut graph, _) = graph_from_edges(5, &star(4));

        let mut search = HamiltonianPath::new();
        let err = search.run_to_completion(&mut graph).unwrap_err();
        assert!(matches!(err, GraphError::InvalidGraph(_)));
        assert!(search.path().is_none());
        assert!(graph.nodes().iter().all(|node| node.color == Rgb::BLACK));
        assert!(graph.edges().iter().all(|edge| edge.color == Rgb::BLACK));

        // a single leaf leaves a path through both nodes
        let (mut graph, ids) = graph_from_edges(2, &star(1));
        search.run_to_completion(&mut graph).unwrap();
        assert_eq!(search.path(), Some(&ids[..]));
    }

    #[test]
    fn single_node() {
        let (mut graph, ids) = graph_from_edges(1, &[(0, 0, "")]);
        let mut search = HamiltonianCycle::new();
        search.run_to_completion(&mut graph).unwrap();
        assert_eq!(search.cycle(), Some(&[ids[0]][..]));

        let (mut graph, _) = graph_from_edges(0, &[]);
        search.run_to_completion(&mut graph).unwrap();
        assert!(search.cycle().is_none());

        let (mut graph, ids) = graph_from_edges(1, &[]);
        let mut search = HamiltonianPath::new();
        search.run_to_completion(&mut graph).unwrap();
        assert_eq!(search.path(), Some(&[ids[0]][..]));
    }

    #[test]
    fn restarts_restore_candidate_colors() {
        let (mut graph, ids) = graph_from_edges(3, &[(0, 1, ""), (2, 1, "")]);
        let forward = EdgeKey::new(ids[0], ids[1], "");
        let backward = EdgeKey::new(ids[2], ids[1], "");
        let mut search = HamiltonianPath::new();

        search.step(&mut graph).unwrap();
        assert_eq!(graph.edge(&forward).unwrap().color, Rgb::ORANGE);
        search.step(&mut graph).unwrap();
        assert_eq!(graph.edge(&forward).unwrap().color, Rgb::BLACK);
        assert_eq!(graph.edge(&backward).unwrap().color, Rgb::ORANGE);

        // starts over at 0, 1, 2
        search.reset();
        search.step(&mut graph).unwrap();
        assert_eq!(graph.edge(&forward).unwrap().color, Rgb::ORANGE);
        assert_eq!(graph.edge(&backward).unwrap().color, Rgb::BLACK);

        // too few edges for four nodes, but the old candidate is still restored
        graph.add_node(crate::node::Node::new(3)).unwrap();
        assert!(search.step(&mut graph).is_err());
        assert!(graph.nodes().iter().all(|node| node.color == Rgb::BLACK));
        assert!(graph.edges().iter().all(|edge| edge.color == Rgb::BLACK));
    }
}
