/*!
# Breadth- and Depth-First Search

Both searches share one implementation, [`SearchVisitor`], and differ only in the [`Frontier`]
holding the nodes whose neighbourhood is not exhausted yet:

- [`VecDeque`] -> queue semantics -> [`BreadthFirstSearch`]
- [`Vec`] -> stack semantics -> [`DepthFirstSearch`]

Every step visits exactly one new node: the unvisited out-neighbour with the lowest index of the
node at the front of the frontier. Nodes without unvisited neighbours are dropped on the way.
Visited nodes are colored green.
*/

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use super::*;

/// Stores the node indices that still have to be expanded
pub trait Frontier: Default {
    /// Name of the search driven by this frontier
    const SEARCH: &'static str;

    /// Pushes a node into the frontier.
    fn push(&mut self, index: usize);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<usize>;

    /// Returns the next node without removing it.
    fn peek(&self) -> Option<usize>;

    fn clear(&mut self);

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl Frontier for VecDeque<usize> {
    const SEARCH: &'static str = "Breadth First Search";

    fn push(&mut self, index: usize) {
        self.push_back(index)
    }
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }
    fn peek(&self) -> Option<usize> {
        self.front().copied()
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl Frontier for Vec<usize> {
    const SEARCH: &'static str = "Depth First Search";

    fn push(&mut self, index: usize) {
        Vec::push(self, index)
    }
    fn pop(&mut self) -> Option<usize> {
        Vec::pop(self)
    }
    fn peek(&self) -> Option<usize> {
        self.last().copied()
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Resumable graph search; see the [module documentation](self)
#[derive(Debug, Default, Clone)]
pub struct SearchVisitor<F: Frontier> {
    session: Session,
    start: usize,
    visited: FixedBitSet,
    frontier: F,
    current: Option<NodeId>,
    order: Vec<NodeId>,
}

/// Type alias for a **breadth-first search** using a queue (`VecDeque`).
pub type BreadthFirstSearch = SearchVisitor<VecDeque<usize>>;

/// Type alias for a **depth-first search** using a stack (`Vec`).
pub type DepthFirstSearch = SearchVisitor<Vec<usize>>;

impl<F: Frontier> SearchVisitor<F> {
    /// Creates a search starting at the node with index 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the index of the start node for the next run
    pub fn set_start_at(&mut self, index: usize) {
        self.start = index;
        self.reset();
    }

    /// Updates the index of the start node, consuming and returning `self` for chaining.
    pub fn start_at(mut self, index: usize) -> Self {
        self.set_start_at(index);
        self
    }

    /// Nodes in the order they were visited
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// The most recently visited node
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Returns *true* if node `index` was visited in the current run
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(index)
    }

    /// Number of nodes whose neighbourhood is not exhausted yet
    pub fn pending(&self) -> usize {
        self.frontier.cardinality()
    }

    fn initialize(&mut self, graph: &mut dyn Graph) -> Result<()> {
        self.session.start(F::SEARCH, graph);
        self.visited = FixedBitSet::with_capacity(graph.number_of_nodes());
        self.frontier.clear();
        self.order.clear();
        self.current = None;

        if graph.is_empty() {
            self.session.finish();
            return Ok(());
        }

        let id = match graph.node_at(self.start) {
            Ok(node) => node.id(),
            Err(err) => {
                self.session.finish();
                return Err(err);
            }
        };
        self.visit(graph, self.start, id)
    }

    fn visit(&mut self, graph: &mut dyn Graph, index: usize, id: NodeId) -> Result<()> {
        self.visited.insert(index);
        self.frontier.push(index);
        self.order.push(id);
        self.current = Some(id);
        graph.set_node_color(id, Rgb::GREEN)
    }
}

impl<F: Frontier> StepAlgorithm for SearchVisitor<F> {
    fn name(&self) -> &'static str {
        F::SEARCH
    }

    fn step(&mut self, graph: &mut dyn Graph) -> Result<()> {
        if self.session.is_stale(graph) {
            return self.initialize(graph);
        }

        while let Some(u) = self.frontier.peek() {
            let next = graph
                .neighbours(graph.node_at(u)?.id())?
                .into_iter()
                .filter_map(|id| Some((graph.node_to_index(id)?, id)))
                .find(|&(v, _)| !self.visited.contains(v));

            match next {
                Some((v, id)) => return self.visit(graph, v, id),
                None => {
                    self.frontier.pop();
                }
            }
        }

        self.session.finish();
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    fn reset(&mut self) {
        self.session = Session::default();
        self.visited.clear();
        self.frontier.clear();
        self.current = None;
        self.order.clear();
    }
}
