use serde::{Deserialize, Serialize};
use tracing::debug;

use super::*;
use crate::testing::test_graph_ops;

/// Decides which representation a [`HybridGraph`] of a given size uses.
///
/// A graph is kept as a list iff `round(density_factor * E) <= N^2` and `N >= min_nodes`,
/// and as a matrix otherwise. Being a pure function of `(N, E)` with exactly two outcomes,
/// the policy can never hold both representations acceptable at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridPolicy {
    pub density_factor: f64,
    pub min_nodes: usize,
}

impl Default for HybridPolicy {
    fn default() -> Self {
        Self {
            density_factor: 1.1,
            min_nodes: 3,
        }
    }
}

impl HybridPolicy {
    /// Returns *true* if a graph with `n` nodes and `m` edges should be stored as lists
    pub fn prefers_list(&self, n: usize, m: usize) -> bool {
        n >= self.min_nodes && (self.density_factor * m as f64).round() <= (n as f64) * (n as f64)
    }

    pub fn preferred(&self, n: usize, m: usize) -> Representation {
        if self.prefers_list(n, m) {
            Representation::List
        } else {
            Representation::Matrix
        }
    }
}

/// Active backing store of a [`HybridGraph`]
#[derive(Debug)]
pub enum HybridState {
    List(ListGraph),
    Matrix(MatrixGraph),
}

impl Default for HybridState {
    fn default() -> Self {
        HybridState::Matrix(MatrixGraph::default())
    }
}

/// A graph that moves between [`ListGraph`] and [`MatrixGraph`] storage as its density changes.
///
/// Every operation is delegated to the active state; after each structural mutation the
/// [`HybridPolicy`] is consulted and the graph is converted if needed. Node ids, edges,
/// attributes, pending changes and observers survive a switch.
#[derive(Debug, Default)]
pub struct HybridGraph {
    state: HybridState,
    policy: HybridPolicy,
}

macro_rules! delegate {
    (mut $self:ident.$method:ident($($arg:expr),*)) => {
        match &mut $self.state {
            HybridState::List(graph) => graph.$method($($arg),*),
            HybridState::Matrix(graph) => graph.$method($($arg),*),
        }
    };
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match &$self.state {
            HybridState::List(graph) => graph.$method($($arg),*),
            HybridState::Matrix(graph) => graph.$method($($arg),*),
        }
    };
}

/// Delegates a structural mutation and rebalances afterwards
macro_rules! mutate {
    ($self:ident.$method:ident($($arg:expr),*)) => {{
        let result = delegate!(mut $self.$method($($arg),*));
        $self.rebalance();
        result
    }};
}

impl HybridGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: HybridPolicy) -> Self {
        let mut graph = Self {
            state: HybridState::default(),
            policy,
        };
        graph.rebalance();
        graph
    }

    pub fn policy(&self) -> &HybridPolicy {
        &self.policy
    }

    pub fn state(&self) -> &HybridState {
        &self.state
    }

    /// Converts the active state if the policy asks for the other representation
    fn rebalance(&mut self) {
        let (n, m) = (self.number_of_nodes(), self.number_of_edges());
        let wanted = self.policy.preferred(n, m);
        if wanted == self.representation() {
            return;
        }

        debug!(nodes = n, edges = m, to = ?wanted, "switching hybrid representation");
        self.state = match std::mem::take(&mut self.state) {
            HybridState::List(graph) => HybridState::Matrix(graph.into_representation()),
            HybridState::Matrix(graph) => HybridState::List(graph.into_representation()),
        };
    }
}

impl Graph for HybridGraph {
    fn name(&self) -> &str {
        delegate!(self.name())
    }

    fn set_name(&mut self, name: String) {
        delegate!(mut self.set_name(name))
    }

    fn stamp(&self) -> GraphStamp {
        delegate!(self.stamp())
    }

    fn representation(&self) -> Representation {
        delegate!(self.representation())
    }

    fn number_of_nodes(&self) -> usize {
        delegate!(self.number_of_nodes())
    }

    fn number_of_edges(&self) -> usize {
        delegate!(self.number_of_edges())
    }

    fn nodes(&self) -> &[Node] {
        delegate!(self.nodes())
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        delegate!(self.node(id))
    }

    fn node_to_index(&self, id: NodeId) -> Option<usize> {
        delegate!(self.node_to_index(id))
    }

    fn add_node(&mut self, node: Node) -> Result<NodeId> {
        mutate!(self.add_node(node))
    }

    fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        mutate!(self.remove_node(id))
    }

    fn remove_nodes(&mut self) {
        mutate!(self.remove_nodes())
    }

    fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        mutate!(self.insert_edge(edge))
    }

    fn remove_edge(&mut self, key: &EdgeKey) -> Result<Edge> {
        mutate!(self.remove_edge(key))
    }

    fn remove_edges(&mut self) {
        mutate!(self.remove_edges())
    }

    fn edge(&self, key: &EdgeKey) -> Option<&Edge> {
        delegate!(self.edge(key))
    }

    fn outgoing_edges(&self, id: NodeId) -> Result<Vec<&Edge>> {
        delegate!(self.outgoing_edges(id))
    }

    fn incoming_edges(&self, id: NodeId) -> Result<Vec<&Edge>> {
        delegate!(self.incoming_edges(id))
    }

    fn set_node_label(&mut self, id: NodeId, label: Label) -> Result<()> {
        delegate!(mut self.set_node_label(id, label))
    }

    fn set_node_color(&mut self, id: NodeId, color: Rgb) -> Result<()> {
        delegate!(mut self.set_node_color(id, color))
    }

    fn set_node_coords(&mut self, id: NodeId, coords: Point) -> Result<()> {
        delegate!(mut self.set_node_coords(id, coords))
    }

    fn set_edge_color(&mut self, key: &EdgeKey, color: Rgb) -> Result<()> {
        delegate!(mut self.set_edge_color(key, color))
    }

    fn subscribe(&mut self, observer: Weak<dyn GraphObserver>) {
        delegate!(mut self.subscribe(observer))
    }

    fn subscribe_node(&mut self, id: NodeId, observer: Weak<dyn GraphObserver>) -> Result<()> {
        delegate!(mut self.subscribe_node(id, observer))
    }

    fn subscribe_edge(&mut self, key: &EdgeKey, observer: Weak<dyn GraphObserver>) -> Result<()> {
        delegate!(mut self.subscribe_edge(key, observer))
    }

    fn drain_changes(&mut self) -> ChangeSet {
        delegate!(mut self.drain_changes())
    }

    fn dump(&self, style: DumpStyle) -> String {
        delegate!(self.dump(style))
    }

    // Bulk conversions run on the active state and rebalance once at the end
    fn recreate_from(&mut self, other: &dyn Graph) -> Result<()> {
        mutate!(self.recreate_from(other))
    }

    fn recreate_from_matrix(&mut self, matrix: &IntegerMatrix) -> Result<()> {
        mutate!(self.recreate_from_matrix(matrix))
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_hybrid_graph,
    HybridGraph,
    (
        Basics,
        NodeIdentity,
        ChangeLog,
        Observers,
        Recreate,
        RandomOperations
    )
);
