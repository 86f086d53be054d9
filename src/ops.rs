/*!
# Graph Operations

[`Graph`] is the representation-agnostic capability interface. Codecs and algorithms only ever
talk to graphs through it (mostly as `&mut dyn Graph`), so the trait is kept object-safe:
queries return owned `Vec`s of references instead of `impl Iterator`.

Nodes are addressed by [`NodeId`]; index-based shorthands (`*_at`) resolve the index against the
current node order first. Most conversions (`integer_matrix`, `recreate_from`, ...) are provided
methods that only use the required ones, so every representation agrees on them by construction.
*/

use std::rc::Weak;

use itertools::Itertools;

use crate::{
    color::Rgb,
    edge::{Edge, EdgeKey},
    error::{GraphError, Result},
    label::Label,
    node::{Node, NodeId, Point},
    observer::{ChangeSet, GraphObserver},
    repr::{GraphStamp, IntegerMatrix, Representation},
};

/// Selects how nodes are referred to in [`Graph::dump`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpStyle {
    /// Refer to nodes by their label
    Labels,
    /// Refer to nodes by their current index
    Indices,
}

/// Label given to the `k`-th (0-indexed) parallel edge when expanding a multiplicity
pub fn parallel_edge_label(k: u32) -> Label {
    if k == 0 {
        Label::default()
    } else {
        Label::from(k)
    }
}

pub trait Graph {
    fn name(&self) -> &str;

    /// Renames the graph and notifies graph observers
    fn set_name(&mut self, name: String);

    /// Identity of the graph in its current structural state
    fn stamp(&self) -> GraphStamp;

    /// The storage backend currently in use
    fn representation(&self) -> Representation;

    fn number_of_nodes(&self) -> usize;

    fn number_of_edges(&self) -> usize;

    /// All nodes in index order
    fn nodes(&self) -> &[Node];

    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Current position of node `id` in [`Graph::nodes`]
    fn node_to_index(&self, id: NodeId) -> Option<usize>;

    /// Takes ownership of `node` and appends it.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id is already present.
    fn add_node(&mut self, node: Node) -> Result<NodeId>;

    /// Removes node `id` and every edge touching it
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if there is no such node.
    fn remove_node(&mut self, id: NodeId) -> Result<Node>;

    /// Removes all nodes and edges
    fn remove_nodes(&mut self);

    /// Takes ownership of `edge` and adds it.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if an endpoint is not part of the graph
    /// - [`GraphError::DuplicateEdge`] if an edge with the same key exists
    fn insert_edge(&mut self, edge: Edge) -> Result<()>;

    /// Removes the edge with the given key
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] or [`GraphError::EdgeNotFound`].
    fn remove_edge(&mut self, key: &EdgeKey) -> Result<Edge>;

    /// Removes all edges but keeps the nodes
    fn remove_edges(&mut self);

    fn edge(&self, key: &EdgeKey) -> Option<&Edge>;

    /// Edges leaving node `id`
    fn outgoing_edges(&self, id: NodeId) -> Result<Vec<&Edge>>;

    /// Edges entering node `id`
    fn incoming_edges(&self, id: NodeId) -> Result<Vec<&Edge>>;

    fn set_node_label(&mut self, id: NodeId, label: Label) -> Result<()>;

    fn set_node_color(&mut self, id: NodeId, color: Rgb) -> Result<()>;

    fn set_node_coords(&mut self, id: NodeId, coords: Point) -> Result<()>;

    fn set_edge_color(&mut self, key: &EdgeKey, color: Rgb) -> Result<()>;

    /// Registers an observer for every event of the graph
    fn subscribe(&mut self, observer: Weak<dyn GraphObserver>);

    /// Registers an observer for events of node `id`
    fn subscribe_node(&mut self, id: NodeId, observer: Weak<dyn GraphObserver>) -> Result<()>;

    /// Registers an observer for events of the edge with the given key
    fn subscribe_edge(&mut self, key: &EdgeKey, observer: Weak<dyn GraphObserver>) -> Result<()>;

    /// Returns the nodes and edges added/removed since the last call
    fn drain_changes(&mut self) -> ChangeSet;

    /// Debug rendering of the backing store
    fn dump(&self, style: DumpStyle) -> String;

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }

    /// Node at position `index`
    fn node_at(&self, index: usize) -> Result<&Node> {
        self.nodes()
            .get(index)
            .ok_or(GraphError::NodeIndexOutOfRange {
                index,
                len: self.number_of_nodes(),
            })
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().iter().map(Node::id).collect()
    }

    /// Adds a new black edge from `source` to `target`
    fn add_edge(&mut self, source: NodeId, target: NodeId, label: Label) -> Result<()> {
        self.insert_edge(Edge::new(source, target, label))
    }

    /// Same as [`Graph::add_edge`] with endpoints given by index
    fn add_edge_at(&mut self, source: usize, target: usize, label: Label) -> Result<()> {
        let source = self.node_at(source)?.id();
        let target = self.node_at(target)?.id();
        self.add_edge(source, target, label)
    }

    /// Same as [`Graph::remove_edge`] with endpoints given by index
    fn remove_edge_at(&mut self, source: usize, target: usize, label: &Label) -> Result<Edge> {
        let source = self.node_at(source)?.id();
        let target = self.node_at(target)?.id();
        self.remove_edge(&EdgeKey::new(source, target, label))
    }

    /// Same as [`Graph::remove_node`] with the node given by index
    fn remove_node_at(&mut self, index: usize) -> Result<Node> {
        let id = self.node_at(index)?.id();
        self.remove_node(id)
    }

    fn edge_exists(&self, source: NodeId, target: NodeId, label: &Label) -> bool {
        self.edge(&EdgeKey::new(source, target, label)).is_some()
    }

    /// Returns *true* if there is an edge from `source` to `target` with any label
    fn has_edge_between(&self, source: NodeId, target: NodeId) -> bool {
        self.outgoing_edges(source)
            .is_ok_and(|edges| edges.iter().any(|e| e.target() == target))
    }

    /// All edges, grouped by source in node order
    fn edges(&self) -> Vec<&Edge> {
        self.nodes()
            .iter()
            .flat_map(|node| self.outgoing_edges(node.id()).unwrap_or_default())
            .collect()
    }

    /// Distinct targets of the outgoing edges of `id`, in node order
    fn neighbours(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .outgoing_edges(id)?
            .into_iter()
            .filter_map(|e| self.node_to_index(e.target()))
            .sorted_unstable()
            .dedup()
            .map(|i| self.nodes()[i].id())
            .collect())
    }

    /// Multiplicity matrix of the graph together with the node labels
    fn integer_matrix(&self) -> IntegerMatrix {
        let mut matrix = IntegerMatrix::new();
        matrix.reserve(self.number_of_nodes());
        for node in self.nodes() {
            matrix.add_node(node.label.clone());
        }

        for edge in self.edges() {
            let endpoints = self
                .node_to_index(edge.source())
                .zip(self.node_to_index(edge.target()));
            if let Some((source, target)) = endpoints {
                matrix.increment(source, target);
            }
        }

        matrix
    }

    /// Replaces the contents of `self` by a copy of `other`.
    /// Node ids, labels, colors and coordinates as well as all edges are preserved.
    fn recreate_from(&mut self, other: &dyn Graph) -> Result<()> {
        self.remove_nodes();
        self.set_name(other.name().to_string());
        for node in other.nodes() {
            self.add_node(node.clone())?;
        }
        for edge in other.edges() {
            self.insert_edge(edge.clone())?;
        }
        Ok(())
    }

    /// Replaces the contents of `self` by fresh nodes labelled as in `matrix` and
    /// as many edges between each pair as the multiplicity says.
    /// Parallel edges are labelled according to [`parallel_edge_label`].
    fn recreate_from_matrix(&mut self, matrix: &IntegerMatrix) -> Result<()> {
        self.remove_nodes();

        let ids: Vec<NodeId> = matrix
            .labels()
            .iter()
            .map(|label| self.add_node(Node::new(label.clone())))
            .collect::<Result<_>>()?;

        for (source, row) in matrix.rows().iter().enumerate() {
            for (target, &multiplicity) in row.iter().enumerate() {
                for k in 0..multiplicity {
                    self.add_edge(ids[source], ids[target], parallel_edge_label(k))?;
                }
            }
        }

        Ok(())
    }
}
