/*!
# Representations

All representations share one node store ([`GraphCore`]) and differ only in how edges are kept.
This is captured by [`EdgeStore`]: a graph is a [`BaseGraph`] over some edge store, and the
concrete representations are type aliases:

- [`ListGraph`]: one adjacency list per node, cheap for sparse graphs,
- [`MatrixGraph`]: an `N x N` matrix of edge cells, cheap incoming-edge queries for dense graphs,
- [`HybridGraph`]: switches between both depending on the density of the graph.

Converting a [`BaseGraph`] into another edge store moves its nodes, edges and observer
registrations; nothing is copied and no identity changes.
*/

use std::rc::Weak;

use crate::{
    color::Rgb,
    edge::{Edge, EdgeKey},
    error::{GraphError, Result},
    label::Label,
    node::{Node, NodeId, Point},
    observer::{ChangeSet, GraphEvent, GraphObserver},
    ops::{DumpStyle, Graph},
};

mod graph_core;
mod hybrid;
mod integer_matrix;
mod list;
mod matrix;

pub use graph_core::*;
pub use hybrid::*;
pub use integer_matrix::*;
pub use list::*;
pub use matrix::*;

/// Storage backend of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    List,
    Matrix,
}

/// Edge storage of a representation.
///
/// Nodes are referred to by their index in the owning [`GraphCore`]; the store is kept in sync
/// with the node order by [`BaseGraph`] and never checks for duplicate edges itself.
pub trait EdgeStore: Default {
    const REPRESENTATION: Representation;

    /// Makes room for a new node at the highest index
    fn push_node(&mut self, id: NodeId);

    /// Removes the node at `index` and returns every edge that touched it
    fn remove_node(&mut self, index: usize) -> Vec<Edge>;

    fn insert(&mut self, source: usize, target: usize, edge: Edge);

    fn remove(&mut self, source: usize, target: usize, label: &Label) -> Option<Edge>;

    fn get(&self, source: usize, target: usize, label: &Label) -> Option<&Edge>;

    fn get_mut(&mut self, source: usize, target: usize, label: &Label) -> Option<&mut Edge>;

    fn outgoing(&self, index: usize) -> Vec<&Edge>;

    fn incoming(&self, index: usize) -> Vec<&Edge>;

    /// Removes and returns all edges but keeps the nodes
    fn take_edges(&mut self) -> Vec<Edge>;

    /// Removes all nodes and edges
    fn clear(&mut self);

    /// Debug rendering of the store
    fn render(&self, name: &str, nodes: &[Node], style: DumpStyle) -> String;
}

/// Refers to a node in a dump
fn node_ref(index: usize, node: &Node, style: DumpStyle) -> String {
    match style {
        DumpStyle::Labels => node.label.to_string(),
        DumpStyle::Indices => index.to_string(),
    }
}

/// A graph storing its edges in `S`
#[derive(Debug, Default)]
pub struct BaseGraph<S> {
    core: GraphCore,
    store: S,
}

impl<S: EdgeStore> BaseGraph<S> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given name
    pub fn with_name<N: Into<String>>(name: N) -> Self {
        let mut graph = Self::default();
        graph.core.name = name.into();
        graph
    }

    /// Moves all nodes, edges, pending changes and observer registrations into a graph backed by `T`.
    /// Observers of nodes and edges are told about the move with [`GraphEvent::Relocated`].
    pub fn into_representation<T: EdgeStore>(mut self) -> BaseGraph<T> {
        let mut store = T::default();
        for node in &self.core.nodes {
            store.push_node(node.id());
        }

        for edge in self.store.take_edges() {
            match (
                self.core.index_of(edge.source()),
                self.core.index_of(edge.target()),
            ) {
                (Ok(source), Ok(target)) => store.insert(source, target, edge),
                _ => debug_assert!(false, "edge {edge} refers to a missing endpoint"),
            }
        }

        let mut graph = BaseGraph {
            core: self.core,
            store,
        };
        graph.core.relocate(&graph.store);
        graph
    }

    fn endpoints(&self, key: &EdgeKey) -> Result<(usize, usize)> {
        Ok((self.core.index_of(key.source)?, self.core.index_of(key.target)?))
    }

    fn edge_mut(&mut self, key: &EdgeKey) -> Result<&mut Edge> {
        let (source, target) = self.endpoints(key)?;
        self.store
            .get_mut(source, target, &key.label)
            .ok_or_else(|| GraphError::EdgeNotFound { key: key.clone() })
    }

    /// Keys of all edges touching the node at `index`; self-edges are listed once
    fn incident_keys(&self, index: usize) -> Vec<EdgeKey> {
        let outgoing = self.store.outgoing(index).into_iter();
        let incoming = self
            .store
            .incoming(index)
            .into_iter()
            .filter(|e| !e.is_self_edge());
        outgoing.chain(incoming).map(Edge::key).collect()
    }
}

impl<S: EdgeStore> Graph for BaseGraph<S> {
    fn name(&self) -> &str {
        &self.core.name
    }

    fn set_name(&mut self, name: String) {
        self.core.name = name;
        self.core.subscriptions.notify_graph(&GraphEvent::Renamed);
    }

    fn stamp(&self) -> GraphStamp {
        self.core.stamp()
    }

    fn representation(&self) -> Representation {
        S::REPRESENTATION
    }

    fn number_of_nodes(&self) -> usize {
        self.core.nodes.len()
    }

    fn number_of_edges(&self) -> usize {
        self.core.number_of_edges
    }

    fn nodes(&self) -> &[Node] {
        &self.core.nodes
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.core.node(id)
    }

    fn node_to_index(&self, id: NodeId) -> Option<usize> {
        self.core.index_of(id).ok()
    }

    fn add_node(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id();
        self.core.push_node(node)?;
        self.store.push_node(id);
        Ok(id)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let index = self.core.index_of(id)?;

        for key in self.incident_keys(index) {
            self.core.detach_edge(&key);
        }
        self.core.detach_node(id);

        let removed = self.store.remove_node(index);
        self.core.edges_taken(removed.len());
        Ok(self.core.take_node(index))
    }

    fn remove_nodes(&mut self) {
        self.remove_edges();
        for id in self.node_ids() {
            self.core.detach_node(id);
        }
        self.store.clear();
        self.core.take_nodes();
    }

    fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        let (source, target) = self.endpoints(&edge.key())?;
        if self.store.get(source, target, &edge.label).is_some() {
            return Err(GraphError::DuplicateEdge { edge });
        }

        let key = edge.key();
        self.store.insert(source, target, edge);
        self.core.edge_added(key);
        Ok(())
    }

    fn remove_edge(&mut self, key: &EdgeKey) -> Result<Edge> {
        let (source, target) = self.endpoints(key)?;
        if self.store.get(source, target, &key.label).is_none() {
            return Err(GraphError::EdgeNotFound { key: key.clone() });
        }

        self.core.detach_edge(key);
        let edge = self
            .store
            .remove(source, target, &key.label)
            .ok_or_else(|| GraphError::EdgeNotFound { key: key.clone() })?;
        self.core.edges_taken(1);
        Ok(edge)
    }

    fn remove_edges(&mut self) {
        for key in self.edges().into_iter().map(Edge::key).collect::<Vec<_>>() {
            self.core.detach_edge(&key);
        }
        let removed = self.store.take_edges();
        self.core.edges_taken(removed.len());
    }

    fn edge(&self, key: &EdgeKey) -> Option<&Edge> {
        let (source, target) = self.endpoints(key).ok()?;
        self.store.get(source, target, &key.label)
    }

    fn outgoing_edges(&self, id: NodeId) -> Result<Vec<&Edge>> {
        Ok(self.store.outgoing(self.core.index_of(id)?))
    }

    fn incoming_edges(&self, id: NodeId) -> Result<Vec<&Edge>> {
        Ok(self.store.incoming(self.core.index_of(id)?))
    }

    fn set_node_label(&mut self, id: NodeId, label: Label) -> Result<()> {
        self.core.update_node(id, |node| node.label = label)
    }

    fn set_node_color(&mut self, id: NodeId, color: Rgb) -> Result<()> {
        self.core.update_node(id, |node| node.color = color)
    }

    fn set_node_coords(&mut self, id: NodeId, coords: Point) -> Result<()> {
        self.core.update_node(id, |node| node.coords = coords)
    }

    fn set_edge_color(&mut self, key: &EdgeKey, color: Rgb) -> Result<()> {
        self.edge_mut(key)?.color = color;
        self.core
            .subscriptions
            .notify_edge(key, &GraphEvent::EdgeChanged(key.clone()));
        Ok(())
    }

    fn subscribe(&mut self, observer: Weak<dyn GraphObserver>) {
        self.core.subscriptions.subscribe(observer);
    }

    fn subscribe_node(&mut self, id: NodeId, observer: Weak<dyn GraphObserver>) -> Result<()> {
        self.core.index_of(id)?;
        self.core.subscriptions.subscribe_node(id, observer);
        Ok(())
    }

    fn subscribe_edge(&mut self, key: &EdgeKey, observer: Weak<dyn GraphObserver>) -> Result<()> {
        if self.edge(key).is_none() {
            return Err(GraphError::EdgeNotFound { key: key.clone() });
        }
        self.core.subscriptions.subscribe_edge(key.clone(), observer);
        Ok(())
    }

    fn drain_changes(&mut self) -> ChangeSet {
        self.core.drain_changes()
    }

    fn dump(&self, style: DumpStyle) -> String {
        self.store.render(&self.core.name, &self.core.nodes, style)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::observer::EventRecorder;

    fn path(n: usize) -> (ListGraph, Vec<NodeId>) {
        let mut graph = ListGraph::with_name("path");
        let ids: Vec<NodeId> = (0..n)
            .map(|i| graph.add_node(Node::new(i)).unwrap())
            .collect();
        for w in ids.windows(2) {
            graph.add_edge(w[0], w[1], Label::default()).unwrap();
        }
        (graph, ids)
    }

    #[test]
    fn conversion_keeps_identity() {
        let (mut list, ids) = path(4);
        list.set_edge_color(&EdgeKey::new(ids[0], ids[1], ""), Rgb::RED)
            .unwrap();

        let recorder = Rc::new(EventRecorder::default());
        let observer: Rc<dyn GraphObserver> = recorder.clone();
        list.subscribe_node(ids[2], Rc::downgrade(&observer)).unwrap();
        list.subscribe_edge(&EdgeKey::new(ids[1], ids[2], ""), Rc::downgrade(&observer))
            .unwrap();

        let before = list.integer_matrix();
        let matrix: MatrixGraph = list.into_representation();

        assert_eq!(matrix.integer_matrix(), before);
        assert_eq!(matrix.node_ids(), ids);
        assert_eq!(matrix.name(), "path");
        assert_eq!(
            matrix.edge(&EdgeKey::new(ids[0], ids[1], "")).unwrap().color,
            Rgb::RED
        );
        assert_eq!(
            recorder.take(),
            vec![
                GraphEvent::Relocated(Representation::Matrix),
                GraphEvent::Relocated(Representation::Matrix)
            ]
        );
    }

    #[test]
    fn two_phase_removal_notifies_before_release() {
        let (mut graph, ids) = path(3);
        let recorder = Rc::new(EventRecorder::default());
        let observer: Rc<dyn GraphObserver> = recorder.clone();
        graph.subscribe(Rc::downgrade(&observer));

        graph.remove_node(ids[1]).unwrap();
        assert_eq!(
            recorder.take(),
            vec![
                GraphEvent::EdgeRemoving(EdgeKey::new(ids[1], ids[2], "")),
                GraphEvent::EdgeRemoving(EdgeKey::new(ids[0], ids[1], "")),
                GraphEvent::NodeRemoving(ids[1]),
            ]
        );
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.node_to_index(ids[2]), Some(1));
    }

    #[test]
    fn stamps_track_structure_only() {
        let (mut graph, ids) = path(3);
        let stamp = graph.stamp();

        graph.set_node_color(ids[0], Rgb::GREEN).unwrap();
        assert_eq!(graph.stamp(), stamp);

        graph.remove_edge_at(0, 1, &Label::default()).unwrap();
        assert_ne!(graph.stamp(), stamp);
        assert_eq!(graph.stamp().instance, stamp.instance);

        let (other, _) = path(3);
        assert_ne!(other.stamp().instance, stamp.instance);
    }
}
