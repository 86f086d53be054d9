//! Bookkeeping shared by every representation: the owned node sequence, the id→index lookup,
//! the edge counter, the identity stamp, the change log and the observer side-table.

use std::sync::atomic::{AtomicU64, Ordering};

use fxhash::FxHashMap;
use tracing::trace;

use crate::{
    edge::EdgeKey,
    error::{GraphError, Result},
    node::{Node, NodeId},
    observer::{ChangeSet, GraphEvent, Subscriptions},
};

use super::EdgeStore;

static NEXT_GRAPH_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// Identity of a graph in a given structural state.
///
/// `instance` is unique per constructed graph, `revision` grows with every structural mutation.
/// Stepwise algorithms compare stamps to detect that they must start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphStamp {
    pub instance: u64,
    pub revision: u64,
}

#[derive(Debug)]
pub struct GraphCore {
    pub(super) name: String,
    pub(super) nodes: Vec<Node>,
    index: FxHashMap<NodeId, usize>,
    pub(super) number_of_edges: usize,
    stamp: GraphStamp,
    changes: ChangeSet,
    pub(super) subscriptions: Subscriptions,
}

impl Default for GraphCore {
    fn default() -> Self {
        Self {
            name: String::new(),
            nodes: Vec::new(),
            index: FxHashMap::default(),
            number_of_edges: 0,
            stamp: GraphStamp {
                instance: NEXT_GRAPH_INSTANCE.fetch_add(1, Ordering::Relaxed),
                revision: 0,
            },
            changes: ChangeSet::default(),
            subscriptions: Subscriptions::default(),
        }
    }
}

impl GraphCore {
    pub fn stamp(&self) -> GraphStamp {
        self.stamp
    }

    /// Marks a structural mutation
    pub(super) fn touch(&mut self) {
        self.stamp.revision += 1;
    }

    pub fn index_of(&self, id: NodeId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::NodeNotFound { id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Changes a node attribute and notifies observers
    pub(super) fn update_node<F: FnOnce(&mut Node)>(&mut self, id: NodeId, update: F) -> Result<()> {
        let index = self.index_of(id)?;
        update(&mut self.nodes[index]);
        self.subscriptions
            .notify_node(id, &GraphEvent::NodeChanged(id));
        Ok(())
    }

    /// Appends a node and returns its index.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id is already present.
    pub(super) fn push_node(&mut self, node: Node) -> Result<usize> {
        let id = node.id();
        if self.contains(id) {
            return Err(GraphError::DuplicateNode { id });
        }

        trace!(node = %node, "adding node");
        let index = self.nodes.len();
        self.index.insert(id, index);
        self.nodes.push(node);
        self.changes.added_nodes.push(id);
        self.touch();
        self.subscriptions.notify_node(id, &GraphEvent::NodeAdded(id));
        Ok(index)
    }

    /// First phase of removing a node: notify dependents and drop their registrations
    pub(super) fn detach_node(&mut self, id: NodeId) {
        self.subscriptions
            .notify_node(id, &GraphEvent::NodeRemoving(id));
        self.subscriptions.detach_node(id);
        self.changes.removed_nodes.push(id);
    }

    /// Second phase of removing a node: take it out of the sequence
    pub(super) fn take_node(&mut self, index: usize) -> Node {
        let node = self.nodes.remove(index);
        self.index.remove(&node.id());
        for (i, later) in self.nodes.iter().enumerate().skip(index) {
            self.index.insert(later.id(), i);
        }
        self.touch();
        trace!(node = %node, "removed node");
        node
    }

    /// Second phase of removing all nodes
    pub(super) fn take_nodes(&mut self) -> Vec<Node> {
        self.index.clear();
        self.touch();
        std::mem::take(&mut self.nodes)
    }

    pub(super) fn edge_added(&mut self, key: EdgeKey) {
        trace!(edge = %key, "adding edge");
        self.number_of_edges += 1;
        self.touch();
        self.subscriptions
            .notify_edge(&key, &GraphEvent::EdgeAdded(key.clone()));
        self.changes.added_edges.push(key);
    }

    /// First phase of removing an edge: notify dependents and drop their registrations
    pub(super) fn detach_edge(&mut self, key: &EdgeKey) {
        self.subscriptions
            .notify_edge(key, &GraphEvent::EdgeRemoving(key.clone()));
        self.subscriptions.detach_edge(key);
        self.changes.removed_edges.push(key.clone());
    }

    /// Second phase of removing `count` edges
    pub(super) fn edges_taken(&mut self, count: usize) {
        debug_assert!(count <= self.number_of_edges);
        self.number_of_edges -= count;
        self.touch();
    }

    pub(super) fn drain_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    /// Tells every observer whose entity still resolves in `store` that it now lives there.
    /// Registrations of entities that do not resolve are dropped.
    pub(super) fn relocate<S: EdgeStore>(&mut self, store: &S) {
        let Self {
            index,
            subscriptions,
            ..
        } = self;

        let event = GraphEvent::Relocated(S::REPRESENTATION);
        subscriptions.notify_graph(&event);
        subscriptions.notify_all_entities(
            &event,
            |id| index.contains_key(&id),
            |key| match (index.get(&key.source), index.get(&key.target)) {
                (Some(&source), Some(&target)) => store.get(source, target, &key.label).is_some(),
                _ => false,
            },
        );
    }
}
