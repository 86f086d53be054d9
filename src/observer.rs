/*!
# Observing Graphs

Every structural change of a graph is observable twice:
- it is recorded in a [`ChangeSet`] that can be drained with
  [`Graph::drain_changes`](crate::ops::Graph::drain_changes), and
- it is delivered as a [`GraphEvent`] to subscribed [`GraphObserver`]s.

Subscriptions are held in a side-table ([`Subscriptions`]) keyed by [`NodeId`] and [`EdgeKey`]
rather than on the entities themselves. The graph only keeps [`Weak`] references, so observers
are never kept alive by the graph, and entity identity survives a change of representation
without any re-matching.
*/

use std::rc::Weak;

use fxhash::FxHashMap;

use crate::{edge::EdgeKey, node::NodeId, repr::Representation};

/// A change delivered to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    NodeAdded(NodeId),
    /// Label, color or coordinates of a node changed
    NodeChanged(NodeId),
    /// First phase of a node removal; the node is still intact
    NodeRemoving(NodeId),
    EdgeAdded(EdgeKey),
    /// Color of an edge changed
    EdgeChanged(EdgeKey),
    /// First phase of an edge removal; the edge is still intact
    EdgeRemoving(EdgeKey),
    /// The graph was renamed
    Renamed,
    /// The entity now lives in a different representation
    Relocated(Representation),
}

/// Receives [`GraphEvent`]s of the entities it subscribed to.
///
/// Observers are stored as `Weak` references and must use interior mutability.
pub trait GraphObserver {
    fn notify(&self, event: &GraphEvent);
}

/// Nodes and edges added or removed since the last drain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub added_edges: Vec<EdgeKey>,
    pub removed_edges: Vec<EdgeKey>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
    }
}

type ObserverList = Vec<Weak<dyn GraphObserver>>;

/// Delivers `event` to every live observer in `list` and forgets the dead ones
fn deliver(list: &mut ObserverList, event: &GraphEvent) {
    list.retain(|observer| match observer.upgrade() {
        Some(observer) => {
            observer.notify(event);
            true
        }
        None => false,
    });
}

/// Side-table of observer registrations
#[derive(Default)]
pub struct Subscriptions {
    graph: ObserverList,
    nodes: FxHashMap<NodeId, ObserverList>,
    edges: FxHashMap<EdgeKey, ObserverList>,
}

impl Subscriptions {
    /// Subscribes to every event of the graph
    pub fn subscribe(&mut self, observer: Weak<dyn GraphObserver>) {
        self.graph.push(observer);
    }

    /// Subscribes to events of a single node
    pub fn subscribe_node(&mut self, id: NodeId, observer: Weak<dyn GraphObserver>) {
        self.nodes.entry(id).or_default().push(observer);
    }

    /// Subscribes to events of a single edge
    pub fn subscribe_edge(&mut self, key: EdgeKey, observer: Weak<dyn GraphObserver>) {
        self.edges.entry(key).or_default().push(observer);
    }

    /// Number of entities that currently have observers attached
    pub fn number_of_subscribed_entities(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Notifies graph observers about an event that concerns no single entity
    pub fn notify_graph(&mut self, event: &GraphEvent) {
        deliver(&mut self.graph, event);
    }

    /// Notifies graph observers and the observers of node `id`
    pub fn notify_node(&mut self, id: NodeId, event: &GraphEvent) {
        deliver(&mut self.graph, event);
        if let Some(list) = self.nodes.get_mut(&id) {
            deliver(list, event);
        }
    }

    /// Notifies graph observers and the observers of edge `key`
    pub fn notify_edge(&mut self, key: &EdgeKey, event: &GraphEvent) {
        deliver(&mut self.graph, event);
        if let Some(list) = self.edges.get_mut(key) {
            deliver(list, event);
        }
    }

    /// Drops all registrations of node `id`
    pub fn detach_node(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    /// Drops all registrations of edge `key`
    pub fn detach_edge(&mut self, key: &EdgeKey) {
        self.edges.remove(key);
    }

    /// Sends `event` to the observers of every subscribed node and edge accepted by the filters.
    /// Entities rejected by a filter lose their registrations.
    pub fn notify_all_entities<N, E>(&mut self, event: &GraphEvent, mut keep_node: N, mut keep_edge: E)
    where
        N: FnMut(NodeId) -> bool,
        E: FnMut(&EdgeKey) -> bool,
    {
        self.nodes.retain(|id, list| {
            keep_node(*id) && {
                deliver(list, event);
                !list.is_empty()
            }
        });
        self.edges.retain(|key, list| {
            keep_edge(key) && {
                deliver(list, event);
                !list.is_empty()
            }
        });
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("graph", &self.graph.len())
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

/// Observer that records every event it receives; useful in tests and for simple consumers
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: std::cell::RefCell<Vec<GraphEvent>>,
}

impl EventRecorder {
    /// Returns all events received so far and forgets them
    pub fn take(&self) -> Vec<GraphEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl GraphObserver for EventRecorder {
    fn notify(&self, event: &GraphEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
