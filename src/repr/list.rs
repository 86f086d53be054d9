use std::fmt::Write;

use itertools::Itertools;

use super::*;
use crate::testing::test_graph_ops;

/// Outgoing edges of a single node.
///
/// The head refers to the node itself and anchors its first self-edge, so a node without
/// self-edges has an empty anchor instead of a list entry.
#[derive(Debug, Clone)]
struct AdjacencyList {
    head: NodeId,
    anchor: Option<Edge>,
    entries: Vec<Edge>,
}

impl AdjacencyList {
    fn new(head: NodeId) -> Self {
        Self {
            head,
            anchor: None,
            entries: Vec::new(),
        }
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.anchor.iter().chain(self.entries.iter())
    }

    fn len(&self) -> usize {
        usize::from(self.anchor.is_some()) + self.entries.len()
    }
}

/// Edge storage with one [`AdjacencyList`] per node
#[derive(Debug, Default, Clone)]
pub struct AdjacencyStore {
    lists: Vec<AdjacencyList>,
}

/// Sparse adjacency-list graph
pub type ListGraph = BaseGraph<AdjacencyStore>;

impl EdgeStore for AdjacencyStore {
    const REPRESENTATION: Representation = Representation::List;

    fn push_node(&mut self, id: NodeId) {
        self.lists.push(AdjacencyList::new(id));
    }

    fn remove_node(&mut self, index: usize) -> Vec<Edge> {
        let list = self.lists.remove(index);
        let id = list.head;

        let mut removed = Vec::with_capacity(list.len());
        removed.extend(list.anchor);
        removed.extend(list.entries);

        for other in &mut self.lists {
            let (gone, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut other.entries)
                .into_iter()
                .partition(|e| e.target() == id);
            other.entries = kept;
            removed.extend(gone);
        }

        removed
    }

    fn insert(&mut self, source: usize, _target: usize, edge: Edge) {
        let list = &mut self.lists[source];
        if edge.is_self_edge() && list.anchor.is_none() {
            list.anchor = Some(edge);
        } else {
            list.entries.push(edge);
        }
    }

    fn remove(&mut self, source: usize, target: usize, label: &Label) -> Option<Edge> {
        let target = self.lists[target].head;
        let list = &mut self.lists[source];

        if list
            .anchor
            .as_ref()
            .is_some_and(|e| e.matches(list.head, target, label))
        {
            return list.anchor.take();
        }

        let position = list
            .entries
            .iter()
            .position(|e| e.matches(list.head, target, label))?;
        Some(list.entries.remove(position))
    }

    fn get(&self, source: usize, target: usize, label: &Label) -> Option<&Edge> {
        let target = self.lists[target].head;
        let list = &self.lists[source];
        list.edges().find(|e| e.matches(list.head, target, label))
    }

    fn get_mut(&mut self, source: usize, target: usize, label: &Label) -> Option<&mut Edge> {
        let target = self.lists[target].head;
        let list = &mut self.lists[source];
        let head = list.head;
        list.anchor
            .iter_mut()
            .chain(list.entries.iter_mut())
            .find(|e| e.matches(head, target, label))
    }

    fn outgoing(&self, index: usize) -> Vec<&Edge> {
        self.lists[index].edges().collect()
    }

    fn incoming(&self, index: usize) -> Vec<&Edge> {
        let id = self.lists[index].head;
        self.lists
            .iter()
            .flat_map(AdjacencyList::edges)
            .filter(|e| e.target() == id)
            .collect()
    }

    fn take_edges(&mut self) -> Vec<Edge> {
        self.lists
            .iter_mut()
            .flat_map(|list| list.anchor.take().into_iter().chain(list.entries.drain(..)))
            .collect()
    }

    fn clear(&mut self) {
        self.lists.clear();
    }

    /// One line per node: `node|anchor` followed by `-> target|"label"` for every other edge.
    fn render(&self, name: &str, nodes: &[Node], style: DumpStyle) -> String {
        let lookup = |id: NodeId| {
            nodes
                .iter()
                .position(|n| n.id() == id)
                .map_or_else(|| id.to_string(), |i| node_ref(i, &nodes[i], style))
        };

        let mut out = format!("GraphName: {name}\n");
        for (i, (list, node)) in self.lists.iter().zip(nodes).enumerate() {
            let anchor = list
                .anchor
                .as_ref()
                .map_or_else(|| "N/A".to_string(), |e| format!("\"{}\"", e.label));
            let entries = list
                .entries
                .iter()
                .map(|e| format!(" -> {}|\"{}\"", lookup(e.target()), e.label))
                .join("");
            let _ = writeln!(out, "{}|{}{}", node_ref(i, node, style), anchor, entries);
        }
        out
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_list_graph,
    ListGraph,
    (
        Basics,
        NodeIdentity,
        ChangeLog,
        Observers,
        Recreate,
        RandomOperations
    )
);
