use std::fmt::Write;

use itertools::Itertools;
use smallvec::SmallVec;

use super::*;
use crate::testing::test_graph_ops;

/// All edges from one node to another; almost always zero or one
type Cell = SmallVec<[Edge; 1]>;

/// Edge storage as an `N x N` matrix of [`Cell`]s; `cells[source][target]`
#[derive(Debug, Default, Clone)]
pub struct MatrixStore {
    cells: Vec<Vec<Cell>>,
}

/// Dense adjacency-matrix graph
pub type MatrixGraph = BaseGraph<MatrixStore>;

impl MatrixStore {
    /// Appends an empty row and column
    fn extend_matrix(&mut self) {
        for row in &mut self.cells {
            row.push(Cell::new());
        }
        let n = self.cells.len() + 1;
        self.cells.push(vec![Cell::new(); n]);
    }

    /// Drops row and column `index`; both must be empty
    fn retract_matrix(&mut self, index: usize) {
        debug_assert!(self.cells[index].iter().all(Cell::is_empty));
        self.cells.remove(index);
        for row in &mut self.cells {
            debug_assert!(row[index].is_empty());
            row.remove(index);
        }
    }

    /// Takes every edge out of row and column `index`
    fn delete_edges_between_nodes(&mut self, index: usize) -> Vec<Edge> {
        let mut removed: Vec<Edge> = self.cells[index]
            .iter_mut()
            .flat_map(|cell| cell.drain(..))
            .collect();
        for row in &mut self.cells {
            removed.extend(row[index].drain(..));
        }
        removed
    }

    /// Largest number of parallel edges in any cell
    fn depth(&self) -> usize {
        self.cells.iter().flatten().map(Cell::len).max().unwrap_or(0)
    }
}

impl EdgeStore for MatrixStore {
    const REPRESENTATION: Representation = Representation::Matrix;

    fn push_node(&mut self, _id: NodeId) {
        self.extend_matrix();
    }

    fn remove_node(&mut self, index: usize) -> Vec<Edge> {
        let removed = self.delete_edges_between_nodes(index);
        self.retract_matrix(index);
        removed
    }

    fn insert(&mut self, source: usize, target: usize, edge: Edge) {
        self.cells[source][target].push(edge);
    }

    fn remove(&mut self, source: usize, target: usize, label: &Label) -> Option<Edge> {
        let cell = &mut self.cells[source][target];
        let position = cell.iter().position(|e| e.label == *label)?;
        Some(cell.remove(position))
    }

    fn get(&self, source: usize, target: usize, label: &Label) -> Option<&Edge> {
        self.cells[source][target].iter().find(|e| e.label == *label)
    }

    fn get_mut(&mut self, source: usize, target: usize, label: &Label) -> Option<&mut Edge> {
        self.cells[source][target]
            .iter_mut()
            .find(|e| e.label == *label)
    }

    fn outgoing(&self, index: usize) -> Vec<&Edge> {
        self.cells[index].iter().flatten().collect()
    }

    fn incoming(&self, index: usize) -> Vec<&Edge> {
        self.cells.iter().flat_map(|row| row[index].iter()).collect()
    }

    fn take_edges(&mut self) -> Vec<Edge> {
        self.cells
            .iter_mut()
            .flatten()
            .flat_map(|cell| cell.drain(..))
            .collect()
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    /// Renders one layer per multiplicity depth. In layer `k`, every cell shows the label of
    /// its `k`-th edge, `.` if it has fewer edges and a blank if that label is empty.
    fn render(&self, name: &str, nodes: &[Node], style: DumpStyle) -> String {
        let mut out = format!("GraphName: {name}\n");
        let _ = writeln!(
            out,
            "nodes[{}]: {}",
            nodes.len(),
            nodes
                .iter()
                .enumerate()
                .map(|(i, n)| node_ref(i, n, style))
                .join(" ")
        );

        for layer in 0..self.depth().max(1) {
            let _ = writeln!(out, "layer {layer}:");
            for row in &self.cells {
                let line = row
                    .iter()
                    .map(|cell| match cell.get(layer) {
                        None => ".".to_string(),
                        Some(edge) if edge.label.is_empty() => " ".to_string(),
                        Some(edge) => edge.label.to_string(),
                    })
                    .join(" ");
                let _ = writeln!(out, "{line}");
            }
        }
        out
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_matrix_graph,
    MatrixGraph,
    (
        Basics,
        NodeIdentity,
        ChangeLog,
        Observers,
        Recreate,
        RandomOperations
    )
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_grows_and_shrinks() {
        let mut graph = MatrixGraph::with_name("m");
        let ids: Vec<NodeId> = ["a", "b", "c"]
            .into_iter()
            .map(|l| graph.add_node(Node::new(l)).unwrap())
            .collect();

        graph.add_edge(ids[0], ids[1], Label::from("1")).unwrap();
        graph.add_edge(ids[0], ids[1], Label::from("2")).unwrap();
        graph.add_edge(ids[2], ids[2], Label::default()).unwrap();
        assert!(matches!(
            graph.add_edge(ids[0], ids[1], Label::from("2")),
            Err(GraphError::DuplicateEdge { .. })
        ));

        assert_eq!(
            graph.dump(DumpStyle::Labels),
            "GraphName: m\nnodes[3]: a b c\nlayer 0:\n. 1 .\n. . .\n. .  \nlayer 1:\n. 2 .\n. . .\n. . .\n"
        );
        assert_eq!(graph.incoming_edges(ids[1]).unwrap().len(), 2);

        graph.remove_node(ids[1]).unwrap();
        assert_eq!(graph.store.cells.len(), 2);
        assert!(graph.store.cells.iter().all(|row| row.len() == 2));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.outgoing_edges(ids[2]).unwrap()[0].target(), ids[2]);
    }

    #[test]
    fn index_dump_follows_node_order() {
        let mut graph = MatrixGraph::with_name("m");
        let ids: Vec<NodeId> = ["a", "b", "c"]
            .into_iter()
            .map(|l| graph.add_node(Node::new(l)).unwrap())
            .collect();
        graph.add_edge(ids[1], ids[2], Label::from("x")).unwrap();
        graph.add_edge(ids[2], ids[2], Label::default()).unwrap();

        graph.remove_node(ids[0]).unwrap();
        assert_eq!(
            graph.dump(DumpStyle::Indices),
            "GraphName: m\nnodes[2]: 0 1\nlayer 0:\n. x\n.  \n"
        );
    }
}
