//! The [`IntegerMatrix`] is the representation-free form of a graph: a square matrix of edge
//! multiplicities plus the ordered node labels. It carries no edge metadata and is the pivot
//! used by the codecs and when converting between representations.

use std::fmt;

use itertools::Itertools;

use crate::{
    error::{GraphError, Result},
    label::Label,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IntegerMatrix {
    matrix: Vec<Vec<u32>>,
    labels: Vec<Label>,
}

impl IntegerMatrix {
    /// Creates an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edgeless matrix of `n` nodes labelled `0..n`
    pub fn with_nodes(n: usize) -> Self {
        let mut result = Self::default();
        result.reserve(n);
        for i in 0..n {
            result.add_node(i);
        }
        result
    }

    /// Creates a matrix of `n` nodes from an iterator of `(source, target)` index pairs.
    /// Repeated pairs increase the multiplicity.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeIndexOutOfRange`] if an index is `>= n`.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut result = Self::with_nodes(n);
        for (source, target) in edges {
            result.add_edge(source, target)?;
        }
        Ok(result)
    }

    pub fn reserve(&mut self, additional: usize) {
        self.matrix.reserve(additional);
        self.labels.reserve(additional);
    }

    pub fn number_of_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Sum of all multiplicities
    pub fn number_of_edges(&self) -> usize {
        self.matrix.iter().flatten().map(|&k| k as usize).sum()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.matrix
    }

    /// Number of edges from `source` to `target`
    /// ** Panics if an index is out of range **
    pub fn multiplicity(&self, source: usize, target: usize) -> u32 {
        self.matrix[source][target]
    }

    /// Returns the index of the first node with the given label
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Appends a new node and returns its index
    pub fn add_node<L: Into<Label>>(&mut self, label: L) -> usize {
        for row in &mut self.matrix {
            row.push(0);
        }
        self.labels.push(label.into());
        self.matrix.push(vec![0; self.labels.len()]);
        self.labels.len() - 1
    }

    /// Removes the node at `index` together with its row and column
    pub fn remove_node(&mut self, index: usize) -> Result<Label> {
        self.check_index(index)?;
        self.matrix.remove(index);
        for row in &mut self.matrix {
            row.remove(index);
        }
        Ok(self.labels.remove(index))
    }

    /// Increases the multiplicity from `source` to `target`
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<()> {
        self.check_index(source)?;
        self.check_index(target)?;
        self.matrix[source][target] += 1;
        Ok(())
    }

    /// Increases the multiplicity without range checks
    /// ** Panics if an index is out of range **
    pub(crate) fn increment(&mut self, source: usize, target: usize) {
        self.matrix[source][target] += 1;
    }

    /// Decreases the multiplicity from `source` to `target`.
    /// Returns *false* if there was no such edge.
    pub fn remove_edge(&mut self, source: usize, target: usize) -> Result<bool> {
        self.check_index(source)?;
        self.check_index(target)?;
        let cell = &mut self.matrix[source][target];
        if *cell == 0 {
            return Ok(false);
        }
        *cell -= 1;
        Ok(true)
    }

    /// Returns *true* if the node at `index` has an incident edge in either direction
    pub fn node_has_edge(&self, index: usize) -> bool {
        index < self.number_of_nodes()
            && (self.matrix[index].iter().any(|&k| k > 0) || self.matrix.iter().any(|row| row[index] > 0))
    }

    /// Returns *true* if the matrix is symmetric
    pub fn is_symmetric(&self) -> bool {
        let n = self.number_of_nodes();
        (0..n).all(|i| (0..i).all(|j| self.matrix[i][j] == self.matrix[j][i]))
    }

    /// Symmetric copy where each pair takes the larger multiplicity of both directions
    pub fn to_undirected(&self) -> Self {
        let mut result = self.clone();
        let n = self.number_of_nodes();
        for i in 0..n {
            for j in 0..i {
                let k = self.matrix[i][j].max(self.matrix[j][i]);
                result.matrix[i][j] = k;
                result.matrix[j][i] = k;
            }
        }
        result
    }

    /// Iterates over all unordered pairs `(j, i)` with `j <= i` that have an edge in either direction
    pub fn undirected_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.number_of_nodes();
        (0..n).flat_map(move |i| {
            (0..=i)
                .filter(move |&j| self.matrix[i][j] > 0 || self.matrix[j][i] > 0)
                .map(move |j| (j, i))
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.number_of_nodes() {
            Ok(())
        } else {
            Err(GraphError::NodeIndexOutOfRange {
                index,
                len: self.number_of_nodes(),
            })
        }
    }
}

impl fmt::Display for IntegerMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes[{}]: {}", self.number_of_nodes(), self.labels.iter().join(" "))?;
        for row in &self.matrix {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_square() {
        let mut m = IntegerMatrix::with_nodes(3);
        m.add_edge(0, 1).unwrap();
        m.add_edge(0, 1).unwrap();
        m.add_edge(2, 2).unwrap();
        assert_eq!(m.number_of_edges(), 3);
        assert_eq!(m.multiplicity(0, 1), 2);

        m.remove_node(1).unwrap();
        assert_eq!(m.number_of_nodes(), 2);
        assert!(m.rows().iter().all(|row| row.len() == 2));
        assert_eq!(m.number_of_edges(), 1);
        assert_eq!(m.labels(), &[Label::from(0), Label::from(2)]);

        assert!(matches!(
            m.add_edge(0, 5),
            Err(GraphError::NodeIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn edge_removal_and_queries() {
        let mut m = IntegerMatrix::from_edges(4, [(1, 2)]).unwrap();
        assert!(m.node_has_edge(2));
        assert!(!m.node_has_edge(3));
        assert!(!m.is_symmetric());

        let undirected = m.to_undirected();
        assert!(undirected.is_symmetric());
        assert_eq!(undirected.multiplicity(2, 1), 1);
        assert_eq!(undirected.undirected_edges().collect_vec(), vec![(1, 2)]);

        assert!(m.remove_edge(1, 2).unwrap());
        assert!(!m.remove_edge(1, 2).unwrap());
        assert_eq!(m.number_of_edges(), 0);
        assert_eq!(m.index_of(&Label::from(3)), Some(3));
    }
}
