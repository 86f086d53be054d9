/*!
# graph6

A graph6 file stores a single undirected simple graph in one line:
```text
[>>graph6<<]N(n)R(x)
```
where `N(n)` is the size encoding of [`header`](super::header) and `R(x)` is the upper triangle
of the adjacency matrix, read column by column (`(0,1), (0,2), (1,2), (0,3), ...`), right-padded
with zeros to a multiple of 6 bits and packed into printable bytes.

graph6 has no room for loops and parallel edges; the writer drops them with a warning.

# Examples
```
use graphkit::prelude::*;
use graphkit::io::*;

let mut g = ListGraph::new();
let ids: Vec<NodeId> = (0..3).map(|i| g.add_node(Node::new(i)).unwrap()).collect();
g.add_edge(ids[0], ids[1], Label::default()).unwrap();
g.add_edge(ids[1], ids[2], Label::default()).unwrap();
g.add_edge(ids[2], ids[0], Label::default()).unwrap();

let mut buffer = Vec::new();
Graph6Writer::new().try_write_graph(&g, &mut buffer).unwrap();
assert_eq!(buffer, b">>graph6<<Bw\n");
```
*/

use tracing::warn;

use super::*;
use crate::config::CodecConfig;

/// A configurable reader for the **graph6 format**.
#[derive(Debug, Clone, Default)]
pub struct Graph6Reader {
    /// Reject input without `>>graph6<<`
    require_header: bool,
}

impl Graph6Reader {
    /// Creates a new [`Graph6Reader`] that accepts input with and without header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates whether the header is mandatory
    pub fn set_require_header(&mut self, require: bool) {
        self.require_header = require;
    }

    /// Updates whether the header is mandatory, consuming and returning `self` for chaining.
    pub fn require_header(mut self, require: bool) -> Self {
        self.set_require_header(require);
        self
    }
}

impl GraphReader for Graph6Reader {
    fn format(&self) -> FileFormat {
        FileFormat::Graph6
    }

    fn try_read_matrix<R>(&self, reader: R) -> Result<IntegerMatrix>
    where
        R: Read,
    {
        let format = FileFormat::Graph6;
        let line = read_line(reader)?;
        raise_error_unless!(!line.is_empty(), format, "empty input");
        raise_error_unless!(
            !self.require_header || line.starts_with(format.header().as_bytes()),
            format,
            "missing file header"
        );

        let body = strip_header(&line, format)?;
        let (n, body) = decode_size(body, format)?;

        let pairs = n * n.saturating_sub(1) / 2;
        raise_error_unless!(
            body.len() == pairs.div_ceil(BITS_PER_BYTE),
            format,
            format!(
                "expected {} bytes of adjacency data for {n} nodes, found {}",
                pairs.div_ceil(BITS_PER_BYTE),
                body.len()
            )
        );
        let bits = BitVector::from_bytes(body)
            .map_err(|byte| GraphError::format(format, format!("invalid byte {byte}")))?;

        let mut matrix = IntegerMatrix::with_nodes(n);
        let mut bits = bits.iter();
        for i in 1..n {
            for j in 0..i {
                if bits.next() == Some(true) {
                    matrix.increment(j, i);
                    matrix.increment(i, j);
                }
            }
        }
        Ok(matrix)
    }
}

/// A configurable writer for the **graph6 format**.
#[derive(Debug, Clone)]
pub struct Graph6Writer {
    /// Start the output with `>>graph6<<`
    header: bool,
    /// End the output with `\n`
    trailing_newline: bool,
}

impl Default for Graph6Writer {
    fn default() -> Self {
        Self {
            header: true,
            trailing_newline: true,
        }
    }
}

impl Graph6Writer {
    /// Creates a new [`Graph6Writer`] that writes the header and a trailing newline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new()
            .header(config.header)
            .trailing_newline(config.trailing_newline)
    }

    pub fn set_header(&mut self, header: bool) {
        self.header = header;
    }

    /// Updates whether the header is written, consuming and returning `self` for chaining.
    pub fn header(mut self, header: bool) -> Self {
        self.set_header(header);
        self
    }

    pub fn set_trailing_newline(&mut self, newline: bool) {
        self.trailing_newline = newline;
    }

    /// Updates whether a newline ends the output, consuming and returning `self` for chaining.
    pub fn trailing_newline(mut self, newline: bool) -> Self {
        self.set_trailing_newline(newline);
        self
    }

    fn encode(&self, matrix: &IntegerMatrix) -> Result<Vec<u8>> {
        let format = FileFormat::Graph6;
        let n = matrix.number_of_nodes();
        let rows = matrix.rows();

        let mut out = Vec::new();
        if self.header {
            out.extend_from_slice(format.header().as_bytes());
        }
        encode_size(n, format, &mut out)?;

        let mut bits = BitVector::with_capacity(n * n.saturating_sub(1) / 2 + BITS_PER_BYTE);
        let mut lossy = (0..n).any(|i| rows[i][i] > 0);
        for i in 1..n {
            for j in 0..i {
                let multiplicity = rows[i][j].max(rows[j][i]);
                lossy |= multiplicity > 1;
                bits.append(multiplicity > 0);
            }
        }
        if lossy {
            warn!("graph6 cannot store loops or parallel edges, they are not written");
        }

        bits.pad_right(BITS_PER_BYTE, false);
        out.extend(bits.to_bytes());
        if self.trailing_newline {
            out.push(b'\n');
        }
        Ok(out)
    }
}

impl GraphWriter for Graph6Writer {
    fn format(&self) -> FileFormat {
        FileFormat::Graph6
    }

    fn try_write_matrix<W>(&self, matrix: &IntegerMatrix, writer: W) -> Result<()>
    where
        W: Write,
    {
        write_all(writer, &self.encode(matrix)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        error::Severity,
        label::Label,
        node::{Node, NodeId},
        repr::{HybridGraph, ListGraph, MatrixGraph},
    };

    fn triangle() -> ListGraph {
        let mut graph = ListGraph::with_name("triangle");
        let ids: Vec<NodeId> = ["a", "b", "c"]
            .into_iter()
            .map(|l| graph.add_node(Node::new(l)).unwrap())
            .collect();
        for i in 0..3 {
            graph
                .add_edge(ids[i], ids[(i + 1) % 3], Label::default())
                .unwrap();
        }
        graph
    }

    #[test]
    fn triangle_scenario() {
        let mut buffer = Vec::new();
        Graph6Writer::new()
            .try_write_graph(&triangle(), &mut buffer)
            .unwrap();
        assert_eq!(buffer, b">>graph6<<Bw\n");

        let mut graph = MatrixGraph::new();
        graph.try_read_from(buffer.as_slice(), FileFormat::Graph6).unwrap();
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 6);

        let matrix = graph.integer_matrix();
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.labels(), &[Label::from(0), Label::from(1), Label::from(2)]);
        assert!((0..3).all(|i| matrix.multiplicity(i, i) == 0));
    }

    #[test]
    fn writer_options() {
        let mut buffer = Vec::new();
        Graph6Writer::new()
            .header(false)
            .trailing_newline(false)
            .try_write_graph(&triangle(), &mut buffer)
            .unwrap();
        assert_eq!(buffer, b"Bw");

        let mut buffer = Vec::new();
        Graph6Writer::new()
            .try_write_matrix(&IntegerMatrix::new(), &mut buffer)
            .unwrap();
        assert_eq!(buffer, b">>graph6<<?\n");
    }

    #[test]
    fn lossy_input_is_reduced() {
        let mut matrix = IntegerMatrix::with_nodes(2);
        matrix.add_edge(0, 1).unwrap();
        matrix.add_edge(0, 1).unwrap();
        matrix.add_edge(1, 1).unwrap();

        let mut buffer = Vec::new();
        Graph6Writer::new()
            .header(false)
            .try_write_matrix(&matrix, &mut buffer)
            .unwrap();
        assert_eq!(buffer, b"A_\n");
        assert_eq!(
            Graph6Reader::new().try_read_matrix(buffer.as_slice()).unwrap(),
            IntegerMatrix::from_edges(2, [(0, 1), (1, 0)]).unwrap()
        );
    }

    #[test]
    fn round_trips_are_byte_identical() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        for n in [0, 1, 2, 5, 17, 62, 63, 70] {
            let mut matrix = IntegerMatrix::with_nodes(n);
            for i in 1..n {
                for j in 0..i {
                    if rng.random_bool(0.3) {
                        matrix.add_edge(i, j).unwrap();
                        matrix.add_edge(j, i).unwrap();
                    }
                }
            }

            let writer = Graph6Writer::new();
            let mut first = Vec::new();
            writer.try_write_matrix(&matrix, &mut first).unwrap();

            let read = Graph6Reader::new().try_read_matrix(first.as_slice()).unwrap();
            assert_eq!(read, matrix);

            let mut second = Vec::new();
            writer.try_write_matrix(&read, &mut second).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn invalid_input_leaves_graph_untouched() {
        let mut graph = triangle();
        let before = graph.integer_matrix();

        for input in [
            &b""[..],
            b">>graph6<Bw",
            b"B",
            b"Bww",
            b"B\x7f",
            b">>sparse6<<:Bf",
        ] {
            let err = graph.try_read_from(input, FileFormat::Graph6).unwrap_err();
            assert!(matches!(err, GraphError::InvalidFormat { .. }), "{err}");
        }
        assert!(Graph6Reader::new()
            .require_header(true)
            .try_read_matrix(&b"Bw"[..])
            .is_err());

        assert_eq!(graph.integer_matrix(), before);
        assert_eq!(graph.name(), "triangle");
    }

    #[test]
    fn files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycle.g6");
        triangle().try_write_to_file(&path, FileFormat::Graph6).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b">>graph6<<Bw\n");

        let mut graph = HybridGraph::new();
        graph.try_read_from_file(&path, FileFormat::Graph6).unwrap();
        assert_eq!(graph.name(), "cycle");
        assert_eq!(graph.number_of_edges(), 6);

        let err = graph
            .try_read_from_file(dir.path().join("missing.g6"), FileFormat::Graph6)
            .unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
        assert_eq!(err.severity(), Severity::Critical);
        assert_eq!(graph.name(), "cycle");
    }
}
