/*!
# sparse6

A sparse6 file stores a single undirected graph, possibly with loops and parallel edges:
```text
[>>sparse6<<]:N(n)R(x)
```
The body is a sequence of groups `(b, x)` of one bit `b` and `k` bits `x`, where `k` is the number
of bits needed to write `n - 1`. A decoder keeps a current vertex `v`, starting at `0`:
- if `b = 1`, `v` is incremented first,
- if `x > v`, `v` is set to `x`,
- otherwise the group encodes the edge `{x, v}`.

The final byte is padded with ones; groups pointing beyond the last vertex are discarded.

# Examples
```
use graphkit::io::*;

let matrix = Sparse6Reader::new().try_read_matrix(&b":Fa@x^\n"[..]).unwrap();
assert_eq!(matrix.number_of_nodes(), 7);
assert_eq!(matrix.number_of_edges(), 8);
```
*/

use super::*;
use crate::config::CodecConfig;

/// Number of bits in the `x` part of a group; at least one
fn group_width(n: usize) -> usize {
    let mut k = 1;
    while (1usize << k) < n {
        k += 1;
    }
    k
}

/// A configurable reader for the **sparse6 format**.
#[derive(Debug, Clone, Default)]
pub struct Sparse6Reader {
    /// Reject input without `>>sparse6<<`
    require_header: bool,
}

impl Sparse6Reader {
    /// Creates a new [`Sparse6Reader`] that accepts input with and without header.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_require_header(&mut self, require: bool) {
        self.require_header = require;
    }

    /// Updates whether the header is mandatory, consuming and returning `self` for chaining.
    pub fn require_header(mut self, require: bool) -> Self {
        self.set_require_header(require);
        self
    }
}

impl GraphReader for Sparse6Reader {
    fn format(&self) -> FileFormat {
        FileFormat::Sparse6
    }

    fn try_read_matrix<R>(&self, reader: R) -> Result<IntegerMatrix>
    where
        R: Read,
    {
        let format = FileFormat::Sparse6;
        let line = read_line(reader)?;
        raise_error_unless!(!line.is_empty(), format, "empty input");
        raise_error_unless!(
            !self.require_header || line.starts_with(format.header().as_bytes()),
            format,
            "missing file header"
        );

        let body = strip_header(&line, format)?;
        let Some(body) = body.strip_prefix(b":") else {
            return Err(GraphError::format(format, "missing ':' in front of the data"));
        };
        let (n, body) = decode_size(body, format)?;
        let bits = BitVector::from_bytes(body)
            .map_err(|byte| GraphError::format(format, format!("invalid byte {byte}")))?;

        let mut matrix = IntegerMatrix::with_nodes(n);
        let k = group_width(n);
        let mut v = 0;
        let mut offset = 0;
        while offset + k < bits.len() {
            if bits.bit_at(offset) {
                v += 1;
            }
            let x = bits.int_at(offset + 1, k) as usize;
            offset += k + 1;

            // padding
            if x >= n || v >= n {
                break;
            }

            if x > v {
                v = x;
            } else {
                matrix.increment(x, v);
                if x != v {
                    matrix.increment(v, x);
                }
            }
        }
        Ok(matrix)
    }
}

/// A configurable writer for the **sparse6 format**.
///
/// Edges are written as undirected pairs ordered by their larger endpoint first; the
/// multiplicity of a pair is the larger one of both directions.
#[derive(Debug, Clone)]
pub struct Sparse6Writer {
    /// Start the output with `>>sparse6<<`
    header: bool,
    /// End the output with `\n`
    trailing_newline: bool,
}

impl Default for Sparse6Writer {
    fn default() -> Self {
        Self {
            header: true,
            trailing_newline: true,
        }
    }
}

impl Sparse6Writer {
    /// Creates a new [`Sparse6Writer`] that writes the header and a trailing newline.
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
        let format = FileFormat::Sparse6;
        let n = matrix.number_of_nodes();
        let rows = matrix.rows();
        let k = group_width(n);

        let mut out = Vec::new();
        if self.header {
            out.extend_from_slice(format.header().as_bytes());
        }
        out.push(b':');
        encode_size(n, format, &mut out)?;

        let mut bits = BitVector::new();
        let mut current = 0;
        for (u, v) in matrix.undirected_edges() {
            for _ in 0..rows[u][v].max(rows[v][u]) {
                if v == current {
                    bits.append(false);
                } else if v == current + 1 {
                    current = v;
                    bits.append(true);
                } else {
                    current = v;
                    bits.append(true);
                    bits.append_bits(v as u64, k);
                    bits.append(false);
                }
                bits.append_bits(u as u64, k);
            }
        }

        // A padding of ones would decode as an edge to `n - 1` here
        let padding = (BITS_PER_BYTE - bits.len() % BITS_PER_BYTE) % BITS_PER_BYTE;
        if k < 6 && n == 1 << k && padding >= k && current + 1 < n {
            bits.append(false);
        }
        bits.pad_right(BITS_PER_BYTE, true);

        out.extend(bits.to_bytes());
        if self.trailing_newline {
            out.push(b'\n');
        }
        Ok(out)
    }
}

impl GraphWriter for Sparse6Writer {
    fn format(&self) -> FileFormat {
        FileFormat::Sparse6
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
        label::Label,
        node::{Node, NodeId},
        repr::{ListGraph, MatrixGraph},
    };

    fn encoded(matrix: &IntegerMatrix) -> Vec<u8> {
        let mut buffer = Vec::new();
        Sparse6Writer::new()
            .header(false)
            .trailing_newline(false)
            .try_write_matrix(matrix, &mut buffer)
            .unwrap();
        buffer
    }

    fn undirected(n: usize, edges: &[(usize, usize)]) -> IntegerMatrix {
        let mut matrix = IntegerMatrix::with_nodes(n);
        for &(u, v) in edges {
            matrix.add_edge(u, v).unwrap();
            if u != v {
                matrix.add_edge(v, u).unwrap();
            }
        }
        matrix
    }

    #[test]
    fn group_widths() {
        assert_eq!(group_width(0), 1);
        assert_eq!(group_width(1), 1);
        assert_eq!(group_width(2), 1);
        assert_eq!(group_width(3), 2);
        assert_eq!(group_width(4), 2);
        assert_eq!(group_width(5), 3);
        assert_eq!(group_width(7), 3);
        assert_eq!(group_width(65), 7);

        // n - 1 a power of two still needs all bits of n - 1
        assert_eq!(group_width(9), 4);
        assert_eq!(group_width(17), 5);
    }

    #[test]
    fn reference_example() {
        let matrix = undirected(7, &[(0, 1), (0, 2), (1, 2), (5, 6)]);
        assert_eq!(encoded(&matrix), b":Fa@x^");
        assert_eq!(
            Sparse6Reader::new().try_read_matrix(&b":Fa@x^"[..]).unwrap(),
            matrix
        );
    }

    #[test]
    fn isolated_trailing_vertex() {
        let mut graph = ListGraph::new();
        let ids: Vec<NodeId> = (0..3)
            .map(|i| graph.add_node(Node::new(i)).unwrap())
            .collect();
        graph.add_edge(ids[0], ids[1], Label::default()).unwrap();

        let mut buffer = Vec::new();
        graph.try_write_to(&mut buffer, FileFormat::Sparse6).unwrap();
        assert_eq!(buffer, b">>sparse6<<:Bf\n");

        let mut read = MatrixGraph::new();
        read.try_read_from(buffer.as_slice(), FileFormat::Sparse6).unwrap();
        assert_eq!(read.number_of_nodes(), 3);
        assert_eq!(read.number_of_edges(), 2);
        assert!(read.nodes()[2].label == Label::from(2));
        assert!(read.outgoing_edges(read.nodes()[2].id()).unwrap().is_empty());
        assert!(read.incoming_edges(read.nodes()[2].id()).unwrap().is_empty());
    }

    #[test]
    fn padding_never_adds_a_loop() {
        // n = 2^k with enough padding for another group
        let matrix = undirected(4, &[(0, 1)]);
        assert_eq!(encoded(&matrix), b":Cb");
        assert_eq!(
            Sparse6Reader::new().try_read_matrix(&b":Cb"[..]).unwrap(),
            matrix
        );
    }

    #[test]
    fn loops_and_parallel_edges() {
        let matrix = undirected(2, &[(0, 1), (0, 1), (1, 1)]);
        assert_eq!(encoded(&matrix), b":A`");
        assert_eq!(
            Sparse6Reader::new().try_read_matrix(&b":A`"[..]).unwrap(),
            matrix
        );
    }

    #[test]
    fn round_trips_are_byte_identical() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);
        for n in [0, 1, 2, 4, 8, 16, 31, 32, 63, 64, 100] {
            let edges: Vec<(usize, usize)> = (0..rng.random_range(0..=2 * n))
                .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
                .collect();
            let matrix = undirected(n, &edges);

            let writer = Sparse6Writer::new();
            let mut first = Vec::new();
            writer.try_write_matrix(&matrix, &mut first).unwrap();

            let read = Sparse6Reader::new().try_read_matrix(first.as_slice()).unwrap();
            assert_eq!(read, matrix, "n = {n}");

            let mut second = Vec::new();
            writer.try_write_matrix(&read, &mut second).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn invalid_input() {
        for input in [&b""[..], b"Bf", b">>sparse6<<Bf", b">>graph6<<:Bf", b":B\x20"] {
            assert!(matches!(
                Sparse6Reader::new().try_read_matrix(input),
                Err(GraphError::InvalidFormat {
                    format: FileFormat::Sparse6,
                    ..
                })
            ));
        }
        assert!(Sparse6Reader::new()
            .require_header(true)
            .try_read_matrix(&b":Bf"[..])
            .is_err());
    }

    #[test]
    fn files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.s6");
        let mut graph = ListGraph::new();
        graph
            .recreate_from_matrix(&undirected(7, &[(0, 1), (0, 2), (1, 2), (5, 6)]))
            .unwrap();

        Sparse6Writer::new()
            .try_write_graph_file(&graph, &path)
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b">>sparse6<<:Fa@x^\n");

        let format = FileFormat::from_path(&path).unwrap();
        let mut read = MatrixGraph::new();
        read.try_read_from_file(&path, format).unwrap();
        assert_eq!(read.name(), "sparse");
        assert_eq!(read.integer_matrix(), graph.integer_matrix());
    }
}
