/*!
# IO

Readers and writers for the graph6 and sparse6 interchange formats of
[nauty](https://pallini.di.uniroma1.it/).

Both formats store an undirected graph as printable ASCII:
- **graph6** packs the upper triangle of the adjacency matrix and suits dense graphs,
- **sparse6** lists the edges and also supports loops and parallel edges.

Every reader first parses its input into an [`IntegerMatrix`] and only touches the target graph
once parsing succeeded, so a failed read leaves the graph unchanged. Each undirected edge is
read into two directed edges (one for loops). Writers ignore edge directions.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`GraphRead`] and [`GraphWrite`] abstract over reading/writing using a given [`FileFormat`].
*/

pub mod bit_vector;
pub mod graph6;
pub mod header;
pub mod sparse6;

use std::{
    fmt,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use tracing::info;

use crate::{
    error::{GraphError, Result},
    ops::Graph,
    repr::IntegerMatrix,
};

pub use bit_vector::*;
pub use graph6::*;
pub use header::*;
pub use sparse6::*;

/// Identifier for a graph file format.
///
/// Used in [`GraphRead`] and [`GraphWrite`] to determine the
/// correct parser or writer to use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Dense upper-triangle format
    Graph6,
    /// Sparse edge-list format
    Sparse6,
}

impl FileFormat {
    /// Guesses the format from the extension of `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Default file extension
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Graph6 => "g6",
            FileFormat::Sparse6 => "s6",
        }
    }

    /// Optional header at the start of a file
    pub fn header(&self) -> &'static str {
        match self {
            FileFormat::Graph6 => ">>graph6<<",
            FileFormat::Sparse6 => ">>sparse6<<",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Graph6 => "graph6",
            FileFormat::Sparse6 => "sparse6",
        })
    }
}

impl FromStr for FileFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "graph6" | "g6" => Ok(FileFormat::Graph6),
            "sparse6" | "s6" => Ok(FileFormat::Sparse6),
            _ => Err(GraphError::InvalidConfig(format!("unknown file format: {s}"))),
        }
    }
}

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides a low-level method to parse any [`Read`] instance into an
/// [`IntegerMatrix`] and convenience wrappers to read into a [`Graph`] directly.
pub trait GraphReader {
    fn format(&self) -> FileFormat;

    /// Parses the whole input.
    ///
    /// # Errors
    /// Returns an error if the input cannot be read or is not a valid representation
    /// of a graph in the expected format.
    fn try_read_matrix<R>(&self, reader: R) -> Result<IntegerMatrix>
    where
        R: Read;

    /// Replaces the contents of `graph` by the graph read from `reader`.
    /// `graph` is left untouched if parsing fails.
    fn try_read_graph<R>(&self, graph: &mut dyn Graph, reader: R) -> Result<()>
    where
        R: Read,
    {
        let matrix = self.try_read_matrix(reader)?;
        graph.recreate_from_matrix(&matrix)
    }

    /// Replaces the contents of `graph` by the graph stored in the file at `path`
    /// and names the graph after the file stem.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, graph: &mut dyn Graph, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| GraphError::io(path, err))?;
        let matrix = self.try_read_matrix(bytes.as_slice())?;

        info!(
            path = %path.display(),
            format = %self.format(),
            nodes = matrix.number_of_nodes(),
            "read graph"
        );

        graph.recreate_from_matrix(&matrix)?;
        if let Some(stem) = path.file_stem() {
            graph.set_name(stem.to_string_lossy().into_owned());
        }
        Ok(())
    }
}

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides a low-level method to write an [`IntegerMatrix`] to any
/// [`Write`] instance and convenience wrappers for graphs and files.
pub trait GraphWriter {
    fn format(&self) -> FileFormat;

    /// Writes the matrix to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the matrix exceeds the capacity of the format or if writing fails.
    fn try_write_matrix<W>(&self, matrix: &IntegerMatrix, writer: W) -> Result<()>
    where
        W: Write;

    fn try_write_graph<W>(&self, graph: &dyn Graph, writer: W) -> Result<()>
    where
        W: Write,
    {
        self.try_write_matrix(&graph.integer_matrix(), writer)
    }

    /// Writes the given graph to a file according to the settings in `self`.
    /// The file is only created once encoding succeeded.
    fn try_write_graph_file<P>(&self, graph: &dyn Graph, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        self.try_write_graph(graph, &mut buffer)?;
        std::fs::write(path, &buffer).map_err(|err| GraphError::io(path, err))?;

        info!(
            path = %path.display(),
            format = %self.format(),
            bytes = buffer.len(),
            "wrote graph"
        );
        Ok(())
    }
}

/// Trait for reading graphs when only a [`FileFormat`] is known.
///
/// Automatically implemented for every [`Graph`] using the default reader of each format.
pub trait GraphRead {
    /// Replaces the contents of `self` by the graph read from `reader`
    ///
    /// # Errors
    /// Returns an error if the input does not match the expected format.
    fn try_read_from<R>(&mut self, reader: R, format: FileFormat) -> Result<()>
    where
        R: Read;

    /// Replaces the contents of `self` by the graph stored in the file at `path`
    fn try_read_from_file<P>(&mut self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>;
}

impl<G> GraphRead for G
where
    G: Graph,
{
    fn try_read_from<R>(&mut self, reader: R, format: FileFormat) -> Result<()>
    where
        R: Read,
    {
        match format {
            FileFormat::Graph6 => Graph6Reader::new().try_read_graph(self, reader),
            FileFormat::Sparse6 => Sparse6Reader::new().try_read_graph(self, reader),
        }
    }

    fn try_read_from_file<P>(&mut self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>,
    {
        match format {
            FileFormat::Graph6 => Graph6Reader::new().try_read_graph_file(self, path),
            FileFormat::Sparse6 => Sparse6Reader::new().try_read_graph_file(self, path),
        }
    }
}

/// Trait for writing graphs when only a [`FileFormat`] is known.
///
/// Automatically implemented for every [`Graph`] using the default writer of each format.
pub trait GraphWrite {
    /// Writes the graph to the given writer according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the graph does not fit the format or if writing fails.
    fn try_write_to<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write;

    /// Writes the graph to the given file according to the specified [`FileFormat`].
    fn try_write_to_file<P>(&self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>;
}

impl<G> GraphWrite for G
where
    G: Graph,
{
    fn try_write_to<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write,
    {
        match format {
            FileFormat::Graph6 => Graph6Writer::new().try_write_graph(self, writer),
            FileFormat::Sparse6 => Sparse6Writer::new().try_write_graph(self, writer),
        }
    }

    fn try_write_to_file<P>(&self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>,
    {
        match format {
            FileFormat::Graph6 => Graph6Writer::new().try_write_graph_file(self, path),
            FileFormat::Sparse6 => Sparse6Writer::new().try_write_graph_file(self, path),
        }
    }
}

/// Reads all of `reader` up to the first line break
fn read_line<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| GraphError::io("<reader>", err))?;
    if let Some(end) = bytes.iter().position(|&b| b == b'\n') {
        bytes.truncate(end);
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(bytes)
}

/// Writes `bytes` to `writer` and flushes it
fn write_all<W: Write>(mut writer: W, bytes: &[u8]) -> Result<()> {
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|err| GraphError::io("<writer>", err))
}

/// Shorthand for returning `Err(GraphError::InvalidFormat)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $format : expr, $reason : expr) => {
        if !($cond) {
            return Err(GraphError::format($format, $reason));
        }
    };
}

use raise_error_unless;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_formats() {
        assert_eq!("graph6".parse::<FileFormat>().unwrap(), FileFormat::Graph6);
        assert_eq!("S6".parse::<FileFormat>().unwrap(), FileFormat::Sparse6);
        assert!("dot".parse::<FileFormat>().is_err());

        assert_eq!(FileFormat::from_path("dir/k4.g6"), Some(FileFormat::Graph6));
        assert_eq!(FileFormat::from_path("k4.s6"), Some(FileFormat::Sparse6));
        assert_eq!(FileFormat::from_path("k4.txt"), None);
        assert_eq!(FileFormat::from_path("k4"), None);

        assert_eq!(FileFormat::Sparse6.extension(), "s6");
        assert_eq!(FileFormat::Graph6.to_string(), "graph6");
    }

    #[test]
    fn lines() {
        assert_eq!(read_line(&b"Bw\nCx\n"[..]).unwrap(), b"Bw");
        assert_eq!(read_line(&b"Bw\r\n"[..]).unwrap(), b"Bw");
        assert_eq!(read_line(&b"Bw"[..]).unwrap(), b"Bw");
    }
}
