//! Error taxonomy of the graph engine.
//!
//! Every error reports a [`Severity`] so that callers can decide whether to ignore it
//! (a duplicate edge during bulk generation), surface it, or abort the requested operation.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    edge::{Edge, EdgeKey},
    io::FileFormat,
    node::NodeId,
};

pub type Result<T> = std::result::Result<T, GraphError>;

/// How serious an error is for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Expected during normal use, safe to ignore
    Informational,
    /// The request could not be fulfilled, the graph is unchanged
    Low,
    /// The request referenced something invalid
    Elevated,
    /// The requested operation failed as a whole
    Critical,
}

impl Severity {
    /// Numeric priority, higher is more severe
    pub const fn priority(&self) -> u8 {
        match self {
            Severity::Informational => 0,
            Severity::Low => 1,
            Severity::Elevated => 2,
            Severity::Critical => 5,
        }
    }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node {id} does not exist")]
    NodeNotFound { id: NodeId },

    #[error("node {id} is already part of the graph")]
    DuplicateNode { id: NodeId },

    #[error("node index {index} is out of range for a graph with {len} nodes")]
    NodeIndexOutOfRange { index: usize, len: usize },

    #[error("edge {key} does not exist")]
    EdgeNotFound { key: EdgeKey },

    #[error("edge {edge} already exists")]
    DuplicateEdge { edge: Edge },

    #[error("critical error accessing file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} data: {reason}")]
    InvalidFormat { format: FileFormat, reason: String },

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    pub fn severity(&self) -> Severity {
        match self {
            GraphError::DuplicateNode { .. } | GraphError::DuplicateEdge { .. } => {
                Severity::Informational
            }
            GraphError::InvalidGraph(_) => Severity::Low,
            GraphError::NodeNotFound { .. }
            | GraphError::NodeIndexOutOfRange { .. }
            | GraphError::EdgeNotFound { .. }
            | GraphError::InvalidFormat { .. }
            | GraphError::InvalidConfig(_) => Severity::Elevated,
            GraphError::Io { .. } => Severity::Critical,
        }
    }

    /// Wraps an IO-error with the path it occurred on
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`GraphError::InvalidFormat`]
    pub fn format<S: Into<String>>(format: FileFormat, reason: S) -> Self {
        GraphError::InvalidFormat {
            format,
            reason: reason.into(),
        }
    }
}
