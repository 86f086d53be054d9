/*!
# Edge Representation

Edges are directed and refer to their endpoints by [`NodeId`]; they never own them.
The identity of an edge is its [`EdgeKey`], the triple `(source, target, label)`:
a graph never holds two edges with the same key, so parallel edges need distinct labels.
*/

use std::fmt;

use crate::{color::Rgb, label::Label, node::NodeId};

/// Identity of an edge inside a graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
    pub label: Label,
}

impl EdgeKey {
    pub fn new<L: Into<Label>>(source: NodeId, target: NodeId, label: L) -> Self {
        Self {
            source,
            target,
            label: label.into(),
        }
    }

    /// Returns *true* if the edge is a self-loop
    pub fn is_self_edge(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} \"{}\"", self.source, self.target, self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    pub label: Label,
    pub color: Rgb,
}

impl Edge {
    /// Creates a new black edge
    pub fn new<L: Into<Label>>(source: NodeId, target: NodeId, label: L) -> Self {
        Self {
            source,
            target,
            label: label.into(),
            color: Rgb::BLACK,
        }
    }

    /// Sets the color (Builder-Pattern)
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target, &self.label)
    }

    /// Returns *true* if `self` has the given key
    pub fn matches(&self, source: NodeId, target: NodeId, label: &Label) -> bool {
        self.source == source && self.target == target && self.label == *label
    }

    /// Returns *true* if the edge is a self-loop
    pub fn is_self_edge(&self) -> bool {
        self.source == self.target
    }

    /// Returns *true* if `other` connects the same endpoints in the opposite direction
    pub fn is_reverse_of(&self, other: &Edge) -> bool {
        self.source == other.target && self.target == other.source
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} \"{}\"", self.source, self.target, self.label)
    }
}
