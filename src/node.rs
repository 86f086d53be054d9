/*!
# Node Representation

A [`Node`] is an identity-bearing entity: its [`NodeId`] is drawn once from a process-wide
counter and never reused. Cloning a node keeps its id, which is what lets representations
convert into one another while observers and algorithms keep referring to the same nodes.
*/

use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{color::Rgb, label::Label};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique identifier of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Draws a fresh, never before used id
    pub fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer 2D coordinate attached to every node
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin to `self`
    pub fn length(&self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }

    /// Euclidean distance between `self` and `other`
    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Point {
    type Output = Point;

    /// ** Panics if `rhs == 0` **
    fn div(self, rhs: i32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A graph node.
///
/// Nodes are only placed into a graph through [`Graph::add_node`](crate::ops::Graph::add_node);
/// the graph then exclusively owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    pub label: Label,
    pub coords: Point,
    pub color: Rgb,
}

impl Node {
    /// Creates a new node with a fresh id, black color and coordinates at the origin
    pub fn new<L: Into<Label>>(label: L) -> Self {
        Self {
            id: NodeId::fresh(),
            label: label.into(),
            coords: Point::default(),
            color: Rgb::BLACK,
        }
    }

    /// Sets the coordinates (Builder-Pattern)
    pub fn with_coords(mut self, coords: Point) -> Self {
        self.coords = coords;
        self
    }

    /// Sets the color (Builder-Pattern)
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_survive_clones() {
        let a = Node::new("a");
        let b = Node::new("b");
        assert_ne!(a.id(), b.id());
        assert!(a.id() < b.id());

        let copy = a.clone();
        assert_eq!(copy.id(), a.id());
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(3, 4);
        assert_eq!(p.length(), 5.0);
        assert_eq!(p.distance(&Point::new(3, 0)), 4.0);
        assert_eq!(p + Point::new(1, 1), Point::new(4, 5));
        assert_eq!(p - Point::new(1, 1), Point::new(2, 3));
        assert_eq!(p * 2, Point::new(6, 8));
        assert_eq!(p / 2, Point::new(1, 2));
    }
}
