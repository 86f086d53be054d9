/*!
`graphkit` is an in-memory graph engine for directed multigraphs with labelled, colored nodes
and edges. It is built to back interactive graph editors: every change is observable, and
algorithms can be animated one step at a time.

# Representation

A [`Node`](crate::node::Node) carries a process-wide unique [`NodeId`](crate::node::NodeId),
a free-text [`Label`](crate::label::Label), a color and integer coordinates.
An [`Edge`](crate::edge::Edge) connects two nodes by id and is identified by
`(source, target, label)`, so parallel edges are allowed as long as their labels differ.

See the [`repr`] module for the storage backends:

- [`ListGraph`](crate::repr::ListGraph): adjacency lists,
- [`MatrixGraph`](crate::repr::MatrixGraph): an adjacency matrix of edge cells,
- [`HybridGraph`](crate::repr::HybridGraph): switches between both depending on the density.

All of them implement the object-safe [`Graph`](crate::ops::Graph) trait and behave identically
through it; they only differ in their performance characteristics.

# Usage

There are *5* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, labels, colors, the [`Graph`](crate::ops::Graph)
  trait and all representations,
- [`algo`] includes the resumable algorithms (BFS, DFS, strongly connected components,
  Hamiltonian cycles and paths, Kruskal) driven through
  [`StepAlgorithm`](crate::algo::StepAlgorithm),
- [`io`] includes readers and writers for the **graph6** and **sparse6** formats,
- [`observer`] includes change tracking and observer subscriptions,
- [`config`] and [`logging`] set up the engine from a TOML file.

In most use-cases, `use graphkit::{prelude::*, algo::*};` suffices for your needs.

```
use graphkit::{prelude::*, algo::*};

let mut graph = HybridGraph::new();
let a = graph.add_node(Node::new("a")).unwrap();
let b = graph.add_node(Node::new("b")).unwrap();
graph.add_edge(a, b, Label::from(3)).unwrap();
graph.add_edge(b, a, Label::from(3)).unwrap();

let mut kruskal = Kruskal::new();
kruskal.run_to_completion(&mut graph).unwrap();
assert_eq!(kruskal.total_cost(), 3);
assert_eq!(graph.edges().iter().filter(|e| e.color == Rgb::GREEN).count(), 1);
```
*/

pub mod algo;
pub mod color;
pub mod config;
pub mod edge;
pub mod error;
pub mod io;
pub mod label;
pub mod logging;
pub mod node;
pub mod observer;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

/// `graphkit::prelude` includes definitions for nodes, edges, labels and colors, the graph
/// operation trait, errors as well as all implemented representations.
pub mod prelude {
    pub use super::{
        color::*, edge::*, error::*, label::*, node::*, observer::*, ops::*, repr::*,
    };
}
