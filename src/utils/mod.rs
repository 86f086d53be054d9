/*!
# Utilities

Helper data structures used by the algorithms:
- [`UnionFind`]: disjoint sets over `0..n` with path compression and union by rank.
*/

pub mod union_find;

pub use union_find::UnionFind;
