//! Data structures backing the percolation model.

pub mod union_find;

pub use union_find::{UnionFind, UnionFindError};
