//! Disjoint-set (Union-Find) engine over integer elements.
//!
//! Maintains a partition of `0..n` into disjoint sets. The percolation grid
//! keeps one instance per connectivity relation it tracks.
//!
//! # Algorithm
//!
//! **Union by size** attaches the root of the smaller tree under the root of
//! the larger one, and **path compression** during `find` re-links every node
//! on the search path directly to its root. Together they give amortized
//! O(α(n)) per operation, where α is the inverse Ackermann function.
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good but Not Linear Set Union Algorithm"
//! - Sedgewick & Wayne (2011), *Algorithms*, 4th ed., §1.5 (weighted quick-union)

use std::fmt;

/// Error returned when an element index is outside `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionFindError {
    /// `index` is not a valid element of a structure with `len` elements.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for UnionFindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnionFindError::IndexOutOfRange { index, len } => {
                write!(f, "element {index} out of range for union-find of {len} elements")
            }
        }
    }
}

impl std::error::Error for UnionFindError {}

/// Disjoint-set forest with union by size and path compression.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(5);
/// uf.union(0, 1).unwrap();
/// uf.union(2, 3).unwrap();
/// assert!(uf.connected(0, 1).unwrap());
/// assert!(!uf.connected(0, 2).unwrap());
///
/// uf.union(1, 3).unwrap();
/// assert!(uf.connected(0, 2).unwrap()); // transitivity
/// assert!(uf.find(7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    // Only meaningful at roots.
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    ///
    /// # Complexity
    /// O(n)
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Finds the representative (root) of the set containing `x`.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    ///
    /// # Errors
    /// [`UnionFindError::IndexOutOfRange`] if `x >= len()`.
    pub fn find(&mut self, x: usize) -> Result<usize, UnionFindError> {
        self.check(x)?;
        Ok(self.root(x))
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `true` if two sets were merged, `false` if `x` and `y` were
    /// already in the same set.
    ///
    /// # Errors
    /// [`UnionFindError::IndexOutOfRange`] if either element is out of range.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool, UnionFindError> {
        self.check(x)?;
        self.check(y)?;
        let root_x = self.root(x);
        let root_y = self.root(y);
        if root_x == root_y {
            return Ok(false);
        }

        // Ties go to `root_x`.
        let (big, small) = if self.size[root_x] < self.size[root_y] {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        Ok(true)
    }

    /// Returns `true` if `x` and `y` are in the same set.
    ///
    /// # Errors
    /// [`UnionFindError::IndexOutOfRange`] if either element is out of range.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool, UnionFindError> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Connectivity for indices the caller already knows are in range,
    /// such as a grid's own virtual nodes.
    ///
    /// # Panics
    /// Panics if `x >= len()` or `y >= len()`.
    pub(crate) fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.root(x) == self.root(y)
    }

    fn check(&self, x: usize) -> Result<(), UnionFindError> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(UnionFindError::IndexOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    // Recursion depth is bounded by log2(len) under union by size.
    fn root(&mut self, x: usize) -> usize {
        let parent = self.parent[x];
        if parent != x {
            self.parent[x] = self.root(parent);
        }
        self.parent[x]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
