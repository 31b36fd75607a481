//! Site-percolation model on an n-by-n grid.
//!
//! Sites are addressed 1-indexed as `(row, col)` and stored row-major at
//! `(row - 1) * n + (col - 1)`. Two union-find engines track connectivity:
//!
//! | Engine | Elements | Virtual nodes | Answers |
//! |---|---|---|---|
//! | `full` | n² + 1 | top (`n²`) | [`Percolation::is_full`] |
//! | `percolation` | n² + 2 | top (`n²`), bottom (`n² + 1`) | [`Percolation::percolates`] |
//!
//! The `full` engine never sees the bottom virtual node. Sharing one engine
//! for both queries would let an open bottom-row cluster reach the top
//! through the bottom node once the system percolates ("backwash").

use crate::collections::UnionFind;
use crate::error::PercolationError;

/// An n-by-n grid of sites, all blocked at construction.
///
/// # Examples
/// ```
/// use percolation::Percolation;
///
/// let mut grid = Percolation::new(3).unwrap();
/// grid.open(1, 2).unwrap();
/// grid.open(2, 2).unwrap();
/// assert!(grid.is_full(2, 2).unwrap());
/// assert!(!grid.percolates());
///
/// grid.open(3, 2).unwrap();
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
    full: UnionFind,
    percolation: UnionFind,
    top: usize,
    bottom: usize,
}

impl Percolation {
    /// Creates an n-by-n grid with every site blocked.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `n²` overflows.
    pub fn new(n: usize) -> Result<Self, PercolationError> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size must be positive, got 0".into(),
            ));
        }
        let cells = n
            .checked_mul(n)
            .filter(|c| c.checked_add(2).is_some())
            .ok_or_else(|| {
                PercolationError::InvalidArgument(format!("grid size {n} is too large"))
            })?;
        Ok(Self {
            n,
            open: vec![false; cells],
            open_count: 0,
            full: UnionFind::new(cells + 1),
            percolation: UnionFind::new(cells + 2),
            top: cells,
            bottom: cells + 1,
        })
    }

    /// Returns the side length n.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Opens site `(row, col)`.
    ///
    /// Re-opening an open site leaves the open-site count unchanged; the
    /// neighbour unions are repeated and have no effect.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] unless `1 <= row, col <= n`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<(), PercolationError> {
        let site = self.index(row, col)?;
        if !self.open[site] {
            self.open[site] = true;
            self.open_count += 1;
        }

        if row == 1 {
            self.full.union(site, self.top)?;
            self.percolation.union(site, self.top)?;
        }
        // Bottom node goes into the percolation engine only.
        if row == self.n {
            self.percolation.union(site, self.bottom)?;
        }

        for neighbour in self.open_neighbours(row, col) {
            self.full.union(site, neighbour)?;
            self.percolation.union(site, neighbour)?;
        }
        Ok(())
    }

    /// Returns `true` if site `(row, col)` is open.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] unless `1 <= row, col <= n`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let site = self.index(row, col)?;
        Ok(self.open[site])
    }

    /// Returns `true` if site `(row, col)` is connected to the top row
    /// through open sites.
    ///
    /// A full site is always open. Takes `&mut self` because lookups
    /// compress paths in the underlying engine.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] unless `1 <= row, col <= n`.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let site = self.index(row, col)?;
        Ok(self.full.connected(site, self.top)?)
    }

    /// Returns the number of distinct sites opened so far.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of sites that are open, `open / n²`.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.open.len() as f64
    }

    /// Returns `true` if an open path joins the top row to the bottom row.
    ///
    /// Once true, stays true for the lifetime of the grid.
    pub fn percolates(&mut self) -> bool {
        self.percolation.same_set(self.top, self.bottom)
    }

    /// Draws the grid one row per line: `#` blocked, `.` open, `~` full.
    pub fn render(&mut self) -> String {
        let mut out = String::with_capacity(self.n * (self.n + 1));
        for row in 0..self.n {
            for col in 0..self.n {
                let site = row * self.n + col;
                let glyph = if !self.open[site] {
                    '#'
                } else if self.full.same_set(site, self.top) {
                    '~'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, PercolationError> {
        if row < 1 || row > self.n || col < 1 || col > self.n {
            return Err(PercolationError::OutOfRange {
                row,
                col,
                n: self.n,
            });
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    /// Linear indices of the open up/down/left/right neighbours of `(row, col)`.
    fn open_neighbours(&self, row: usize, col: usize) -> Vec<usize> {
        let n = self.n;
        let candidates = [
            (row > 1).then(|| (row - 1, col)),
            (row < n).then(|| (row + 1, col)),
            (col > 1).then(|| (row, col - 1)),
            (col < n).then(|| (row, col + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .map(|(r, c)| (r - 1) * n + (c - 1))
            .filter(|&site| self.open[site])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
