//! # percolation
//!
//! Monte Carlo estimation of the site-percolation threshold of an
//! n-by-n grid.
//!
//! ## Modules
//!
//! - [`collections`] — Union-find engine with union by size and path compression
//! - [`grid`] — The percolation model: open sites, full sites, percolation test
//! - [`random`] — Seeded generators and uniform site selection
//! - [`simulation`] — Trial loop and aggregated threshold statistics
//! - [`stats`] — Mean, sample standard deviation, confidence intervals
//!
//! ## Design Philosophy
//!
//! - **Near-constant queries**: virtual top/bottom nodes answer `is_full` and
//!   `percolates` without scanning the grid
//! - **No backwash**: full-site queries use an engine that never sees the
//!   bottom virtual node
//! - **Reproducible trials**: per-trial seeds, identical results sequential
//!   or parallel

pub mod collections;
pub mod error;
pub mod grid;
pub mod random;
pub mod simulation;
pub mod stats;

pub use error::PercolationError;
pub use grid::Percolation;
pub use simulation::{PercolationStats, SimulationConfig};
