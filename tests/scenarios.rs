use percolation::random::create_rng;
use percolation::simulation::run_trial;
use percolation::{Percolation, PercolationError, PercolationStats, SimulationConfig};

#[test]
fn single_site_grid_percolates_on_first_open() {
    let mut grid = Percolation::new(1).unwrap();
    grid.open(1, 1).unwrap();
    assert!(grid.percolates());
    assert!(grid.is_full(1, 1).unwrap());
}

#[test]
fn bottom_row_alone_is_not_full() {
    let mut grid = Percolation::new(2).unwrap();
    grid.open(2, 1).unwrap();
    grid.open(2, 2).unwrap();
    assert!(!grid.percolates());
    assert!(!grid.is_full(2, 1).unwrap());
}

#[test]
fn opening_every_site_percolates() {
    let n = 3;
    let mut grid = Percolation::new(n).unwrap();
    for row in (1..=n).rev() {
        for col in 1..=n {
            grid.open(row, col).unwrap();
        }
    }
    assert!(grid.percolates());
    assert_eq!(grid.number_of_open_sites(), 9);
    for row in 1..=n {
        for col in 1..=n {
            assert!(grid.is_full(row, col).unwrap());
        }
    }
}

#[test]
fn out_of_range_rows_fail() {
    for n in [1, 2, 5, 20] {
        let grid = Percolation::new(n).unwrap();
        assert!(matches!(grid.is_open(0, 1), Err(PercolationError::OutOfRange { .. })));
        assert!(matches!(grid.is_open(n + 1, 1), Err(PercolationError::OutOfRange { .. })));
    }
}

#[test]
fn single_site_statistics_are_degenerate() {
    for trials in [1, 2, 10, 100] {
        let stats = PercolationStats::new(1, trials).unwrap();
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
    }
}

#[test]
fn threshold_estimate_is_plausible() {
    // Site percolation threshold on the square lattice is about 0.5927.
    let config = SimulationConfig::new(50, 100).with_seed(31).with_parallel(true);
    let stats = PercolationStats::run(&config).unwrap();
    assert!(stats.mean() > 0.55 && stats.mean() < 0.64, "mean {}", stats.mean());
    assert!(stats.confidence_lo() < stats.mean() && stats.mean() < stats.confidence_hi());
}

#[test]
fn trials_are_reproducible_from_seed() {
    let a = run_trial(20, &mut create_rng(123)).unwrap();
    let b = run_trial(20, &mut create_rng(123)).unwrap();
    assert_eq!(a, b);
}
