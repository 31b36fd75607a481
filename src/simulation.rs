//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random sites on a fresh grid until it
//! percolates and records the fraction of open sites. Trials share no
//! state, so they may run on a `rayon` pool; each one draws from its own
//! generator seeded by [`trial_seed`], which makes seeded runs identical
//! whether they execute sequentially or in parallel.

use log::{debug, info, log_enabled, trace, Level};
use rand::Rng;
use rayon::prelude::*;

use crate::error::PercolationError;
use crate::grid::Percolation;
use crate::random::{create_rng, entropy_seed, random_site, trial_seed};
use crate::stats::{self, ConfidenceInterval};

/// Parameters for one batch of trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Side length n of each grid.
    pub grid_size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Base seed; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    /// Run trials on the global `rayon` pool.
    pub parallel: bool,
}

impl SimulationConfig {
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            seed: None,
            parallel: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds a config from signed counts as read from the command line.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if either count is zero,
    /// negative, or does not fit in `usize`.
    pub fn from_counts(grid_size: i64, trials: i64) -> Result<Self, PercolationError> {
        Ok(Self::new(
            positive_count(grid_size, "grid size")?,
            positive_count(trials, "trial count")?,
        ))
    }

    /// Checks that grid size and trial count are positive.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] naming the offending value.
    pub fn validate(&self) -> Result<(), PercolationError> {
        if self.grid_size == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size must be positive, got 0".into(),
            ));
        }
        if self.trials == 0 {
            return Err(PercolationError::InvalidArgument(
                "trial count must be positive, got 0".into(),
            ));
        }
        Ok(())
    }
}

fn positive_count(value: i64, name: &str) -> Result<usize, PercolationError> {
    if value <= 0 {
        return Err(PercolationError::InvalidArgument(format!(
            "{name} must be positive, got {value}"
        )));
    }
    usize::try_from(value).map_err(|_| {
        PercolationError::InvalidArgument(format!("{name} {value} is too large"))
    })
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Runs one trial: opens random sites until the grid percolates.
///
/// Returns the percolation threshold estimate `open / n²`.
///
/// # Errors
/// [`PercolationError::InvalidArgument`] if `n == 0`.
///
/// # Examples
/// ```
/// use percolation::random::create_rng;
/// use percolation::simulation::run_trial;
/// let mut rng = create_rng(3);
/// assert_eq!(run_trial(1, &mut rng).unwrap(), 1.0);
/// ```
pub fn run_trial<R: Rng>(n: usize, rng: &mut R) -> Result<f64, PercolationError> {
    let mut grid = Percolation::new(n)?;
    while !grid.percolates() {
        let (row, col) = random_site(n, rng);
        grid.open(row, col)?;
    }
    if log_enabled!(Level::Trace) {
        trace!("percolated grid:\n{}", grid.render());
    }
    Ok(grid.open_fraction())
}

/// Aggregated results of a batch of trials.
///
/// # Examples
/// ```
/// use percolation::simulation::{PercolationStats, SimulationConfig};
///
/// let stats = PercolationStats::run(&SimulationConfig::new(1, 5).with_seed(11)).unwrap();
/// assert_eq!(stats.mean(), 1.0);
/// assert_eq!(stats.stddev(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PercolationStats {
    results: Vec<f64>,
    seed: u64,
    mean: f64,
    stddev: f64,
    interval: ConfidenceInterval,
}

impl PercolationStats {
    /// Runs `trials` sequential trials on `n`-by-`n` grids with a random seed.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self, PercolationError> {
        Self::run(&SimulationConfig::new(n, trials))
    }

    /// Runs the batch described by `config`.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if the config is not valid.
    pub fn run(config: &SimulationConfig) -> Result<Self, PercolationError> {
        config.validate()?;
        let n = config.grid_size;
        let seed = config.seed.unwrap_or_else(entropy_seed);
        info!(
            "running {} trials on a {n}x{n} grid (seed {seed}, parallel {})",
            config.trials, config.parallel
        );

        let trial = |index: usize| -> Result<f64, PercolationError> {
            let mut rng = create_rng(trial_seed(seed, index as u64));
            let threshold = run_trial(n, &mut rng)?;
            debug!("trial {index}: threshold {threshold}");
            Ok(threshold)
        };
        let results = if config.parallel {
            (0..config.trials)
                .into_par_iter()
                .map(trial)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            (0..config.trials)
                .map(trial)
                .collect::<Result<Vec<_>, _>>()?
        };

        let stats = Self::from_results(results, seed)?;
        info!(
            "mean {}, stddev {}, 95% interval [{}, {}]",
            stats.mean, stats.stddev, stats.interval.lo, stats.interval.hi
        );
        Ok(stats)
    }

    /// Summarizes already-collected per-trial thresholds.
    ///
    /// A single trial has no measurable spread and reports a standard
    /// deviation of 0.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `results` is empty or holds
    /// a non-finite value.
    pub fn from_results(results: Vec<f64>, seed: u64) -> Result<Self, PercolationError> {
        let mean = stats::mean(&results).ok_or_else(|| {
            PercolationError::InvalidArgument(
                "trial results must be non-empty and finite".into(),
            )
        })?;
        let stddev = stats::std_dev(&results).unwrap_or(0.0);
        let interval = ConfidenceInterval::normal_95(mean, stddev, results.len());
        Ok(Self {
            results,
            seed,
            mean,
            stddev,
            interval,
        })
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.interval.lo
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.interval.hi
    }

    pub fn confidence_interval(&self) -> ConfidenceInterval {
        self.interval
    }

    /// Per-trial thresholds in trial order.
    pub fn results(&self) -> &[f64] {
        &self.results
    }

    pub fn trials(&self) -> usize {
        self.results.len()
    }

    /// Base seed the trials were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_site_grid() {
        let stats = PercolationStats::new(1, 25).unwrap();
        assert_eq!(stats.trials(), 25);
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
        assert_eq!(stats.confidence_lo(), 1.0);
        assert_eq!(stats.confidence_hi(), 1.0);
    }

    #[test]
    fn test_single_trial_has_zero_stddev() {
        let stats = PercolationStats::run(&SimulationConfig::new(1, 1).with_seed(0)).unwrap();
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            PercolationStats::new(0, 10),
            Err(PercolationError::InvalidArgument(_))
        ));
        assert!(matches!(
            PercolationStats::new(10, 0),
            Err(PercolationError::InvalidArgument(_))
        ));
        assert!(matches!(
            run_trial(0, &mut create_rng(0)),
            Err(PercolationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_trial_fraction_bounds() {
        let mut rng = create_rng(99);
        for n in 2..12 {
            let t = run_trial(n, &mut rng).unwrap();
            // At least one site per row is needed to percolate.
            assert!(t >= 1.0 / n as f64 && t <= 1.0, "n={n}: threshold {t}");
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = SimulationConfig::new(8, 12).with_seed(2024);
        let a = PercolationStats::run(&config).unwrap();
        let b = PercolationStats::run(&config).unwrap();
        assert_eq!(a.results(), b.results());
        assert_eq!(a.seed(), 2024);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimulationConfig::new(10, 16).with_seed(7);
        let seq = PercolationStats::run(&config).unwrap();
        let par = PercolationStats::run(&config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.results(), par.results());
        assert_eq!(seq.mean(), par.mean());
        assert_eq!(seq.stddev(), par.stddev());
    }

    #[test]
    fn test_from_results() {
        let stats = PercolationStats::from_results(vec![0.5, 0.7], 0).unwrap();
        assert!((stats.mean() - 0.6).abs() < 1e-15);
        assert!((stats.stddev() - 0.02_f64.sqrt()).abs() < 1e-12);
        let ci = stats.confidence_interval();
        assert!(ci.lo < 0.6 && ci.hi > 0.6);

        assert!(PercolationStats::from_results(vec![], 0).is_err());
        assert!(PercolationStats::from_results(vec![f64::NAN], 0).is_err());
    }

    #[test]
    fn test_from_counts_rejects_non_positive() {
        assert_eq!(
            SimulationConfig::from_counts(-3, 5),
            Err(PercolationError::InvalidArgument(
                "grid size must be positive, got -3".into()
            ))
        );
        assert_eq!(
            SimulationConfig::from_counts(4, 0),
            Err(PercolationError::InvalidArgument(
                "trial count must be positive, got 0".into()
            ))
        );
        assert_eq!(
            SimulationConfig::from_counts(4, 7),
            Ok(SimulationConfig::new(4, 7))
        );
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!((config.grid_size, config.trials), (10, 10));
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }
}
