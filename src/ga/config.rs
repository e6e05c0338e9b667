//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{SolverError, SolverResult};

/// How generation storage is managed.
///
/// All strategies run the same algorithm and, for a fixed seed, return the
/// same tour. They differ only in allocation behaviour and parallelism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Allocates a fresh tour for every child in every generation.
    Allocating,

    /// Two contiguous generation buffers whose parent/child roles swap each
    /// generation. No heap growth after setup.
    #[default]
    DoubleBuffered,

    /// Double buffering with the children of one generation produced in
    /// parallel via rayon, one task per child slot.
    Parallel,
}

impl Strategy {
    /// Every strategy, in increasing order of engineering effort.
    pub const ALL: [Strategy; 3] = [
        Strategy::Allocating,
        Strategy::DoubleBuffered,
        Strategy::Parallel,
    ];

    /// Short lowercase name used in logs and benchmark ids.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Allocating => "allocating",
            Strategy::DoubleBuffered => "double-buffered",
            Strategy::Parallel => "parallel",
        }
    }
}

/// Configuration for the GA solver.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::{GaConfig, Strategy};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.iterations, 100);
/// assert_eq!(config.tournament_size, 3);
/// assert_eq!(config.strategy, Strategy::DoubleBuffered);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{GaConfig, Strategy};
///
/// let config = GaConfig::new(200, 500)
///     .with_strategy(Strategy::Parallel)
///     .with_mutation_probability(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Number of generations bred after the initial population.
    pub iterations: usize,

    /// Contenders per tournament.
    pub tournament_size: usize,

    /// Probability that a child receives an adjacent swap (0.0–1.0).
    pub mutation_probability: f64,

    /// Generation storage strategy.
    pub strategy: Strategy,

    /// Master seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

/// Master seed used when none is configured explicitly.
pub const DEFAULT_SEED: u64 = 777;

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            iterations: 100,
            tournament_size: 3,
            mutation_probability: 0.05,
            strategy: Strategy::default(),
            seed: Some(DEFAULT_SEED),
        }
    }
}

impl GaConfig {
    /// Default configuration with the given population size and iteration count.
    pub fn new(population_size: usize, iterations: usize) -> Self {
        Self {
            population_size,
            iterations,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation probability. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the storage strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws a fresh master seed on every run.
    pub fn with_random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SolverResult<()> {
        if self.population_size == 0 {
            return Err(SolverError::InvalidPopulationSize(self.population_size));
        }
        if self.iterations == 0 {
            return Err(SolverError::InvalidIterations(self.iterations));
        }
        if self.tournament_size == 0 {
            return Err(SolverError::InvalidTournamentSize(self.tournament_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(SolverError::InvalidMutationProbability(
                self.mutation_probability,
            ));
        }
        Ok(())
    }
}
