//! Generational loop.
//!
//! [`GaSolver`] seeds a random population, then repeatedly replaces it with
//! children bred by tournament selection → order crossover → adjacent-swap
//! mutation. Replacement is generational with no elites; the only survivor
//! across generations is the separately tracked best-ever tour.
//!
//! Every child slot draws from its own random stream, derived from the master
//! seed, the generation number and the slot index. The three [`Strategy`]
//! variants therefore consume identical random sequences and return the same
//! tour for the same seed.

use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::{GaConfig, Strategy};
use super::operators::{
    adjacent_swap_mutation, order_crossover_into, random_cuts, CrossoverScratch,
};
use super::population::GenerationBuffers;
use super::selection::tournament_select;
use super::types::{is_permutation, FitnessPool, Individual, IndividualRef};
use crate::error::SolverResult;
use crate::geometry::{tour_length, validate_cities, City};
use crate::random::{create_rng, shuffle_into, stream_seed};

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq)]
pub struct GaResult {
    /// Best tour seen over the whole run (1-based city indices).
    pub best_tour: Vec<usize>,

    /// Closed-tour length of `best_tour`.
    pub best_fitness: f64,

    /// Number of generations bred after the initial population.
    pub generations: usize,

    /// Best-ever fitness after initialization, then after each generation.
    ///
    /// Has `generations + 1` entries and never increases.
    pub fitness_history: Vec<f64>,

    /// Master seed the run used; feed it back via
    /// [`GaConfig::with_seed`] to reproduce the run.
    pub seed: u64,
}

/// Genetic-algorithm TSP solver.
///
/// # Usage
///
/// ```
/// use u_tsp::geometry::City;
/// use u_tsp::ga::{GaConfig, GaSolver};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(4.0, 0.0),
///     City::new(4.0, 3.0),
///     City::new(0.0, 3.0),
/// ];
/// let solver = GaSolver::new(GaConfig::new(20, 30)).unwrap();
/// let result = solver.solve(&cities).unwrap();
/// assert_eq!(result.best_tour.len(), 4);
/// assert!((result.best_fitness - 14.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct GaSolver {
    config: GaConfig,
}

impl GaSolver {
    /// Creates a solver, rejecting invalid configurations up front.
    pub fn new(config: GaConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this solver runs with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA on `cities` and returns the best tour found.
    ///
    /// # Errors
    /// [`SolverError::NoCities`](crate::SolverError::NoCities) for an empty
    /// instance and
    /// [`SolverError::NonFiniteCoordinate`](crate::SolverError::NonFiniteCoordinate)
    /// for NaN or infinite coordinates.
    pub fn solve(&self, cities: &[City]) -> SolverResult<GaResult> {
        validate_cities(cities)?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let breeder = Breeder {
            cities,
            config: &self.config,
            seed,
        };

        info!(
            strategy = self.config.strategy.name(),
            cities = cities.len(),
            population_size = self.config.population_size,
            iterations = self.config.iterations,
            seed,
            "starting GA run"
        );

        let (best, fitness_history) = match self.config.strategy {
            Strategy::Allocating => run_allocating(&breeder),
            Strategy::DoubleBuffered => run_double_buffered(&breeder),
            Strategy::Parallel => run_parallel(&breeder),
        };
        assert!(
            is_permutation(best.tour()),
            "best tour is not a permutation: {:?}",
            best.tour()
        );

        info!(
            strategy = self.config.strategy.name(),
            best_fitness = best.fitness(),
            "GA run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best_tour: best.into_tour(),
            generations: self.config.iterations,
            fitness_history,
            seed,
        })
    }
}

/// Solves `cities` with default settings and returns the best tour.
///
/// Fails with an invalid-configuration error, before any work is done, if
/// `population_size` or `iterations` is zero.
///
/// # Examples
///
/// ```
/// use u_tsp::{solve, City, SolverError};
///
/// let cities = [City::new(0.0, 0.0), City::new(1.0, 0.0), City::new(0.0, 1.0)];
/// let tour = solve(&cities, 10, 10).unwrap();
/// assert_eq!(tour.len(), 3);
///
/// assert_eq!(solve(&cities, 0, 10), Err(SolverError::InvalidPopulationSize(0)));
/// ```
pub fn solve(
    cities: &[City],
    population_size: usize,
    iterations: usize,
) -> SolverResult<Vec<usize>> {
    let solver = GaSolver::new(GaConfig::new(population_size, iterations))?;
    Ok(solver.solve(cities)?.best_tour)
}

// ============================================================================
// Shared per-run state
// ============================================================================

/// Read-only inputs shared by every child slot; safe to share across workers.
struct Breeder<'a> {
    cities: &'a [City],
    config: &'a GaConfig,
    seed: u64,
}

impl Breeder<'_> {
    fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Generation 0 is the random initial population.
    fn rng(&self, generation: usize, slot: usize) -> StdRng {
        create_rng(stream_seed(self.seed, generation, slot))
    }

    /// Fills `tour` with a random permutation and returns its length.
    fn seed_slot(&self, slot: usize, tour: &mut [usize]) -> f64 {
        let mut rng = self.rng(0, slot);
        shuffle_into(tour, &mut rng);
        tour_length(tour, self.cities)
    }

    /// Breeds one child into `child` and returns its length.
    fn breed<P: FitnessPool + ?Sized>(
        &self,
        parents: &P,
        generation: usize,
        slot: usize,
        child: &mut [usize],
        scratch: &mut CrossoverScratch,
    ) -> f64 {
        let mut rng = self.rng(generation, slot);
        let k = self.config.tournament_size;

        let first = tournament_select(parents, k, &mut rng);
        let second = tournament_select(parents, k, &mut rng);
        let (start, end) = random_cuts(child.len(), &mut rng);
        order_crossover_into(
            child,
            parents.tour(first),
            parents.tour(second),
            start,
            end,
            scratch,
        );
        adjacent_swap_mutation(child, self.config.mutation_probability, &mut rng);

        debug_assert!(is_permutation(child), "child is not a permutation: {child:?}");
        tour_length(child, self.cities)
    }
}

/// Lowest-fitness individual seen so far.
///
/// Holds its own copy of the tour so that recycling a generation buffer can
/// never overwrite it.
struct BestEver {
    tour: Vec<usize>,
    fitness: f64,
}

impl BestEver {
    fn new(first: IndividualRef<'_>) -> Self {
        Self {
            tour: first.tour.to_vec(),
            fitness: first.fitness,
        }
    }

    /// Takes `candidate` if strictly better; returns whether it did.
    fn offer(&mut self, candidate: IndividualRef<'_>) -> bool {
        if candidate.fitness < self.fitness {
            self.tour.copy_from_slice(candidate.tour);
            self.fitness = candidate.fitness;
            true
        } else {
            false
        }
    }

    fn into_individual(self) -> Individual {
        Individual::new(self.tour, self.fitness)
    }
}

/// Scans a generation in slot order; the earliest slot wins ties.
fn best_of<'a, I>(generation: I) -> BestEver
where
    I: IntoIterator<Item = IndividualRef<'a>>,
{
    let mut views = generation.into_iter();
    let first = views.next().expect("population must not be empty");
    let mut best = BestEver::new(first);
    for view in views {
        best.offer(view);
    }
    best
}

/// Logs the end of a generation and appends the best-ever fitness.
fn record_generation(generation: usize, best: &BestEver, history: &mut Vec<f64>) {
    let improved = history.last().is_some_and(|&prev| best.fitness < prev);
    if improved {
        debug!(generation, best_fitness = best.fitness, "best-ever improved");
    } else {
        trace!(generation, best_fitness = best.fitness, "generation complete");
    }
    history.push(best.fitness);
}

// ============================================================================
// Strategies
// ============================================================================

/// Fresh tour allocation for every child of every generation.
fn run_allocating(breeder: &Breeder<'_>) -> (Individual, Vec<f64>) {
    let n = breeder.city_count();
    let config = breeder.config;

    let mut population: Vec<Individual> = (0..config.population_size)
        .map(|slot| {
            let mut tour = vec![0; n];
            let fitness = breeder.seed_slot(slot, &mut tour);
            Individual::new(tour, fitness)
        })
        .collect();

    let mut best = best_of(population.iter().map(Individual::view));
    let mut history = Vec::with_capacity(config.iterations + 1);
    history.push(best.fitness);

    let mut scratch = CrossoverScratch::new(n);
    for generation in 1..=config.iterations {
        let mut next = Vec::with_capacity(config.population_size);
        for slot in 0..config.population_size {
            let mut tour = vec![0; n];
            let fitness = breeder.breed(
                population.as_slice(),
                generation,
                slot,
                &mut tour,
                &mut scratch,
            );
            let child = Individual::new(tour, fitness);
            best.offer(child.view());
            next.push(child);
        }
        population = next;
        record_generation(generation, &best, &mut history);
    }

    (best.into_individual(), history)
}

/// Two reusable buffers whose parent/child roles swap every generation.
fn run_double_buffered(breeder: &Breeder<'_>) -> (Individual, Vec<f64>) {
    let n = breeder.city_count();
    let config = breeder.config;

    let mut buffers = GenerationBuffers::new(config.population_size, n);
    for (slot, (tour, fitness)) in buffers.parents_mut().slots_mut().enumerate() {
        *fitness = breeder.seed_slot(slot, tour);
    }

    let mut best = best_of(buffers.parents().individuals());
    let mut history = Vec::with_capacity(config.iterations + 1);
    history.push(best.fitness);

    let mut scratch = CrossoverScratch::new(n);
    for generation in 1..=config.iterations {
        let (parents, children) = buffers.split();
        for (slot, (tour, fitness)) in children.slots_mut().enumerate() {
            *fitness = breeder.breed(parents, generation, slot, tour, &mut scratch);
            best.offer(IndividualRef {
                tour,
                fitness: *fitness,
            });
        }
        buffers.swap_roles();
        record_generation(generation, &best, &mut history);
    }

    (best.into_individual(), history)
}

/// Double buffering with each generation's children bred in parallel.
///
/// Each task writes only its own child slot and reads the parent buffer,
/// which stays immutable for the whole generation. Every task builds its
/// generator from its own stream seed, so no generator is shared. The
/// best-ever update runs after all children exist, scanning in slot order.
fn run_parallel(breeder: &Breeder<'_>) -> (Individual, Vec<f64>) {
    let n = breeder.city_count();
    let config = breeder.config;

    let mut buffers = GenerationBuffers::new(config.population_size, n);
    buffers
        .parents_mut()
        .par_slots_mut()
        .enumerate()
        .for_each(|(slot, (tour, fitness))| {
            *fitness = breeder.seed_slot(slot, tour);
        });

    let mut best = best_of(buffers.parents().individuals());
    let mut history = Vec::with_capacity(config.iterations + 1);
    history.push(best.fitness);

    for generation in 1..=config.iterations {
        let (parents, children) = buffers.split();
        children.par_slots_mut().enumerate().for_each_init(
            || CrossoverScratch::new(n),
            |scratch, (slot, (tour, fitness))| {
                *fitness = breeder.breed(parents, generation, slot, tour, scratch);
            },
        );

        for child in children.individuals() {
            best.offer(child);
        }
        buffers.swap_roles();
        record_generation(generation, &best, &mut history);
    }

    (best.into_individual(), history)
}

// ============================================================================
// Tests
// ============================================================================
