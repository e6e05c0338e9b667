//! Core GA types: owned and borrowed individuals, and the fitness pool
//! abstraction that lets selection run over any population layout.

/// A tour with its cached fitness (closed-tour length, lower is better).
///
/// Fitness is computed once when the individual is built and never
/// recomputed; the individual is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    tour: Vec<usize>,
    fitness: f64,
}

impl Individual {
    /// Wraps an already evaluated tour.
    pub fn new(tour: Vec<usize>, fitness: f64) -> Self {
        Self { tour, fitness }
    }

    /// The visiting order (1-based city indices).
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Cached closed-tour length.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Borrows this individual as a view.
    pub fn view(&self) -> IndividualRef<'_> {
        IndividualRef {
            tour: &self.tour,
            fitness: self.fitness,
        }
    }

    /// Consumes the individual, returning its tour.
    pub fn into_tour(self) -> Vec<usize> {
        self.tour
    }
}

/// A borrowed individual whose tour lives in a shared buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndividualRef<'a> {
    /// Sub-range of the backing buffer holding this tour.
    pub tour: &'a [usize],
    /// Cached closed-tour length.
    pub fitness: f64,
}

impl IndividualRef<'_> {
    /// Copies the view out into an owned [`Individual`].
    pub fn to_individual(&self) -> Individual {
        Individual::new(self.tour.to_vec(), self.fitness)
    }
}

/// A read-only generation addressed by position.
///
/// Implemented by both the vector-of-individuals layout and the contiguous
/// arena, so selection and breeding do not care how a generation is stored.
pub trait FitnessPool {
    /// Number of individuals.
    fn len(&self) -> usize;

    /// Fitness of the individual at `idx`.
    fn fitness(&self, idx: usize) -> f64;

    /// Tour of the individual at `idx`.
    fn tour(&self, idx: usize) -> &[usize];

    /// Returns `true` if the pool holds no individuals.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FitnessPool for [Individual] {
    fn len(&self) -> usize {
        <[Individual]>::len(self)
    }

    fn fitness(&self, idx: usize) -> f64 {
        self[idx].fitness
    }

    fn tour(&self, idx: usize) -> &[usize] {
        &self[idx].tour
    }
}

impl FitnessPool for Vec<Individual> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn fitness(&self, idx: usize) -> f64 {
        self[idx].fitness
    }

    fn tour(&self, idx: usize) -> &[usize] {
        &self[idx].tour
    }
}

/// Returns `true` if `tour` visits every city of `1..=tour.len()` exactly once.
pub fn is_permutation(tour: &[usize]) -> bool {
    let n = tour.len();
    let mut seen = vec![false; n];
    for &city in tour {
        if city == 0 || city > n || seen[city - 1] {
            return false;
        }
        seen[city - 1] = true;
    }
    true
}
