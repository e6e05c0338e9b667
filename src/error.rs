//! Error types reported by the solver.
//!
//! Only configuration and input problems are errors. A crossover or
//! mutation step that breaks the permutation invariant is a defect and
//! panics instead of being reported here.

use std::fmt;

/// Errors returned before any search work is done.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Population size must be positive.
    InvalidPopulationSize(usize),

    /// Number of iterations must be positive.
    InvalidIterations(usize),

    /// Tournament size must be positive.
    InvalidTournamentSize(usize),

    /// Mutation probability must be a finite value in `[0, 1]`.
    InvalidMutationProbability(f64),

    /// The instance has no cities.
    NoCities,

    /// A city has a NaN or infinite coordinate.
    NonFiniteCoordinate {
        /// 1-based index of the offending city.
        index: usize,
    },
}

/// A type alias for results carrying [`SolverError`].
pub type SolverResult<T> = Result<T, SolverError>;

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidPopulationSize(n) => {
                write!(f, "population size must be positive, got {n}")
            }
            SolverError::InvalidIterations(n) => {
                write!(f, "number of iterations must be positive, got {n}")
            }
            SolverError::InvalidTournamentSize(k) => {
                write!(f, "tournament size must be positive, got {k}")
            }
            SolverError::InvalidMutationProbability(p) => {
                write!(f, "mutation probability must be within [0, 1], got {p}")
            }
            SolverError::NoCities => write!(f, "instance must contain at least one city"),
            SolverError::NonFiniteCoordinate { index } => {
                write!(f, "city {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SolverError::InvalidPopulationSize(0).to_string(),
            "population size must be positive, got 0"
        );
        assert_eq!(
            SolverError::InvalidIterations(0).to_string(),
            "number of iterations must be positive, got 0"
        );
        assert_eq!(
            SolverError::NonFiniteCoordinate { index: 3 }.to_string(),
            "city 3 has a non-finite coordinate"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(SolverError::NoCities);
        assert!(err.to_string().contains("at least one city"));
    }
}
