//! Genetic algorithm for the TSP.
//!
//! A population of random tours evolves through tournament selection, order
//! crossover and adjacent-swap mutation. Each generation fully replaces the
//! previous one; the best tour ever seen is tracked on the side and returned.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, iterations, operator parameters, seed
//! - [`Strategy`]: Allocating, double-buffered, or parallel generation storage
//! - [`GaSolver`]: Executes the generational loop
//! - [`GaResult`]: Best tour plus per-generation best-ever history
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX) and adjacent-swap mutation on tours
//! - [`population`]: Contiguous tour arenas and double-buffer role swapping
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
pub mod operators;
pub mod population;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, Strategy, DEFAULT_SEED};
pub use runner::{solve, GaResult, GaSolver};
pub use selection::tournament_select;
pub use types::{is_permutation, FitnessPool, Individual, IndividualRef};
