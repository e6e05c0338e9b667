//! Genetic-algorithm solver for the Traveling Salesman Problem on 2D points.
//!
//! The solver evolves closed tours over a list of cities and returns the
//! shortest tour it encountered. The same algorithm ships in three memory
//! strategies, selected through [`ga::Strategy`]:
//!
//! - **Allocating**: a fresh tour vector for every child of every generation.
//! - **Double-buffered**: two contiguous generation buffers whose
//!   parent/child roles swap each generation; nothing is allocated in the loop.
//! - **Parallel**: double buffering with children bred concurrently via rayon.
//!
//! For a fixed seed all three return the identical tour.
//!
//! # Modules
//!
//! - [`geometry`]: Cities, Euclidean distance, closed-tour length
//! - [`random`]: Seedable generators, per-slot streams, random tours
//! - [`ga`]: Configuration, operators, population storage, the solver
//! - [`error`]: Configuration and input errors
//!
//! Tours are 1-based: city `k` is `cities[k - 1]`.

pub mod error;
pub mod ga;
pub mod geometry;
pub mod random;

pub use error::{SolverError, SolverResult};
pub use ga::{solve, GaConfig, GaResult, GaSolver, Strategy};
pub use geometry::City;
