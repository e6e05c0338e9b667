//! Cities and Euclidean tour distances.
//!
//! Tours refer to cities by 1-based index into the input slice, so city
//! `k` lives at `cities[k - 1]`.

use crate::error::{SolverError, SolverResult};

/// An immutable point in the plane.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::City;
///
/// let a = City::new(0.0, 0.0);
/// let b = City::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    x: f64,
    y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Euclidean distance between two cities.
pub fn distance(a: &City, b: &City) -> f64 {
    a.distance_to(b)
}

/// Total length of the closed tour, including the edge back to the start.
///
/// A single-city tour has length 0.
///
/// # Panics
///
/// Panics if `tour` is empty or refers to a city outside `1..=cities.len()`.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::{tour_length, City};
///
/// let cities = [City::new(0.0, 0.0), City::new(3.0, 0.0), City::new(3.0, 4.0)];
/// assert!((tour_length(&[1, 2, 3], &cities) - 12.0).abs() < 1e-10);
/// ```
pub fn tour_length(tour: &[usize], cities: &[City]) -> f64 {
    assert!(!tour.is_empty(), "tour must not be empty");

    let city = |idx: usize| cities[idx - 1];
    let open: f64 = tour
        .windows(2)
        .map(|pair| distance(&city(pair[0]), &city(pair[1])))
        .sum();

    let first = tour[0];
    let last = tour[tour.len() - 1];
    open + distance(&city(last), &city(first))
}

/// Checks that an instance is usable: at least one city, all coordinates finite.
pub fn validate_cities(cities: &[City]) -> SolverResult<()> {
    if cities.is_empty() {
        return Err(SolverError::NoCities);
    }
    if let Some(pos) = cities
        .iter()
        .position(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(SolverError::NonFiniteCoordinate { index: pos + 1 });
    }
    Ok(())
}
