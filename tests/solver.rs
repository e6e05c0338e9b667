//! End-to-end checks of the public solver entry points.

use u_tsp::ga::is_permutation;
use u_tsp::geometry::tour_length;
use u_tsp::random::create_rng;
use u_tsp::{solve, City, GaConfig, GaSolver, SolverError, Strategy};

use rand::Rng;

fn grid_cities(side: usize) -> Vec<City> {
    (0..side * side)
        .map(|i| City::new((i % side) as f64, (i / side) as f64))
        .collect()
}

#[test]
fn solve_returns_one_based_permutation() {
    let cities = grid_cities(4);
    let tour = solve(&cities, 50, 50).unwrap();
    assert_eq!(tour.len(), 16);
    assert!(is_permutation(&tour));
    assert!(tour.iter().all(|&c| (1..=16).contains(&c)));
}

#[test]
fn solve_rejects_zero_population_and_iterations() {
    let cities = grid_cities(3);
    assert_eq!(
        solve(&cities, 0, 10),
        Err(SolverError::InvalidPopulationSize(0))
    );
    assert_eq!(solve(&cities, 10, 0), Err(SolverError::InvalidIterations(0)));
}

#[test]
fn solve_rejects_empty_instance() {
    assert_eq!(solve(&[], 10, 10), Err(SolverError::NoCities));
}

#[test]
fn right_triangle_length_is_perimeter() {
    let cities = [City::new(0.0, 0.0), City::new(6.0, 0.0), City::new(0.0, 8.0)];
    let tour = solve(&cities, 4, 2).unwrap();
    assert!((tour_length(&tour, &cities) - 24.0).abs() < 1e-9);
}

#[test]
fn strategies_return_identical_tours() {
    let mut rng = create_rng(2024);
    let cities: Vec<City> = (0..35)
        .map(|_| City::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
        .collect();

    let tours: Vec<Vec<usize>> = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let config = GaConfig::new(60, 80).with_strategy(strategy).with_seed(5);
            GaSolver::new(config).unwrap().solve(&cities).unwrap().best_tour
        })
        .collect();

    assert_eq!(tours[0], tours[1]);
    assert_eq!(tours[1], tours[2]);
}

#[test]
fn grid_tour_approaches_optimum() {
    // The optimal closed tour over a 4x4 unit grid has length 16.
    let cities = grid_cities(4);
    let result = GaSolver::new(GaConfig::new(200, 400).with_strategy(Strategy::Parallel))
        .unwrap()
        .solve(&cities)
        .unwrap();
    assert!(
        result.best_fitness < 16.0 * 1.5,
        "expected a reasonable tour, got {}",
        result.best_fitness
    );
}
