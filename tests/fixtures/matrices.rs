//! Distance matrices and route helpers shared by the scenario tests.

#![allow(dead_code)]

use simple_route::Evaluator;

/// Symmetric four-stop problem, depot 0. The optimal tour costs 80
/// (0 -> 1 -> 3 -> 2 -> 0 or its reverse).
pub fn four_stop_matrix() -> Vec<Vec<i64>> {
    vec![
        vec![0, 10, 15, 20],
        vec![10, 0, 35, 25],
        vec![15, 35, 0, 30],
        vec![20, 25, 30, 0],
    ]
}

pub const FOUR_STOP_OPTIMUM: i64 = 80;

/// Three nearby stops plus stop 3, which is 1000 away from everything.
pub fn remote_stop_matrix() -> Vec<Vec<i64>> {
    vec![
        vec![0, 10, 15, 1000],
        vec![10, 0, 20, 1000],
        vec![15, 20, 0, 1000],
        vec![1000, 1000, 1000, 0],
    ]
}

/// Cheapest tour is 0 -> 2 -> 1 -> 0 (cost 3); the reverse costs 30.
pub fn reversed_pair_matrix() -> Vec<Vec<i64>> {
    vec![
        vec![0, 10, 1],
        vec![1, 0, 10],
        vec![10, 1, 0],
    ]
}

/// A point on a unit grid.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Manhattan distance matrix (simple, predictable).
pub fn manhattan_matrix(points: &[GridPoint]) -> Vec<Vec<i64>> {
    points
        .iter()
        .map(|from| {
            points
                .iter()
                .map(|to| (from.x - to.x).abs() + (from.y - to.y).abs())
                .collect()
        })
        .collect()
}

/// Depot in the middle, two clusters on either side.
pub fn two_cluster_points() -> Vec<GridPoint> {
    vec![
        GridPoint::new(0, 0),
        GridPoint::new(-5, 1),
        GridPoint::new(-6, 2),
        GridPoint::new(5, -1),
        GridPoint::new(6, -2),
    ]
}

pub fn matrix_evaluator(matrix: &[Vec<i64>]) -> Evaluator {
    Evaluator::from_matrix(matrix.to_vec())
}

/// Sum of arc costs along a route.
pub fn tour_cost(matrix: &[Vec<i64>], route: &[usize]) -> i64 {
    route.windows(2).map(|arc| matrix[arc[0]][arc[1]]).sum()
}

/// Position of `stop` within `route`, ignoring the closing depot.
pub fn position_of(route: &[usize], stop: usize) -> Option<usize> {
    route.iter().position(|&visited| visited == stop)
}

/// Vehicle whose route contains `stop`.
pub fn vehicle_of(routes: &[Vec<usize>], stop: usize) -> Option<usize> {
    routes.iter().position(|route| route.contains(&stop))
}
