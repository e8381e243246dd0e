//! One-call helpers for plain shortest-tour problems.

use crate::error::{Result, RoutingError};
use crate::evaluator::Evaluator;
use crate::model::RouteModel;
use crate::params::FirstSolutionStrategy;
use crate::traits::{Magnitude, RoutingEngine, Stop};

/// Stops in visiting order, depot first and last.
pub type Route = Vec<Stop>;

/// Routes every stop with `evaluator` as the arc cost of all vehicles.
///
/// Returns one route per vehicle, or `None` when the engine finds no
/// solution.
pub fn optimize_route<E: RoutingEngine>(
    evaluator: &Evaluator,
    num_stops: usize,
    num_vehicles: usize,
    depot: Stop,
) -> Result<Option<Vec<Route>>> {
    let mut model = RouteModel::<E>::new(num_stops, num_vehicles, depot)?;
    model.set_global_arc_cost(evaluator)?;

    let solution =
        model.solve_using_first_solution_strategy(FirstSolutionStrategy::GlobalCheapestArc);
    Ok(solution.map(|solution| model.routes(&solution)))
}

/// [`optimize_route`] over a square cost matrix.
pub fn optimize_matrix<E: RoutingEngine>(
    matrix: &[Vec<Magnitude>],
    num_vehicles: usize,
    depot: Stop,
) -> Result<Option<Vec<Route>>> {
    let expected = matrix.len();
    if let Some((row, values)) = matrix
        .iter()
        .enumerate()
        .find(|(_, values)| values.len() != expected)
    {
        return Err(RoutingError::InvalidMatrix {
            row,
            len: values.len(),
            expected,
        });
    }

    let evaluator = Evaluator::from_matrix(matrix.to_vec());
    optimize_route::<E>(&evaluator, expected, num_vehicles, depot)
}
