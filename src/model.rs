//! Route model builder and solved-route traversal.

use std::iter::FusedIterator;
use std::time::Duration;

use tracing::{debug, info};

use crate::callback::{CallbackManager, CallbackType};
use crate::error::{Result, RoutingError};
use crate::evaluator::Evaluator;
use crate::params::{FirstSolutionStrategy, SearchParameters};
use crate::traits::{
    ArcCostScope, Assignment, CallbackIndex, DimensionId, EngineIndex, IndexManager, Magnitude,
    RoutingEngine, Stop, Variable, VehicleId,
};

/// Name of the dimension that orders pickups before deliveries.
pub const ORDERING_DIMENSION: &str = "_ordering";

/// A named running quantity accumulated along each route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    id: DimensionId,
    name: String,
}

impl Dimension {
    pub fn id(&self) -> DimensionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accumulated value at an engine index.
    pub fn cumul_var(&self, index: EngineIndex) -> Variable {
        Variable::Cumul {
            dimension: self.id,
            index,
        }
    }
}

/// Optional dimension settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionOptions {
    /// Largest slack allowed between consecutive stops.
    pub slack_max: Magnitude,
    pub fix_start_cumul_to_zero: bool,
}

impl Default for DimensionOptions {
    fn default() -> Self {
        Self {
            slack_max: 0,
            fix_start_cumul_to_zero: true,
        }
    }
}

/// Groups an engine's index manager and model with the side-effecting
/// builder operations.
pub struct RouteModel<E: RoutingEngine> {
    manager: E::Manager,
    engine: E,
    callbacks: CallbackManager,
    ordering: Option<Dimension>,
}

impl<E: RoutingEngine> RouteModel<E> {
    pub fn new(num_stops: usize, num_vehicles: usize, depot: Stop) -> Result<Self> {
        let manager = E::create_manager(num_stops, num_vehicles, depot)?;
        let engine = E::create_model(&manager);

        Ok(Self {
            manager,
            engine,
            callbacks: CallbackManager::new(),
            ordering: None,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access for constraints this builder does not cover.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn manager(&self) -> &E::Manager {
        &self.manager
    }

    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    pub fn num_vehicles(&self) -> usize {
        self.manager.num_vehicles()
    }

    /// Looks up a dimension created on this model.
    pub fn dimension(&self, name: &str) -> Option<Dimension> {
        self.engine.dimension(name).map(|id| Dimension {
            id,
            name: name.to_string(),
        })
    }

    fn resolve(&mut self, evaluator: &Evaluator, required: CallbackType) -> Result<CallbackIndex> {
        self.callbacks
            .resolve(&mut self.engine, &self.manager, evaluator, required)
    }

    /// Uses a transit evaluator as the arc cost of every vehicle.
    pub fn set_global_arc_cost(&mut self, evaluator: &Evaluator) -> Result<()> {
        let callback = self.resolve(evaluator, CallbackType::Transit)?;
        self.engine.set_arc_cost(callback, ArcCostScope::AllVehicles);
        Ok(())
    }

    /// Uses a transit evaluator as the arc cost of one vehicle.
    pub fn set_vehicle_arc_cost(
        &mut self,
        evaluator: &Evaluator,
        vehicle: VehicleId,
    ) -> Result<()> {
        if vehicle >= self.num_vehicles() {
            return Err(RoutingError::UnknownVehicle { vehicle });
        }
        let callback = self.resolve(evaluator, CallbackType::Transit)?;
        self.engine.set_arc_cost(callback, ArcCostScope::Vehicle(vehicle));
        Ok(())
    }

    /// Adds a dimension with the same capacity for every vehicle.
    ///
    /// Demand dimensions usually take a unary evaluator, distance dimensions
    /// a transit one.
    pub fn add_dimension(
        &mut self,
        evaluator: &Evaluator,
        capacity: Magnitude,
        name: &str,
    ) -> Result<Dimension> {
        self.add_dimension_with(evaluator, capacity, name, DimensionOptions::default())
    }

    pub fn add_dimension_with(
        &mut self,
        evaluator: &Evaluator,
        capacity: Magnitude,
        name: &str,
        options: DimensionOptions,
    ) -> Result<Dimension> {
        self.ensure_dimension_name_free(name)?;
        let callback = self.resolve(evaluator, CallbackType::Any)?;
        let created = self.engine.add_dimension(
            callback,
            options.slack_max,
            capacity,
            options.fix_start_cumul_to_zero,
            name,
        );
        self.created_dimension(created, name)
    }

    /// Adds a dimension with one capacity per vehicle.
    pub fn add_dimension_with_vehicle_capacity(
        &mut self,
        evaluator: &Evaluator,
        capacities: &[Magnitude],
        name: &str,
    ) -> Result<Dimension> {
        self.add_dimension_with_vehicle_capacity_with(
            evaluator,
            capacities,
            name,
            DimensionOptions::default(),
        )
    }

    pub fn add_dimension_with_vehicle_capacity_with(
        &mut self,
        evaluator: &Evaluator,
        capacities: &[Magnitude],
        name: &str,
        options: DimensionOptions,
    ) -> Result<Dimension> {
        if capacities.len() != self.num_vehicles() {
            return Err(RoutingError::VehicleCapacityCount {
                expected: self.num_vehicles(),
                actual: capacities.len(),
            });
        }
        self.ensure_dimension_name_free(name)?;
        let callback = self.resolve(evaluator, CallbackType::Any)?;
        let created = self.engine.add_dimension_with_vehicle_capacity(
            callback,
            options.slack_max,
            capacities,
            options.fix_start_cumul_to_zero,
            name,
        );
        self.created_dimension(created, name)
    }

    fn ensure_dimension_name_free(&self, name: &str) -> Result<()> {
        if self.engine.dimension(name).is_some() {
            return Err(RoutingError::DimensionNameCollision { name: name.to_string() });
        }
        Ok(())
    }

    fn created_dimension(&self, created: bool, name: &str) -> Result<Dimension> {
        let dimension = if created { self.dimension(name) } else { None };
        let dimension = dimension.ok_or_else(|| RoutingError::DimensionNameCollision {
            name: name.to_string(),
        })?;
        debug!(event = "dimension_added", name, dimension = dimension.id);
        Ok(dimension)
    }

    fn ordering_dimension(&mut self) -> Result<Dimension> {
        if let Some(dimension) = &self.ordering {
            return Ok(dimension.clone());
        }
        let counter = Evaluator::unary(|_| 1);
        let dimension = self.add_dimension(&counter, Magnitude::MAX, ORDERING_DIMENSION)?;
        self.ordering = Some(dimension.clone());
        Ok(dimension)
    }

    /// Requires `pickup` and `delivery` on the same vehicle, pickup first.
    pub fn add_delivery_request(&mut self, pickup: Stop, delivery: Stop) -> Result<()> {
        let pickup_index = self.manager.stop_to_index(pickup)?;
        let delivery_index = self.manager.stop_to_index(delivery)?;
        let ordering = self.ordering_dimension()?;

        self.engine.add_pickup_delivery(pickup_index, delivery_index);
        self.engine
            .post_equality(Variable::Vehicle(pickup_index), Variable::Vehicle(delivery_index));
        self.engine.post_less_or_equal(
            ordering.cumul_var(pickup_index),
            ordering.cumul_var(delivery_index),
        );

        debug!(event = "delivery_request_added", pickup, delivery);
        Ok(())
    }

    /// Makes a stop optional: skipping it costs `penalty`.
    pub fn allow_drop_of_node(&mut self, stop: Stop, penalty: Magnitude) -> Result<()> {
        let index = self.manager.stop_to_index(stop)?;
        self.engine.add_disjunction(&[index], penalty);
        debug!(event = "disjunction_added", stop, penalty);
        Ok(())
    }

    pub fn solve_using_first_solution_strategy(
        &mut self,
        strategy: FirstSolutionStrategy,
    ) -> Option<E::Solution> {
        let parameters = self
            .engine
            .default_search_parameters()
            .with_first_solution_strategy(strategy);
        self.solve_with_parameters(&parameters)
    }

    pub fn solve_with_parameters(&mut self, parameters: &SearchParameters) -> Option<E::Solution> {
        info!(
            event = "solve_start",
            strategy = ?parameters.first_solution_strategy,
            stops = self.manager.num_stops(),
            vehicles = self.manager.num_vehicles(),
        );
        let solution = self.engine.solve_with_parameters(parameters);
        log_solve_end(solution.as_ref());
        solution
    }

    /// Improves an existing solution with the engine's local search.
    pub fn optimize_solution(
        &mut self,
        initial: &E::Solution,
        time_limit: Option<Duration>,
        solution_limit: Option<u64>,
    ) -> Option<E::Solution> {
        let mut parameters = self.engine.default_search_parameters();
        if let Some(limit) = time_limit {
            parameters = parameters.with_time_limit(limit);
        }
        if let Some(limit) = solution_limit {
            parameters = parameters.with_solution_limit(limit);
        }

        info!(
            event = "optimize_start",
            initial_objective = initial.objective_value(),
            time_limit_ms = time_limit.map(|limit| limit.as_millis() as u64),
            solution_limit,
        );
        let solution = self.engine.solve_from_assignment(initial, &parameters);
        log_solve_end(solution.as_ref());
        solution
    }

    /// Stops visited by vehicle 0, depot first and last.
    pub fn solution_sequence<'a>(&'a self, solution: &'a E::Solution) -> RouteWalker<'a, E> {
        RouteWalker::new(self, solution, 0)
    }

    pub fn route_sequence<'a>(
        &'a self,
        solution: &'a E::Solution,
        vehicle: VehicleId,
    ) -> RouteWalker<'a, E> {
        RouteWalker::new(self, solution, vehicle)
    }

    /// Every vehicle's route, indexed by vehicle.
    pub fn routes(&self, solution: &E::Solution) -> Vec<Vec<Stop>> {
        (0..self.num_vehicles())
            .map(|vehicle| self.route_sequence(solution, vehicle).collect())
            .collect()
    }
}

fn log_solve_end<S: Assignment>(solution: Option<&S>) {
    match solution {
        Some(solution) => info!(event = "solve_end", objective = solution.objective_value()),
        None => info!(event = "solve_end", objective = "none"),
    }
}

/// Single-pass walk along one vehicle's route in a solution.
pub struct RouteWalker<'a, E: RoutingEngine> {
    model: &'a RouteModel<E>,
    solution: &'a E::Solution,
    current: Option<EngineIndex>,
}

impl<'a, E: RoutingEngine> RouteWalker<'a, E> {
    fn new(model: &'a RouteModel<E>, solution: &'a E::Solution, vehicle: VehicleId) -> Self {
        let current = (vehicle < model.num_vehicles()).then(|| model.engine.route_start(vehicle));
        Self {
            model,
            solution,
            current,
        }
    }
}

impl<E: RoutingEngine> Iterator for RouteWalker<'_, E> {
    type Item = Stop;

    fn next(&mut self) -> Option<Stop> {
        let index = self.current?;
        let stop = self.model.manager.index_to_stop(index);

        self.current = if self.model.engine.is_route_end(index) {
            None
        } else {
            let next = self.solution.value_of(Variable::Next(index));
            usize::try_from(next).ok()
        };

        Some(stop)
    }
}

impl<E: RoutingEngine> FusedIterator for RouteWalker<'_, E> {}
