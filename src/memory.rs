//! In-process routing engine for small models.
//!
//! Implements the engine seam without a native solver: the model is stored
//! as plain data and solved by a depth-first branch and bound over every
//! assignment of stops to routes. The first-solution strategy orders the
//! branches, so the first complete assignment found is that strategy's
//! construction; search then continues until it is exhausted or a search
//! limit is hit. Suitable for tests and models of around ten stops, or
//! larger ones under a time or solution limit.
//!
//! Dimensions are accumulated with zero slack from a start value of zero,
//! and capacities are hard upper bounds on every cumul.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, RoutingError};
use crate::params::{FirstSolutionStrategy, SearchParameters};
use crate::traits::{
    ArcCostScope, Assignment, CallbackIndex, DimensionId, EngineIndex, IndexManager, Magnitude,
    RoutingEngine, Stop, TransitFn, UnaryFn, Variable, VehicleId,
};

#[derive(Debug)]
struct Layout {
    num_stops: usize,
    num_vehicles: usize,
    depot: Stop,
    index_to_stop: Vec<Stop>,
    starts: Vec<EngineIndex>,
    ends: Vec<EngineIndex>,
}

/// Single-depot index layout.
///
/// Stops keep their own number as index, with the depot's slot doubling as
/// vehicle 0's start. Starts of the remaining vehicles follow, then one end
/// index per vehicle.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    layout: Arc<Layout>,
}

impl MemoryManager {
    pub fn new(num_stops: usize, num_vehicles: usize, depot: Stop) -> Result<Self> {
        if num_stops == 0 {
            return Err(RoutingError::InvalidModel("a model needs at least one stop".to_string()));
        }
        if num_vehicles == 0 {
            return Err(RoutingError::InvalidModel(
                "a model needs at least one vehicle".to_string(),
            ));
        }
        if depot >= num_stops {
            return Err(RoutingError::InvalidModel(format!(
                "depot {} is outside of {} stops",
                depot, num_stops
            )));
        }

        let mut starts = vec![depot];
        starts.extend((1..num_vehicles).map(|vehicle| num_stops + vehicle - 1));
        let first_end = num_stops + num_vehicles - 1;
        let ends: Vec<EngineIndex> = (0..num_vehicles).map(|vehicle| first_end + vehicle).collect();

        let mut index_to_stop: Vec<Stop> = (0..num_stops).collect();
        index_to_stop.resize(first_end + num_vehicles, depot);

        Ok(Self {
            layout: Arc::new(Layout {
                num_stops,
                num_vehicles,
                depot,
                index_to_stop,
                starts,
                ends,
            }),
        })
    }

    pub fn depot(&self) -> Stop {
        self.layout.depot
    }

    pub fn start(&self, vehicle: VehicleId) -> EngineIndex {
        self.layout.starts[vehicle]
    }

    pub fn end(&self, vehicle: VehicleId) -> EngineIndex {
        self.layout.ends[vehicle]
    }

    fn is_end(&self, index: EngineIndex) -> bool {
        index >= self.layout.ends[0] && index < self.num_indices()
    }

    /// Route starts and ends are on every route, used or not.
    fn is_route_boundary(&self, index: EngineIndex) -> bool {
        index == self.layout.depot || (index >= self.layout.num_stops && index < self.num_indices())
    }
}

impl IndexManager for MemoryManager {
    fn num_stops(&self) -> usize {
        self.layout.num_stops
    }

    fn num_vehicles(&self) -> usize {
        self.layout.num_vehicles
    }

    fn num_indices(&self) -> usize {
        self.layout.index_to_stop.len()
    }

    fn index_to_stop(&self, index: EngineIndex) -> Stop {
        self.layout.index_to_stop[index]
    }

    fn stop_to_index(&self, stop: Stop) -> Result<EngineIndex> {
        if stop < self.layout.num_stops {
            Ok(stop)
        } else {
            Err(RoutingError::UnknownStop { stop })
        }
    }
}

#[derive(Clone)]
enum Callback {
    Unary(UnaryFn),
    Transit(TransitFn),
}

impl Callback {
    fn evaluate(&self, from: EngineIndex, to: EngineIndex) -> Magnitude {
        match self {
            Callback::Unary(function) => function(from),
            Callback::Transit(function) => function(from, to),
        }
    }
}

#[derive(Debug, Clone)]
struct DimensionDef {
    name: String,
    callback: CallbackIndex,
    capacities: Vec<Magnitude>,
}

#[derive(Debug, Clone, Copy)]
enum Constraint {
    Equal(Variable, Variable),
    LessOrEqual(Variable, Variable),
}

#[derive(Debug, Clone)]
struct Disjunction {
    indices: Vec<EngineIndex>,
    penalty: Magnitude,
}

pub struct MemoryEngine {
    manager: MemoryManager,
    callbacks: Vec<Callback>,
    arc_costs: Vec<Option<CallbackIndex>>,
    dimensions: Vec<DimensionDef>,
    disjunctions: Vec<Disjunction>,
    pickup_deliveries: Vec<(EngineIndex, EngineIndex)>,
    constraints: Vec<Constraint>,
}

impl MemoryEngine {
    /// Number of evaluators registered so far.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub fn disjunction_count(&self) -> usize {
        self.disjunctions.len()
    }

    pub fn pickup_delivery_count(&self) -> usize {
        self.pickup_deliveries.len()
    }

    fn push_dimension(
        &mut self,
        callback: CallbackIndex,
        capacities: Vec<Magnitude>,
        name: &str,
    ) -> bool {
        if callback >= self.callbacks.len() || self.dimension(name).is_some() {
            return false;
        }
        self.dimensions.push(DimensionDef {
            name: name.to_string(),
            callback,
            capacities,
        });
        true
    }

    fn search(
        &self,
        parameters: &SearchParameters,
        incumbent: Option<MemorySolution>,
    ) -> Option<MemorySolution> {
        let mut search = Search::new(self, parameters, incumbent);
        let started = Instant::now();
        search.run();

        debug!(
            event = "search_end",
            solutions = search.found,
            nodes = search.nodes,
            duration_ms = started.elapsed().as_millis() as u64,
            timed_out = search.timed_out,
        );
        if search.timed_out && search.best.is_none() {
            warn!(event = "search_timeout", nodes = search.nodes);
        }
        search.best
    }
}

impl RoutingEngine for MemoryEngine {
    type Manager = MemoryManager;
    type Solution = MemorySolution;

    fn create_manager(num_stops: usize, num_vehicles: usize, depot: Stop) -> Result<MemoryManager> {
        MemoryManager::new(num_stops, num_vehicles, depot)
    }

    fn create_model(manager: &MemoryManager) -> Self {
        Self {
            manager: manager.clone(),
            callbacks: Vec::new(),
            arc_costs: vec![None; manager.num_vehicles()],
            dimensions: Vec::new(),
            disjunctions: Vec::new(),
            pickup_deliveries: Vec::new(),
            constraints: Vec::new(),
        }
    }

    fn register_transit_evaluator(&mut self, evaluator: TransitFn) -> CallbackIndex {
        self.callbacks.push(Callback::Transit(evaluator));
        self.callbacks.len() - 1
    }

    fn register_unary_evaluator(&mut self, evaluator: UnaryFn) -> CallbackIndex {
        self.callbacks.push(Callback::Unary(evaluator));
        self.callbacks.len() - 1
    }

    fn set_arc_cost(&mut self, callback: CallbackIndex, scope: ArcCostScope) {
        match scope {
            ArcCostScope::AllVehicles => self.arc_costs.fill(Some(callback)),
            ArcCostScope::Vehicle(vehicle) => {
                if let Some(slot) = self.arc_costs.get_mut(vehicle) {
                    *slot = Some(callback);
                }
            }
        }
    }

    fn add_dimension(
        &mut self,
        callback: CallbackIndex,
        _slack_max: Magnitude,
        capacity: Magnitude,
        _fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> bool {
        let capacities = vec![capacity; self.manager.num_vehicles()];
        self.push_dimension(callback, capacities, name)
    }

    fn add_dimension_with_vehicle_capacity(
        &mut self,
        callback: CallbackIndex,
        _slack_max: Magnitude,
        capacities: &[Magnitude],
        _fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> bool {
        if capacities.len() != self.manager.num_vehicles() {
            return false;
        }
        self.push_dimension(callback, capacities.to_vec(), name)
    }

    fn dimension(&self, name: &str) -> Option<DimensionId> {
        self.dimensions.iter().position(|dimension| dimension.name == name)
    }

    fn add_disjunction(&mut self, indices: &[EngineIndex], penalty: Magnitude) {
        self.disjunctions.push(Disjunction {
            indices: indices.to_vec(),
            penalty,
        });
    }

    fn add_pickup_delivery(&mut self, pickup: EngineIndex, delivery: EngineIndex) {
        self.pickup_deliveries.push((pickup, delivery));
    }

    fn post_equality(&mut self, left: Variable, right: Variable) {
        self.constraints.push(Constraint::Equal(left, right));
    }

    fn post_less_or_equal(&mut self, left: Variable, right: Variable) {
        self.constraints.push(Constraint::LessOrEqual(left, right));
    }

    fn solve_with_parameters(&mut self, parameters: &SearchParameters) -> Option<MemorySolution> {
        self.search(parameters, None)
    }

    fn solve_from_assignment(
        &mut self,
        initial: &MemorySolution,
        parameters: &SearchParameters,
    ) -> Option<MemorySolution> {
        self.search(parameters, Some(initial.clone()))
    }

    fn route_start(&self, vehicle: VehicleId) -> EngineIndex {
        self.manager.start(vehicle)
    }

    fn route_end(&self, vehicle: VehicleId) -> EngineIndex {
        self.manager.end(vehicle)
    }

    fn is_route_end(&self, index: EngineIndex) -> bool {
        self.manager.is_end(index)
    }
}

/// A complete assignment produced by [`MemoryEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySolution {
    routes: Vec<Vec<EngineIndex>>,
    next: Vec<EngineIndex>,
    vehicles: Vec<Magnitude>,
    cumuls: Vec<Vec<Magnitude>>,
    dropped: Vec<Stop>,
    objective: Magnitude,
}

impl MemorySolution {
    /// Stops left out of every route.
    pub fn dropped(&self) -> &[Stop] {
        &self.dropped
    }

    /// Engine indices of one vehicle's route, start and end included.
    pub fn route_indices(&self, vehicle: VehicleId) -> Option<&[EngineIndex]> {
        self.routes.get(vehicle).map(Vec::as_slice)
    }

    fn performed(&self, index: EngineIndex) -> bool {
        self.vehicles.get(index).is_some_and(|&vehicle| vehicle >= 0)
    }
}

impl Assignment for MemorySolution {
    fn value_of(&self, variable: Variable) -> Magnitude {
        match variable {
            Variable::Next(index) => self.next.get(index).map_or(-1, |&next| next as Magnitude),
            Variable::Vehicle(index) => self.vehicles.get(index).copied().unwrap_or(-1),
            Variable::Cumul { dimension, index } => self
                .cumuls
                .get(dimension)
                .and_then(|cumuls| cumuls.get(index))
                .copied()
                .unwrap_or(0),
        }
    }

    fn objective_value(&self) -> Magnitude {
        self.objective
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Visit(EngineIndex),
    Close,
}

/// Branch and bound state for one solve call.
struct Search<'a> {
    engine: &'a MemoryEngine,
    strategy: FirstSolutionStrategy,
    deadline: Option<Instant>,
    solution_limit: Option<u64>,
    tables: HashMap<CallbackIndex, Vec<Vec<Magnitude>>>,
    /// Arc costs and penalties are non-negative, so partial cost bounds.
    bounded: bool,
    candidates: Vec<EngineIndex>,
    deliveries_of: Vec<Vec<EngineIndex>>,
    pickups_of: Vec<Vec<EngineIndex>>,
    served_by: Vec<Option<VehicleId>>,
    routes: Vec<Vec<EngineIndex>>,
    best: Option<MemorySolution>,
    found: u64,
    nodes: u64,
    timed_out: bool,
    stopped: bool,
}

impl<'a> Search<'a> {
    fn new(
        engine: &'a MemoryEngine,
        parameters: &SearchParameters,
        incumbent: Option<MemorySolution>,
    ) -> Self {
        let manager = &engine.manager;
        let size = manager.num_indices();

        let mut used: Vec<CallbackIndex> = engine
            .arc_costs
            .iter()
            .flatten()
            .copied()
            .chain(engine.dimensions.iter().map(|dimension| dimension.callback))
            .collect();
        used.sort_unstable();
        used.dedup();

        let tables: HashMap<CallbackIndex, Vec<Vec<Magnitude>>> = used
            .into_iter()
            .filter_map(|index| {
                engine
                    .callbacks
                    .get(index)
                    .map(|callback| (index, table(callback, size)))
            })
            .collect();

        let bounded = engine
            .arc_costs
            .iter()
            .flatten()
            .filter_map(|index| tables.get(index))
            .all(|rows| rows.iter().flatten().all(|&cost| cost >= 0))
            && engine.disjunctions.iter().all(|disjunction| disjunction.penalty >= 0);

        let candidates = (0..manager.num_stops())
            .filter(|&stop| stop != manager.depot())
            .collect();

        let mut deliveries_of = vec![Vec::new(); size];
        let mut pickups_of = vec![Vec::new(); size];
        for &(pickup, delivery) in &engine.pickup_deliveries {
            deliveries_of[pickup].push(delivery);
            pickups_of[delivery].push(pickup);
        }

        Self {
            engine,
            strategy: parameters.first_solution_strategy,
            deadline: parameters
                .time_limit
                .and_then(|limit| Instant::now().checked_add(limit)),
            solution_limit: parameters.solution_limit,
            tables,
            bounded,
            candidates,
            deliveries_of,
            pickups_of,
            served_by: vec![None; size],
            routes: Vec::new(),
            best: incumbent,
            found: 0,
            nodes: 0,
            timed_out: false,
            stopped: false,
        }
    }

    fn arc_cost(&self, vehicle: VehicleId, from: EngineIndex, to: EngineIndex) -> Magnitude {
        self.engine.arc_costs[vehicle]
            .and_then(|callback| self.tables.get(&callback))
            .map_or(0, |rows| rows[from][to])
    }

    fn transit(&self, dimension: usize, from: EngineIndex, to: EngineIndex) -> Magnitude {
        let callback = self.engine.dimensions[dimension].callback;
        self.tables.get(&callback).map_or(0, |rows| rows[from][to])
    }

    fn best_objective(&self) -> Magnitude {
        self.best.as_ref().map_or(Magnitude::MAX, |best| best.objective)
    }

    fn run(&mut self) {
        self.open_route(0, 0);
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                self.stopped = true;
            }
        }
        self.stopped
    }

    fn open_route(&mut self, vehicle: VehicleId, cost: Magnitude) {
        let start = self.engine.manager.start(vehicle);
        self.routes.push(vec![start]);
        let cumuls = vec![0; self.engine.dimensions.len()];
        self.extend(vehicle, cost, &cumuls);
        self.routes.pop();
    }

    fn extend(&mut self, vehicle: VehicleId, cost: Magnitude, cumuls: &[Magnitude]) {
        self.nodes += 1;
        if self.should_stop() {
            return;
        }
        if self.bounded && cost >= self.best_objective() {
            return;
        }

        for (step, arc) in self.steps(vehicle, cumuls) {
            if self.stopped {
                return;
            }
            match step {
                Step::Visit(index) => {
                    let next_cumuls = self.advance(vehicle, cumuls, index);
                    self.served_by[index] = Some(vehicle);
                    self.routes[vehicle].push(index);
                    self.extend(vehicle, cost.saturating_add(arc), &next_cumuls);
                    self.routes[vehicle].pop();
                    self.served_by[index] = None;
                }
                Step::Close => {
                    let end = self.engine.manager.end(vehicle);
                    self.routes[vehicle].push(end);
                    let cost = cost.saturating_add(arc);
                    if vehicle + 1 < self.engine.manager.num_vehicles() {
                        self.open_route(vehicle + 1, cost);
                    } else {
                        self.complete(cost);
                    }
                    self.routes[vehicle].pop();
                }
            }
        }
    }

    fn advance(&self, vehicle: VehicleId, cumuls: &[Magnitude], to: EngineIndex) -> Vec<Magnitude> {
        let from = current(&self.routes[vehicle]);
        cumuls
            .iter()
            .enumerate()
            .map(|(dimension, &cumul)| cumul.saturating_add(self.transit(dimension, from, to)))
            .collect()
    }

    fn within_capacity(&self, vehicle: VehicleId, cumuls: &[Magnitude]) -> bool {
        self.engine
            .dimensions
            .iter()
            .zip(cumuls)
            .all(|(dimension, &cumul)| cumul <= dimension.capacities[vehicle])
    }

    /// Feasible next steps for `vehicle`, in the strategy's preferred order.
    fn steps(&self, vehicle: VehicleId, cumuls: &[Magnitude]) -> Vec<(Step, Magnitude)> {
        let route = &self.routes[vehicle];
        let from = current(route);
        let mut visits = Vec::new();

        for &index in &self.candidates {
            if self.served_by[index].is_some() {
                continue;
            }
            let pickups_ready = self.pickups_of[index]
                .iter()
                .all(|&pickup| self.served_by[pickup] == Some(vehicle));
            if !pickups_ready {
                continue;
            }
            if !self.within_capacity(vehicle, &self.advance(vehicle, cumuls, index)) {
                continue;
            }
            visits.push((Step::Visit(index), self.arc_cost(vehicle, from, index)));
        }

        if self.strategy.is_arc_based() {
            visits.sort_by_key(|&(_, arc)| arc);
        }

        let mut steps = Vec::with_capacity(visits.len() + 1);
        if let Some(close) = self.close_step(vehicle, cumuls) {
            if self.strategy == FirstSolutionStrategy::AllUnperformed {
                steps.push(close);
                steps.extend(visits);
            } else {
                steps.extend(visits);
                steps.push(close);
            }
        } else {
            steps.extend(visits);
        }
        steps
    }

    fn close_step(&self, vehicle: VehicleId, cumuls: &[Magnitude]) -> Option<(Step, Magnitude)> {
        let route = &self.routes[vehicle];
        let open_pickup = route[1..].iter().any(|&index| {
            self.deliveries_of[index]
                .iter()
                .any(|&delivery| self.served_by[delivery] != Some(vehicle))
        });
        if open_pickup {
            return None;
        }
        if route.len() == 1 {
            return Some((Step::Close, 0));
        }

        let end = self.engine.manager.end(vehicle);
        if !self.within_capacity(vehicle, &self.advance(vehicle, cumuls, end)) {
            return None;
        }
        Some((Step::Close, self.arc_cost(vehicle, current(route), end)))
    }

    fn complete(&mut self, cost: Magnitude) {
        let Some(solution) = self.assemble(cost) else {
            return;
        };
        if solution.objective >= self.best_objective() {
            return;
        }
        if !self.satisfies_constraints(&solution) {
            return;
        }

        debug!(event = "solution_found", objective = solution.objective, nodes = self.nodes);
        self.best = Some(solution);
        self.found += 1;
        if self.solution_limit.is_some_and(|limit| self.found >= limit) {
            self.stopped = true;
        }
    }

    /// Builds the assignment for the current routes, or `None` when the
    /// disjunctions rule it out.
    fn assemble(&self, cost: Magnitude) -> Option<MemorySolution> {
        let manager = &self.engine.manager;
        let size = manager.num_indices();

        let mut penalties: Magnitude = 0;
        for disjunction in &self.engine.disjunctions {
            let performed = disjunction
                .indices
                .iter()
                .filter(|&&index| {
                    self.served_by[index].is_some() || manager.is_route_boundary(index)
                })
                .count();
            match performed {
                0 => penalties = penalties.saturating_add(disjunction.penalty),
                1 => {}
                _ => return None,
            }
        }

        let mut dropped = Vec::new();
        for &index in &self.candidates {
            if self.served_by[index].is_some() {
                continue;
            }
            let optional = self
                .engine
                .disjunctions
                .iter()
                .any(|disjunction| disjunction.indices.contains(&index));
            if !optional {
                return None;
            }
            dropped.push(manager.index_to_stop(index));
        }

        let mut next: Vec<EngineIndex> = (0..size).collect();
        let mut vehicles = vec![-1; size];
        let mut cumuls: Vec<Vec<Magnitude>> = vec![vec![0; size]; self.engine.dimensions.len()];

        for (vehicle, route) in self.routes.iter().enumerate() {
            for (position, &index) in route.iter().enumerate() {
                vehicles[index] = vehicle as Magnitude;
                if let Some(&following) = route.get(position + 1) {
                    next[index] = following;
                    for (dimension, values) in cumuls.iter_mut().enumerate() {
                        let transit = self.transit(dimension, index, following);
                        values[following] = values[index].saturating_add(transit);
                    }
                }
            }
        }

        Some(MemorySolution {
            routes: self.routes.clone(),
            next,
            vehicles,
            cumuls,
            dropped,
            objective: cost.saturating_add(penalties),
        })
    }

    fn satisfies_constraints(&self, solution: &MemorySolution) -> bool {
        self.engine.constraints.iter().all(|constraint| match *constraint {
            Constraint::Equal(left, right) => solution.value_of(left) == solution.value_of(right),
            Constraint::LessOrEqual(left, right) => {
                if !involves_performed(solution, left) || !involves_performed(solution, right) {
                    return true;
                }
                solution.value_of(left) <= solution.value_of(right)
            }
        })
    }
}

fn involves_performed(solution: &MemorySolution, variable: Variable) -> bool {
    match variable {
        Variable::Cumul { index, .. } => solution.performed(index),
        Variable::Next(_) | Variable::Vehicle(_) => true,
    }
}

fn current(route: &[EngineIndex]) -> EngineIndex {
    route[route.len() - 1]
}

/// Evaluates a callback over every pair of engine indices.
fn table(callback: &Callback, size: usize) -> Vec<Vec<Magnitude>> {
    (0..size)
        .into_par_iter()
        .map(|from| (0..size).map(|to| callback.evaluate(from, to)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_single_vehicle() {
        let manager = MemoryManager::new(4, 1, 0).unwrap();
        assert_eq!(manager.num_indices(), 5);
        assert_eq!(manager.start(0), 0);
        assert_eq!(manager.end(0), 4);
        assert_eq!(manager.index_to_stop(4), 0);
        assert_eq!(manager.stop_to_index(3).unwrap(), 3);
    }

    #[test]
    fn test_layout_depot_not_zero() {
        let manager = MemoryManager::new(3, 2, 2).unwrap();
        assert_eq!(manager.start(0), 2);
        assert_eq!(manager.start(1), 3);
        assert_eq!(manager.end(0), 4);
        assert_eq!(manager.end(1), 5);
        for index in 3..6 {
            assert_eq!(manager.index_to_stop(index), 2);
        }
    }

    #[test]
    fn test_layout_rejects_bad_input() {
        assert!(matches!(MemoryManager::new(0, 1, 0), Err(RoutingError::InvalidModel(_))));
        assert!(matches!(MemoryManager::new(3, 0, 0), Err(RoutingError::InvalidModel(_))));
        assert!(matches!(MemoryManager::new(3, 1, 3), Err(RoutingError::InvalidModel(_))));
        let manager = MemoryManager::new(3, 1, 0).unwrap();
        assert!(matches!(manager.stop_to_index(3), Err(RoutingError::UnknownStop { stop: 3 })));
    }

    #[test]
    fn test_dimension_name_taken() {
        let manager = MemoryManager::new(3, 1, 0).unwrap();
        let mut engine = MemoryEngine::create_model(&manager);
        let callback = engine.register_unary_evaluator(Arc::new(|_: EngineIndex| 1));
        assert!(engine.add_dimension(callback, 0, 10, true, "Load"));
        assert!(!engine.add_dimension(callback, 0, 10, true, "Load"));
        assert!(!engine.add_dimension(callback + 1, 0, 10, true, "Other"));
        assert_eq!(engine.dimension("Load"), Some(0));
    }

    #[test]
    fn test_unconstrained_solution_visits_everything() {
        let manager = MemoryManager::new(4, 1, 0).unwrap();
        let mut engine = MemoryEngine::create_model(&manager);
        let solution = engine
            .solve_with_parameters(&SearchParameters::default())
            .expect("solution");
        assert_eq!(solution.objective_value(), 0);
        assert_eq!(solution.route_indices(0), Some(&[0, 1, 2, 3, 4][..]));
        assert!(solution.dropped().is_empty());
    }

    #[test]
    fn test_capacity_prunes_to_infeasible() {
        let manager = MemoryManager::new(3, 1, 0).unwrap();
        let mut engine = MemoryEngine::create_model(&manager);
        let callback = engine.register_unary_evaluator(Arc::new(|index: EngineIndex| {
            if index == 0 { 0 } else { 5 }
        }));
        assert!(engine.add_dimension(callback, 0, 8, true, "Load"));
        assert!(engine.solve_with_parameters(&SearchParameters::default()).is_none());
    }
}
