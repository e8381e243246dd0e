//! Engine seam traits.
//!
//! The routing engine is an external collaborator. These traits name the
//! operations the model builder needs from it and nothing more; concrete
//! engines implement them for their own handles.

use std::sync::Arc;

use crate::error::Result;
use crate::params::SearchParameters;

/// A location in the caller's distance/demand matrices.
pub type Stop = usize;

/// An engine routing-variable index (one per visit slot, not per stop).
pub type EngineIndex = usize;

/// Handle returned by the engine when an evaluator is registered.
pub type CallbackIndex = usize;

pub type VehicleId = usize;

/// Engine-assigned dimension handle.
pub type DimensionId = usize;

/// Costs, distances, demands, capacities and penalties.
pub type Magnitude = i64;

/// Engine-space transit evaluator.
pub type TransitFn = Arc<dyn Fn(EngineIndex, EngineIndex) -> Magnitude + Send + Sync>;

/// Engine-space unary evaluator.
pub type UnaryFn = Arc<dyn Fn(EngineIndex) -> Magnitude + Send + Sync>;

/// Maps engine indices to stops and back.
pub trait IndexManager: Clone + Send + Sync + 'static {
    fn num_stops(&self) -> usize;

    fn num_vehicles(&self) -> usize;

    /// Size of the engine index space.
    fn num_indices(&self) -> usize;

    /// Engine indices handed out by the engine are always valid.
    fn index_to_stop(&self, index: EngineIndex) -> Stop;

    fn stop_to_index(&self, stop: Stop) -> Result<EngineIndex>;
}

/// Which vehicles an arc cost evaluator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcCostScope {
    AllVehicles,
    Vehicle(VehicleId),
}

/// Constraint variables the engine exposes for side constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Successor of an index on its route.
    Next(EngineIndex),
    /// Vehicle serving an index, `-1` when the index is unperformed.
    Vehicle(EngineIndex),
    /// Accumulated dimension value at an index.
    Cumul {
        dimension: DimensionId,
        index: EngineIndex,
    },
}

/// A solved assignment of every engine variable.
pub trait Assignment {
    fn value_of(&self, variable: Variable) -> Magnitude;

    fn objective_value(&self) -> Magnitude;
}

/// The routing model operations the builder drives.
pub trait RoutingEngine: Sized {
    type Manager: IndexManager;
    type Solution: Assignment;

    fn create_manager(num_stops: usize, num_vehicles: usize, depot: Stop) -> Result<Self::Manager>;

    fn create_model(manager: &Self::Manager) -> Self;

    fn register_transit_evaluator(&mut self, evaluator: TransitFn) -> CallbackIndex;

    fn register_unary_evaluator(&mut self, evaluator: UnaryFn) -> CallbackIndex;

    fn set_arc_cost(&mut self, callback: CallbackIndex, scope: ArcCostScope);

    /// Returns false when the dimension could not be created, which callers
    /// treat as a name collision.
    fn add_dimension(
        &mut self,
        callback: CallbackIndex,
        slack_max: Magnitude,
        capacity: Magnitude,
        fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> bool;

    fn add_dimension_with_vehicle_capacity(
        &mut self,
        callback: CallbackIndex,
        slack_max: Magnitude,
        capacities: &[Magnitude],
        fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> bool;

    fn dimension(&self, name: &str) -> Option<DimensionId>;

    fn add_disjunction(&mut self, indices: &[EngineIndex], penalty: Magnitude);

    fn add_pickup_delivery(&mut self, pickup: EngineIndex, delivery: EngineIndex);

    fn post_equality(&mut self, left: Variable, right: Variable);

    fn post_less_or_equal(&mut self, left: Variable, right: Variable);

    fn default_search_parameters(&self) -> SearchParameters {
        SearchParameters::default()
    }

    fn solve_with_parameters(&mut self, parameters: &SearchParameters) -> Option<Self::Solution>;

    fn solve_from_assignment(
        &mut self,
        initial: &Self::Solution,
        parameters: &SearchParameters,
    ) -> Option<Self::Solution>;

    fn route_start(&self, vehicle: VehicleId) -> EngineIndex;

    fn route_end(&self, vehicle: VehicleId) -> EngineIndex;

    fn is_route_end(&self, index: EngineIndex) -> bool;
}
