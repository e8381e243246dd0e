//! simple-route: a convenience layer over a vehicle-routing engine.
//!
//! Turns plain stop-numbered evaluators into engine callbacks and composes
//! costs, dimensions, pickup-delivery pairs and optional stops into one model.

pub mod traits;
pub mod error;
pub mod evaluator;
pub mod translate;
pub mod callback;
pub mod params;
pub mod model;
pub mod memory;
pub mod optimize;

pub use callback::{CallbackKey, CallbackManager, CallbackRegistry, CallbackType};
pub use error::{Result, RoutingError};
pub use evaluator::Evaluator;
pub use model::{Dimension, DimensionOptions, RouteModel, RouteWalker};
pub use params::{FirstSolutionStrategy, SearchParameters};
pub use traits::{Assignment, IndexManager, RoutingEngine, Variable};
