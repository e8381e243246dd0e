//! Error types for model building.

use thiserror::Error;

use crate::callback::CallbackType;
use crate::traits::{CallbackIndex, Stop, VehicleId};

#[derive(Debug, Error)]
pub enum RoutingError {
    /// A callback index was supplied where an evaluator is required.
    #[error("callback index {index} is not an evaluator")]
    InvalidCallback { index: CallbackIndex },

    #[error("evaluator takes {arity} arguments, expected 1 or 2")]
    InvalidArity { arity: usize },

    #[error("required a {required} evaluator, got a {actual} evaluator")]
    ClassificationMismatch {
        required: CallbackType,
        actual: CallbackType,
    },

    /// Should not occur given idempotent resolution.
    #[error("evaluator already registered under callback index {index}")]
    DuplicateCallback { index: CallbackIndex },

    #[error("failed to add dimension {name:?}, the name may already be in use")]
    DimensionNameCollision { name: String },

    #[error("stop {stop} is not part of the model")]
    UnknownStop { stop: Stop },

    #[error("vehicle {vehicle} is not part of the model")]
    UnknownVehicle { vehicle: VehicleId },

    #[error("expected {expected} vehicle capacities, got {actual}")]
    VehicleCapacityCount { expected: usize, actual: usize },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("matrix row {row} has {len} entries, expected {expected}")]
    InvalidMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, RoutingError>;
