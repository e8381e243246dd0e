//! Stop-space to engine-space evaluator translation.

use std::sync::Arc;

use crate::evaluator::{Evaluator, TransitStopFn, UnaryStopFn, VariadicStopFn};
use crate::traits::{EngineIndex, IndexManager, TransitFn, UnaryFn};

/// An evaluator lifted into engine index space.
pub enum LiftedEvaluator {
    Unary(UnaryFn),
    Transit(TransitFn),
}

/// Wraps a stop-pair evaluator so it accepts engine indices.
pub fn lift_transit<M: IndexManager>(manager: &M, evaluator: TransitStopFn) -> TransitFn {
    let manager = manager.clone();
    Arc::new(move |from: EngineIndex, to: EngineIndex| {
        let from_stop = manager.index_to_stop(from);
        let to_stop = manager.index_to_stop(to);
        evaluator(from_stop, to_stop)
    })
}

/// Wraps a single-stop evaluator so it accepts an engine index.
pub fn lift_unary<M: IndexManager>(manager: &M, evaluator: UnaryStopFn) -> UnaryFn {
    let manager = manager.clone();
    Arc::new(move |index: EngineIndex| evaluator(manager.index_to_stop(index)))
}

fn lift_variadic_transit<M: IndexManager>(manager: &M, evaluator: VariadicStopFn) -> TransitFn {
    let manager = manager.clone();
    Arc::new(move |from: EngineIndex, to: EngineIndex| {
        evaluator(&[manager.index_to_stop(from), manager.index_to_stop(to)])
    })
}

fn lift_variadic_unary<M: IndexManager>(manager: &M, evaluator: VariadicStopFn) -> UnaryFn {
    let manager = manager.clone();
    Arc::new(move |index: EngineIndex| evaluator(&[manager.index_to_stop(index)]))
}

/// Lifts any evaluator shape.
///
/// Returns `None` for a variadic evaluator whose arity is neither 1 nor 2;
/// classification rejects those before lifting is attempted.
pub fn lift<M: IndexManager>(manager: &M, evaluator: &Evaluator) -> Option<LiftedEvaluator> {
    match evaluator {
        Evaluator::Unary(function) => {
            Some(LiftedEvaluator::Unary(lift_unary(manager, function.clone())))
        }
        Evaluator::Transit(function) => {
            Some(LiftedEvaluator::Transit(lift_transit(manager, function.clone())))
        }
        Evaluator::Variadic { arity: 1, function } => Some(LiftedEvaluator::Unary(
            lift_variadic_unary(manager, function.clone()),
        )),
        Evaluator::Variadic { arity: 2, function } => Some(LiftedEvaluator::Transit(
            lift_variadic_transit(manager, function.clone()),
        )),
        Evaluator::Variadic { .. } => None,
    }
}
