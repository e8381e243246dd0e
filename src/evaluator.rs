//! Caller-supplied evaluators.
//!
//! An evaluator scores either a single stop (demand, value) or a pair of
//! stops (cost, distance). Evaluators are shared handles: cloning one keeps
//! its identity, which is what the callback registry keys on.

use std::fmt;
use std::sync::Arc;

use crate::traits::{Magnitude, Stop};

pub type UnaryStopFn = Arc<dyn Fn(Stop) -> Magnitude + Send + Sync>;
pub type TransitStopFn = Arc<dyn Fn(Stop, Stop) -> Magnitude + Send + Sync>;
pub type VariadicStopFn = Arc<dyn Fn(&[Stop]) -> Magnitude + Send + Sync>;

/// Identity of an evaluator: the address of its shared function object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluatorId(usize);

#[derive(Clone)]
pub enum Evaluator {
    /// Value of one stop.
    Unary(UnaryStopFn),
    /// Value of travelling between two stops.
    Transit(TransitStopFn),
    /// Arity only known at run time; classified by `arity`.
    Variadic { arity: usize, function: VariadicStopFn },
}

impl Evaluator {
    pub fn unary<F>(function: F) -> Self
    where
        F: Fn(Stop) -> Magnitude + Send + Sync + 'static,
    {
        Evaluator::Unary(Arc::new(function))
    }

    pub fn transit<F>(function: F) -> Self
    where
        F: Fn(Stop, Stop) -> Magnitude + Send + Sync + 'static,
    {
        Evaluator::Transit(Arc::new(function))
    }

    /// An evaluator taking `arity` stops as a slice.
    ///
    /// Only arities 1 and 2 can be registered; others are rejected when the
    /// evaluator is resolved, not here.
    pub fn with_arity<F>(arity: usize, function: F) -> Self
    where
        F: Fn(&[Stop]) -> Magnitude + Send + Sync + 'static,
    {
        Evaluator::Variadic {
            arity,
            function: Arc::new(function),
        }
    }

    /// Evaluator over a square matrix, `matrix[from][to]`.
    pub fn from_matrix(matrix: Vec<Vec<Magnitude>>) -> Self {
        Evaluator::transit(move |from, to| matrix[from][to])
    }

    /// Evaluator over per-stop values, `values[stop]`.
    pub fn from_values(values: Vec<Magnitude>) -> Self {
        Evaluator::unary(move |stop| values[stop])
    }

    pub fn id(&self) -> EvaluatorId {
        let address = match self {
            Evaluator::Unary(function) => Arc::as_ptr(function) as *const () as usize,
            Evaluator::Transit(function) => Arc::as_ptr(function) as *const () as usize,
            Evaluator::Variadic { function, .. } => Arc::as_ptr(function) as *const () as usize,
        };
        EvaluatorId(address)
    }

    /// Number of stops the evaluator takes.
    pub fn arity(&self) -> usize {
        match self {
            Evaluator::Unary(_) => 1,
            Evaluator::Transit(_) => 2,
            Evaluator::Variadic { arity, .. } => *arity,
        }
    }

    /// True when both handles refer to the same function object.
    pub fn same_as(&self, other: &Evaluator) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Evaluator::Unary(_) => "Unary",
            Evaluator::Transit(_) => "Transit",
            Evaluator::Variadic { .. } => "Variadic",
        };
        f.debug_struct("Evaluator")
            .field("kind", &kind)
            .field("arity", &self.arity())
            .field("id", &self.id())
            .finish()
    }
}
