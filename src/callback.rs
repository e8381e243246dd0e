//! Callback classification, registry and registration.
//!
//! Engines refer to evaluators through small integer callback indices. The
//! [`CallbackManager`] turns an [`Evaluator`] into such an index, registering
//! it with the engine the first time it is seen and reusing the index after.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{Result, RoutingError};
use crate::evaluator::{Evaluator, EvaluatorId};
use crate::traits::{CallbackIndex, IndexManager, RoutingEngine};
use crate::translate::{self, LiftedEvaluator};

/// Evaluator classification, also used as a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackType {
    /// Requirement only: accepts either classification.
    #[default]
    Any,
    /// One stop in, one value out.
    Unary,
    /// Two stops in, one value out.
    Transit,
}

impl fmt::Display for CallbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallbackType::Any => "any",
            CallbackType::Unary => "unary",
            CallbackType::Transit => "transit",
        };
        f.write_str(name)
    }
}

/// Either side of a registry entry.
#[derive(Debug, Clone, Copy)]
pub enum CallbackKey<'a> {
    Evaluator(&'a Evaluator),
    Index(CallbackIndex),
}

impl<'a> From<&'a Evaluator> for CallbackKey<'a> {
    fn from(evaluator: &'a Evaluator) -> Self {
        CallbackKey::Evaluator(evaluator)
    }
}

impl From<CallbackIndex> for CallbackKey<'_> {
    fn from(index: CallbackIndex) -> Self {
        CallbackKey::Index(index)
    }
}

/// Classifies an evaluator by the number of stops it takes.
pub fn classify<'a>(callback: impl Into<CallbackKey<'a>>) -> Result<CallbackType> {
    let evaluator = match callback.into() {
        CallbackKey::Evaluator(evaluator) => evaluator,
        CallbackKey::Index(index) => return Err(RoutingError::InvalidCallback { index }),
    };

    match evaluator.arity() {
        1 => Ok(CallbackType::Unary),
        2 => Ok(CallbackType::Transit),
        arity => Err(RoutingError::InvalidArity { arity }),
    }
}

/// Returns whether the evaluator satisfies `required`.
///
/// Fails only for values that cannot be classified at all; a mismatch is
/// reported as `Ok(false)`.
pub fn check_callback<'a>(
    callback: impl Into<CallbackKey<'a>>,
    required: CallbackType,
) -> Result<bool> {
    let actual = classify(callback)?;
    Ok(required == CallbackType::Any || required == actual)
}

/// Identity-keyed mapping between evaluators and callback indices.
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    indices: HashMap<EvaluatorId, CallbackIndex>,
    callbacks: HashMap<CallbackIndex, Evaluator>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records both directions, replacing any previous index of `evaluator`.
    pub fn add(&mut self, evaluator: Evaluator, index: CallbackIndex) {
        self.indices.insert(evaluator.id(), index);
        self.callbacks.insert(index, evaluator);
    }

    pub fn get_index(&self, evaluator: &Evaluator) -> Option<CallbackIndex> {
        self.indices.get(&evaluator.id()).copied()
    }

    pub fn get_callback(&self, index: CallbackIndex) -> Option<&Evaluator> {
        self.callbacks.get(&index)
    }

    pub fn is_present<'a>(&self, key: impl Into<CallbackKey<'a>>) -> bool {
        match key.into() {
            CallbackKey::Evaluator(evaluator) => self.indices.contains_key(&evaluator.id()),
            CallbackKey::Index(index) => self.callbacks.contains_key(&index),
        }
    }

    /// Number of registered evaluators.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Registers evaluators with one engine model, at most once each.
///
/// Indices are only meaningful for the engine that issued them, so a
/// manager must never be shared between models.
#[derive(Debug, Default)]
pub struct CallbackManager {
    registry: CallbackRegistry,
}

impl CallbackManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    /// Classification of an already registered callback index.
    pub fn callback_type_of(&self, index: CallbackIndex) -> Option<CallbackType> {
        self.registry
            .get_callback(index)
            .and_then(|evaluator| classify(evaluator).ok())
    }

    /// Returns the callback index of `callback`, registering it first if
    /// this manager has not seen it.
    pub fn resolve<'a, E: RoutingEngine>(
        &mut self,
        engine: &mut E,
        manager: &E::Manager,
        callback: impl Into<CallbackKey<'a>>,
        required: CallbackType,
    ) -> Result<CallbackIndex> {
        let callback: CallbackKey<'a> = callback.into();
        let actual = classify(callback)?;
        if !check_callback(callback, required)? {
            return Err(RoutingError::ClassificationMismatch { required, actual });
        }

        let evaluator = match callback {
            CallbackKey::Evaluator(evaluator) => evaluator,
            CallbackKey::Index(index) => return Err(RoutingError::InvalidCallback { index }),
        };

        if let Some(index) = self.registry.get_index(evaluator) {
            return Ok(index);
        }

        self.register(engine, manager, evaluator)
    }

    fn register<E: RoutingEngine>(
        &mut self,
        engine: &mut E,
        manager: &E::Manager,
        evaluator: &Evaluator,
    ) -> Result<CallbackIndex> {
        if let Some(index) = self.registry.get_index(evaluator) {
            return Err(RoutingError::DuplicateCallback { index });
        }

        let lifted = translate::lift(manager, evaluator).ok_or(RoutingError::InvalidArity {
            arity: evaluator.arity(),
        })?;

        let (index, kind) = match lifted {
            LiftedEvaluator::Unary(function) => {
                (engine.register_unary_evaluator(function), CallbackType::Unary)
            }
            LiftedEvaluator::Transit(function) => {
                (engine.register_transit_evaluator(function), CallbackType::Transit)
            }
        };

        debug!(
            event = "callback_registered",
            callback_index = index,
            kind = %kind,
            stops = manager.num_stops(),
        );

        self.registry.add(evaluator.clone(), index);
        Ok(index)
    }
}
