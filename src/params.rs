//! Search parameters handed to the engine's solve operations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Heuristic used to build the first feasible solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Let the engine pick a strategy for the model.
    #[default]
    Automatic,
    /// Extend each route from its start with the cheapest next arc.
    PathCheapestArc,
    /// Like `PathCheapestArc`, favouring the most constrained arc.
    PathMostConstrainedArc,
    /// Like `PathCheapestArc`, with arcs ranked by a dedicated evaluator.
    EvaluatorStrategy,
    /// Clarke & Wright savings.
    Savings,
    /// Wren & Holliday sweep.
    Sweep,
    Christofides,
    /// Start with every optional stop dropped.
    AllUnperformed,
    BestInsertion,
    ParallelCheapestInsertion,
    LocalCheapestInsertion,
    /// Repeatedly join the globally cheapest pair of route segments.
    GlobalCheapestArc,
    LocalCheapestArc,
    FirstUnboundMinValue,
}

impl FirstSolutionStrategy {
    /// Strategies that grow routes arc by arc in cost order.
    pub fn is_arc_based(self) -> bool {
        matches!(
            self,
            FirstSolutionStrategy::PathCheapestArc
                | FirstSolutionStrategy::PathMostConstrainedArc
                | FirstSolutionStrategy::EvaluatorStrategy
                | FirstSolutionStrategy::GlobalCheapestArc
                | FirstSolutionStrategy::LocalCheapestArc
                | FirstSolutionStrategy::Automatic
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchParameters {
    #[serde(default)]
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Wall-clock bound for the whole search.
    #[serde(default)]
    pub time_limit: Option<Duration>,
    /// Stop after this many improving solutions.
    #[serde(default)]
    pub solution_limit: Option<u64>,
}

impl SearchParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }
}
