//! Test fixtures for simple-route.
//!
//! Provides small hand-checked problems:
//! - Distance matrices with known optimal tours
//! - Grid points turned into Manhattan matrices
//! - Helpers to score and inspect routes

pub mod matrices;

pub use matrices::*;
