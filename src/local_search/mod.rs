//! # Local Search Algorithms
//!
//! This module provides the single-trajectory optimizers: randomized hill
//! climbing, simulated annealing and tabu search. Each one implements
//! [`Optimizer`](crate::optimizer::Optimizer), takes a starting tour and never
//! returns a tour longer than the best one it saw.
//!
//! Simulated annealing and tabu search move by segment reversal, evaluated in
//! constant time from the four edges a reversal changes. Hill climbing swaps
//! two cities by default and can be switched to reversals with
//! [`MoveKind::Reverse`].

pub mod hill_climbing;
pub mod simulated_annealing;
pub mod tabu_memory;
pub mod tabu_search;

pub use hill_climbing::{HillClimbing, MoveKind, SearchVariant};
pub use simulated_annealing::SimulatedAnnealing;
pub use tabu_memory::TabuMemory;
pub use tabu_search::{Neighborhood, TabuSearch};
