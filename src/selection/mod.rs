//! # Selection
//!
//! Parent selection for the island genetic algorithm. Individuals are ranked
//! by tour length, so lower values win.

pub mod tournament;

pub use tournament::TournamentSelection;
