//! # Tour Construction
//!
//! Constructors build a feasible starting tour from scratch. The
//! minimum-spanning-tree constructor is the usual seed for the improvement
//! strategies; random sampling is the baseline every heuristic should beat.

use std::fmt::Debug;

use crate::error::Result;
use crate::instance::Instance;
use crate::optimizer::Solution;
use crate::rng::RandomNumberGenerator;

pub mod mst;
pub mod random;

pub use mst::{Edge, MstConstructor, SpanningTree, StartVertex};
pub use random::RandomSampling;

/// A heuristic that builds a tour without a starting point.
pub trait TourConstructor: Debug + Send + Sync {
    /// Builds a tour for `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyInstance`](crate::error::TspError::EmptyInstance)
    /// when the instance has no cities.
    fn construct(&self, instance: &Instance, rng: &mut RandomNumberGenerator) -> Result<Solution>;
}
