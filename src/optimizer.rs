//! # Optimizer Trait
//!
//! Every improvement strategy in the crate (sampled local search, simulated
//! annealing, tabu search and the island genetic algorithm) implements
//! [`Optimizer`]. A caller hands in an instance and a starting tour, usually
//! from a [`TourConstructor`](crate::construction::TourConstructor), and gets
//! back a [`Solution`].
//!
//! ## Example
//!
//! ```rust
//! use tspalg::construction::{MstConstructor, TourConstructor};
//! use tspalg::instance::Instance;
//! use tspalg::local_search::SimulatedAnnealing;
//! use tspalg::optimizer::Optimizer;
//! use tspalg::rng::RandomNumberGenerator;
//!
//! let instance = Instance::from_points(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (5.0, 5.0)]);
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let start = MstConstructor::new().construct(&instance, &mut rng).unwrap();
//! let annealing = SimulatedAnnealing::for_instance(&instance);
//! let solution = annealing.optimize_with_rng(&instance, start.tour, &mut rng).unwrap();
//! assert!(solution.tour.is_permutation_of(instance.len()));
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::instance::Instance;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Relative tolerance below which two tour lengths count as equal.
///
/// Different rotations of the same cycle sum their edges in a different order
/// and may differ in the last bits.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Whether `candidate` is strictly shorter than `incumbent`.
#[inline]
pub(crate) fn improves(candidate: f64, incumbent: f64) -> bool {
    candidate < incumbent - IMPROVEMENT_EPSILON * incumbent.abs().max(1.0)
}

/// The best tour an optimizer found, with statistics about the run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Best tour found.
    pub tour: Tour,
    /// Length of `tour`, closing edge included.
    pub length: f64,
    /// Iterations, epochs or generations the optimizer ran.
    pub iterations: usize,
    /// Number of times the kept solution improved.
    pub improvements: usize,
    /// Best known length after each iteration or epoch.
    pub history: Vec<f64>,
}

impl Solution {
    /// Wraps `tour` with its exact length and no statistics.
    pub fn new(instance: &Instance, tour: Tour) -> Self {
        let length = instance.cycle_length(tour.as_slice());
        Self {
            tour,
            length,
            iterations: 0,
            improvements: 0,
            history: Vec::new(),
        }
    }

    /// The single-city solution.
    pub fn degenerate() -> Self {
        Self {
            tour: Tour::identity(1),
            length: 0.0,
            iterations: 0,
            improvements: 0,
            history: Vec::new(),
        }
    }

    pub(crate) fn with_stats(mut self, iterations: usize, improvements: usize, history: Vec<f64>) -> Self {
        self.iterations = iterations;
        self.improvements = improvements;
        self.history = history;
        self
    }
}

/// Checks the inputs shared by every optimizer.
///
/// Returns the finished solution when there is nothing to optimize.
pub(crate) fn prepare(instance: &Instance, start: &Tour) -> Result<Option<Solution>> {
    instance.ensure_not_empty()?;
    start.validate(instance.len())?;
    if instance.len() == 1 {
        tracing::warn!("single-city instance, returning the degenerate tour");
        return Ok(Some(Solution::degenerate()));
    }
    Ok(None)
}

/// A strategy that improves a tour over an instance.
pub trait Optimizer: Debug + Send + Sync {
    /// Improves `start` using the provided random number generator.
    ///
    /// # Errors
    ///
    /// - [`TspError::EmptyInstance`](crate::error::TspError::EmptyInstance) if the instance has no cities.
    /// - [`TspError::InvalidTour`](crate::error::TspError::InvalidTour) if `start` is not a permutation of the instance.
    fn optimize_with_rng(
        &self,
        instance: &Instance,
        start: Tour,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution>;

    /// Improves `start` with a generator seeded from system entropy.
    fn optimize(&self, instance: &Instance, start: Tour) -> Result<Solution> {
        let mut rng = RandomNumberGenerator::new();
        self.optimize_with_rng(instance, start, &mut rng)
    }

    /// Starts from a uniformly random tour.
    fn optimize_random(
        &self,
        instance: &Instance,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        instance.ensure_not_empty()?;
        let start = Tour::random(instance.len(), rng);
        self.optimize_with_rng(instance, start, rng)
    }
}
