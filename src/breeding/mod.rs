//! # Breeding
//!
//! The `Breeder` turns two selected parents into one child tour. With
//! probability `crossover_probability` the parents are recombined with PMX or
//! OX (PMX with probability `pmx_ratio`); otherwise the child starts as a copy
//! of the first parent. The child is then swap-mutated with probability
//! `mutation_rate`.
//!
//! ## Example
//!
//! ```rust
//! use tspalg::breeding::Breeder;
//! use tspalg::rng::RandomNumberGenerator;
//! use tspalg::tour::Tour;
//!
//! let mut rng = RandomNumberGenerator::from_seed(3);
//! let p1 = Tour::random(8, &mut rng);
//! let p2 = Tour::random(8, &mut rng);
//!
//! let breeder = Breeder::new(0.85, 0.5, 0.5);
//! let child = breeder.breed(&p1, &p2, &mut rng);
//! assert!(child.is_permutation_of(8));
//! ```

pub mod crossover;
pub mod mutation;

pub use crossover::{ox, ox_with_segment, pmx, pmx_with_segment, Crossover};
pub use mutation::swap_mutation;

use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Produces children from pairs of parents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breeder {
    crossover_probability: f64,
    pmx_ratio: f64,
    mutation_rate: f64,
}

impl Breeder {
    /// Creates a breeder. Probabilities outside `[0, 1]` behave like the
    /// nearest bound.
    pub fn new(crossover_probability: f64, pmx_ratio: f64, mutation_rate: f64) -> Self {
        Self {
            crossover_probability,
            pmx_ratio,
            mutation_rate,
        }
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn pmx_ratio(&self) -> f64 {
        self.pmx_ratio
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Picks the operator for one child.
    fn pick_crossover(&self, rng: &mut RandomNumberGenerator) -> Crossover {
        if rng.chance(self.pmx_ratio) {
            Crossover::Pmx
        } else {
            Crossover::Ox
        }
    }

    /// Breeds one child from `parent1` and `parent2`.
    pub fn breed(&self, parent1: &Tour, parent2: &Tour, rng: &mut RandomNumberGenerator) -> Tour {
        let mut genes = if rng.chance(self.crossover_probability) {
            let operator = self.pick_crossover(rng);
            operator.apply(parent1.as_slice(), parent2.as_slice(), rng)
        } else {
            parent1.as_slice().to_vec()
        };

        if rng.chance(self.mutation_rate) {
            swap_mutation(&mut genes, rng);
        }

        let child = Tour::from_unchecked(genes);
        debug_assert!(
            child.is_permutation_of(parent1.len()),
            "breeding produced an invalid tour: {}",
            child
        );
        child
    }
}

impl Default for Breeder {
    fn default() -> Self {
        Self::new(0.85, 0.5, 0.5)
    }
}
