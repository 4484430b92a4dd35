use tracing::{debug, instrument};

use super::TourConstructor;
use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::{improves, Solution};
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Keeps the shortest of a number of uniformly random tours.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct RandomSampling {
    samples: usize,
}

impl RandomSampling {
    /// # Errors
    ///
    /// Returns an error if `samples` is 0.
    pub fn new(samples: usize) -> Result<Self> {
        if samples == 0 {
            return Err(TspError::Configuration(
                "Number of samples must be greater than 0".to_string(),
            ));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl Default for RandomSampling {
    fn default() -> Self {
        Self { samples: 10 }
    }
}

impl TourConstructor for RandomSampling {
    #[instrument(name = "random_sampling", skip_all, fields(cities = instance.len(), samples = self.samples))]
    fn construct(&self, instance: &Instance, rng: &mut RandomNumberGenerator) -> Result<Solution> {
        instance.ensure_not_empty()?;
        let n = instance.len();

        let mut best = Tour::random(n, rng);
        let mut best_length = instance.cycle_length(best.as_slice());
        let mut improvements = 0;
        let mut history = vec![best_length];

        for _ in 1..self.samples {
            let candidate = Tour::random(n, rng);
            let length = instance.cycle_length(candidate.as_slice());
            if improves(length, best_length) {
                best = candidate;
                best_length = length;
                improvements += 1;
            }
            history.push(best_length);
        }

        debug!(best_length, "sampled random tours");
        Ok(Solution::new(instance, best).with_stats(self.samples, improvements, history))
    }
}
