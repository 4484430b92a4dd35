use tracing::{debug, instrument};

use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::{improves, prepare, Optimizer, Solution};
use crate::rng::RandomNumberGenerator;
use crate::tour::{Move, Tour};

/// A simulated annealing algorithm over segment reversals.
///
/// Worse neighbors are accepted with probability `exp(Δ / T)`, where `Δ` is
/// the (non-positive) gain. The temperature is multiplied by the cooling rate
/// after every epoch of `epoch_length` trials, and the run ends once
/// `max_epochs_without_improvement` epochs pass without a new best tour.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    initial_temperature: f64,
    cooling_rate: f64,
    epoch_length: usize,
    max_epochs_without_improvement: usize,
}

impl SimulatedAnnealing {
    /// Creates a new simulated annealing algorithm with the given parameters.
    ///
    /// # Arguments
    ///
    /// * `initial_temperature` - The starting temperature.
    /// * `cooling_rate` - Factor applied to the temperature after each epoch.
    /// * `epoch_length` - Neighbor trials per epoch.
    /// * `max_epochs_without_improvement` - Patience before the run stops.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial_temperature` is negative or not finite
    /// - `cooling_rate` is not between 0 and 1
    pub fn new(
        initial_temperature: f64,
        cooling_rate: f64,
        epoch_length: usize,
        max_epochs_without_improvement: usize,
    ) -> Result<Self> {
        if !initial_temperature.is_finite() || initial_temperature < 0.0 {
            return Err(TspError::Configuration(
                "Initial temperature must be finite and non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&cooling_rate) {
            return Err(TspError::Configuration(
                "Cooling rate must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(Self {
            initial_temperature,
            cooling_rate,
            epoch_length,
            max_epochs_without_improvement,
        })
    }

    /// Parameters scaled to the instance: half the largest pairwise distance
    /// as the starting temperature, cooling rate 0.95, epochs of `0.4 n`
    /// trials and a patience of `0.3 n` epochs.
    pub fn for_instance(instance: &Instance) -> Self {
        let n = instance.len() as f64;
        Self {
            initial_temperature: 0.5 * instance.max_pairwise_distance(),
            cooling_rate: 0.95,
            epoch_length: ((0.4 * n) as usize).max(1),
            max_epochs_without_improvement: ((0.3 * n) as usize).max(1),
        }
    }

    pub fn with_epoch_length(mut self, epoch_length: usize) -> Self {
        self.epoch_length = epoch_length;
        self
    }

    pub fn with_max_epochs_without_improvement(mut self, epochs: usize) -> Self {
        self.max_epochs_without_improvement = epochs;
        self
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    pub fn epoch_length(&self) -> usize {
        self.epoch_length
    }

    pub fn max_epochs_without_improvement(&self) -> usize {
        self.max_epochs_without_improvement
    }
}

impl Optimizer for SimulatedAnnealing {
    #[instrument(name = "annealing", skip_all, fields(cities = instance.len(), temperature = self.initial_temperature))]
    fn optimize_with_rng(
        &self,
        instance: &Instance,
        start: Tour,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        if let Some(done) = prepare(instance, &start)? {
            return Ok(done);
        }

        let n = instance.len();
        let mut current = start;
        let mut current_cost = instance.cycle_length(current.as_slice());
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut temperature = self.initial_temperature;
        let mut stale_epochs = 0;
        let mut epochs = 0;
        let mut improvements = 0;
        let mut history = Vec::new();

        while stale_epochs < self.max_epochs_without_improvement {
            for _ in 0..self.epoch_length {
                let mv = Move::random(n, rng);
                let neighbor_cost = current_cost + instance.reversal_delta(current.as_slice(), mv);
                let gain = current_cost - neighbor_cost;

                // Metropolis criterion; the draw only happens for non-improving neighbors.
                let accept = gain > 0.0 || rng.uniform() < (gain / temperature).exp();
                if !accept {
                    continue;
                }

                current.reverse(mv);
                current_cost = neighbor_cost;
                if improves(current_cost, best_cost) {
                    // Recorded bests are exact; summed deltas drift over long runs.
                    current_cost = instance.cycle_length(current.as_slice());
                    best.clone_from(&current);
                    best_cost = current_cost;
                    stale_epochs = 0;
                    improvements += 1;
                }
            }

            current_cost = instance.cycle_length(current.as_slice());
            stale_epochs += 1;
            epochs += 1;
            temperature *= self.cooling_rate;
            history.push(best_cost);
            debug!(epoch = epochs, temperature, current_cost, best_cost, "annealing epoch");
        }

        let solution = Solution::new(instance, best).with_stats(epochs, improvements, history);
        debug!(length = solution.length, epochs, "annealing finished");
        Ok(solution)
    }
}
