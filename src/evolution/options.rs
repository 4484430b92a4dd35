//! # IslandOptions
//!
//! The `IslandOptions` struct holds the configuration of the island genetic
//! algorithm: how large the total population is, how it is split into
//! islands, how many epochs run with how many generations each, and the
//! breeding probabilities.
//!
//! ## Example
//!
//! ```rust
//! use tspalg::evolution::options::{IslandOptions, PopulationPolicy};
//!
//! // The defaults: 1000 individuals on 8 islands, 10 epochs of 1000 generations.
//! let default_options = IslandOptions::default();
//! assert_eq!(default_options.get_island_population_size(), 125);
//!
//! let options = IslandOptions::builder()
//!     .population_size(200)
//!     .islands(4)
//!     .epochs(5)
//!     .generations_per_epoch(50)
//!     .mutation_rate(0.3)
//!     .population_policy(PopulationPolicy::Persist)
//!     .build();
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Fields
//!
//! - `population_size`: Total number of individuals, split evenly across islands.
//! - `islands`: Number of islands, which is also the number of worker threads.
//! - `epochs`: Number of evolve-then-migrate rounds.
//! - `generations_per_epoch`: Generations each island runs per epoch.
//! - `crossover_probability`: Probability that a child is produced by crossover
//!   rather than copied from its first parent.
//! - `mutation_rate`: Probability that a child is swap-mutated.
//! - `pmx_ratio`: Probability that a crossover uses PMX rather than OX.
//! - `tournament_size`: Individuals drawn per selection tournament.
//! - `population_policy`: What happens to island populations between epochs.

use crate::error::{Result, TspError};

/// What an island starts each epoch with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulationPolicy {
    /// A fresh random population every epoch. Migration only updates the
    /// per-island best records.
    #[default]
    Restart,
    /// The population carries over, and a received migrant replaces the
    /// island's worst individual.
    Persist,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IslandOptions {
    population_size: usize,
    islands: usize,
    epochs: usize,
    generations_per_epoch: usize,
    crossover_probability: f64,
    mutation_rate: f64,
    pmx_ratio: f64,
    tournament_size: usize,
    population_policy: PopulationPolicy,
}

impl IslandOptions {
    /// Creates options with the core parameters and defaults for the rest.
    ///
    /// # Arguments
    ///
    /// * `population_size` - Total number of individuals across all islands.
    /// * `islands` - Number of islands.
    /// * `epochs` - Number of evolve-then-migrate rounds.
    /// * `generations_per_epoch` - Generations per island per epoch.
    /// * `crossover_probability` - Probability of recombining the parents.
    /// * `mutation_rate` - Probability of mutating a child.
    pub fn new(
        population_size: usize,
        islands: usize,
        epochs: usize,
        generations_per_epoch: usize,
        crossover_probability: f64,
        mutation_rate: f64,
    ) -> Self {
        Self {
            population_size,
            islands,
            epochs,
            generations_per_epoch,
            crossover_probability,
            mutation_rate,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_islands(&self) -> usize {
        self.islands
    }

    pub fn get_epochs(&self) -> usize {
        self.epochs
    }

    pub fn get_generations_per_epoch(&self) -> usize {
        self.generations_per_epoch
    }

    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_pmx_ratio(&self) -> f64 {
        self.pmx_ratio
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_population_policy(&self) -> PopulationPolicy {
        self.population_policy
    }

    /// Individuals per island: the total population divided evenly, rounded down.
    pub fn get_island_population_size(&self) -> usize {
        self.population_size.checked_div(self.islands).unwrap_or(0)
    }

    /// Sets the number of epochs.
    pub fn set_epochs(&mut self, epochs: usize) {
        self.epochs = epochs;
    }

    /// Sets the number of generations per epoch.
    pub fn set_generations_per_epoch(&mut self, generations: usize) {
        self.generations_per_epoch = generations;
    }

    /// Sets the population policy.
    pub fn set_population_policy(&mut self, policy: PopulationPolicy) {
        self.population_policy = policy;
    }

    /// Checks that the options describe a runnable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Configuration`] if:
    /// - `islands` is 0
    /// - `population_size / islands` is 0
    /// - `epochs` is 0
    /// - `tournament_size` is 0
    pub fn validate(&self) -> Result<()> {
        if self.islands == 0 {
            return Err(TspError::Configuration(
                "Number of islands must be greater than 0".to_string(),
            ));
        }
        if self.get_island_population_size() == 0 {
            return Err(TspError::Configuration(format!(
                "Population size {} is too small for {} islands",
                self.population_size, self.islands
            )));
        }
        if self.epochs == 0 {
            return Err(TspError::Configuration(
                "Number of epochs must be greater than 0".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TspError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `IslandOptions` instance.
    pub fn builder() -> IslandOptionsBuilder {
        IslandOptionsBuilder::default()
    }
}

impl Default for IslandOptions {
    fn default() -> Self {
        Self {
            population_size: 1000,
            islands: 8,
            epochs: 10,
            generations_per_epoch: 1000,
            crossover_probability: 0.85,
            mutation_rate: 0.5,
            pmx_ratio: 0.5,
            tournament_size: 5,
            population_policy: PopulationPolicy::Restart,
        }
    }
}

/// Builder for `IslandOptions`.
///
/// Unset fields take the values of [`IslandOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct IslandOptionsBuilder {
    population_size: Option<usize>,
    islands: Option<usize>,
    epochs: Option<usize>,
    generations_per_epoch: Option<usize>,
    crossover_probability: Option<f64>,
    mutation_rate: Option<f64>,
    pmx_ratio: Option<f64>,
    tournament_size: Option<usize>,
    population_policy: Option<PopulationPolicy>,
}

impl IslandOptionsBuilder {
    /// Sets the total population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of islands.
    pub fn islands(mut self, value: usize) -> Self {
        self.islands = Some(value);
        self
    }

    /// Sets the number of epochs.
    pub fn epochs(mut self, value: usize) -> Self {
        self.epochs = Some(value);
        self
    }

    /// Sets the number of generations per epoch.
    pub fn generations_per_epoch(mut self, value: usize) -> Self {
        self.generations_per_epoch = Some(value);
        self
    }

    /// Sets the crossover probability.
    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    /// Sets the mutation rate.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the probability of choosing PMX over OX.
    pub fn pmx_ratio(mut self, value: f64) -> Self {
        self.pmx_ratio = Some(value);
        self
    }

    /// Sets the tournament size.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the population policy.
    pub fn population_policy(mut self, value: PopulationPolicy) -> Self {
        self.population_policy = Some(value);
        self
    }

    /// Builds the `IslandOptions` instance.
    pub fn build(self) -> IslandOptions {
        let defaults = IslandOptions::default();
        IslandOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            islands: self.islands.unwrap_or(defaults.islands),
            epochs: self.epochs.unwrap_or(defaults.epochs),
            generations_per_epoch: self
                .generations_per_epoch
                .unwrap_or(defaults.generations_per_epoch),
            crossover_probability: self
                .crossover_probability
                .unwrap_or(defaults.crossover_probability),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            pmx_ratio: self.pmx_ratio.unwrap_or(defaults.pmx_ratio),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            population_policy: self.population_policy.unwrap_or(defaults.population_policy),
        }
    }
}
