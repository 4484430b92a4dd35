//! A single island: a sub-population with its own random number generator.
//!
//! An island evolves for one epoch at a time and reports the best individual
//! it saw during that epoch, including members of the initial population.

use tracing::trace;

use super::options::{IslandOptions, PopulationPolicy};
use crate::breeding::Breeder;
use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::improves;
use crate::rng::RandomNumberGenerator;
use crate::selection::TournamentSelection;
use crate::tour::Tour;

/// A tour together with its length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub tour: Tour,
    pub length: f64,
}

impl Individual {
    pub fn new(instance: &Instance, tour: Tour) -> Self {
        let length = instance.cycle_length(tour.as_slice());
        Self { tour, length }
    }

    fn random(instance: &Instance, rng: &mut RandomNumberGenerator) -> Self {
        Self::new(instance, Tour::random(instance.len(), rng))
    }
}

/// What an island sends back to the coordinator after an epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    pub island: usize,
    /// Best individual seen during the epoch.
    pub best: Individual,
    pub generations: usize,
    /// Children that set a new epoch best.
    pub improvements: usize,
}

/// Read-only parameters shared by every island in an epoch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EpochPlan<'a> {
    pub instance: &'a Instance,
    pub options: &'a IslandOptions,
    pub breeder: Breeder,
    pub selection: TournamentSelection,
    /// Injected into slot 0 of a freshly initialized population.
    pub seed: Option<&'a Tour>,
}

#[derive(Debug)]
pub(crate) struct Island {
    id: usize,
    size: usize,
    population: Vec<Individual>,
    rng: RandomNumberGenerator,
}

impl Island {
    pub fn new(id: usize, size: usize, rng: RandomNumberGenerator) -> Self {
        Self {
            id,
            size,
            population: Vec::with_capacity(size),
            rng,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    #[cfg(test)]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    fn initialize(&mut self, plan: &EpochPlan<'_>) {
        self.population.clear();
        if let Some(seed) = plan.seed {
            self.population.push(Individual::new(plan.instance, seed.clone()));
        }
        while self.population.len() < self.size {
            let individual = Individual::random(plan.instance, &mut self.rng);
            self.population.push(individual);
        }
    }

    fn fittest(&self) -> Option<&Individual> {
        self.population
            .iter()
            .reduce(|best, candidate| if improves(candidate.length, best.length) { candidate } else { best })
    }

    /// Runs one epoch of generational replacement.
    pub fn run_epoch(&mut self, plan: &EpochPlan<'_>) -> Result<EpochReport> {
        let restart = plan.options.get_population_policy() == PopulationPolicy::Restart;
        if restart || self.population.is_empty() {
            self.initialize(plan);
        }

        let mut best = self
            .fittest()
            .cloned()
            .ok_or(TspError::EmptyPopulation)?;
        let mut improvements = 0;
        let generations = plan.options.get_generations_per_epoch();

        let mut lengths: Vec<f64> = Vec::with_capacity(self.size);
        let mut next: Vec<Individual> = Vec::with_capacity(self.size);
        for generation in 0..generations {
            lengths.clear();
            lengths.extend(self.population.iter().map(|individual| individual.length));
            next.clear();

            for _ in 0..self.size {
                let first = plan.selection.select_index(&lengths, &mut self.rng)?;
                let second = plan.selection.select_index(&lengths, &mut self.rng)?;
                let child = plan.breeder.breed(
                    &self.population[first].tour,
                    &self.population[second].tour,
                    &mut self.rng,
                );
                let child = Individual::new(plan.instance, child);
                if improves(child.length, best.length) {
                    best = child.clone();
                    improvements += 1;
                    trace!(island = self.id, generation, length = best.length, "new island best");
                }
                next.push(child);
            }

            std::mem::swap(&mut self.population, &mut next);
        }

        Ok(EpochReport {
            island: self.id,
            best,
            generations,
            improvements,
        })
    }

    /// Replaces the worst member of the population with `migrant`.
    ///
    /// Returns `false` when the population is empty.
    pub fn accept_migrant(&mut self, migrant: &Individual) -> bool {
        let worst = self
            .population
            .iter_mut()
            .max_by(|a, b| a.length.total_cmp(&b.length));
        match worst {
            Some(slot) => {
                slot.clone_from(migrant);
                true
            }
            None => false,
        }
    }
}
