use tracing::{debug, instrument, trace};

use super::tabu_memory::TabuMemory;
use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::{improves, prepare, Optimizer, Solution};
use crate::rng::RandomNumberGenerator;
use crate::tour::{Move, Tour};

/// Which reversal moves are evaluated in each iteration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// Every pair `i < j`.
    #[default]
    Full,
    /// One random partner for each position, `n` candidates in total.
    Sampled,
}

/// A tabu search algorithm over segment reversals.
///
/// The tabu list holds the last `capacity` applied moves (position pairs).
/// The best non-tabu neighbor is always taken, even when it is worse than the
/// current tour. There is no aspiration criterion: a tabu move stays forbidden
/// even if it would produce a new best tour.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TabuSearch {
    capacity: usize,
    max_iterations_without_improvement: usize,
    neighborhood: Neighborhood,
}

impl TabuSearch {
    /// Creates a new tabu search algorithm with the given parameters.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The maximum size of the tabu list.
    /// * `max_iterations_without_improvement` - Patience before the run stops.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0.
    pub fn new(capacity: usize, max_iterations_without_improvement: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TspError::Configuration(
                "Tabu list size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            max_iterations_without_improvement,
            neighborhood: Neighborhood::Full,
        })
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_iterations_without_improvement(&self) -> usize {
        self.max_iterations_without_improvement
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    fn candidates(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<Move> {
        match self.neighborhood {
            Neighborhood::Full => (0..n)
                .flat_map(|i| ((i + 1)..n).filter_map(move |j| Move::new(i, j)))
                .collect(),
            Neighborhood::Sampled => (0..n)
                .filter_map(|i| Move::new(i, rng.index(n)))
                .collect(),
        }
    }

    /// Runs the search and also returns the applied moves in order.
    pub(crate) fn search(
        &self,
        instance: &Instance,
        start: Tour,
        rng: &mut RandomNumberGenerator,
    ) -> (Solution, Vec<Move>) {
        let n = instance.len();
        let mut current = start;
        let mut current_cost = instance.cycle_length(current.as_slice());
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut memory = TabuMemory::new(self.capacity);
        let mut applied = Vec::new();
        let mut stale = 0;
        let mut iterations = 0;
        let mut improvements = 0;
        let mut history = Vec::new();

        while stale < self.max_iterations_without_improvement {
            iterations += 1;

            let mut chosen: Option<(Move, f64)> = None;
            for mv in self.candidates(n, rng) {
                if memory.contains(&mv) {
                    continue;
                }
                let cost = current_cost + instance.reversal_delta(current.as_slice(), mv);
                if chosen.map_or(true, |(_, c)| cost < c) {
                    chosen = Some((mv, cost));
                }
            }

            match chosen {
                Some((mv, cost)) => {
                    current.reverse(mv);
                    current_cost = cost;
                    applied.push(mv);
                    if let Some(evicted) = memory.push(mv) {
                        trace!(?evicted, "tabu move released");
                    }
                    if improves(current_cost, best_cost) {
                        current_cost = instance.cycle_length(current.as_slice());
                        best.clone_from(&current);
                        best_cost = current_cost;
                        stale = 0;
                        improvements += 1;
                    } else {
                        stale += 1;
                    }
                }
                // Every candidate is tabu; the iteration still counts against patience.
                None => stale += 1,
            }

            history.push(best_cost);
            debug!(iteration = iterations, current_cost, best_cost, stale, "tabu iteration");
        }

        let solution = Solution::new(instance, best).with_stats(iterations, improvements, history);
        (solution, applied)
    }
}

impl Default for TabuSearch {
    fn default() -> Self {
        Self {
            capacity: 7,
            max_iterations_without_improvement: 15,
            neighborhood: Neighborhood::Full,
        }
    }
}

impl Optimizer for TabuSearch {
    #[instrument(name = "tabu", skip_all, fields(cities = instance.len(), capacity = self.capacity, neighborhood = ?self.neighborhood))]
    fn optimize_with_rng(
        &self,
        instance: &Instance,
        start: Tour,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        if let Some(done) = prepare(instance, &start)? {
            return Ok(done);
        }
        let (solution, applied) = self.search(instance, start, rng);
        debug!(length = solution.length, moves = applied.len(), "tabu search finished");
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered(n: usize, seed: u64) -> Instance {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.uniform() * 100.0, rng.uniform() * 100.0))
            .collect();
        Instance::from_points(&points)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            TabuSearch::new(0, 10),
            Err(TspError::Configuration(_))
        ));
    }

    #[test]
    fn test_applied_moves_respect_the_tabu_window() {
        let instance = scattered(8, 21);
        for neighborhood in [Neighborhood::Full, Neighborhood::Sampled] {
            let capacity = 3;
            let tabu = TabuSearch::new(capacity, 12).unwrap().with_neighborhood(neighborhood);
            let mut rng = RandomNumberGenerator::from_seed(22);
            let start = Tour::random(8, &mut rng);
            let (solution, applied) = tabu.search(&instance, start, &mut rng);

            assert!(solution.tour.is_permutation_of(8));
            for (k, mv) in applied.iter().enumerate() {
                let window = &applied[k.saturating_sub(capacity)..k];
                assert!(
                    !window.contains(mv),
                    "move {:?} reapplied while still tabu: {:?}",
                    mv,
                    window
                );
            }
        }
    }

    #[test]
    fn test_full_neighborhood_improves_random_start() {
        let instance = scattered(25, 23);
        let tabu = TabuSearch::new(10, 30).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(24);
        let start = Tour::random(25, &mut rng);
        let start_length = instance.tour_length(&start).unwrap();
        let solution = tabu.optimize_with_rng(&instance, start, &mut rng).unwrap();

        assert!(solution.tour.is_permutation_of(25));
        assert!(solution.length < start_length);
        assert!(solution.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(solution.improvements > 0);
        assert_eq!(solution.iterations, solution.history.len());
    }

    #[test]
    fn test_recorded_lengths_stay_exact_over_long_runs() {
        let instance = scattered(60, 28);
        let tabu = TabuSearch::new(15, 200).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(29);
        let solution = tabu.optimize_random(&instance, &mut rng).unwrap();

        assert!(solution.improvements > 0);
        assert_eq!(solution.history.last().copied(), Some(solution.length));
        assert_eq!(solution.length, instance.tour_length(&solution.tour).unwrap());
    }

    #[test]
    fn test_terminates_when_every_move_is_tabu() {
        // Two cities have a single reversal; once it is tabu nothing is admissible.
        let instance = Instance::from_points(&[(0.0, 0.0), (1.0, 0.0)]);
        let tabu = TabuSearch::new(5, 4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(25);
        let solution = tabu.optimize_random(&instance, &mut rng).unwrap();
        assert_eq!(solution.iterations, 4);
        assert!((solution.length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let instance = scattered(20, 26);
        let tabu = TabuSearch::default().with_neighborhood(Neighborhood::Sampled);
        let run = |seed| {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            tabu.optimize_random(&instance, &mut rng).unwrap()
        };
        assert_eq!(run(27), run(27));
    }
}
