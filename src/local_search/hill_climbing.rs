use tracing::{debug, instrument};

use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::{improves, prepare, Optimizer, Solution};
use crate::rng::RandomNumberGenerator;
use crate::tour::{Move, Tour};

/// How a position that has sampled an improving neighbor proceeds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchVariant {
    /// Evaluate every sample for a position and apply the best one if it improves.
    #[default]
    BestOfSample,
    /// Apply the first improving sample; stop the whole search at the first
    /// position without one.
    FirstImprovement,
}

/// The modification evaluated between positions `i` and `j`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveKind {
    /// Exchange the two cities.
    #[default]
    Swap,
    /// Reverse the segment between them.
    Reverse,
}

/// A single pass of randomized hill climbing over tour positions.
///
/// For every position `i` up to `sample_size` random partners `j` are drawn
/// and the tour after swapping (or reversing) `i..j` is evaluated. Positions
/// are never revisited.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct HillClimbing {
    sample_size: usize,
    variant: SearchVariant,
    move_kind: MoveKind,
}

impl HillClimbing {
    /// Creates a hill climber that draws `sample_size` partners per position.
    ///
    /// # Errors
    ///
    /// Returns an error if `sample_size` is 0.
    pub fn new(sample_size: usize, variant: SearchVariant) -> Result<Self> {
        if sample_size == 0 {
            return Err(TspError::Configuration(
                "Sample size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            sample_size,
            variant,
            move_kind: MoveKind::Swap,
        })
    }

    pub fn with_move_kind(mut self, move_kind: MoveKind) -> Self {
        self.move_kind = move_kind;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn variant(&self) -> SearchVariant {
        self.variant
    }

    pub fn move_kind(&self) -> MoveKind {
        self.move_kind
    }

    /// Length of `tour` after modifying positions `i` and `j`. `tour` is left unchanged.
    fn evaluate(&self, instance: &Instance, tour: &mut Tour, current: f64, i: usize, j: usize) -> f64 {
        match self.move_kind {
            MoveKind::Swap => {
                tour.swap(i, j);
                let length = instance.cycle_length(tour.as_slice());
                tour.swap(i, j);
                length
            }
            MoveKind::Reverse => match Move::new(i, j) {
                Some(mv) => current + instance.reversal_delta(tour.as_slice(), mv),
                None => current,
            },
        }
    }

    fn apply(&self, tour: &mut Tour, i: usize, j: usize) {
        match self.move_kind {
            MoveKind::Swap => tour.swap(i, j),
            MoveKind::Reverse => {
                if let Some(mv) = Move::new(i, j) {
                    tour.reverse(mv);
                }
            }
        }
    }

    /// Draws a partner for `i`, or `None` when the draw hits `i` itself.
    fn partner(&self, n: usize, i: usize, rng: &mut RandomNumberGenerator) -> Option<usize> {
        let j = rng.index(n);
        (j != i).then_some(j)
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self {
            sample_size: 10,
            variant: SearchVariant::BestOfSample,
            move_kind: MoveKind::Swap,
        }
    }
}

impl Optimizer for HillClimbing {
    #[instrument(name = "hill_climbing", skip_all, fields(cities = instance.len(), variant = ?self.variant))]
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
        let mut tour = start;
        let mut current = instance.cycle_length(tour.as_slice());
        let mut steps = 0;
        let mut positions = 0;
        let mut history = Vec::with_capacity(n);

        for i in 0..n {
            positions += 1;
            match self.variant {
                SearchVariant::BestOfSample => {
                    let mut best: Option<(usize, f64)> = None;
                    for _ in 0..self.sample_size {
                        let Some(j) = self.partner(n, i, rng) else {
                            continue;
                        };
                        let length = self.evaluate(instance, &mut tour, current, i, j);
                        let incumbent = best.map_or(current, |(_, l)| l);
                        if improves(length, incumbent) {
                            best = Some((j, length));
                        }
                    }
                    if let Some((j, length)) = best {
                        self.apply(&mut tour, i, j);
                        current = length;
                        steps += 1;
                    }
                }
                SearchVariant::FirstImprovement => {
                    let mut improved = false;
                    for _ in 0..self.sample_size {
                        let Some(j) = self.partner(n, i, rng) else {
                            continue;
                        };
                        let length = self.evaluate(instance, &mut tour, current, i, j);
                        if improves(length, current) {
                            self.apply(&mut tour, i, j);
                            current = length;
                            steps += 1;
                            improved = true;
                            break;
                        }
                    }
                    if !improved {
                        history.push(current);
                        break;
                    }
                }
            }
            history.push(current);
        }

        debug!(steps, positions, length = current, "hill climbing finished");
        Ok(Solution::new(instance, tour).with_stats(positions, steps, history))
    }
}
