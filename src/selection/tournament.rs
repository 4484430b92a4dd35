use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;

/// Tournament selection over tour lengths, where shorter is better.
///
/// Each tournament draws `tournament_size` individuals uniformly with
/// replacement and returns the shortest one. Ties keep the earliest draw.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// # Examples
///
/// ```
/// use tspalg::rng::RandomNumberGenerator;
/// use tspalg::selection::TournamentSelection;
///
/// let lengths = vec![12.0, 7.5, 30.0, 9.0];
/// let selection = TournamentSelection::new(3).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(4);
///
/// let winner = selection.select_index(&lengths, &mut rng).unwrap();
/// assert!(winner < lengths.len());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of individuals that participate in each tournament.
    ///   Must be at least 1. A tournament size of 1 is equivalent to random selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(TspError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyPopulation`] if `lengths` is empty.
    pub fn select_index(&self, lengths: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if lengths.is_empty() {
            return Err(TspError::EmptyPopulation);
        }

        let mut best = rng.index(lengths.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.index(lengths.len());
            if lengths[challenger] < lengths[best] {
                best = challenger;
            }
        }
        Ok(best)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 5 }
    }
}
