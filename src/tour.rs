//! # Tour
//!
//! A tour is a permutation of city ids read as a closed cycle: the last city
//! connects back to the first, and the closing edge is never stored.
//!
//! [`Move`] is the 2-opt style inversion shared by annealing and tabu search.

use std::fmt;

use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;

/// A permutation of `0..n` visited in order and closed back to the start.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// The tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random(n: usize, rng: &mut RandomNumberGenerator) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        rng.shuffle(&mut order);
        Self(order)
    }

    /// Wraps `order` after checking it is a permutation of `0..n`.
    pub fn new(order: Vec<usize>, n: usize) -> Result<Self> {
        let tour = Self(order);
        tour.validate(n)?;
        Ok(tour)
    }

    /// Wraps `order` as-is. Validity is the caller's responsibility.
    pub(crate) fn from_unchecked(order: Vec<usize>) -> Self {
        Self(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// City visited at `position`.
    pub fn city(&self, position: usize) -> usize {
        self.0[position]
    }

    /// Whether every id in `0..n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.0 {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    pub(crate) fn validate(&self, n: usize) -> Result<()> {
        if self.is_permutation_of(n) {
            Ok(())
        } else {
            Err(TspError::InvalidTour(format!(
                "expected a permutation of 0..{}, got {:?}",
                n, self.0
            )))
        }
    }

    /// Reverses the positions `mv.first()..=mv.second()` in place.
    ///
    /// # Panics
    ///
    /// Panics if `mv.second()` is not a position of this tour.
    pub fn reverse(&mut self, mv: Move) {
        self.0[mv.first()..=mv.second()].reverse();
    }

    /// Exchanges the cities at two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cities = self.0.iter();
        if let Some(first) = cities.next() {
            write!(f, "{}", first)?;
            for city in cities {
                write!(f, " -> {}", city)?;
            }
            write!(f, " -> {}", first)?;
        }
        Ok(())
    }
}

/// Reversal of the tour positions `[i, j]` with `i < j`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    i: usize,
    j: usize,
}

impl Move {
    /// Normalizes the two positions into a move. Equal positions are not a move.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { i: a, j: b }),
            std::cmp::Ordering::Greater => Some(Self { i: b, j: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// A random move over a tour of `len` positions. Requires `len >= 2`.
    pub fn random(len: usize, rng: &mut RandomNumberGenerator) -> Self {
        let (i, j) = rng.distinct_pair(len);
        Self { i, j }
    }

    pub fn first(&self) -> usize {
        self.i
    }

    pub fn second(&self) -> usize {
        self.j
    }
}
