//! Order-preserving crossover operators for permutation chromosomes.
//!
//! Both operators copy an inclusive segment `[start, end]` of parent 1 into
//! the child at the same positions and differ in how the remaining positions
//! are filled from parent 2. Every child is a permutation of the parents'
//! cities.

use crate::rng::RandomNumberGenerator;

/// The crossover operators available to the island breeder.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Partially-mapped crossover.
    Pmx,
    /// Order crossover.
    Ox,
}

impl Crossover {
    /// Crosses the two parents with a randomly drawn segment.
    pub fn apply(self, parent1: &[usize], parent2: &[usize], rng: &mut RandomNumberGenerator) -> Vec<usize> {
        match self {
            Crossover::Pmx => pmx(parent1, parent2, rng),
            Crossover::Ox => ox(parent1, parent2, rng),
        }
    }
}

const UNSET: usize = usize::MAX;

/// Partially-mapped crossover with a random segment.
///
/// The segment start is uniform over the tour and its end uniform over the
/// positions from the start onwards.
pub fn pmx(parent1: &[usize], parent2: &[usize], rng: &mut RandomNumberGenerator) -> Vec<usize> {
    let len = parent1.len();
    if len == 0 {
        return Vec::new();
    }
    let start = rng.index(len);
    let end = start + rng.index(len - start);
    pmx_with_segment(parent1, parent2, start, end)
}

/// Partially-mapped crossover over the inclusive segment `[start, end]`.
///
/// Positions outside the segment take parent 2's city at the same position
/// when that city is still unused. Positions left empty are then filled, left
/// to right, with the first unused city in parent-2 order.
///
/// # Panics
///
/// Panics if `start > end` or `end` is out of range.
pub fn pmx_with_segment(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    debug_assert_eq!(parent1.len(), parent2.len());
    let len = parent1.len();
    let mut child = vec![UNSET; len];
    let mut used = vec![false; len];

    for i in start..=end {
        child[i] = parent1[i];
        used[parent1[i]] = true;
    }

    for i in (0..start).chain(end + 1..len) {
        let city = parent2[i];
        if !used[city] {
            child[i] = city;
            used[city] = true;
        }
    }

    let mut unused = parent2.iter().copied().filter(|&city| !used[city]);
    for slot in child.iter_mut().filter(|slot| **slot == UNSET) {
        if let Some(city) = unused.next() {
            *slot = city;
        }
    }

    child
}

/// Order crossover with a random segment between two uniformly drawn positions.
pub fn ox(parent1: &[usize], parent2: &[usize], rng: &mut RandomNumberGenerator) -> Vec<usize> {
    let len = parent1.len();
    if len == 0 {
        return Vec::new();
    }
    let a = rng.index(len);
    let b = rng.index(len);
    ox_with_segment(parent1, parent2, a.min(b), a.max(b))
}

/// Order crossover over the inclusive segment `[start, end]`.
///
/// The cities of parent 2 that are not in the segment are written in parent-2
/// order to the free positions, starting at position 0 and jumping over the
/// segment.
///
/// # Panics
///
/// Panics if `start > end` or `end` is out of range.
pub fn ox_with_segment(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    debug_assert_eq!(parent1.len(), parent2.len());
    let len = parent1.len();
    let mut child = vec![UNSET; len];
    let mut used = vec![false; len];

    for i in start..=end {
        child[i] = parent1[i];
        used[parent1[i]] = true;
    }

    let mut free = (0..start).chain(end + 1..len);
    for &city in parent2 {
        if used[city] {
            continue;
        }
        if let Some(position) = free.next() {
            child[position] = city;
        }
    }

    child
}
