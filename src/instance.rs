//! # Instance
//!
//! Cities, the coordinate set they live in, and the Euclidean distance oracle
//! every optimizer evaluates tours with.
//!
//! A city's id is its position in the coordinate set. Identifiers carried by
//! the caller's input are ignored for indexing.
//!
//! ## Example
//!
//! ```rust
//! use tspalg::instance::Instance;
//! use tspalg::tour::Tour;
//!
//! let instance = Instance::from_points(&[(0.0, 0.0), (0.0, 3.0), (4.0, 0.0)]);
//! assert_eq!(instance.distance(1, 2), 5.0);
//!
//! let tour = Tour::identity(3);
//! assert_eq!(instance.tour_length(&tour).unwrap(), 12.0);
//! ```

use crate::error::{Result, TspError};
use crate::tour::{Move, Tour};

/// A city in the plane. Its `id` equals its position in the [`Instance`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An ordered, immutable set of cities.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    cities: Vec<City>,
}

impl Instance {
    /// Builds an instance from plain coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let cities = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect();
        Self { cities }
    }

    /// Builds an instance from `(id, x, y)` triples as produced by a file loader.
    ///
    /// The supplied ids are discarded; list position becomes the city id.
    pub fn from_triples<I>(triples: &[(I, f64, f64)]) -> Self {
        let cities = triples
            .iter()
            .enumerate()
            .map(|(id, (_, x, y))| City::new(id, *x, *y))
            .collect();
        Self { cities }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, id: usize) -> Option<&City> {
        self.cities.get(id)
    }

    /// Fails with [`TspError::EmptyInstance`] when there is nothing to route.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.cities.is_empty() {
            return Err(TspError::EmptyInstance);
        }
        Ok(())
    }

    /// Euclidean distance between cities `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.cities[a].distance_to(&self.cities[b])
    }

    /// Length of the closed cycle described by `tour`.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidTour`] if `tour` is not a permutation of
    /// this instance's city ids.
    pub fn tour_length(&self, tour: &Tour) -> Result<f64> {
        tour.validate(self.len())?;
        Ok(self.cycle_length(tour.as_slice()))
    }

    /// Cycle length without validation. Callers guarantee `order` is a permutation.
    pub(crate) fn cycle_length(&self, order: &[usize]) -> f64 {
        match order {
            [] => 0.0,
            [first, ..] => {
                let open: f64 = order
                    .windows(2)
                    .map(|pair| self.distance(pair[0], pair[1]))
                    .sum();
                open + self.distance(order[order.len() - 1], *first)
            }
        }
    }

    /// Change in cycle length if `mv` were applied to `order`.
    ///
    /// Only the two edges at the ends of the reversed segment change. Reversing
    /// the whole tour leaves the cycle untouched.
    pub(crate) fn reversal_delta(&self, order: &[usize], mv: Move) -> f64 {
        let n = order.len();
        let (i, j) = (mv.first(), mv.second());
        if i == 0 && j == n - 1 {
            return 0.0;
        }
        let before = order[(i + n - 1) % n];
        let after = order[(j + 1) % n];
        let (start, end) = (order[i], order[j]);
        self.distance(before, end) + self.distance(start, after)
            - self.distance(before, start)
            - self.distance(end, after)
    }

    /// Largest distance between any two cities, used to calibrate annealing temperatures.
    pub fn max_pairwise_distance(&self) -> f64 {
        let n = self.len();
        let mut max = 0.0_f64;
        for a in 0..n {
            for b in (a + 1)..n {
                max = max.max(self.distance(a, b));
            }
        }
        max
    }
}
