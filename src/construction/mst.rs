//! # Minimum Spanning Tree Construction
//!
//! Prim's algorithm grows a spanning tree from city 0 with an `O(n)` key scan
//! per step. A depth-first preorder walk of the tree then lists every city
//! once; closing that list into a cycle gives a tour at most twice the MST
//! weight.

use tracing::{debug, instrument};

use super::TourConstructor;
use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::optimizer::Solution;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// An undirected, weighted tree edge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// A minimum spanning tree over the cities of an instance.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    edges: Vec<Edge>,
    weight: f64,
    cities: usize,
}

impl SpanningTree {
    /// Runs Prim's algorithm starting from city 0.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyInstance`] for an instance without cities.
    pub fn prim(instance: &Instance) -> Result<Self> {
        instance.ensure_not_empty()?;
        let n = instance.len();

        let mut key = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut in_tree = vec![false; n];
        key[0] = 0.0;

        for _ in 0..n {
            let mut u = None;
            let mut min = f64::INFINITY;
            for v in 0..n {
                if !in_tree[v] && (u.is_none() || key[v] < min) {
                    min = key[v];
                    u = Some(v);
                }
            }
            let Some(u) = u else { break };
            in_tree[u] = true;

            for v in 0..n {
                if in_tree[v] {
                    continue;
                }
                let weight = instance.distance(u, v);
                if weight < key[v] {
                    key[v] = weight;
                    parent[v] = Some(u);
                }
            }
        }

        let edges: Vec<Edge> = (0..n)
            .filter_map(|v| {
                parent[v].map(|p| Edge {
                    from: p,
                    to: v,
                    weight: key[v],
                })
            })
            .collect();
        let weight = edges.iter().map(|e| e.weight).sum();

        Ok(Self {
            edges,
            weight,
            cities: n,
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total weight of the tree.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Neighbor lists, in edge order.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.cities];
        for edge in &self.edges {
            adjacency[edge.from].push(edge.to);
            adjacency[edge.to].push(edge.from);
        }
        adjacency
    }

    /// Depth-first preorder walk from `start`.
    ///
    /// Neighbors are visited in adjacency order, the same order a recursive
    /// walk would take.
    pub fn preorder(&self, start: usize) -> Result<Tour> {
        if start >= self.cities {
            return Err(TspError::Configuration(format!(
                "start vertex {} is outside an instance of {} cities",
                start, self.cities
            )));
        }
        let adjacency = self.adjacency();
        let mut visited = vec![false; self.cities];
        let mut order = Vec::with_capacity(self.cities);
        let mut stack = vec![start];

        while let Some(city) = stack.pop() {
            if visited[city] {
                continue;
            }
            visited[city] = true;
            order.push(city);
            stack.extend(adjacency[city].iter().rev().filter(|&&next| !visited[next]));
        }

        Tour::new(order, self.cities)
    }
}

/// Which city the preorder walk starts from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartVertex {
    /// Always start from this city.
    Fixed(usize),
    /// Draw the start city uniformly for every construction.
    Random,
}

impl Default for StartVertex {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

/// Builds tours by walking a minimum spanning tree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct MstConstructor {
    start: StartVertex,
}

impl MstConstructor {
    /// A constructor that walks the tree from city 0.
    pub fn new() -> Self {
        Self {
            start: StartVertex::default(),
        }
    }

    pub fn with_start(start: StartVertex) -> Self {
        Self { start }
    }

    /// Builds the tree and walks it from `start`.
    pub fn construct_from(&self, instance: &Instance, start: usize) -> Result<Solution> {
        let tree = SpanningTree::prim(instance)?;
        debug!(weight = tree.weight(), start, "built minimum spanning tree");
        let tour = tree.preorder(start)?;
        Ok(Solution::new(instance, tour))
    }
}

impl TourConstructor for MstConstructor {
    #[instrument(name = "mst", skip_all, fields(cities = instance.len()))]
    fn construct(&self, instance: &Instance, rng: &mut RandomNumberGenerator) -> Result<Solution> {
        instance.ensure_not_empty()?;
        let start = match self.start {
            StartVertex::Fixed(city) => city,
            StartVertex::Random => rng.index(instance.len()),
        };
        self.construct_from(instance, start)
    }
}
