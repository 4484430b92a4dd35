//! # Island Genetic Algorithm
//!
//! The population is split into islands that evolve independently on a
//! worker pool. After every epoch but the last, each island's best record is
//! offered to the next island in ring order. The launcher returns the best
//! individual seen on any island.
//!
//! ## Example
//!
//! ```rust
//! use tspalg::evolution::{IslandLauncher, IslandOptions};
//! use tspalg::instance::Instance;
//! use tspalg::rng::RandomNumberGenerator;
//!
//! let instance = Instance::from_points(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (5.0, 5.0)]);
//! let options = IslandOptions::builder()
//!     .population_size(40)
//!     .islands(2)
//!     .epochs(3)
//!     .generations_per_epoch(20)
//!     .build();
//!
//! let launcher = IslandLauncher::new(options).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(5);
//! let solution = launcher.evolve(&instance, None, &mut rng).unwrap();
//! assert!(solution.tour.is_permutation_of(5));
//! assert_eq!(solution.history.len(), 3);
//! ```

pub mod island;
pub mod launcher;
pub mod options;

pub use island::{EpochReport, Individual};
pub use launcher::{migrate_ring, IslandLauncher};
pub use options::{IslandOptions, IslandOptionsBuilder, PopulationPolicy};
