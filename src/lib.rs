pub mod breeding;
pub mod construction;
pub mod error;
pub mod evolution;
pub mod instance;
pub mod local_search;
pub mod optimizer;
pub mod rng;
pub mod selection;
pub mod tour;

// Re-export commonly used types for convenience
pub use construction::{MstConstructor, RandomSampling, TourConstructor};
pub use error::{OptionExt, Result, TspError};
pub use evolution::{IslandLauncher, IslandOptions};
pub use instance::{City, Instance};
pub use local_search::{HillClimbing, SimulatedAnnealing, TabuSearch};
pub use optimizer::{Optimizer, Solution};
pub use rng::RandomNumberGenerator;
pub use tour::{Move, Tour};
