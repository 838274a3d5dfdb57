//! Core engine types: RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{Designations, ShuffleConfig, DEFAULT_CARDS_TO_DRAW};
pub use error::{CatalogError, PersistError, SolveError};
pub use rng::{ShuffleRng, ShuffleRngState};
