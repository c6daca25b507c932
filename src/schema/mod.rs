//! Schema module - Configuration and data types for genetic algorithm runs.

mod config;
mod evolution;
mod gene;

pub use config::*;
pub use evolution::*;
pub use gene::*;

pub(crate) use config::check_probability;
