//! libevolve - Configurable genetic algorithm engine.
//!
//! This crate optimizes user-defined fitness functions over typed,
//! randomly samplable parameters. A run keeps a population of candidate
//! solutions, varies it with crossover and mutation, selects with tournament
//! selection, and records statistics and a lineage graph along the way.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, genes, individuals, results, and errors
//! - `compute`: Parameters, operators, lineage, statistics, and the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use libevolve::{
//!     schema::{GaConfig, Gene, ObjectiveWeights},
//!     compute::{evolution::FloatParameter, Parameter, evolve},
//! };
//!
//! // Minimize the sphere function over three variables
//! let parameters: Vec<Box<dyn Parameter>> = (0..3)
//!     .map(|i| {
//!         Box::new(FloatParameter::new(format!("x{i}"), -5.12, 5.12).unwrap())
//!             as Box<dyn Parameter>
//!     })
//!     .collect();
//! let sphere = |genes: &[Gene]| -> Result<f64, String> {
//!     Ok(genes.iter().filter_map(Gene::as_f64).map(|x| x * x).sum())
//! };
//!
//! let config = GaConfig::two_point_tournament().with_seed(7);
//! let result = evolve(config, &parameters, &sphere, &ObjectiveWeights::minimize()).unwrap();
//!
//! println!("Best: {:?} -> {:?}", result.best.genes, result.best_fitness);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, FitnessFunction, LineageGraph, Parameter, evolve};
pub use schema::{EvolutionError, EvolutionResult, GaConfig, Gene, ObjectiveWeights};
