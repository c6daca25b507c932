//! Genetic algorithm over user-defined parameters.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Parameters** (`parameter`): Named decision variables that sample genes
//! - **Fitness Functions** (`fitness`): Pluggable scoring of gene sequences
//! - **Operators** (`operators`): Crossover, mutation, and selection
//! - **Genome Operations** (`genome`): Seeded random stream and gene sampling
//! - **Lineage** (`lineage`): Parent/child graph of every operator event
//! - **Statistics** (`stats`): Per-generation fitness summaries
//! - **Search** (`search`): The generational evolution engine
//!
//! # Example
//!
//! ```rust,no_run
//! use libevolve::compute::evolution::{EvolutionEngine, IntegerParameter, Parameter};
//! use libevolve::schema::{GaConfig, Gene, ObjectiveWeights};
//!
//! let parameters: Vec<Box<dyn Parameter>> = vec![
//!     Box::new(IntegerParameter::new("x", 0, 10).unwrap()),
//!     Box::new(IntegerParameter::new("y", 0, 10).unwrap()),
//! ];
//! let fitness = |genes: &[Gene]| -> Result<f64, String> {
//!     Ok(genes.iter().filter_map(Gene::as_f64).sum())
//! };
//!
//! let mut engine = EvolutionEngine::new(GaConfig::classic().with_seed(1)).unwrap();
//! let result = engine
//!     .run_with_callback(&parameters, &fitness, &ObjectiveWeights::maximize(), |report| {
//!         println!("Generation {}: max fitness = {:.3}",
//!             report.stats.generation, report.stats.max_fitness);
//!     })
//!     .unwrap();
//!
//! println!("Best genes: {:?}", result.best.genes);
//! println!("Lineage size: {}", result.lineage.len());
//! ```
//!
//! # Operators
//!
//! - `CrossoverMethod`: One-point, two-point, and uniform crossover
//! - `RandomReset`: Per-gene resampling from the gene's parameter
//! - `Tournament`: Tournament selection on weighted fitness
//!
//! Closures with the matching signature can replace any of them.

mod fitness;
mod genome;
mod lineage;
mod operators;
mod parameter;
mod search;
mod stats;

pub use fitness::{FitnessEvaluator, FitnessFunction};
pub use genome::GenomeRng;
pub use lineage::{GeneticOperator, LineageGraph, LineageNode};
pub use operators::{
    Crossover, Mutation, RandomReset, Selection, Tournament, best_index, one_point_at,
    two_point_at, weighted_scores,
};
pub use parameter::{
    BooleanParameter, CategoricalParameter, ConstantParameter, FloatParameter, IntegerParameter,
    NormalParameter, Parameter, ParameterError,
};
pub use search::{EvolutionEngine, evolve, initialize_population};
pub use stats::StatisticsCollector;
