//! Compute module - Evolution engine, operators, and run bookkeeping.

pub mod evolution;

pub use evolution::{EvolutionEngine, FitnessFunction, LineageGraph, Parameter, evolve};
