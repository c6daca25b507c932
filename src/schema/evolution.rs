//! Evolution data types: individuals, fitness records, run results.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Gene};
use crate::compute::evolution::LineageGraph;

// ============================================================================
// Objectives
// ============================================================================

/// Signed weights, one per objective.
///
/// Positive weights maximize the corresponding objective, negative weights
/// minimize it. Magnitudes scale the objective's contribution to the
/// weighted fitness used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectiveWeights(Vec<f64>);

impl ObjectiveWeights {
    /// Create validated weights.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, ConfigError> {
        let weights = Self(weights.into());
        weights.validate()?;
        Ok(weights)
    }

    /// Single maximized objective.
    pub fn maximize() -> Self {
        Self(vec![1.0])
    }

    /// Single minimized objective.
    pub fn minimize() -> Self {
        Self(vec![-1.0])
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Weighted sum of objective values.
    pub fn scalarize(&self, values: &[f64]) -> f64 {
        self.0.iter().zip(values).map(|(w, v)| w * v).sum()
    }

    /// Check that weights are non-empty and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::NoObjectives);
        }
        for (index, &value) in self.0.iter().enumerate() {
            if !value.is_finite() {
                return Err(ConfigError::InvalidWeight { index, value });
            }
        }
        Ok(())
    }
}

/// Raw objective values returned by a fitness function.
///
/// Scalars and tuples convert into this so fitness closures can return
/// whatever shape is natural for the problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveValues(pub Vec<f64>);

impl From<f64> for ObjectiveValues {
    fn from(value: f64) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<f64>> for ObjectiveValues {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for ObjectiveValues {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl From<(f64, f64)> for ObjectiveValues {
    fn from((a, b): (f64, f64)) -> Self {
        Self(vec![a, b])
    }
}

impl From<(f64, f64, f64)> for ObjectiveValues {
    fn from((a, b, c): (f64, f64, f64)) -> Self {
        Self(vec![a, b, c])
    }
}

/// Evaluated fitness of an individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    /// Objective values as returned by the fitness function.
    pub values: Vec<f64>,
    /// Weighted sum used for ranking. Higher is better.
    pub weighted: f64,
}

impl Fitness {
    pub fn new(values: Vec<f64>, weights: &ObjectiveWeights) -> Self {
        let weighted = weights.scalarize(&values);
        Self { values, weighted }
    }
}

// ============================================================================
// Individuals
// ============================================================================

/// One candidate solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Stable identifier, renewed whenever an operator modifies the genes.
    pub id: u64,
    /// One gene per parameter, in parameter order.
    pub genes: Vec<Gene>,
    /// Fitness, unset until evaluated and cleared by modifying operators.
    pub fitness: Option<Fitness>,
}

impl Individual {
    pub fn new(id: u64, genes: Vec<Gene>) -> Self {
        Self {
            id,
            genes,
            fitness: None,
        }
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Weighted fitness, if evaluated.
    #[inline]
    pub fn weighted_fitness(&self) -> Option<f64> {
        self.fitness.as_ref().map(|f| f.weighted)
    }

    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }
}

// ============================================================================
// Progress and results
// ============================================================================

/// Fitness summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index (0 is the initial population).
    pub generation: usize,
    /// Fitness evaluations performed for this generation.
    pub evaluations: usize,
    /// Mean weighted fitness.
    pub mean_fitness: f64,
    /// Maximum weighted fitness.
    pub max_fitness: f64,
    /// Minimum weighted fitness.
    pub min_fitness: f64,
    /// Standard deviation of weighted fitness.
    pub std_fitness: f64,
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionPhase {
    /// No population yet.
    Uninitialized,
    /// Initial population built and evaluated.
    Initialized,
    /// Generations are being produced.
    Running { generation: usize },
    /// All configured generations completed.
    Terminated,
}

/// Snapshot handed to progress callbacks at each generation boundary.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    pub phase: EvolutionPhase,
    pub stats: &'a GenerationStats,
    pub population: &'a [Individual],
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResult {
    /// Best individual of the final population.
    pub best: Individual,
    /// Objective values of the best individual.
    pub best_fitness: Vec<f64>,
    /// One entry per generation, starting with generation 0.
    pub statistics: Vec<GenerationStats>,
    /// Ancestry of every individual created during the run.
    pub lineage: LineageGraph,
    /// Seed the run was started from.
    pub seed: u64,
}

// ============================================================================
// Errors
// ============================================================================

/// Error raised by a fitness function.
pub type FitnessFailure = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort an evolution run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Fitness function returned {actual} objective values but {expected} weights are configured")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Individual {id} has no fitness assigned")]
    UnevaluatedIndividual { id: u64 },
    #[error("Selection returned an invalid pool: {0}")]
    InvalidSelection(String),
    #[error("Individual {id} has non-finite objective values {values:?}")]
    NonFiniteFitness { id: u64, values: Vec<f64> },
    #[error("Population is empty")]
    EmptyPopulation,
    #[error("Fitness evaluation failed for individual {id}: {source}")]
    FitnessEvaluation {
        id: u64,
        #[source]
        source: FitnessFailure,
    },
    #[error("Run cancelled after generation {generation}")]
    Cancelled { generation: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_validation() {
        assert!(ObjectiveWeights::new(vec![1.0, -0.5]).is_ok());
        assert!(matches!(
            ObjectiveWeights::new(Vec::<f64>::new()),
            Err(ConfigError::NoObjectives)
        ));
        assert!(matches!(
            ObjectiveWeights::new(vec![1.0, f64::NAN]),
            Err(ConfigError::InvalidWeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_weighted_fitness() {
        let weights = ObjectiveWeights::new(vec![1.0, -2.0]).unwrap();
        let fitness = Fitness::new(vec![3.0, 0.5], &weights);
        assert!((fitness.weighted - 2.0).abs() < 1e-12);

        let fitness = Fitness::new(vec![4.0], &ObjectiveWeights::minimize());
        assert_eq!(fitness.weighted, -4.0);
    }

    #[test]
    fn test_objective_value_shapes() {
        assert_eq!(ObjectiveValues::from(1.0).0, vec![1.0]);
        assert_eq!(ObjectiveValues::from((1.0, 2.0)).0, vec![1.0, 2.0]);
        assert_eq!(ObjectiveValues::from([1.0, 2.0, 3.0]).0.len(), 3);
    }

    #[test]
    fn test_invalidate_fitness() {
        let mut individual = Individual::new(0, vec![Gene::Int(1)]);
        assert_eq!(individual.weighted_fitness(), None);

        individual.fitness = Some(Fitness::new(vec![2.0], &ObjectiveWeights::maximize()));
        assert_eq!(individual.weighted_fitness(), Some(2.0));

        individual.invalidate_fitness();
        assert!(!individual.is_evaluated());
    }
}
