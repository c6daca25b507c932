//! Fitness evaluation for candidate gene sequences.
//!
//! The caller supplies the scoring logic through [`FitnessFunction`]; the
//! [`FitnessEvaluator`] checks its output against the objective weights and
//! turns it into a ranked [`Fitness`] record.

use crate::schema::{
    EvolutionError, Fitness, FitnessFailure, Gene, Individual, ObjectiveValues, ObjectiveWeights,
};

/// Caller-supplied scoring of a gene sequence.
///
/// Implemented for any closure `Fn(&[Gene]) -> Result<O, E>` where `O` is a
/// scalar or tuple of objective values and `E` converts into a boxed error.
pub trait FitnessFunction {
    fn score(&self, genes: &[Gene]) -> Result<ObjectiveValues, FitnessFailure>;
}

impl<F, O, E> FitnessFunction for F
where
    F: Fn(&[Gene]) -> Result<O, E>,
    O: Into<ObjectiveValues>,
    E: Into<FitnessFailure>,
{
    fn score(&self, genes: &[Gene]) -> Result<ObjectiveValues, FitnessFailure> {
        self(genes).map(Into::into).map_err(Into::into)
    }
}

/// Fitness evaluator bound to one run's objective weights.
pub struct FitnessEvaluator<'a> {
    function: &'a dyn FitnessFunction,
    weights: &'a ObjectiveWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Create a new fitness evaluator.
    pub fn new(function: &'a dyn FitnessFunction, weights: &'a ObjectiveWeights) -> Self {
        Self { function, weights }
    }

    /// Score an individual without modifying it.
    pub fn evaluate(&self, individual: &Individual) -> Result<Fitness, EvolutionError> {
        let ObjectiveValues(values) = self
            .function
            .score(&individual.genes)
            .map_err(|source| EvolutionError::FitnessEvaluation {
                id: individual.id,
                source,
            })?;

        if values.len() != self.weights.len() {
            return Err(EvolutionError::ArityMismatch {
                expected: self.weights.len(),
                actual: values.len(),
            });
        }

        let fitness = Fitness::new(values, self.weights);
        if fitness.values.iter().any(|v| !v.is_finite()) || fitness.weighted.is_nan() {
            return Err(EvolutionError::NonFiniteFitness {
                id: individual.id,
                values: fitness.values,
            });
        }
        Ok(fitness)
    }

    /// Evaluate every individual lacking fitness. Returns the number of evaluations.
    pub fn evaluate_invalid(&self, population: &mut [Individual]) -> Result<usize, EvolutionError> {
        let mut evaluations = 0;
        for individual in population.iter_mut().filter(|i| !i.is_evaluated()) {
            individual.fitness = Some(self.evaluate(individual)?);
            evaluations += 1;
        }
        Ok(evaluations)
    }
}
