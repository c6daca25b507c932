//! Per-generation fitness statistics.

use super::operators::weighted_scores;
use crate::schema::{EvolutionError, GenerationStats, Individual};

impl GenerationStats {
    /// Summarize the weighted fitness of an evaluated population.
    pub fn from_population(
        generation: usize,
        evaluations: usize,
        population: &[Individual],
    ) -> Result<Self, EvolutionError> {
        let scores = weighted_scores(population)?;
        if scores.is_empty() {
            return Ok(Self {
                generation,
                evaluations,
                mean_fitness: 0.0,
                max_fitness: 0.0,
                min_fitness: 0.0,
                std_fitness: 0.0,
            });
        }

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            generation,
            evaluations,
            mean_fitness: mean,
            max_fitness: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_fitness: scores.iter().copied().fold(f64::INFINITY, f64::min),
            std_fitness: variance.sqrt(),
        })
    }
}

/// Append-only log of generation statistics.
#[derive(Debug, Clone, Default)]
pub struct StatisticsCollector {
    records: Vec<GenerationStats>,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize `population` as the next generation and return the new record.
    pub fn record(
        &mut self,
        evaluations: usize,
        population: &[Individual],
    ) -> Result<&GenerationStats, EvolutionError> {
        let stats = GenerationStats::from_population(self.records.len(), evaluations, population)?;
        self.records.push(stats);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn latest(&self) -> Option<&GenerationStats> {
        self.records.last()
    }

    pub fn records(&self) -> &[GenerationStats] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GenerationStats> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Fitness, Gene, ObjectiveWeights};

    fn population(scores: &[f64]) -> Vec<Individual> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut individual = Individual::new(i as u64, vec![Gene::Int(0)]);
                individual.fitness = Some(Fitness::new(vec![s], &ObjectiveWeights::maximize()));
                individual
            })
            .collect()
    }

    #[test]
    fn test_summary_values() {
        let stats = GenerationStats::from_population(3, 4, &population(&[1.0, 2.0, 3.0, 6.0]))
            .unwrap();

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.evaluations, 4);
        assert!((stats.mean_fitness - 3.0).abs() < 1e-12);
        assert_eq!(stats.max_fitness, 6.0);
        assert_eq!(stats.min_fitness, 1.0);
        assert!((stats.std_fitness - 3.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_collector_numbers_generations() {
        let mut collector = StatisticsCollector::new();
        collector.record(2, &population(&[1.0, 2.0])).unwrap();
        let latest = collector.record(1, &population(&[5.0, 2.0])).unwrap();

        assert_eq!(latest.generation, 1);
        assert_eq!(latest.max_fitness, 5.0);
        assert_eq!(collector.records().len(), 2);
    }

    #[test]
    fn test_unevaluated_population_rejected() {
        let mut collector = StatisticsCollector::new();
        let unevaluated = vec![Individual::new(4, vec![Gene::Int(0)])];

        assert!(matches!(
            collector.record(1, &unevaluated),
            Err(EvolutionError::UnevaluatedIndividual { id: 4 })
        ));
        assert!(collector.latest().is_none());
    }
}
