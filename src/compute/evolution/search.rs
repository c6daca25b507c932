//! Generational evolution loop.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::schema::{
    ConfigError, EvolutionError, EvolutionPhase, EvolutionResult, GaConfig, GenerationReport,
    Individual, ObjectiveWeights,
};

use super::fitness::{FitnessEvaluator, FitnessFunction};
use super::genome::GenomeRng;
use super::lineage::{GeneticOperator, LineageGraph};
use super::operators::{Crossover, Mutation, RandomReset, Selection, Tournament, best_index};
use super::parameter::Parameter;
use super::stats::StatisticsCollector;

/// Build `size` unevaluated individuals with ids `0..size`.
pub fn initialize_population(
    parameters: &[Box<dyn Parameter>],
    size: usize,
    rng: &mut GenomeRng,
) -> Vec<Individual> {
    (0..size)
        .map(|id| Individual::new(id as u64, rng.random_genes(parameters)))
        .collect()
}

/// Run a genetic algorithm with the built-in operators.
pub fn evolve(
    config: GaConfig,
    parameters: &[Box<dyn Parameter>],
    fitness: &dyn FitnessFunction,
    weights: &ObjectiveWeights,
) -> Result<EvolutionResult, EvolutionError> {
    EvolutionEngine::new(config)?.evolve(parameters, fitness, weights)
}

/// State owned by a single run.
struct Run<'a> {
    parameters: &'a [Box<dyn Parameter>],
    evaluator: FitnessEvaluator<'a>,
    rng: GenomeRng,
    population: Vec<Individual>,
    lineage: LineageGraph,
    statistics: StatisticsCollector,
    next_id: u64,
}

impl Run<'_> {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: GaConfig,
    seed: u64,
    crossover: Box<dyn Crossover + Send + Sync>,
    mutation: Box<dyn Mutation + Send + Sync>,
    selection: Box<dyn Selection + Send + Sync>,
    phase: EvolutionPhase,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create a new evolution engine with the operators named by `config`.
    pub fn new(config: GaConfig) -> Result<Self, EvolutionError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);

        Ok(Self {
            crossover: Box::new(config.crossover),
            mutation: Box::new(RandomReset::new(config.mutation_probability)?),
            selection: Box::new(Tournament::new(config.tournament_size)),
            config,
            seed,
            phase: EvolutionPhase::Uninitialized,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replace the crossover operator.
    pub fn with_crossover(mut self, crossover: impl Crossover + Send + Sync + 'static) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    /// Replace the mutation operator.
    pub fn with_mutation(mut self, mutation: impl Mutation + Send + Sync + 'static) -> Self {
        self.mutation = Box::new(mutation);
        self
    }

    /// Replace the selection operator.
    pub fn with_selection(mut self, selection: impl Selection + Send + Sync + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Seed every run of this engine starts from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Get cancellation handle. Checked between generations only.
    ///
    /// The flag is never cleared by the engine: once set, every later run
    /// fails with [`EvolutionError::Cancelled`] until the caller stores
    /// `false` again.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run evolution (blocking).
    pub fn evolve(
        &mut self,
        parameters: &[Box<dyn Parameter>],
        fitness: &dyn FitnessFunction,
        weights: &ObjectiveWeights,
    ) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(parameters, fitness, weights, |_| {})
    }

    /// Run evolution, reporting after the initial population and after every
    /// completed generation.
    pub fn run_with_callback<F>(
        &mut self,
        parameters: &[Box<dyn Parameter>],
        fitness: &dyn FitnessFunction,
        weights: &ObjectiveWeights,
        mut callback: F,
    ) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&GenerationReport<'_>),
    {
        validate_inputs(parameters, weights)?;
        self.crossover.validate()?;
        self.mutation.validate()?;
        self.phase = EvolutionPhase::Uninitialized;

        log::info!(
            "Starting evolution: {} parameters, {} objectives, population {}, {} generations, seed {}",
            parameters.len(),
            weights.len(),
            self.config.population_size,
            self.config.nb_generations,
            self.seed
        );

        let mut run = Run {
            parameters,
            evaluator: FitnessEvaluator::new(fitness, weights),
            rng: GenomeRng::new(self.seed),
            population: Vec::with_capacity(self.config.population_size),
            lineage: LineageGraph::new(),
            statistics: StatisticsCollector::new(),
            next_id: 0,
        };

        // Initialize
        let evaluations = self.initialize(&mut run)?;
        self.phase = EvolutionPhase::Initialized;
        let stats = run.statistics.record(evaluations, &run.population)?;
        log::debug!(
            "Generation 0: mean={:.4} max={:.4}",
            stats.mean_fitness,
            stats.max_fitness
        );
        callback(&GenerationReport {
            phase: self.phase,
            stats,
            population: &run.population,
        });

        // Evolution loop
        for generation in 1..=self.config.nb_generations {
            if self.cancelled.load(Ordering::Relaxed) {
                log::info!("Evolution cancelled after generation {}", generation - 1);
                return Err(EvolutionError::Cancelled {
                    generation: generation - 1,
                });
            }

            self.phase = EvolutionPhase::Running { generation };
            let evaluations = self.step_generation(&mut run, generation)?;

            let stats = run.statistics.record(evaluations, &run.population)?;
            log::debug!(
                "Generation {}: evals={} mean={:.4} max={:.4}",
                generation,
                evaluations,
                stats.mean_fitness,
                stats.max_fitness
            );
            callback(&GenerationReport {
                phase: self.phase,
                stats,
                population: &run.population,
            });
        }
        self.phase = EvolutionPhase::Terminated;

        let (best, best_fitness) = take_best(run.population)?;

        log::info!(
            "Evolution finished: best individual {} with fitness {:?}",
            best.id,
            best_fitness
        );

        Ok(EvolutionResult {
            best,
            best_fitness,
            statistics: run.statistics.into_records(),
            lineage: run.lineage,
            seed: self.seed,
        })
    }

    /// Build and evaluate the initial population.
    fn initialize(&self, run: &mut Run<'_>) -> Result<usize, EvolutionError> {
        run.population =
            initialize_population(run.parameters, self.config.population_size, &mut run.rng);
        run.next_id = run.population.len() as u64;

        for individual in &run.population {
            run.lineage.record_initial(individual);
        }

        run.evaluator.evaluate_invalid(&mut run.population)
    }

    /// Produce and evaluate the next generation. Returns the number of evaluations.
    fn step_generation(&self, run: &mut Run<'_>, generation: usize) -> Result<usize, EvolutionError> {
        let size = self.config.population_size;

        // Selection
        let chosen = self.selection.select(&run.population, size, run.rng.core())?;
        if chosen.len() != size {
            return Err(EvolutionError::InvalidSelection(format!(
                "expected {} individuals, got {}",
                size,
                chosen.len()
            )));
        }
        let mut offspring = chosen
            .into_iter()
            .map(|idx| {
                run.population.get(idx).cloned().ok_or_else(|| {
                    EvolutionError::InvalidSelection(format!(
                        "index {} out of range for population of {}",
                        idx,
                        run.population.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Crossover on adjacent pairs
        for pair in offspring.chunks_exact_mut(2) {
            if !run.rng.chance(self.config.crossover_probability) {
                continue;
            }
            let [left, right] = pair else {
                continue;
            };
            let parents = vec![left.id, right.id];

            self.crossover
                .mate(&mut left.genes, &mut right.genes, run.rng.core());

            left.invalidate_fitness();
            left.id = run.next_id();
            run.lineage
                .record(generation, GeneticOperator::Crossover, parents.clone(), left);

            right.invalidate_fitness();
            right.id = run.next_id();
            run.lineage.record(
                generation,
                GeneticOperator::Crossover,
                vec![parents[1], parents[0]],
                right,
            );
        }

        // Mutation
        for individual in &mut offspring {
            if self
                .mutation
                .mutate(&mut individual.genes, run.parameters, run.rng.core())
            {
                let parent = individual.id;
                individual.invalidate_fitness();
                individual.id = run.next_id();
                run.lineage
                    .record(generation, GeneticOperator::Mutation, vec![parent], individual);
            }
        }

        let evaluations = run.evaluator.evaluate_invalid(&mut offspring)?;
        run.population = offspring;
        Ok(evaluations)
    }
}

/// Remove the best individual from the final population.
fn take_best(mut population: Vec<Individual>) -> Result<(Individual, Vec<f64>), EvolutionError> {
    let best_idx = best_index(&population)?.ok_or(EvolutionError::EmptyPopulation)?;
    let best = population.swap_remove(best_idx);
    let best_fitness = best
        .fitness
        .as_ref()
        .map(|f| f.values.clone())
        .ok_or(EvolutionError::UnevaluatedIndividual { id: best.id })?;
    Ok((best, best_fitness))
}

/// Check the per-run inputs before any evolution starts.
fn validate_inputs(
    parameters: &[Box<dyn Parameter>],
    weights: &ObjectiveWeights,
) -> Result<(), ConfigError> {
    if parameters.is_empty() {
        return Err(ConfigError::NoParameters);
    }
    let mut names = HashSet::with_capacity(parameters.len());
    for parameter in parameters {
        if !names.insert(parameter.name()) {
            return Err(ConfigError::DuplicateParameter(parameter.name().to_string()));
        }
    }
    weights.validate()
}
