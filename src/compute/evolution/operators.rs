//! Genetic operators: crossover, mutation and selection.
//!
//! Each operator kind is a trait with built-in implementations. Closures with
//! the matching signature implement the traits too, so custom operators can be
//! plugged into [`EvolutionEngine`](super::EvolutionEngine) without a wrapper
//! type.

use rand::seq::index;
use rand::{Rng, RngCore};

use super::parameter::Parameter;
use crate::schema::{
    ConfigError, CrossoverMethod, EvolutionError, Gene, Individual, check_probability,
};

// ============================================================================
// Crossover
// ============================================================================

/// Recombines two gene sequences of equal length in place.
pub trait Crossover {
    fn mate(&self, left: &mut [Gene], right: &mut [Gene], rng: &mut dyn RngCore);

    /// Check operator settings. Called once before every run.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl<F> Crossover for F
where
    F: Fn(&mut [Gene], &mut [Gene], &mut dyn RngCore),
{
    fn mate(&self, left: &mut [Gene], right: &mut [Gene], rng: &mut dyn RngCore) {
        self(left, right, rng)
    }
}

impl Crossover for CrossoverMethod {
    fn validate(&self) -> Result<(), ConfigError> {
        CrossoverMethod::validate(self)
    }

    fn mate(&self, left: &mut [Gene], right: &mut [Gene], rng: &mut dyn RngCore) {
        let len = left.len().min(right.len());
        if len < 2 {
            return;
        }

        match *self {
            CrossoverMethod::OnePoint => {
                let point = rng.gen_range(1..len);
                one_point_at(left, right, point);
            }
            CrossoverMethod::TwoPoint => {
                let mut start = rng.gen_range(1..=len);
                let mut end = rng.gen_range(1..len);
                if end >= start {
                    end += 1;
                } else {
                    std::mem::swap(&mut start, &mut end);
                }
                two_point_at(left, right, start, end);
            }
            CrossoverMethod::Uniform { swap_probability } => {
                for (a, b) in left.iter_mut().zip(right.iter_mut()) {
                    if rng.gen_bool(swap_probability) {
                        std::mem::swap(a, b);
                    }
                }
            }
        }
    }
}

/// Swap the tails of both sequences from `point` onwards.
pub fn one_point_at(left: &mut [Gene], right: &mut [Gene], point: usize) {
    let len = left.len().min(right.len());
    if point < len {
        left[point..len].swap_with_slice(&mut right[point..len]);
    }
}

/// Swap the segment `[start, end)` between both sequences.
pub fn two_point_at(left: &mut [Gene], right: &mut [Gene], start: usize, end: usize) {
    let end = end.min(left.len()).min(right.len());
    if start < end {
        left[start..end].swap_with_slice(&mut right[start..end]);
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Perturbs a gene sequence in place. Returns whether any gene changed.
///
/// `parameters` is index-aligned with `genes`.
pub trait Mutation {
    fn mutate(
        &self,
        genes: &mut [Gene],
        parameters: &[Box<dyn Parameter>],
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Check operator settings. Called once before every run.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl<F> Mutation for F
where
    F: Fn(&mut [Gene], &[Box<dyn Parameter>], &mut dyn RngCore) -> bool,
{
    fn mutate(
        &self,
        genes: &mut [Gene],
        parameters: &[Box<dyn Parameter>],
        rng: &mut dyn RngCore,
    ) -> bool {
        self(genes, parameters, rng)
    }
}

/// Per-gene random reset: each gene is resampled from its parameter with
/// the given probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomReset {
    pub probability: f64,
}

impl RandomReset {
    pub fn new(probability: f64) -> Result<Self, ConfigError> {
        check_probability("mutation_probability", probability)?;
        Ok(Self { probability })
    }
}

impl Mutation for RandomReset {
    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("mutation_probability", self.probability)
    }

    fn mutate(
        &self,
        genes: &mut [Gene],
        parameters: &[Box<dyn Parameter>],
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut changed = false;
        for (gene, parameter) in genes.iter_mut().zip(parameters) {
            if rng.gen_bool(self.probability) {
                *gene = parameter.sample(rng);
                changed = true;
            }
        }
        changed
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Picks `count` individuals (by index, repeats allowed) from an evaluated
/// population.
pub trait Selection {
    fn select(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, EvolutionError>;
}

impl<F> Selection for F
where
    F: Fn(&[Individual], usize, &mut dyn RngCore) -> Result<Vec<usize>, EvolutionError>,
{
    fn select(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, EvolutionError> {
        self(population, count, rng)
    }
}

/// Tournament selection.
///
/// Each tournament draws `size` distinct contestants and keeps the one with
/// the highest weighted fitness; the earliest drawn contestant wins ties.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    pub size: usize,
}

impl Tournament {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Selection for Tournament {
    fn select(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, EvolutionError> {
        let scores = weighted_scores(population)?;
        if scores.is_empty() {
            return Ok(Vec::new());
        }

        let size = self.size.clamp(1, scores.len());
        let mut winners = Vec::with_capacity(count);
        for _ in 0..count {
            let mut contestants = index::sample(rng, scores.len(), size).into_iter();
            let mut best_idx = contestants.next().unwrap_or(0);
            for idx in contestants {
                if rank(scores[idx]) > rank(scores[best_idx]) {
                    best_idx = idx;
                }
            }
            winners.push(best_idx);
        }
        Ok(winners)
    }
}

/// Weighted fitness of every individual, failing on the first unevaluated one.
pub fn weighted_scores(population: &[Individual]) -> Result<Vec<f64>, EvolutionError> {
    population
        .iter()
        .map(|individual| {
            individual
                .weighted_fitness()
                .ok_or(EvolutionError::UnevaluatedIndividual { id: individual.id })
        })
        .collect()
}

/// NaN ranks below every other score.
#[inline]
fn rank(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Index of the best individual by weighted fitness, earliest on ties.
pub fn best_index(population: &[Individual]) -> Result<Option<usize>, EvolutionError> {
    let scores = weighted_scores(population)?;
    let mut best: Option<usize> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if best.is_none_or(|b| rank(score) > rank(scores[b])) {
            best = Some(idx);
        }
    }
    Ok(best)
}
