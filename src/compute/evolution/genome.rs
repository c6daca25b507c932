//! Random stream and gene-sequence utilities for evolutionary search.
//!
//! Provides random generation of gene sequences plus the probability draws the
//! operators need, all from one seeded stream.

use rand::prelude::*;

use super::parameter::Parameter;
use crate::schema::Gene;

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample one gene per parameter, in parameter order.
    pub fn random_genes(&mut self, parameters: &[Box<dyn Parameter>]) -> Vec<Gene> {
        parameters
            .iter()
            .map(|p| p.sample(&mut self.rng))
            .collect()
    }

    /// Bernoulli draw. `probability` must lie in `[0, 1]`.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Underlying stream, for operators and parameters.
    #[inline]
    pub fn core(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}
