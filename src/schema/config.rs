//! Configuration types for genetic algorithm runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level genetic algorithm configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of generations to run after the initial population.
    #[serde(default = "default_nb_generations")]
    pub nb_generations: usize,
    /// Probability of resampling each gene (0.0-1.0).
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Probability of recombining each adjacent pair (0.0-1.0).
    #[serde(default = "default_crossover_probability")]
    pub crossover_probability: f64,
    /// Number of contestants per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Built-in crossover operator.
    #[serde(default)]
    pub crossover: CrossoverMethod,
    /// Random seed for reproducibility. Drawn from entropy when unset.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            nb_generations: default_nb_generations(),
            mutation_probability: default_mutation_probability(),
            crossover_probability: default_crossover_probability(),
            tournament_size: default_tournament_size(),
            crossover: CrossoverMethod::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    10
}
fn default_nb_generations() -> usize {
    10
}
fn default_mutation_probability() -> f64 {
    0.2
}
fn default_crossover_probability() -> f64 {
    0.5
}
fn default_tournament_size() -> usize {
    3
}

/// Crossover operator applied to adjacent pairs of the selected pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method")]
pub enum CrossoverMethod {
    /// Swap the tails after a single cut point.
    #[default]
    OnePoint,
    /// Swap the segment between two cut points.
    TwoPoint,
    /// Swap each gene independently.
    Uniform {
        #[serde(default = "default_swap_probability")]
        swap_probability: f64,
    },
}

fn default_swap_probability() -> f64 {
    0.5
}

impl CrossoverMethod {
    /// Check the method's own parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            CrossoverMethod::OnePoint | CrossoverMethod::TwoPoint => Ok(()),
            CrossoverMethod::Uniform { swap_probability } => {
                check_probability("swap_probability", swap_probability)
            }
        }
    }
}

impl GaConfig {
    /// One-point crossover over ten generations.
    pub fn classic() -> Self {
        Self {
            crossover: CrossoverMethod::OnePoint,
            nb_generations: 10,
            ..Default::default()
        }
    }

    /// Two-point crossover with tournament selection over twenty generations.
    pub fn two_point_tournament() -> Self {
        Self {
            crossover: CrossoverMethod::TwoPoint,
            nb_generations: 20,
            tournament_size: 3,
            ..Default::default()
        }
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if self.nb_generations == 0 {
            return Err(ConfigError::InvalidGenerations);
        }
        check_probability("mutation_probability", self.mutation_probability)?;
        check_probability("crossover_probability", self.crossover_probability)?;
        self.crossover.validate()?;
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                size: self.tournament_size,
                population: self.population_size,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be positive")]
    InvalidPopulationSize,
    #[error("Generation count must be positive")]
    InvalidGenerations,
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Tournament size {size} must be between 1 and the population size {population}")]
    InvalidTournamentSize { size: usize, population: usize },
    #[error("At least one parameter is required")]
    NoParameters,
    #[error("Parameter name {0:?} is used more than once")]
    DuplicateParameter(String),
    #[error("At least one objective weight is required")]
    NoObjectives,
    #[error("Objective weight {index} is not finite: {value}")]
    InvalidWeight { index: usize, value: f64 },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::classic().validate().is_ok());
        assert!(GaConfig::two_point_tournament().validate().is_ok());
    }

    #[test]
    fn test_probability_bounds() {
        let config = GaConfig {
            mutation_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "mutation_probability",
                ..
            })
        ));

        let config = GaConfig {
            crossover_probability: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GaConfig {
            crossover: CrossoverMethod::Uniform {
                swap_probability: 2.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_counts_must_be_positive() {
        let config = GaConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPopulationSize)
        ));

        let config = GaConfig {
            nb_generations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGenerations)
        ));
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let config = GaConfig {
            population_size: 4,
            tournament_size: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTournamentSize {
                size: 5,
                population: 4
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GaConfig::from_json_str(r#"{"population_size": 20, "crossover": {"method": "TwoPoint"}}"#)
                .unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.nb_generations, 10);
        assert_eq!(config.crossover, CrossoverMethod::TwoPoint);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nb_generations": 3, "random_seed": 7}}"#).unwrap();

        let config = GaConfig::load(file.path()).unwrap();
        assert_eq!(config.nb_generations, 3);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tournament_size": 50}}"#).unwrap();

        assert!(matches!(
            GaConfig::load(file.path()),
            Err(ConfigError::InvalidTournamentSize { .. })
        ));
    }

    #[test]
    fn test_serialization() {
        let config = GaConfig::two_point_tournament().with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.nb_generations, config.nb_generations);
        assert_eq!(parsed.crossover, config.crossover);
        assert_eq!(parsed.random_seed, Some(3));
    }
}
