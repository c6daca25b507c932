//! Decision variables that can be sampled into genes.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::schema::Gene;

/// A named, randomly samplable decision variable.
///
/// The engine calls [`sample`](Parameter::sample) once per individual during
/// initialization and again whenever mutation resets a gene, always with the
/// run's seeded stream.
pub trait Parameter {
    /// Stable name, unique within a parameter list.
    fn name(&self) -> &str;

    /// Draw a legal value.
    fn sample(&self, rng: &mut dyn RngCore) -> Gene;
}

/// Invalid parameter definitions.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("Parameter {name}: lower bound {low} exceeds upper bound {high}")]
    InvalidRange { name: String, low: f64, high: f64 },
    #[error("Parameter {name}: bounds must be finite")]
    NonFiniteBounds { name: String },
    #[error("Parameter {name}: standard deviation must be positive and finite, got {std_dev}")]
    InvalidStdDev { name: String, std_dev: f64 },
    #[error("Parameter {name}: no choices given")]
    NoChoices { name: String },
}

/// Uniform integer in `[low, high]`.
#[derive(Debug, Clone)]
pub struct IntegerParameter {
    name: String,
    low: i64,
    high: i64,
}

impl IntegerParameter {
    pub fn new(name: impl Into<String>, low: i64, high: i64) -> Result<Self, ParameterError> {
        let name = name.into();
        if low > high {
            return Err(ParameterError::InvalidRange {
                name,
                low: low as f64,
                high: high as f64,
            });
        }
        Ok(Self { name, low, high })
    }
}

impl Parameter for IntegerParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Gene {
        Gene::Int(rng.gen_range(self.low..=self.high))
    }
}

/// Uniform real in `[low, high)`. Equal bounds always yield `low`.
#[derive(Debug, Clone)]
pub struct FloatParameter {
    name: String,
    low: f64,
    high: f64,
}

impl FloatParameter {
    pub fn new(name: impl Into<String>, low: f64, high: f64) -> Result<Self, ParameterError> {
        let name = name.into();
        if !low.is_finite() || !high.is_finite() {
            return Err(ParameterError::NonFiniteBounds { name });
        }
        if low > high {
            return Err(ParameterError::InvalidRange { name, low, high });
        }
        Ok(Self { name, low, high })
    }
}

impl Parameter for FloatParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Gene {
        if self.low == self.high {
            return Gene::Float(self.low);
        }
        Gene::Float(rng.gen_range(self.low..self.high))
    }
}

/// Gaussian real clamped to `bounds`.
#[derive(Debug, Clone)]
pub struct NormalParameter {
    name: String,
    normal: Normal<f64>,
    bounds: (f64, f64),
}

impl NormalParameter {
    pub fn new(
        name: impl Into<String>,
        mean: f64,
        std_dev: f64,
        bounds: (f64, f64),
    ) -> Result<Self, ParameterError> {
        let name = name.into();
        if !bounds.0.is_finite() || !bounds.1.is_finite() || !mean.is_finite() {
            return Err(ParameterError::NonFiniteBounds { name });
        }
        if bounds.0 > bounds.1 {
            return Err(ParameterError::InvalidRange {
                name,
                low: bounds.0,
                high: bounds.1,
            });
        }
        if !(std_dev > 0.0 && std_dev.is_finite()) {
            return Err(ParameterError::InvalidStdDev { name, std_dev });
        }
        let normal =
            Normal::new(mean, std_dev).map_err(|_| ParameterError::InvalidStdDev {
                name: name.clone(),
                std_dev,
            })?;
        Ok(Self {
            name,
            normal,
            bounds,
        })
    }
}

impl Parameter for NormalParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Gene {
        let value = self.normal.sample(rng);
        Gene::Float(value.clamp(self.bounds.0, self.bounds.1))
    }
}

/// Fair coin.
#[derive(Debug, Clone)]
pub struct BooleanParameter {
    name: String,
}

impl BooleanParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Parameter for BooleanParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Gene {
        Gene::Bool(rng.gen_bool(0.5))
    }
}

/// Uniform choice among fixed values.
#[derive(Debug, Clone)]
pub struct CategoricalParameter {
    name: String,
    choices: Vec<Gene>,
}

impl CategoricalParameter {
    pub fn new<I, G>(name: impl Into<String>, choices: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = G>,
        G: Into<Gene>,
    {
        let name = name.into();
        let choices: Vec<Gene> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(ParameterError::NoChoices { name });
        }
        Ok(Self { name, choices })
    }
}

impl Parameter for CategoricalParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Gene {
        let idx = rng.gen_range(0..self.choices.len());
        self.choices[idx].clone()
    }
}

/// Always yields the same value.
#[derive(Debug, Clone)]
pub struct ConstantParameter {
    name: String,
    value: Gene,
}

impl ConstantParameter {
    pub fn new(name: impl Into<String>, value: impl Into<Gene>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Parameter for ConstantParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, _rng: &mut dyn RngCore) -> Gene {
        self.value.clone()
    }
}
