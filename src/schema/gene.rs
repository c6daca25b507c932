//! Gene values produced by parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single gene value.
///
/// Every [`Parameter`](crate::compute::evolution::Parameter) produces one
/// variant; the engine never inspects the value beyond cloning and comparing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gene {
    /// Signed integer value.
    Int(i64),
    /// Real value.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Categorical label.
    Text(String),
}

impl Gene {
    /// Numeric view of the gene, if it has one.
    ///
    /// Booleans map to `0.0` / `1.0`; text has no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Gene::Int(v) => Some(*v as f64),
            Gene::Float(v) => Some(*v),
            Gene::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Gene::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Gene::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Gene::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Gene::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gene::Int(v) => write!(f, "{v}"),
            Gene::Float(v) => write!(f, "{v}"),
            Gene::Bool(v) => write!(f, "{v}"),
            Gene::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Gene {
    fn from(value: i64) -> Self {
        Gene::Int(value)
    }
}

impl From<i32> for Gene {
    fn from(value: i32) -> Self {
        Gene::Int(value as i64)
    }
}

impl From<f64> for Gene {
    fn from(value: f64) -> Self {
        Gene::Float(value)
    }
}

impl From<bool> for Gene {
    fn from(value: bool) -> Self {
        Gene::Bool(value)
    }
}

impl From<&str> for Gene {
    fn from(value: &str) -> Self {
        Gene::Text(value.to_string())
    }
}

impl From<String> for Gene {
    fn from(value: String) -> Self {
        Gene::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_view() {
        assert_eq!(Gene::Int(3).as_f64(), Some(3.0));
        assert_eq!(Gene::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Gene::from("a").as_f64(), None);
    }

    #[test]
    fn test_serialization() {
        let genes = vec![Gene::Int(1), Gene::Float(0.5), Gene::from("relu")];
        let json = serde_json::to_string(&genes).unwrap();
        let parsed: Vec<Gene> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, genes);
    }
}
