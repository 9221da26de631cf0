use serde::{Deserialize, Serialize};

use crate::equality::{ValueEquality, DOUBLE_TOLERANCE, SINGLE_TOLERANCE};
use crate::error::{DiffError, DiffResult};

/// Float tolerances for the default comparator.
///
/// Every field is optional in TOML; missing fields keep their defaults.
///
/// ```toml
/// double_tolerance = 1e-9
/// single_tolerance = 1e-6
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualityConfig {
    pub double_tolerance: f64,
    pub single_tolerance: f32,
}

impl Default for EqualityConfig {
    fn default() -> Self {
        Self {
            double_tolerance: DOUBLE_TOLERANCE,
            single_tolerance: SINGLE_TOLERANCE,
        }
    }
}

impl EqualityConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| DiffError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Tolerances must be finite and non-negative.
    pub fn validate(&self) -> DiffResult<()> {
        if !self.double_tolerance.is_finite() || self.double_tolerance < 0.0 {
            return Err(DiffError::InvalidConfig(format!(
                "double_tolerance must be finite and non-negative, got {}",
                self.double_tolerance
            )));
        }
        if !self.single_tolerance.is_finite() || self.single_tolerance < 0.0 {
            return Err(DiffError::InvalidConfig(format!(
                "single_tolerance must be finite and non-negative, got {}",
                self.single_tolerance
            )));
        }
        Ok(())
    }

    pub fn equality(&self) -> ValueEquality {
        ValueEquality {
            double_tolerance: self.double_tolerance,
            single_tolerance: self.single_tolerance,
        }
    }
}

impl From<EqualityConfig> for ValueEquality {
    fn from(config: EqualityConfig) -> Self {
        config.equality()
    }
}
