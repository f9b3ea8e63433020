use serde::{Deserialize, Serialize};

use crate::element::{validate_element_size, ElementShape};
use crate::error::{Result, RmpError};
use crate::pipeline::types::OperatorKind;

/// Parameters of one operator run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RmpConfig {
    pub operator: OperatorKind,
    pub shape: ElementShape,
    /// Structuring element size, odd, in `3..=99`.
    pub se_size: u32,
    /// Number of orientations swept over a half turn.
    pub iterations: u32,
    /// Worker threads; 0 uses every available core.
    pub threads: usize,
}

impl Default for RmpConfig {
    fn default() -> Self {
        Self {
            operator: OperatorKind::Opening,
            shape: ElementShape::Disk,
            se_size: 3,
            iterations: 1,
            threads: 0,
        }
    }
}

impl RmpConfig {
    /// Build a config from text fields as typed by a user.
    pub fn from_strings(operator: &str, shape: &str, se_size: &str, iterations: &str) -> Result<Self> {
        let se_size = se_size
            .trim()
            .parse::<u32>()
            .map_err(|_| RmpError::InvalidValue {
                field: "structuring element size",
                value: se_size.to_string(),
            })?;
        let iterations = iterations
            .trim()
            .parse::<i64>()
            .map_err(|_| RmpError::InvalidValue {
                field: "number of rotations",
                value: iterations.to_string(),
            })?;
        let iterations = u32::try_from(iterations)
            .map_err(|_| RmpError::InvalidIterations(iterations))?;

        let config = Self {
            operator: operator.parse()?,
            shape: shape.parse()?,
            se_size,
            iterations,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        validate_element_size(self.se_size)?;
        if self.iterations < 1 {
            return Err(RmpError::InvalidIterations(i64::from(self.iterations)));
        }
        Ok(())
    }
}
