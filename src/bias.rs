//! Per-container bias declarations for `--bias`
//!
//! A bias is a fixed handicap in seconds for one container, used when a
//! container does extra work outside the test files (e.g. running a linter).
//! Format: `index=seconds[,index=seconds...]`, e.g. `0=30,2=12.5`.

use crate::error::{Result, SplitError};
use tracing::debug;

/// One handicap per container, index-aligned with bucket indices
///
/// A `BiasVector` always has at least one entry, which is what makes it a
/// valid container count for the partitioner.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasVector {
    values: Vec<f64>,
}

impl BiasVector {
    /// All-zero biases for `containers` containers
    pub fn zeros(containers: usize) -> Result<Self> {
        Self::from_values(vec![0.0; containers])
    }

    /// Wrap explicit bias values; one finite value per container
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SplitError::config(
                "at least one container is required to split tests",
            ));
        }
        if let Some((index, seconds)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SplitError::config(format!(
                "bias for container {} is not a finite number: {}",
                index, seconds
            )));
        }
        Ok(Self { values })
    }

    /// Parse a `--bias` declaration for `containers` containers
    ///
    /// Indices without a declaration keep a bias of zero. When an index is
    /// declared more than once, the last declaration wins.
    ///
    /// # Example
    /// ```
    /// use split_tests::bias::BiasVector;
    ///
    /// let biases = BiasVector::parse("0=1,1=2.5", 3).unwrap();
    /// assert_eq!(biases.as_slice(), &[1.0, 2.5, 0.0]);
    /// ```
    pub fn parse(spec: &str, containers: usize) -> Result<Self> {
        let mut biases = Self::zeros(containers)?;

        for declaration in spec.split(',') {
            let parts: Vec<&str> = declaration.split('=').collect();
            if parts.len() != 2 {
                return Err(SplitError::config(format!(
                    "not a valid bias declaration: {}",
                    declaration
                )));
            }

            let index: i64 = parts[0].parse().map_err(|e| {
                SplitError::config(format!("failed to parse bias index: {}", e))
            })?;
            if index < 0 || index >= containers as i64 {
                return Err(SplitError::config(format!(
                    "bias index is not within the split number: {}",
                    index
                )));
            }

            let seconds: f64 = parts[1].parse().map_err(|e| {
                SplitError::config(format!("failed to parse bias time: {}", e))
            })?;
            if !seconds.is_finite() {
                return Err(SplitError::config(format!(
                    "failed to parse bias time: {} is not a finite number",
                    parts[1]
                )));
            }

            let slot = &mut biases.values[index as usize];
            if *slot != 0.0 {
                debug!(index, previous = *slot, seconds, "bias redeclared, keeping last value");
            }
            *slot = seconds;
        }

        Ok(biases)
    }

    /// Number of containers
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
