//! Operator toggles and arithmetic thresholds

use serde::{Deserialize, Serialize};

use crate::domain::error::LimitError;

/// Largest factorial operand whose result still fits in an `f64`.
pub const MAX_REPRESENTABLE_FACTORIAL: u32 = 170;

/// Toggles for the optional operator families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OperatorSettings {
    /// Root (both directions) and square root
    pub enable_root_log_operations: bool,
    /// Log-base (both directions), natural log and log-base-10
    pub enable_logarithm_operations: bool,
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            enable_root_log_operations: true,
            enable_logarithm_operations: true,
        }
    }
}

/// Thresholds enforced by the checked arithmetic.
///
/// Only validated limits reach [`SafeArithmetic`](crate::domain::SafeArithmetic).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArithmeticLimits {
    /// Results with a larger absolute value are rejected
    pub max_magnitude: f64,
    /// Largest integer accepted by factorial
    pub max_factorial_operand: u32,
    /// Distance from the nearest integer still treated as integral
    pub integer_tolerance: f64,
}

impl Default for ArithmeticLimits {
    fn default() -> Self {
        Self {
            max_magnitude: 1e12,
            max_factorial_operand: 20,
            integer_tolerance: 1e-9,
        }
    }
}

impl ArithmeticLimits {
    /// Reject limits the checked arithmetic cannot honour.
    pub fn validate(&self) -> Result<(), LimitError> {
        if !self.max_magnitude.is_finite() || self.max_magnitude <= 0.0 {
            return Err(LimitError::new(
                "max_magnitude",
                format!("{} must be finite and positive", self.max_magnitude),
            ));
        }
        // half-way or more would let 2.5 pass as an integer
        if !(0.0..0.5).contains(&self.integer_tolerance) {
            return Err(LimitError::new(
                "integer_tolerance",
                format!("{} must be in [0, 0.5)", self.integer_tolerance),
            ));
        }
        if self.max_factorial_operand > MAX_REPRESENTABLE_FACTORIAL {
            return Err(LimitError::new(
                "max_factorial_operand",
                format!(
                    "{} exceeds {}",
                    self.max_factorial_operand, MAX_REPRESENTABLE_FACTORIAL
                ),
            ));
        }
        Ok(())
    }
}
