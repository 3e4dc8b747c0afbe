//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Reasons a checked arithmetic primitive refuses to produce a value.
///
/// These never leave the combination operators: a failed primitive simply
/// means no node is produced for that operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{operation} has no real result")]
    NonReal { operation: &'static str },

    #[error("factorial of non-integer: {0}")]
    NonIntegerFactorial(f64),

    #[error("factorial of negative number: {0}")]
    NegativeFactorial(f64),

    #[error("factorial operand too large: {operand} (max {max})")]
    FactorialOverflow { operand: f64, max: u32 },

    #[error("logarithm of non-positive number: {0}")]
    LogarithmDomain(f64),

    #[error("invalid logarithm base: {0}")]
    InvalidLogBase(f64),

    #[error("result is not finite")]
    NonFinite,

    #[error("result out of range: {value} (max magnitude {max})")]
    OutOfRange { value: f64, max: f64 },
}

/// Result type for checked arithmetic primitives.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// A threshold the checked arithmetic cannot honour.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid limit {name}: {reason}")]
pub struct LimitError {
    pub name: &'static str,
    pub reason: String,
}

impl LimitError {
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}
