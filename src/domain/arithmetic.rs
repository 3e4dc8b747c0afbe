//! Domain-checked arithmetic primitives
//!
//! Every primitive either returns a finite, real, in-range value or an
//! [`ArithmeticError`] explaining why the operation is undefined.

use tracing::trace;

use crate::domain::error::{ArithmeticError, ArithmeticResult, LimitError};
use crate::domain::limits::ArithmeticLimits;

/// Fallible scalar operations consulted by the combiner, one per operator.
pub trait CheckedArithmetic: Send + Sync {
    fn add(&self, a: f64, b: f64) -> ArithmeticResult<f64>;

    fn subtract(&self, a: f64, b: f64) -> ArithmeticResult<f64>;

    /// `dividend / divisor`
    fn divide(&self, dividend: f64, divisor: f64) -> ArithmeticResult<f64>;

    fn multiply(&self, a: f64, b: f64) -> ArithmeticResult<f64>;

    /// `base ^ exponent`
    fn power(&self, base: f64, exponent: f64) -> ArithmeticResult<f64>;

    /// `degree`-th root of `radicand`
    fn root(&self, degree: f64, radicand: f64) -> ArithmeticResult<f64>;

    /// Logarithm of `argument` in `base`
    fn log_base(&self, base: f64, argument: f64) -> ArithmeticResult<f64>;

    fn negate(&self, a: f64) -> ArithmeticResult<f64>;

    fn factorial(&self, a: f64) -> ArithmeticResult<f64>;

    fn square_root(&self, a: f64) -> ArithmeticResult<f64>;

    fn natural_log(&self, a: f64) -> ArithmeticResult<f64>;

    fn log10(&self, a: f64) -> ArithmeticResult<f64>;
}

/// Default [`CheckedArithmetic`] bounded by [`ArithmeticLimits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeArithmetic {
    limits: ArithmeticLimits,
}

impl SafeArithmetic {
    /// Fails if `limits` do not pass [`ArithmeticLimits::validate`].
    pub fn new(limits: ArithmeticLimits) -> Result<Self, LimitError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    pub fn limits(&self) -> &ArithmeticLimits {
        &self.limits
    }

    /// Nearest integer if `x` is within tolerance of it.
    fn as_integer(&self, x: f64) -> Option<f64> {
        let rounded = x.round();
        ((x - rounded).abs() <= self.limits.integer_tolerance).then_some(rounded)
    }

    fn checked(&self, value: f64) -> ArithmeticResult<f64> {
        if !value.is_finite() {
            return Err(ArithmeticError::NonFinite);
        }
        if value.abs() > self.limits.max_magnitude {
            return Err(ArithmeticError::OutOfRange {
                value,
                max: self.limits.max_magnitude,
            });
        }
        Ok(value)
    }
}

impl CheckedArithmetic for SafeArithmetic {
    fn add(&self, a: f64, b: f64) -> ArithmeticResult<f64> {
        self.checked(a + b)
    }

    fn subtract(&self, a: f64, b: f64) -> ArithmeticResult<f64> {
        self.checked(a - b)
    }

    fn divide(&self, dividend: f64, divisor: f64) -> ArithmeticResult<f64> {
        if divisor == 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked(dividend / divisor)
    }

    fn multiply(&self, a: f64, b: f64) -> ArithmeticResult<f64> {
        self.checked(a * b)
    }

    fn power(&self, base: f64, exponent: f64) -> ArithmeticResult<f64> {
        if base == 0.0 && exponent < 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        if base < 0.0 {
            let Some(exponent) = self.as_integer(exponent) else {
                return Err(ArithmeticError::NonReal { operation: "power" });
            };
            return self.checked(base.powf(exponent));
        }
        self.checked(base.powf(exponent))
    }

    fn root(&self, degree: f64, radicand: f64) -> ArithmeticResult<f64> {
        if degree == 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        if radicand < 0.0 {
            // only odd integer degrees have a real root of a negative number
            let odd = self
                .as_integer(degree)
                .is_some_and(|d| d.rem_euclid(2.0) == 1.0);
            if !odd {
                return Err(ArithmeticError::NonReal { operation: "root" });
            }
            return self.checked(-(-radicand).powf(degree.round().recip()));
        }
        self.checked(radicand.powf(degree.recip()))
    }

    fn log_base(&self, base: f64, argument: f64) -> ArithmeticResult<f64> {
        if argument <= 0.0 {
            return Err(ArithmeticError::LogarithmDomain(argument));
        }
        if base <= 0.0 || base == 1.0 {
            return Err(ArithmeticError::InvalidLogBase(base));
        }
        self.checked(argument.ln() / base.ln())
    }

    fn negate(&self, a: f64) -> ArithmeticResult<f64> {
        self.checked(-a)
    }

    fn factorial(&self, a: f64) -> ArithmeticResult<f64> {
        let Some(n) = self.as_integer(a) else {
            return Err(ArithmeticError::NonIntegerFactorial(a));
        };
        if n < 0.0 {
            return Err(ArithmeticError::NegativeFactorial(a));
        }
        let max = self.limits.max_factorial_operand;
        if n > f64::from(max) {
            return Err(ArithmeticError::FactorialOverflow { operand: a, max });
        }
        let result = (2..=n as u32).fold(1.0_f64, |acc, k| acc * f64::from(k));
        trace!("factorial: {}! = {}", n, result);
        self.checked(result)
    }

    fn square_root(&self, a: f64) -> ArithmeticResult<f64> {
        if a < 0.0 {
            return Err(ArithmeticError::NonReal {
                operation: "square-root",
            });
        }
        self.checked(a.sqrt())
    }

    fn natural_log(&self, a: f64) -> ArithmeticResult<f64> {
        if a <= 0.0 {
            return Err(ArithmeticError::LogarithmDomain(a));
        }
        self.checked(a.ln())
    }

    fn log10(&self, a: f64) -> ArithmeticResult<f64> {
        if a <= 0.0 {
            return Err(ArithmeticError::LogarithmDomain(a));
        }
        self.checked(a.log10())
    }
}
