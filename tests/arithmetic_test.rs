//! Tests for the checked arithmetic primitives

use rstest::rstest;

use combinatoria::config::ArithmeticLimits;
use combinatoria::domain::{ArithmeticError, ArithmeticResult, CheckedArithmetic, SafeArithmetic};

type Primitive = fn(&SafeArithmetic) -> ArithmeticResult<f64>;

#[rstest]
#[case::add(|m: &SafeArithmetic| m.add(3.0, 4.0), 7.0)]
#[case::subtract(|m: &SafeArithmetic| m.subtract(3.0, 4.0), -1.0)]
#[case::divide(|m: &SafeArithmetic| m.divide(0.0, 5.0), 0.0)]
#[case::multiply(|m: &SafeArithmetic| m.multiply(-3.0, 4.0), -12.0)]
#[case::power(|m: &SafeArithmetic| m.power(2.0, 10.0), 1024.0)]
#[case::power_negative_base_integer_exponent(|m: &SafeArithmetic| m.power(-2.0, 3.0), -8.0)]
#[case::power_fractional_exponent(|m: &SafeArithmetic| m.power(9.0, 0.5), 3.0)]
#[case::root(|m: &SafeArithmetic| m.root(2.0, 16.0), 4.0)]
#[case::odd_root_of_negative(|m: &SafeArithmetic| m.root(3.0, -27.0), -3.0)]
#[case::log_base(|m: &SafeArithmetic| m.log_base(2.0, 8.0), 3.0)]
#[case::log_base_fraction(|m: &SafeArithmetic| m.log_base(4.0, 2.0), 0.5)]
#[case::negate(|m: &SafeArithmetic| m.negate(5.0), -5.0)]
#[case::factorial(|m: &SafeArithmetic| m.factorial(5.0), 120.0)]
#[case::factorial_of_zero(|m: &SafeArithmetic| m.factorial(0.0), 1.0)]
#[case::factorial_near_integer(|m: &SafeArithmetic| m.factorial(3.0000000001), 6.0)]
#[case::square_root(|m: &SafeArithmetic| m.square_root(49.0), 7.0)]
#[case::natural_log(|m: &SafeArithmetic| m.natural_log(std::f64::consts::E), 1.0)]
#[case::log10(|m: &SafeArithmetic| m.log10(1000.0), 3.0)]
fn given_valid_operands_when_applying_primitive_then_returns_value(
    #[case] primitive: Primitive,
    #[case] expected: f64,
) {
    let arithmetic = SafeArithmetic::default();

    let value = primitive(&arithmetic).expect("primitive should succeed");

    assert!(
        (value - expected).abs() < 1e-9,
        "expected {expected}, got {value}"
    );
}

#[rstest]
#[case::divide_by_zero(|m: &SafeArithmetic| m.divide(5.0, 0.0), ArithmeticError::DivisionByZero)]
#[case::zero_to_negative_power(|m: &SafeArithmetic| m.power(0.0, -1.0), ArithmeticError::DivisionByZero)]
#[case::negative_base_fractional_exponent(
    |m: &SafeArithmetic| m.power(-8.0, 0.5),
    ArithmeticError::NonReal { operation: "power" }
)]
#[case::zeroth_root(|m: &SafeArithmetic| m.root(0.0, 5.0), ArithmeticError::DivisionByZero)]
#[case::even_root_of_negative(
    |m: &SafeArithmetic| m.root(2.0, -4.0),
    ArithmeticError::NonReal { operation: "root" }
)]
#[case::fractional_root_of_negative(
    |m: &SafeArithmetic| m.root(1.5, -4.0),
    ArithmeticError::NonReal { operation: "root" }
)]
#[case::factorial_of_fraction(|m: &SafeArithmetic| m.factorial(2.5), ArithmeticError::NonIntegerFactorial(2.5))]
#[case::factorial_of_negative(|m: &SafeArithmetic| m.factorial(-3.0), ArithmeticError::NegativeFactorial(-3.0))]
#[case::factorial_too_large(
    |m: &SafeArithmetic| m.factorial(21.0),
    ArithmeticError::FactorialOverflow { operand: 21.0, max: 20 }
)]
#[case::square_root_of_negative(
    |m: &SafeArithmetic| m.square_root(-4.0),
    ArithmeticError::NonReal { operation: "square-root" }
)]
#[case::log_of_zero(|m: &SafeArithmetic| m.natural_log(0.0), ArithmeticError::LogarithmDomain(0.0))]
#[case::log10_of_negative(|m: &SafeArithmetic| m.log10(-10.0), ArithmeticError::LogarithmDomain(-10.0))]
#[case::log_base_one(|m: &SafeArithmetic| m.log_base(1.0, 5.0), ArithmeticError::InvalidLogBase(1.0))]
#[case::log_base_negative(|m: &SafeArithmetic| m.log_base(-2.0, 5.0), ArithmeticError::InvalidLogBase(-2.0))]
#[case::log_of_negative_argument(|m: &SafeArithmetic| m.log_base(2.0, -1.0), ArithmeticError::LogarithmDomain(-1.0))]
#[case::sum_overflows_to_infinity(|m: &SafeArithmetic| m.add(f64::MAX, f64::MAX), ArithmeticError::NonFinite)]
#[case::power_overflows_to_infinity(|m: &SafeArithmetic| m.power(10.0, 400.0), ArithmeticError::NonFinite)]
#[case::product_beyond_magnitude(
    |m: &SafeArithmetic| m.multiply(1e7, 1e7),
    ArithmeticError::OutOfRange { value: 1e14, max: 1e12 }
)]
fn given_invalid_operands_when_applying_primitive_then_fails(
    #[case] primitive: Primitive,
    #[case] expected: ArithmeticError,
) {
    let arithmetic = SafeArithmetic::default();

    let result = primitive(&arithmetic);

    assert_eq!(result, Err(expected));
}

#[test]
fn given_custom_limits_when_applying_factorial_then_honors_max_operand() {
    // Arrange
    let arithmetic = SafeArithmetic::new(ArithmeticLimits {
        max_factorial_operand: 5,
        ..ArithmeticLimits::default()
    })
    .expect("valid limits");

    // Act & Assert
    assert_eq!(arithmetic.factorial(5.0), Ok(120.0));
    assert!(matches!(
        arithmetic.factorial(6.0),
        Err(ArithmeticError::FactorialOverflow { max: 5, .. })
    ));
}

#[test]
fn given_custom_magnitude_when_result_exceeds_it_then_fails() {
    // Arrange
    let arithmetic = SafeArithmetic::new(ArithmeticLimits {
        max_magnitude: 100.0,
        ..ArithmeticLimits::default()
    })
    .expect("valid limits");

    // Act & Assert
    assert_eq!(arithmetic.multiply(10.0, 10.0), Ok(100.0));
    assert!(matches!(
        arithmetic.power(2.0, 7.0),
        Err(ArithmeticError::OutOfRange { .. })
    ));
}

#[rstest]
#[case::tolerance_admits_halves(ArithmeticLimits { integer_tolerance: 0.7, ..ArithmeticLimits::default() }, "integer_tolerance")]
#[case::negative_tolerance(ArithmeticLimits { integer_tolerance: -0.1, ..ArithmeticLimits::default() }, "integer_tolerance")]
#[case::unbounded_factorial(ArithmeticLimits { max_factorial_operand: u32::MAX, ..ArithmeticLimits::default() }, "max_factorial_operand")]
#[case::infinite_magnitude(ArithmeticLimits { max_magnitude: f64::INFINITY, ..ArithmeticLimits::default() }, "max_magnitude")]
fn given_invalid_limits_when_building_arithmetic_then_rejects_them(
    #[case] limits: ArithmeticLimits,
    #[case] expected: &str,
) {
    // Act
    let result = SafeArithmetic::new(limits);

    // Assert
    assert_eq!(result.unwrap_err().name, expected);
}

#[test]
fn given_error_when_displayed_then_message_is_readable() {
    assert_eq!(ArithmeticError::DivisionByZero.to_string(), "division by zero");
    assert_eq!(
        ArithmeticError::NonReal { operation: "root" }.to_string(),
        "root has no real result"
    );
}
